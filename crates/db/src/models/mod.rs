pub mod performance_result;
