mod performance_result_repo;

pub use performance_result_repo::PerformanceResultRepo;
