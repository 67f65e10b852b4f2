pub mod home;
pub mod performance;
pub mod system;
