pub mod limit;
pub mod log;
pub mod rate_limit;
