//! Load-test client for the recommendation endpoint.
//!
//! - `generator` - randomized request bodies plus fixed edge cases
//! - `runner` - fires them concurrently and times each one
//! - `report` - latency and recommendation statistics

pub mod generator;
pub mod report;
pub mod runner;

pub use generator::{generate_requests, LoadRequest};
pub use report::{LoadTestReport, RequestRecord};
pub use runner::{run_load_test, LoadTestConfig, LoadTestRun, RequestStat};
