//! Client for the job-portal API: typed endpoints, form and list
//! controllers, and the reviewer-eligibility filter.

pub mod api;
pub mod cli;
pub mod config;
pub mod eligibility;
pub mod errors;
pub mod forms;
pub mod http;
pub mod job_list;
pub mod models;
pub mod notify;

#[cfg(test)]
mod testing;

pub use api::ApiClient;
pub use errors::ApiError;
