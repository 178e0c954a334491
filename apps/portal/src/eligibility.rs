//! Which employees may review a job.
//!
//! An employee is eligible when assigned to the job and the server says they
//! have not reviewed it yet. The per-employee checks run concurrently and are
//! joined before filtering; the result keeps the order of the employee listing.

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::errors::ApiError;
use crate::models::Employee;

/// Employees assigned to `job_id`, in listing order.
pub fn assigned_to(employees: Vec<Employee>, job_id: i64) -> Vec<Employee> {
    employees
        .into_iter()
        .filter(|e| e.is_assigned_to(job_id))
        .collect()
}

/// Fails only if the employee listing fails. A failed individual check
/// counts as "not eligible".
pub async fn eligible_employees(api: &ApiClient, job_id: i64) -> Result<Vec<Employee>, ApiError> {
    let candidates = assigned_to(api.list_employees().await?, job_id);
    if candidates.is_empty() {
        return Ok(candidates);
    }

    let mut checks = JoinSet::new();
    for (index, employee) in candidates.iter().enumerate() {
        let api = api.clone();
        let employee_id = employee.id;
        checks.spawn(async move { (index, employee_id, api.can_review(employee_id, job_id).await) });
    }

    let mut verdicts = vec![false; candidates.len()];
    while let Some(joined) = checks.join_next().await {
        match joined {
            Ok((index, _, Ok(can_review))) => verdicts[index] = can_review,
            Ok((_, employee_id, Err(err))) => {
                warn!("Eligibility check for employee {employee_id} on job {job_id} failed: {err}");
            }
            Err(e) => warn!("Eligibility check task failed: {e}"),
        }
    }

    let eligible: Vec<Employee> = candidates
        .into_iter()
        .zip(verdicts)
        .filter_map(|(employee, ok)| ok.then_some(employee))
        .collect();

    debug!("{} eligible reviewer(s) for job {job_id}", eligible.len());
    Ok(eligible)
}
