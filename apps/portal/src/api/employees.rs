use crate::api::ApiClient;
use crate::errors::ApiError;
use crate::models::{Employee, Job, NewEmployee};

impl ApiClient {
    /// GET /employees
    pub async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.get_json("/employees").await
    }

    /// GET /employees/{id}
    pub async fn get_employee(&self, id: i64) -> Result<Employee, ApiError> {
        self.get_json(&format!("/employees/{id}")).await
    }

    /// POST /employees. `None` on a plain-text acknowledgement.
    pub async fn create_employee(
        &self,
        employee: &NewEmployee,
    ) -> Result<Option<Employee>, ApiError> {
        self.post_acknowledged("/employees", employee).await
    }

    /// GET /employees/{id}/jobs
    pub async fn jobs_for_employee(&self, id: i64) -> Result<Vec<Job>, ApiError> {
        self.get_json(&format!("/employees/{id}/jobs")).await
    }
}
