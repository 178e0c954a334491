use tracing::info;

use crate::api::ApiClient;
use crate::errors::ApiError;
use crate::models::{Job, NewJob};

impl ApiClient {
    /// GET /jobs
    pub async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.get_json("/jobs").await
    }

    /// GET /jobs/{id}
    pub async fn get_job(&self, id: i64) -> Result<Job, ApiError> {
        self.get_json(&format!("/jobs/{id}")).await
    }

    /// POST /jobs. `None` when the server only acknowledges with text.
    pub async fn create_job(&self, job: &NewJob) -> Result<Option<Job>, ApiError> {
        let created = self.post_acknowledged("/jobs", job).await?;
        info!("Created job '{}'", job.title);
        Ok(created)
    }

    /// PUT /jobs/{id} with the full resource.
    pub async fn update_job(&self, job: &Job) -> Result<Option<Job>, ApiError> {
        let updated = self.put_acknowledged(&format!("/jobs/{}", job.id), job).await?;
        info!("Updated job {}", job.id);
        Ok(updated)
    }

    /// DELETE /jobs/{id}
    pub async fn delete_job(&self, id: i64) -> Result<(), ApiError> {
        self.delete_path(&format!("/jobs/{id}")).await?;
        info!("Deleted job {id}");
        Ok(())
    }
}
