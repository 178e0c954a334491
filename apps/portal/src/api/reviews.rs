use crate::api::ApiClient;
use crate::errors::ApiError;
use crate::models::{NewReview, Review};

impl ApiClient {
    /// GET /reviews
    pub async fn list_reviews(&self) -> Result<Vec<Review>, ApiError> {
        self.get_json("/reviews").await
    }

    /// GET /jobs/{jobId}/reviews
    pub async fn reviews_for_job(&self, job_id: i64) -> Result<Vec<Review>, ApiError> {
        self.get_json(&format!("/jobs/{job_id}/reviews")).await
    }

    /// POST /reviews
    pub async fn create_review(&self, review: &NewReview) -> Result<Review, ApiError> {
        self.post_json("/reviews", review).await
    }

    /// GET /employees/{id}/can-review/{jobId}
    ///
    /// The server's answer to "assigned to this job and not yet reviewed it".
    pub async fn can_review(&self, employee_id: i64, job_id: i64) -> Result<bool, ApiError> {
        self.get_json(&format!("/employees/{employee_id}/can-review/{job_id}"))
            .await
    }
}
