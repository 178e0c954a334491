use tracing::info;

use crate::api::ApiClient;
use crate::errors::ApiError;
use crate::models::{Company, NewCompany};

impl ApiClient {
    /// POST /companies. `None` when the server acknowledges without echoing
    /// the company.
    pub async fn create_company(
        &self,
        company: &NewCompany,
    ) -> Result<Option<Company>, ApiError> {
        let created: Option<Company> = self.post_acknowledged("/companies", company).await?;
        match &created {
            Some(c) => info!("Registered company {} '{}'", c.id, c.name),
            None => info!("Registered company '{}'", company.name),
        }
        Ok(created)
    }
}
