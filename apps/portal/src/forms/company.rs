use std::sync::Arc;

use crate::api::ApiClient;
use crate::forms::{fail, missing_fields, reject, FormError, FormStatus};
use crate::models::{Company, NewCompany};
use crate::notify::{Notice, Notifier};

pub const COMPANY_CREATED_MESSAGE: &str = "Company has been registered successfully";
pub const COMPANY_FAILED_MESSAGE: &str = "Failed to register company. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyField {
    Name,
    Description,
}

impl CompanyField {
    pub const ALL: [CompanyField; 2] = [CompanyField::Name, CompanyField::Description];

    pub fn label(self) -> &'static str {
        match self {
            CompanyField::Name => "Company Name",
            CompanyField::Description => "Description",
        }
    }
}

pub struct CompanyForm {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    name: String,
    description: String,
    status: FormStatus,
}

impl CompanyForm {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            name: String::new(),
            description: String::new(),
            status: FormStatus::Idle,
        }
    }

    pub fn set(&mut self, field: CompanyField, value: impl Into<String>) {
        match field {
            CompanyField::Name => self.name = value.into(),
            CompanyField::Description => self.description = value.into(),
        }
        if self.status.error().is_some() {
            self.status = FormStatus::Idle;
        }
    }

    pub fn value(&self, field: CompanyField) -> &str {
        match field {
            CompanyField::Name => &self.name,
            CompanyField::Description => &self.description,
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// `Ok(None)` when the server accepted without echoing the record.
    pub async fn submit(&mut self) -> Result<Option<Company>, FormError> {
        missing_fields(&CompanyField::ALL, CompanyField::label, |f| {
            !self.value(f).trim().is_empty()
        })
        .map_err(|e| reject(self.notifier.as_ref(), e))?;

        let company = NewCompany {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
        };

        self.status = FormStatus::Submitting;
        match self.api.create_company(&company).await {
            Ok(created) => {
                self.name.clear();
                self.description.clear();
                self.status = FormStatus::Idle;
                self.notifier.notify(Notice::success(COMPANY_CREATED_MESSAGE));
                Ok(created)
            }
            Err(err) => Err(fail(
                &mut self.status,
                self.notifier.as_ref(),
                err,
                COMPANY_FAILED_MESSAGE,
            )),
        }
    }
}
