use std::sync::Arc;

use crate::api::ApiClient;
use crate::forms::{
    fail, missing_fields, parse_amount, parse_number, reject, FormError, FormStatus,
};
use crate::models::{CompanyRef, Job, NewJob};
use crate::notify::{Notice, Notifier};

pub const JOB_CREATED_MESSAGE: &str = "Job has been added successfully";
pub const JOB_FAILED_MESSAGE: &str = "Failed to add job. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    Title,
    CompanyId,
    Location,
    MinSalary,
    MaxSalary,
    Description,
}

impl JobField {
    pub const ALL: [JobField; 6] = [
        JobField::Title,
        JobField::CompanyId,
        JobField::Location,
        JobField::MinSalary,
        JobField::MaxSalary,
        JobField::Description,
    ];

    pub fn label(self) -> &'static str {
        match self {
            JobField::Title => "Job Title",
            JobField::CompanyId => "Company ID",
            JobField::Location => "Location",
            JobField::MinSalary => "Min Salary",
            JobField::MaxSalary => "Max Salary",
            JobField::Description => "Job Description",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct JobValues {
    title: String,
    company_id: String,
    location: String,
    min_salary: String,
    max_salary: String,
    description: String,
}

/// Collects a new job posting and submits it tied to a company id.
pub struct JobForm {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    values: JobValues,
    status: FormStatus,
}

impl JobForm {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            values: JobValues::default(),
            status: FormStatus::Idle,
        }
    }

    /// Typing into a field clears a previous submission error.
    pub fn set(&mut self, field: JobField, value: impl Into<String>) {
        *self.slot(field) = value.into();
        if self.status.error().is_some() {
            self.status = FormStatus::Idle;
        }
    }

    pub fn value(&self, field: JobField) -> &str {
        let v = &self.values;
        match field {
            JobField::Title => &v.title,
            JobField::CompanyId => &v.company_id,
            JobField::Location => &v.location,
            JobField::MinSalary => &v.min_salary,
            JobField::MaxSalary => &v.max_salary,
            JobField::Description => &v.description,
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_blank(&self) -> bool {
        self.values == JobValues::default()
    }

    pub async fn submit(&mut self) -> Result<Option<Job>, FormError> {
        let job = self
            .build()
            .map_err(|e| reject(self.notifier.as_ref(), e))?;

        self.status = FormStatus::Submitting;
        match self.api.create_job(&job).await {
            Ok(created) => {
                self.values = JobValues::default();
                self.status = FormStatus::Idle;
                self.notifier.notify(Notice::success(JOB_CREATED_MESSAGE));
                Ok(created)
            }
            Err(err) => Err(fail(
                &mut self.status,
                self.notifier.as_ref(),
                err,
                JOB_FAILED_MESSAGE,
            )),
        }
    }

    fn build(&self) -> Result<NewJob, FormError> {
        missing_fields(&JobField::ALL, JobField::label, |f| {
            !self.value(f).trim().is_empty()
        })?;

        let v = &self.values;
        Ok(NewJob {
            title: v.title.trim().to_string(),
            description: v.description.trim().to_string(),
            location: v.location.trim().to_string(),
            min_salary: parse_amount(JobField::MinSalary.label(), &v.min_salary)?,
            max_salary: parse_amount(JobField::MaxSalary.label(), &v.max_salary)?,
            company: CompanyRef::id(parse_number(JobField::CompanyId.label(), &v.company_id)?),
            requirements: None,
        })
    }

    fn slot(&mut self, field: JobField) -> &mut String {
        let v = &mut self.values;
        match field {
            JobField::Title => &mut v.title,
            JobField::CompanyId => &mut v.company_id,
            JobField::Location => &mut v.location,
            JobField::MinSalary => &mut v.min_salary,
            JobField::MaxSalary => &mut v.max_salary,
            JobField::Description => &mut v.description,
        }
    }
}
