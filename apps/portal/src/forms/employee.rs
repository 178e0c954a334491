use std::sync::Arc;

use crate::api::ApiClient;
use crate::forms::{fail, missing_fields, parse_number, reject, FormError, FormStatus};
use crate::models::{Employee, NewEmployee};
use crate::notify::{Notice, Notifier};

pub const EMPLOYEE_CREATED_MESSAGE: &str = "Employee has been added successfully";
pub const EMPLOYEE_FAILED_MESSAGE: &str = "Failed to add employee. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeField {
    Name,
    Email,
    Skills,
    /// Optional; blank means unassigned.
    JobId,
}

impl EmployeeField {
    pub const REQUIRED: [EmployeeField; 3] = [
        EmployeeField::Name,
        EmployeeField::Email,
        EmployeeField::Skills,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EmployeeField::Name => "Name",
            EmployeeField::Email => "Email",
            EmployeeField::Skills => "Skills",
            EmployeeField::JobId => "Job ID",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct EmployeeValues {
    name: String,
    email: String,
    skills: String,
    job_id: String,
}

pub struct EmployeeForm {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    values: EmployeeValues,
    status: FormStatus,
}

impl EmployeeForm {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            values: EmployeeValues::default(),
            status: FormStatus::Idle,
        }
    }

    pub fn set(&mut self, field: EmployeeField, value: impl Into<String>) {
        let v = &mut self.values;
        let slot = match field {
            EmployeeField::Name => &mut v.name,
            EmployeeField::Email => &mut v.email,
            EmployeeField::Skills => &mut v.skills,
            EmployeeField::JobId => &mut v.job_id,
        };
        *slot = value.into();
        if self.status.error().is_some() {
            self.status = FormStatus::Idle;
        }
    }

    pub fn value(&self, field: EmployeeField) -> &str {
        let v = &self.values;
        match field {
            EmployeeField::Name => &v.name,
            EmployeeField::Email => &v.email,
            EmployeeField::Skills => &v.skills,
            EmployeeField::JobId => &v.job_id,
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// `Ok(None)` when the server accepted without echoing the record.
    pub async fn submit(&mut self) -> Result<Option<Employee>, FormError> {
        let employee = self
            .build()
            .map_err(|e| reject(self.notifier.as_ref(), e))?;

        self.status = FormStatus::Submitting;
        match self.api.create_employee(&employee).await {
            Ok(created) => {
                self.values = EmployeeValues::default();
                self.status = FormStatus::Idle;
                self.notifier.notify(Notice::success(EMPLOYEE_CREATED_MESSAGE));
                Ok(created)
            }
            Err(err) => Err(fail(
                &mut self.status,
                self.notifier.as_ref(),
                err,
                EMPLOYEE_FAILED_MESSAGE,
            )),
        }
    }

    fn build(&self) -> Result<NewEmployee, FormError> {
        missing_fields(&EmployeeField::REQUIRED, EmployeeField::label, |f| {
            !self.value(f).trim().is_empty()
        })?;

        let v = &self.values;
        let job_id = match v.job_id.trim() {
            "" => None,
            raw => Some(parse_number(EmployeeField::JobId.label(), raw)?),
        };

        Ok(NewEmployee {
            name: v.name.trim().to_string(),
            email: v.email.trim().to_string(),
            skills: v.skills.trim().to_string(),
            job_id,
        })
    }
}
