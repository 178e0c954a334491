use std::sync::Arc;

use crate::api::ApiClient;
use crate::eligibility::eligible_employees;
use crate::errors::ApiError;
use crate::forms::{fail, reject, FormError, FormStatus};
use crate::models::{Employee, NewReview, Rating, Review};
use crate::notify::{Notice, Notifier};

pub const REVIEW_CREATED_MESSAGE: &str = "Review has been submitted successfully";
pub const REVIEW_FAILED_MESSAGE: &str = "Failed to submit review. Please try again.";
pub const NO_ELIGIBLE_MESSAGE: &str = "No eligible employees to review this job. \
Employees can only review jobs they are assigned to, and only once.";

type OnSubmit = Box<dyn FnMut(Review) + Send>;

enum Reviewers {
    Loading,
    Failed(ApiError),
    Loaded(Vec<Employee>),
}

/// What the form shows; the variants are mutually exclusive.
#[derive(Debug, PartialEq)]
pub enum ReviewFormView<'a> {
    Loading,
    Failed(&'a ApiError),
    NoEligible,
    Ready(&'a [Employee]),
}

/// Review submission for one job, gated on reviewer eligibility.
///
/// The created review is handed to the caller's callback; the form keeps no
/// list of reviews itself.
pub struct ReviewForm {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    job_id: i64,
    reviewers: Reviewers,
    employee_id: Option<i64>,
    rating: Rating,
    text: String,
    status: FormStatus,
    on_submit: OnSubmit,
}

impl ReviewForm {
    pub fn new(
        api: ApiClient,
        notifier: Arc<dyn Notifier>,
        job_id: i64,
        on_submit: impl FnMut(Review) + Send + 'static,
    ) -> Self {
        Self {
            api,
            notifier,
            job_id,
            reviewers: Reviewers::Loading,
            employee_id: None,
            rating: Rating::default(),
            text: String::new(),
            status: FormStatus::Idle,
            on_submit: Box::new(on_submit),
        }
    }

    pub fn job_id(&self) -> i64 {
        self.job_id
    }

    /// Computes the eligible reviewers. Call once after construction.
    pub async fn load(&mut self) {
        self.reviewers = Reviewers::Loading;
        self.reviewers = match eligible_employees(&self.api, self.job_id).await {
            Ok(employees) => Reviewers::Loaded(employees),
            Err(err) => Reviewers::Failed(err),
        };
    }

    pub fn view(&self) -> ReviewFormView<'_> {
        match &self.reviewers {
            Reviewers::Loading => ReviewFormView::Loading,
            Reviewers::Failed(err) => ReviewFormView::Failed(err),
            Reviewers::Loaded(employees) if employees.is_empty() => ReviewFormView::NoEligible,
            Reviewers::Loaded(employees) => ReviewFormView::Ready(employees),
        }
    }

    pub fn select_employee(&mut self, employee_id: i64) -> Result<(), FormError> {
        let eligible = match &self.reviewers {
            Reviewers::Loaded(employees) => employees.iter().any(|e| e.id == employee_id),
            _ => false,
        };
        if !eligible {
            return Err(FormError::NotEligible(employee_id));
        }
        self.employee_id = Some(employee_id);
        Ok(())
    }

    pub fn selected_employee(&self) -> Option<i64> {
        self.employee_id
    }

    pub fn set_rating(&mut self, rating: Rating) {
        self.rating = rating;
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub async fn submit(&mut self) -> Result<Review, FormError> {
        let review = self
            .build()
            .map_err(|e| reject(self.notifier.as_ref(), e))?;

        self.status = FormStatus::Submitting;
        match self.api.create_review(&review).await {
            Ok(created) => {
                // the reviewer has used their one review for this job
                if let Reviewers::Loaded(employees) = &mut self.reviewers {
                    employees.retain(|e| e.id != review.employee_id);
                }
                self.employee_id = None;
                self.text.clear();
                self.rating = Rating::default();
                self.status = FormStatus::Idle;
                self.notifier.notify(Notice::success(REVIEW_CREATED_MESSAGE));
                (self.on_submit)(created.clone());
                Ok(created)
            }
            Err(err) => Err(fail(
                &mut self.status,
                self.notifier.as_ref(),
                err,
                REVIEW_FAILED_MESSAGE,
            )),
        }
    }

    fn build(&self) -> Result<NewReview, FormError> {
        let mut missing = Vec::new();
        if self.employee_id.is_none() {
            missing.push("Employee");
        }
        if self.text.trim().is_empty() {
            missing.push("Review Text");
        }

        match self.employee_id {
            Some(employee_id) if missing.is_empty() => Ok(NewReview {
                job_id: self.job_id,
                employee_id,
                rating: self.rating,
                text: self.text.trim().to_string(),
            }),
            _ => Err(FormError::MissingFields(missing)),
        }
    }
}
