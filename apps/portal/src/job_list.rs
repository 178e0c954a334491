//! Job listing with delete and edit.
//!
//! Local rows change only after the server has acknowledged the delete or
//! update; a failed call leaves them exactly as they were.

use std::sync::Arc;

use tracing::warn;

use crate::api::ApiClient;
use crate::errors::ApiError;
use crate::models::Job;
use crate::notify::{Notice, Notifier};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch jobs";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete job";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update job";
pub const DELETE_CONFIRM_PROMPT: &str = "Are you sure you want to delete this job?";

enum Rows {
    Loading,
    Failed(String),
    Loaded(Vec<Job>),
}

#[derive(Debug, PartialEq)]
pub enum JobListView<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Populated(&'a [Job]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The confirmation was declined; nothing was sent.
    Declined,
    /// No row with that id is listed; nothing was sent.
    NotListed,
}

pub struct JobList {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    rows: Rows,
    /// Local copy of the row being edited.
    editing: Option<Job>,
}

impl JobList {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            rows: Rows::Loading,
            editing: None,
        }
    }

    pub async fn load(&mut self) {
        self.rows = Rows::Loading;
        self.rows = match self.api.list_jobs().await {
            Ok(jobs) => Rows::Loaded(jobs),
            Err(err) => {
                warn!("Fetching jobs failed: {err}");
                Rows::Failed(FETCH_FAILED_MESSAGE.to_string())
            }
        };
    }

    pub fn view(&self) -> JobListView<'_> {
        match &self.rows {
            Rows::Loading => JobListView::Loading,
            Rows::Failed(message) => JobListView::Error(message),
            Rows::Loaded(jobs) if jobs.is_empty() => JobListView::Empty,
            Rows::Loaded(jobs) => JobListView::Populated(jobs),
        }
    }

    pub fn jobs(&self) -> &[Job] {
        match &self.rows {
            Rows::Loaded(jobs) => jobs,
            _ => &[],
        }
    }

    pub fn find(&self, id: i64) -> Option<&Job> {
        self.jobs().iter().find(|j| j.id == id)
    }

    /// Asks `confirm` first, then deletes on the server and drops the row.
    pub async fn delete(
        &mut self,
        id: i64,
        confirm: impl FnOnce(&Job) -> bool,
    ) -> Result<DeleteOutcome, ApiError> {
        let Some(job) = self.find(id) else {
            return Ok(DeleteOutcome::NotListed);
        };
        if !confirm(job) {
            return Ok(DeleteOutcome::Declined);
        }

        if let Err(err) = self.api.delete_job(id).await {
            self.notifier.notify(Notice::error(DELETE_FAILED_MESSAGE));
            return Err(err);
        }

        if let Rows::Loaded(jobs) = &mut self.rows {
            jobs.retain(|j| j.id != id);
        }
        if self.editing.as_ref().is_some_and(|j| j.id == id) {
            self.editing = None;
        }
        Ok(DeleteOutcome::Deleted)
    }

    /// Opens the editor on a copy of the row. Returns the draft to mutate.
    pub fn begin_edit(&mut self, id: i64) -> Option<&mut Job> {
        let draft = self.find(id)?.clone();
        self.editing = Some(draft);
        self.editing.as_mut()
    }

    pub fn draft(&self) -> Option<&Job> {
        self.editing.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut Job> {
        self.editing.as_mut()
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Sends the whole draft with PUT; on success the row with the same id
    /// becomes the draft and the editor closes. `Ok(false)` if nothing was
    /// being edited.
    pub async fn save_edit(&mut self) -> Result<bool, ApiError> {
        let Some(draft) = self.editing.as_ref() else {
            return Ok(false);
        };

        if let Err(err) = self.api.update_job(draft).await {
            self.notifier.notify(Notice::error(UPDATE_FAILED_MESSAGE));
            return Err(err);
        }

        let Some(saved) = self.editing.take() else {
            return Ok(false);
        };
        if let Rows::Loaded(jobs) = &mut self.rows {
            for job in jobs.iter_mut().filter(|j| j.id == saved.id) {
                *job = saved.clone();
            }
        }
        Ok(true)
    }
}
