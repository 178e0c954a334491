//! User-facing notifications: what a toast would show.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Validation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: &'static str,
    pub description: String,
}

impl Notice {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: "Success",
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Error",
            description: description.into(),
        }
    }

    pub fn validation(description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Validation,
            title: "Validation Error",
            description: description.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Receives notices from the form and list controllers.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Success to stdout, everything else to stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => println!("✓ {notice}"),
            NoticeKind::Error | NoticeKind::Validation => eprintln!("✗ {notice}"),
        }
    }
}
