//! Notification sink.
//!
//! Business logic reports outcomes through [`Notifier`]; the browser front end
//! turns them into toasts, tests record them.

use std::cell::RefCell;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// CSS modifier used by the toast banner.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

/// Logs notifications instead of showing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info | Severity::Success => info!(severity = severity.as_str(), "{message}"),
            Severity::Warning => warn!("{message}"),
            Severity::Error => error!("{message}"),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    entries: RefCell<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    pub fn entries(&self) -> Vec<(String, Severity)> {
        self.entries.borrow().clone()
    }

    pub fn last(&self) -> Option<(String, Severity)> {
        self.entries.borrow().last().cloned()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(_, s)| *s == severity)
            .count()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.entries
            .borrow_mut()
            .push((message.to_owned(), severity));
    }
}
