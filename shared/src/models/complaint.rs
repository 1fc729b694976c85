//! Complaint model and lifecycle states

use serde::{Deserialize, Serialize};

/// Lifecycle state of a complaint.
///
/// The walk is linear: OPEN -> IN_PROGRESS -> RESOLVED -> CLOSED. Each state
/// has at most one legal successor and CLOSED is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl ComplaintStatus {
    /// All states, in lifecycle order.
    pub const ALL: [ComplaintStatus; 4] = [
        ComplaintStatus::Open,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
        ComplaintStatus::Closed,
    ];

    /// The single legal successor state, if any.
    pub fn next(self) -> Option<ComplaintStatus> {
        match self {
            ComplaintStatus::Open => Some(ComplaintStatus::InProgress),
            ComplaintStatus::InProgress => Some(ComplaintStatus::Resolved),
            ComplaintStatus::Resolved => Some(ComplaintStatus::Closed),
            ComplaintStatus::Closed => None,
        }
    }

    /// Whether `next` is the legal successor of `self`.
    pub fn can_transition_to(self, next: ComplaintStatus) -> bool {
        self.next() == Some(next)
    }

    /// CLOSED has no outbound transition.
    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Wire representation (`OPEN`, `IN_PROGRESS`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ComplaintStatus::Open => "OPEN",
            ComplaintStatus::InProgress => "IN_PROGRESS",
            ComplaintStatus::Resolved => "RESOLVED",
            ComplaintStatus::Closed => "CLOSED",
        }
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complaint priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Wire representation (`LOW`, `MEDIUM`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical category choices offered by the submit form. The stored
/// `category` field stays free text; these are the suggested values.
pub const CATEGORIES: [&str; 6] = ["IT", "HR", "Facilities", "Finance", "Admin", "Other"];

/// Category applied when the submitter leaves the field empty.
pub const DEFAULT_CATEGORY: &str = "Other";

/// One reported issue.
///
/// `id` is assigned by the document store on creation; it is not part of the
/// stored record and is filled in from the document key after a read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    #[serde(default, skip_serializing)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub status: ComplaintStatus,
    /// Creation time, `YYYY-MM-DD HH:MM:SS`. Fixed width and zero padded, so
    /// string order is chronological order.
    pub created_at: String,
    pub created_by_uid: String,
    /// Creator display name.
    pub name: String,
    /// Creator email.
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub contact: String,
}

/// Submitter-provided fields for a new complaint.
///
/// `title` and `description` are required; the rest falls back to the
/// documented defaults when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplaintDraft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

impl ComplaintDraft {
    /// Create a draft with the two required fields.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the free-text location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the contact field.
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }
}
