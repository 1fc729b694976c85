//! Complaint lifecycle manager
//!
//! The one place that knows the transition rules, the role checks, and the
//! read scoping. The original system spread this logic over three
//! near-identical front-ends; every portal now calls through here.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crts_client::{ClientError, DocumentStore};
use shared::models::{Complaint, ComplaintDraft, ComplaintStatus, StatusUpdate, DEFAULT_CATEGORY};
use shared::util::now_stamp;
use shared::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};

use crate::error::{AppError, AppResult};
use crate::session::Session;

const COMPLAINTS: &str = "complaints";
const UPDATES: &str = "updates";

/// Client-side filter over a scoped complaint list.
#[derive(Debug, Clone, Default)]
pub struct ComplaintFilter {
    /// Keep only this status. `None` means "show all" (see the quirk on
    /// [`ComplaintService::list_complaints`]).
    pub status: Option<ComplaintStatus>,
    /// Case-insensitive substring match against title or creator email.
    pub search: Option<String>,
}

impl ComplaintFilter {
    pub fn with_status(mut self, status: ComplaintStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    fn matches(&self, complaint: &Complaint) -> bool {
        if let Some(status) = self.status
            && complaint.status != status
        {
            return false;
        }
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            return complaint.title.to_lowercase().contains(&term)
                || complaint.email.to_lowercase().contains(&term);
        }
        true
    }
}

/// Per-status counts over the viewer's scope, for dashboard cards.
///
/// Unlike the unfiltered list view, the summary counts CLOSED complaints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub closed: usize,
}

impl StatusSummary {
    pub fn total(&self) -> usize {
        self.open + self.in_progress + self.resolved + self.closed
    }
}

/// Service owning complaint reads and writes against the document store.
///
/// Complaints live in the `complaints` collection; each complaint's audit
/// trail is its `updates` sub-collection. The service is cheap to clone and
/// holds no session state: identity travels in the `&Session` argument of
/// every operation.
#[derive(Debug, Clone)]
pub struct ComplaintService {
    store: Arc<dyn DocumentStore>,
}

impl ComplaintService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Submit a new complaint.
    ///
    /// `title` and `description` are required and checked locally before any
    /// store write. Omitted fields fall back to their defaults: category
    /// `"Other"`, priority MEDIUM, empty location, and the creator's email
    /// as contact. Status is always OPEN; no audit entry is written at
    /// creation, the trail begins at the first transition.
    pub async fn create_complaint(
        &self,
        session: &Session,
        draft: ComplaintDraft,
    ) -> AppResult<Complaint> {
        validate_required_text(&draft.title, "title", MAX_NAME_LEN)
            .map_err(AppError::Validation)?;
        validate_required_text(&draft.description, "description", MAX_NOTE_LEN)
            .map_err(AppError::Validation)?;
        validate_optional_text(draft.category.as_deref(), "category", MAX_NAME_LEN)
            .map_err(AppError::Validation)?;
        validate_optional_text(draft.location.as_deref(), "location", MAX_NOTE_LEN)
            .map_err(AppError::Validation)?;
        validate_optional_text(draft.contact.as_deref(), "contact", MAX_NOTE_LEN)
            .map_err(AppError::Validation)?;

        let category = match draft.category {
            Some(c) if !c.trim().is_empty() => c,
            _ => DEFAULT_CATEGORY.to_string(),
        };
        let mut complaint = Complaint {
            id: String::new(),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            category,
            priority: draft.priority.unwrap_or_default(),
            status: ComplaintStatus::Open,
            created_at: now_stamp(),
            created_by_uid: session.uid.clone(),
            name: session.name.clone(),
            email: session.email.clone(),
            location: draft.location.unwrap_or_default(),
            contact: draft.contact.unwrap_or_else(|| session.email.clone()),
        };

        let record = serde_json::to_value(&complaint).map_err(ClientError::from)?;
        complaint.id = self.store.add(COMPLAINTS, record).await?;
        tracing::info!(
            id = %complaint.id,
            uid = %session.uid,
            priority = %complaint.priority,
            "Complaint created"
        );
        Ok(complaint)
    }

    /// List complaints visible to the session, newest first.
    ///
    /// A `user` session sees only its own complaints; staff and admin see
    /// everything. The filter is applied client-side over the scoped set.
    ///
    /// Quirk, kept from the original staff view: with no status filter, a
    /// staff/admin viewer does not see CLOSED complaints. Selecting the
    /// CLOSED filter explicitly still shows them. A user viewer's
    /// unfiltered list includes every status.
    pub async fn list_complaints(
        &self,
        session: &Session,
        filter: &ComplaintFilter,
    ) -> AppResult<Vec<Complaint>> {
        let mut complaints = self.scoped(session).await?;
        if session.sees_all_complaints() && filter.status.is_none() {
            complaints.retain(|c| c.status != ComplaintStatus::Closed);
        }
        complaints.retain(|c| filter.matches(c));
        Ok(complaints)
    }

    /// Fetch one complaint. A `user` session asking for someone else's
    /// complaint gets `NotFound`, not `Unauthorized`.
    pub async fn get_complaint(&self, session: &Session, id: &str) -> AppResult<Complaint> {
        let doc = self
            .store
            .get(COMPLAINTS, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{COMPLAINTS}/{id}")))?;
        let mut complaint: Complaint = doc.parse()?;
        complaint.id = doc.id;
        if !session.sees_all_complaints() && complaint.created_by_uid != session.uid {
            return Err(AppError::NotFound(format!("{COMPLAINTS}/{id}")));
        }
        Ok(complaint)
    }

    /// The complaint's audit trail, newest first.
    pub async fn timeline(&self, session: &Session, id: &str) -> AppResult<Vec<StatusUpdate>> {
        // Read scoping rides on the complaint fetch.
        self.get_complaint(session, id).await?;
        let docs = self
            .store
            .query_children(COMPLAINTS, id, UPDATES, "updated_at", true)
            .await?;
        Ok(parse_documents(&docs))
    }

    /// Per-status counts over the viewer's scope.
    pub async fn status_summary(&self, session: &Session) -> AppResult<StatusSummary> {
        let complaints = self.scoped(session).await?;
        let mut summary = StatusSummary::default();
        for complaint in &complaints {
            match complaint.status {
                ComplaintStatus::Open => summary.open += 1,
                ComplaintStatus::InProgress => summary.in_progress += 1,
                ComplaintStatus::Resolved => summary.resolved += 1,
                ComplaintStatus::Closed => summary.closed += 1,
            }
        }
        Ok(summary)
    }

    /// Move a complaint one step along OPEN -> IN_PROGRESS -> RESOLVED ->
    /// CLOSED, appending one audit entry.
    ///
    /// `current` is the status the caller's view believes; it is a
    /// precondition, not trusted. The stored status is re-read and a
    /// mismatch rejects the request as a stale view. `next` must be the
    /// unique legal successor, and the session must hold a staff or admin
    /// role.
    ///
    /// The status write and the audit append are two non-atomic writes. A
    /// failure between them leaves the status updated with no matching
    /// audit entry; the status field is authoritative, the trail is
    /// best-effort history.
    pub async fn request_transition(
        &self,
        session: &Session,
        id: &str,
        current: ComplaintStatus,
        next: ComplaintStatus,
        remark: &str,
    ) -> AppResult<StatusUpdate> {
        if !session.can_transition() {
            return Err(AppError::Unauthorized(
                "Only staff may change complaint status".to_string(),
            ));
        }
        validate_optional_text(Some(remark), "remark", MAX_NOTE_LEN)
            .map_err(AppError::Validation)?;

        let doc = self
            .store
            .get(COMPLAINTS, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{COMPLAINTS}/{id}")))?;
        let stored: Complaint = doc.parse()?;
        if stored.status != current {
            // Stale view: the record moved on since the caller last read it.
            tracing::warn!(
                id = %id,
                stored = %stored.status,
                claimed = %current,
                "Transition request against a stale status"
            );
            return Err(AppError::InvalidTransition {
                from: stored.status,
                to: next,
            });
        }
        if !current.can_transition_to(next) {
            return Err(AppError::InvalidTransition {
                from: current,
                to: next,
            });
        }

        self.store
            .update(COMPLAINTS, id, json!({ "status": next }))
            .await?;

        let mut entry = StatusUpdate {
            id: String::new(),
            status: next,
            remark: remark.to_string(),
            updated_by_uid: session.uid.clone(),
            updated_by_name: session.name.clone(),
            updated_at: now_stamp(),
        };
        let record = serde_json::to_value(&entry).map_err(ClientError::from)?;
        entry.id = self.store.add_child(COMPLAINTS, id, UPDATES, record).await?;

        tracing::info!(
            id = %id,
            from = %current,
            to = %next,
            uid = %session.uid,
            "Complaint status changed"
        );
        Ok(entry)
    }

    /// The viewer's full scope, unfiltered, newest first.
    async fn scoped(&self, session: &Session) -> AppResult<Vec<Complaint>> {
        let docs = self.store.query_all(COMPLAINTS, "created_at", true).await?;
        let mut complaints: Vec<Complaint> = parse_documents(&docs);
        if !session.sees_all_complaints() {
            complaints.retain(|c| c.created_by_uid == session.uid);
        }
        Ok(complaints)
    }
}

/// Parse documents into typed records, carrying the store id over. A record
/// that fails to parse is logged and skipped rather than failing the list.
fn parse_documents<T>(docs: &[crts_client::Document]) -> Vec<T>
where
    T: serde::de::DeserializeOwned + WithId,
{
    docs.iter()
        .filter_map(|doc| match doc.parse::<T>() {
            Ok(mut record) => {
                record.set_id(&doc.id);
                Some(record)
            }
            Err(e) => {
                tracing::warn!(id = %doc.id, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect()
}

trait WithId {
    fn set_id(&mut self, id: &str);
}

impl WithId for Complaint {
    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

impl WithId for StatusUpdate {
    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}
