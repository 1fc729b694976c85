//! Status update audit entries

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::complaint::ComplaintStatus;

/// One immutable audit entry in a complaint's history.
///
/// Stored in the `updates` sub-collection under the parent complaint,
/// appended exactly once per successful transition and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    #[serde(default, skip_serializing)]
    pub id: String,
    /// Resulting status of the transition.
    pub status: ComplaintStatus,
    /// Free-text remark, may be empty.
    #[serde(default)]
    pub remark: String,
    pub updated_by_uid: String,
    pub updated_by_name: String,
    /// Same `YYYY-MM-DD HH:MM:SS` format as the complaint's `created_at`.
    pub updated_at: String,
}

/// An audit trail that does not reconstruct a legal walk of the lifecycle
/// graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal transition {from} -> {to} at audit entry {index}")]
pub struct BrokenWalk {
    /// Index of the offending entry, oldest-first.
    pub index: usize,
    pub from: ComplaintStatus,
    pub to: ComplaintStatus,
}

/// Check that audit entries, read oldest-first, form a valid walk of the
/// lifecycle graph starting from OPEN.
pub fn verify_walk(oldest_first: &[StatusUpdate]) -> Result<(), BrokenWalk> {
    let mut current = ComplaintStatus::Open;
    for (index, entry) in oldest_first.iter().enumerate() {
        if !current.can_transition_to(entry.status) {
            return Err(BrokenWalk {
                index,
                from: current,
                to: entry.status,
            });
        }
        current = entry.status;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(status: ComplaintStatus) -> StatusUpdate {
        StatusUpdate {
            id: String::new(),
            status,
            remark: String::new(),
            updated_by_uid: "staff-1".to_string(),
            updated_by_name: "Sol".to_string(),
            updated_at: "2025-01-05 10:00:00".to_string(),
        }
    }

    #[test]
    fn test_empty_trail_is_a_valid_walk() {
        assert_eq!(verify_walk(&[]), Ok(()));
    }

    #[test]
    fn test_full_lifecycle_is_a_valid_walk() {
        let trail = [
            entry(ComplaintStatus::InProgress),
            entry(ComplaintStatus::Resolved),
            entry(ComplaintStatus::Closed),
        ];
        assert_eq!(verify_walk(&trail), Ok(()));
    }

    #[test]
    fn test_skipped_state_breaks_the_walk() {
        let trail = [entry(ComplaintStatus::Resolved)];
        let err = verify_walk(&trail).unwrap_err();
        assert_eq!(err.index, 0);
        assert_eq!(err.from, ComplaintStatus::Open);
        assert_eq!(err.to, ComplaintStatus::Resolved);
    }

    #[test]
    fn test_nothing_follows_closed() {
        let trail = [
            entry(ComplaintStatus::InProgress),
            entry(ComplaintStatus::Resolved),
            entry(ComplaintStatus::Closed),
            entry(ComplaintStatus::Open),
        ];
        let err = verify_walk(&trail).unwrap_err();
        assert_eq!(err.index, 3);
        assert_eq!(err.from, ComplaintStatus::Closed);
    }

    #[test]
    fn test_update_record_omits_id_and_defaults_remark() {
        let record = serde_json::to_value(entry(ComplaintStatus::InProgress)).unwrap();
        assert!(record.get("id").is_none());
        assert_eq!(record["updated_by_name"], "Sol");

        let parsed: StatusUpdate = serde_json::from_value(serde_json::json!({
            "status": "IN_PROGRESS",
            "updated_by_uid": "staff-1",
            "updated_by_name": "Sol",
            "updated_at": "2025-01-05 10:00:00",
        }))
        .unwrap();
        assert_eq!(parsed.remark, "");
    }
}
