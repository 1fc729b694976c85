//! Walks the full complaint lifecycle against the in-process mock backend:
//! sign-up on both portals, a new complaint, the three transitions, and the
//! resulting timeline.
//!
//! Run with: `cargo run --example lifecycle_demo`

use std::sync::Arc;

use anyhow::Result;

use crts_app::{ComplaintDraft, ComplaintFilter, ComplaintStatus, Portal, Priority};
use crts_backend_mock::AppState;
use crts_client::ClientConfig;

const STAFF_CODE: &str = "DEMO-STAFF-CODE";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    crts_app::init_logger();

    let backend = crts_backend_mock::serve(Arc::new(AppState::new())).await?;
    tracing::info!(url = %backend.base_url(), "Mock backend up");
    let config = || {
        ClientConfig::new(backend.base_url())
            .with_timeout(5)
            .with_staff_signup_code(STAFF_CODE)
    };

    // A submitter reports an issue.
    let user = Portal::user(config())
        .sign_up("Uma", "uma@example.com", "hunter22")
        .await
        .map_err(|(e, _)| anyhow::anyhow!(e))?;
    let complaint = user
        .complaints()
        .create_complaint(
            user.session(),
            ComplaintDraft::new("Printer broken", "No toner on the third floor")
                .with_category("Facilities")
                .with_priority(Priority::High)
                .with_location("Building B, floor 3"),
        )
        .await?;
    tracing::info!(id = %complaint.id, status = %complaint.status, "Complaint filed");

    // A staff member picks it up and works it to resolution.
    let staff = Portal::staff(config())
        .sign_up("Sol", "sol@example.com", "hunter22", STAFF_CODE)
        .await
        .map_err(|(e, _)| anyhow::anyhow!(e))?;
    let service = staff.complaints();

    // Jumping straight to CLOSED is refused.
    let refused = service
        .request_transition(
            staff.session(),
            &complaint.id,
            ComplaintStatus::Open,
            ComplaintStatus::Closed,
            "",
        )
        .await
        .unwrap_err();
    tracing::info!(reason = %refused, "Shortcut rejected");

    for (current, next, remark) in [
        (ComplaintStatus::Open, ComplaintStatus::InProgress, "assigned to facilities"),
        (ComplaintStatus::InProgress, ComplaintStatus::Resolved, "toner replaced"),
        (ComplaintStatus::Resolved, ComplaintStatus::Closed, "confirmed with reporter"),
    ] {
        let update = service
            .request_transition(staff.session(), &complaint.id, current, next, remark)
            .await?;
        tracing::info!(status = %update.status, remark = %update.remark, "Transition applied");
    }

    for entry in service.timeline(staff.session(), &complaint.id).await? {
        tracing::info!(
            at = %entry.updated_at,
            status = %entry.status,
            by = %entry.updated_by_name,
            remark = %entry.remark,
            "Timeline entry"
        );
    }

    // The submitter sees the closed complaint in their own list.
    let mine = user
        .complaints()
        .list_complaints(user.session(), &ComplaintFilter::default())
        .await?;
    tracing::info!(count = mine.len(), status = %mine[0].status, "Submitter view refreshed");

    Ok(())
}
