//! Landing page figures, computed from the current record set.

use serde::Serialize;

use models::{ServiceRecord, ServiceStatus};

use crate::query::{query, FilterSpec, SortSpec};

/// How many records the "recent services" panel shows by default.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_services: usize,
    pub active_services: usize,
    pub pending_services: usize,
    pub completed_services: usize,
    pub cancelled_services: usize,
    /// Newest first.
    pub recent_services: Vec<ServiceRecord>,
}

pub fn summarize(records: &[ServiceRecord], recent_limit: usize) -> DashboardSummary {
    let count = |status: ServiceStatus| records.iter().filter(|r| r.status == status).count();
    let mut recent = query(records, &FilterSpec::default(), &SortSpec::default());
    recent.truncate(recent_limit);
    DashboardSummary {
        total_services: records.len(),
        active_services: count(ServiceStatus::Active),
        pending_services: count(ServiceStatus::Pending),
        completed_services: count(ServiceStatus::Completed),
        cancelled_services: count(ServiceStatus::Cancelled),
        recent_services: recent,
    }
}
