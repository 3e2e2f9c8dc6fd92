use tracing::{debug, warn};

use models::ServiceRecord;

use crate::catalog::service::ServiceCatalog;
use crate::errors::ServiceError;
use crate::query::{query, FilterSpec, SortKey, SortSpec};
use crate::view::sequence::{FetchTicket, RequestSequencer};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load services. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    Category,
    Status,
    Search,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer fetch already landed; this response was dropped.
    Stale,
}

/// State behind the services list: the last fetched records plus the
/// filter and sort the user picked.
#[derive(Debug)]
pub struct ServiceListView {
    records: Vec<ServiceRecord>,
    filter: FilterSpec,
    sort: SortSpec,
    loading: bool,
    error: Option<String>,
    sequencer: RequestSequencer,
}

impl Default for ServiceListView {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            filter: FilterSpec::default(),
            sort: SortSpec::default(),
            loading: false,
            error: None,
            sequencer: RequestSequencer::new(),
        }
    }
}

impl ServiceListView {
    pub fn new() -> Self { Self::default() }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.loading = true;
        self.sequencer.issue()
    }

    /// Apply a fetch result unless a newer one has already been applied.
    /// Failures keep the previous records and set the user-facing message.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<ServiceRecord>, ServiceError>,
    ) -> FetchOutcome {
        if !self.sequencer.try_apply(ticket) {
            debug!(ticket = ticket.get(), "dropping stale list response");
            return FetchOutcome::Stale;
        }
        match result {
            Ok(records) => {
                self.records = records;
                self.error = None;
            }
            Err(e) => {
                warn!(ticket = ticket.get(), error = %e, "service list fetch failed");
                self.error = Some(LOAD_FAILED_MESSAGE.to_string());
            }
        }
        if self.sequencer.is_latest(ticket) {
            self.loading = false;
        }
        FetchOutcome::Applied
    }

    pub async fn refresh(&mut self, catalog: &ServiceCatalog) -> FetchOutcome {
        let ticket = self.begin_fetch();
        let result = catalog.all().await;
        self.finish_fetch(ticket, result)
    }

    pub fn request_sort(&mut self, key: SortKey) {
        self.sort = self.sort.toggle(key);
    }

    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            FilterField::Category => self.filter.category = value,
            FilterField::Status => self.filter.status = value,
            FilterField::Search => self.filter.search = value,
        }
    }

    /// Rows to render.
    pub fn visible(&self) -> Vec<ServiceRecord> {
        query(&self.records, &self.filter, &self.sort)
    }

    /// Column header arrow: unsorted, ascending or descending.
    pub fn sort_indicator(&self, key: SortKey) -> &'static str {
        use crate::query::SortDirection;
        if self.sort.key != key {
            return "⇅";
        }
        match self.sort.direction {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }

    pub fn records(&self) -> &[ServiceRecord] { &self.records }
    pub fn filter(&self) -> &FilterSpec { &self.filter }
    pub fn sort(&self) -> SortSpec { self.sort }
    pub fn is_loading(&self) -> bool { self.loading }
    pub fn error(&self) -> Option<&str> { self.error.as_deref() }
}
