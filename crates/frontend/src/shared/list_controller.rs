//! Reactive list-resource controller
//!
//! Wraps a [`ListState`] in a signal and drives it with a
//! [`ResourceService`]: page and filter changes re-fetch, mutations either
//! re-fetch or patch the held page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::api_error::ApiError;
use super::api_utils::query_pairs;
use super::list_state::{FetchOutcome, ListState, RemoveOutcome};
use super::resource::ResourceService;

/// How a successful update is reflected in the held page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStrategy {
    /// Re-fetch the current page; for records with server-computed fields
    Refetch,
    /// Replace the record with the server's response
    PatchInPlace,
}

/// Canonical form of a filter set; equal by value means equal signature
pub fn filter_signature<F: Serialize>(filters: &F) -> String {
    serde_qs::to_string(&query_pairs(filters)).unwrap_or_default()
}

pub struct ListController<T, D, F>
where
    T: Send + Sync + 'static,
    F: Send + Sync + 'static,
{
    pub state: RwSignal<ListState<T>>,
    pub filters: RwSignal<F>,
    service: ResourceService<T, D>,
    strategy: MutationStrategy,
    id_of: fn(&T) -> i64,
}

impl<T, D, F> Clone for ListController<T, D, F>
where
    T: Send + Sync + 'static,
    F: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, D, F> Copy for ListController<T, D, F>
where
    T: Send + Sync + 'static,
    F: Send + Sync + 'static,
{
}

impl<T, D, F> ListController<T, D, F>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
    D: Serialize + 'static,
    F: Serialize + Clone + Send + Sync + 'static,
{
    pub fn new(
        service: ResourceService<T, D>,
        strategy: MutationStrategy,
        id_of: fn(&T) -> i64,
        filters: F,
    ) -> Self {
        let signature = filter_signature(&filters);
        Self {
            state: RwSignal::new(ListState::new(signature)),
            filters: RwSignal::new(filters),
            service,
            strategy,
            id_of,
        }
    }

    pub fn service(&self) -> ResourceService<T, D> {
        self.service
    }

    /// Load the current page with the current filters
    pub fn fetch(&self) {
        let this = *self;
        let Some(seq) = self.state.try_update(ListState::begin_fetch) else {
            return;
        };
        let page = self.state.with_untracked(|s| s.page);
        let filters = self.filters.get_untracked();
        spawn_local(async move {
            let result = this.service.get_all(page, &filters).await;
            if let Err(e) = &result {
                log::warn!("Loading {} page {} failed: {}", this.service.path(), page, e);
            }
            let outcome = this.state.try_update(|s| s.finish_fetch(seq, result));
            match outcome {
                Some(FetchOutcome::Refetch) => this.fetch(),
                Some(FetchOutcome::Stale) => {
                    log::debug!("Dropped stale response for {}", this.service.path())
                }
                _ => {}
            }
        });
    }

    /// Replace the filter set; only a change by value resets to page 1 and
    /// re-fetches
    pub fn set_filters(&self, filters: F) {
        let signature = filter_signature(&filters);
        let changed = self
            .state
            .try_update(|s| s.apply_filter_signature(signature))
            .unwrap_or(false);
        if changed {
            self.filters.set(filters);
            self.fetch();
        }
    }

    pub fn go_to_page(&self, page: u64) {
        if self.state.try_update(|s| s.go_to(page)).unwrap_or(false) {
            self.fetch();
        }
    }

    pub fn next_page(&self) {
        if self.state.try_update(ListState::next_page).unwrap_or(false) {
            self.fetch();
        }
    }

    pub fn prev_page(&self) {
        if self.state.try_update(ListState::prev_page).unwrap_or(false) {
            self.fetch();
        }
    }

    /// Record held in the current page
    pub fn find_loaded(&self, id: i64) -> Option<T> {
        let id_of = self.id_of;
        self.state
            .with_untracked(|s| s.find(|item| id_of(item) == id).cloned())
    }

    pub fn clear_error(&self) {
        self.state.update(|s| s.set_error(None));
    }

    /// Validation errors stay with the form; anything else also reaches the
    /// banner
    fn report(&self, error: &ApiError) {
        if error.is_banner_error() {
            log::error!("{} mutation failed: {}", self.service.path(), error);
            let message = error.to_string();
            self.state.try_update(|s| s.set_error(Some(message)));
        }
    }

    /// Create, then re-fetch the current page
    pub async fn create(self, dto: D) -> Result<T, ApiError> {
        let result = self.service.create(&dto).await;
        match &result {
            Ok(_) => self.fetch(),
            Err(e) => self.report(e),
        }
        result
    }

    pub async fn update<P: Serialize>(self, id: i64, partial: P) -> Result<T, ApiError> {
        let result = self.service.update(id, &partial).await;
        match &result {
            Ok(updated) => match self.strategy {
                MutationStrategy::Refetch => self.fetch(),
                MutationStrategy::PatchInPlace => {
                    let id_of = self.id_of;
                    let updated = updated.clone();
                    self.state
                        .try_update(|s| s.replace_where(|item| id_of(item) == id, updated));
                }
            },
            Err(e) => self.report(e),
        }
        result
    }

    /// Delete and drop the record from the held page without a round trip,
    /// unless that empties a later page
    pub async fn delete(self, id: i64) -> Result<(), ApiError> {
        let result = self.service.delete(id).await;
        match &result {
            Ok(()) => {
                let id_of = self.id_of;
                let outcome = self
                    .state
                    .try_update(|s| s.remove_where(|item| id_of(item) == id));
                if outcome == Some(RemoveOutcome::SteppedBack) {
                    self.fetch();
                }
            }
            Err(e) => self.report(e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Clone)]
    struct Filters {
        search: String,
        activo: Option<bool>,
    }

    #[test]
    fn test_signature_ignores_empty_values() {
        let a = Filters {
            search: "".into(),
            activo: None,
        };
        let b = Filters {
            search: "   ".into(),
            activo: None,
        };
        assert_eq!(filter_signature(&a), filter_signature(&b));

        let c = Filters {
            search: "".into(),
            activo: Some(false),
        };
        assert_ne!(filter_signature(&a), filter_signature(&c));
    }
}
