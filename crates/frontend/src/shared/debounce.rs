//! Debounced search input handling

use std::future::Future;

use contracts::shared::search::query_len;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Header search box
pub const GLOBAL_SEARCH_DELAY_MS: u32 = 300;
/// Point-of-sale product finder
pub const POS_SEARCH_DELAY_MS: u32 = 500;
/// Text filters of the list pages
pub const FILTER_DELAY_MS: u32 = 300;
/// Product picker of the batch form
pub const PRODUCT_PICKER_MIN_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPlan {
    /// Too short: clear results, no request
    Clear,
    Search(String),
}

pub fn plan_search(query: &str, min_len: usize) -> SearchPlan {
    if query_len(query) < min_len {
        SearchPlan::Clear
    } else {
        SearchPlan::Search(query.trim().to_string())
    }
}

/// Runs only the last task scheduled within the delay window
#[derive(Clone, Copy)]
pub struct Debouncer {
    delay_ms: u32,
    generation: StoredValue<u64>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            generation: StoredValue::new(0),
        }
    }

    pub fn schedule<Fut>(&self, task: impl FnOnce() -> Fut + 'static)
    where
        Fut: Future<Output = ()> + 'static,
    {
        let ticket = self.bump();
        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(this.delay_ms).await;
            if this.generation.try_get_value() == Some(ticket) {
                task().await;
            }
        });
    }

    /// Invalidate any pending task
    pub fn cancel(&self) {
        self.bump();
    }

    fn bump(&self) -> u64 {
        let next = self.generation.get_value() + 1;
        self.generation.set_value(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::search::MIN_QUERY_LEN;

    #[test]
    fn test_delays() {
        assert_eq!(GLOBAL_SEARCH_DELAY_MS, 300);
        assert_eq!(FILTER_DELAY_MS, 300);
        assert_eq!(POS_SEARCH_DELAY_MS, 500);
    }

    #[test]
    fn test_short_query_plans_no_search() {
        assert_eq!(plan_search("", MIN_QUERY_LEN), SearchPlan::Clear);
        assert_eq!(plan_search(" ab ", MIN_QUERY_LEN), SearchPlan::Clear);
        assert_eq!(
            plan_search(" abc ", MIN_QUERY_LEN),
            SearchPlan::Search("abc".into())
        );
    }

    #[test]
    fn test_product_picker_needs_four_chars() {
        assert_eq!(plan_search("ibu", PRODUCT_PICKER_MIN_LEN), SearchPlan::Clear);
        assert_eq!(
            plan_search("ibup", PRODUCT_PICKER_MIN_LEN),
            SearchPlan::Search("ibup".into())
        );
    }
}
