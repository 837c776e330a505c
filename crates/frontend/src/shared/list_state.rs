//! Bookkeeping of a paginated, filtered list
//!
//! Pure state; the reactive wrapper is `list_controller`.

use contracts::shared::pagination::{total_pages, Page};

use super::api_error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// What the caller should do after a fetch result arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer fetch was issued meanwhile; the result was dropped
    Stale,
    /// The page no longer exists; state moved to page 1 and wants a new fetch
    Refetch,
}

/// What the caller should do after an item was removed locally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Count adjusted in place
    Kept,
    /// The page became empty and state moved back one page
    SteppedBack,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    /// 1-based
    pub page: u64,
    pub count: u64,
    pub items: Vec<T>,
    pub phase: LoadPhase,
    pub error: Option<String>,
    filter_signature: String,
    seq: u64,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            page: 1,
            count: 0,
            items: Vec::new(),
            phase: LoadPhase::Idle,
            error: None,
            filter_signature: String::new(),
            seq: 0,
        }
    }
}

impl<T> ListState<T> {
    pub fn new(filter_signature: String) -> Self {
        Self {
            filter_signature,
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn total_pages(&self) -> u64 {
        total_pages(self.count)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Move to `page` clamped to `[1, total_pages]`; true when it changed
    pub fn go_to(&mut self, page: u64) -> bool {
        let target = page.clamp(1, self.total_pages().max(1));
        if target == self.page {
            return false;
        }
        self.page = target;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to(self.page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.go_to(self.page.saturating_sub(1))
    }

    /// Record a new filter signature. A real change resets to page 1 and
    /// returns true; an equal signature is a no-op.
    pub fn apply_filter_signature(&mut self, signature: String) -> bool {
        if signature == self.filter_signature {
            return false;
        }
        self.filter_signature = signature;
        self.page = 1;
        true
    }

    /// Enter `Loading` and hand out the sequence number of this fetch
    pub fn begin_fetch(&mut self) -> u64 {
        self.seq += 1;
        self.phase = LoadPhase::Loading;
        self.seq
    }

    pub fn finish_fetch(&mut self, seq: u64, result: Result<Page<T>, ApiError>) -> FetchOutcome {
        if seq != self.seq {
            return FetchOutcome::Stale;
        }
        match result {
            Ok(page) => {
                self.count = page.count;
                self.items = page.results;
                self.phase = LoadPhase::Ready;
                self.error = None;
                FetchOutcome::Applied
            }
            Err(ApiError::NotFound) if self.page > 1 => {
                self.page = 1;
                FetchOutcome::Refetch
            }
            Err(e) => {
                self.phase = LoadPhase::Failed;
                self.error = Some(e.to_string());
                FetchOutcome::Applied
            }
        }
    }

    /// Drop the items matching `pred` after a successful delete
    pub fn remove_where(&mut self, pred: impl Fn(&T) -> bool) -> RemoveOutcome {
        let before = self.items.len();
        self.items.retain(|item| !pred(item));
        let removed = (before - self.items.len()) as u64;
        if self.items.is_empty() && self.page > 1 {
            self.page -= 1;
            return RemoveOutcome::SteppedBack;
        }
        self.count = self.count.saturating_sub(removed);
        RemoveOutcome::Kept
    }

    /// Swap in the server's version of an updated record
    pub fn replace_where(&mut self, pred: impl Fn(&T) -> bool, item: T) -> bool {
        match self.items.iter_mut().find(|existing| pred(existing)) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| pred(item))
    }

    pub fn set_error(&mut self, message: Option<String>) {
        self.error = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(count: u64, results: Vec<i64>) -> Page<i64> {
        Page {
            count,
            next: None,
            previous: None,
            results,
        }
    }

    fn loaded(count: u64, page_no: u64, results: Vec<i64>) -> ListState<i64> {
        let mut state = ListState::new("".into());
        let seq = state.begin_fetch();
        state.finish_fetch(seq, Ok(page(count, results)));
        state.page = page_no;
        state
    }

    #[test]
    fn test_pagination_bounds() {
        let mut state = loaded(25, 1, (1..=10).collect());
        assert_eq!(state.total_pages(), 3);
        assert!(state.has_next());
        assert!(!state.has_prev());
        assert!(!state.prev_page());
        assert!(state.go_to(9));
        assert_eq!(state.page, 3);
        assert!(!state.next_page());
        assert!(state.has_prev());
    }

    #[test]
    fn test_filter_change_resets_to_first_page() {
        let mut state = loaded(40, 3, vec![1]);
        assert!(state.apply_filter_signature("search=para".into()));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_equal_filter_signature_does_not_refetch() {
        let mut state = loaded(40, 3, vec![1]);
        state.apply_filter_signature("activo=true".into());
        state.page = 2;
        assert!(!state.apply_filter_signature("activo=true".into()));
        assert_eq!(state.page, 2);
    }

    #[test]
    fn test_delete_last_item_on_later_page_steps_back() {
        let mut state = loaded(11, 2, vec![11]);
        assert_eq!(state.remove_where(|id| *id == 11), RemoveOutcome::SteppedBack);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_delete_on_first_page_decrements_count() {
        let mut state = loaded(3, 1, vec![1, 2, 3]);
        assert_eq!(state.remove_where(|id| *id == 2), RemoveOutcome::Kept);
        assert_eq!(state.items, vec![1, 3]);
        assert_eq!(state.count, 2);

        let mut single = loaded(1, 1, vec![5]);
        assert_eq!(single.remove_where(|id| *id == 5), RemoveOutcome::Kept);
        assert_eq!(single.count, 0);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut state: ListState<i64> = ListState::new("".into());
        let first = state.begin_fetch();
        let second = state.begin_fetch();
        assert_eq!(
            state.finish_fetch(first, Ok(page(1, vec![99]))),
            FetchOutcome::Stale
        );
        assert!(state.is_loading());
        assert_eq!(
            state.finish_fetch(second, Ok(page(2, vec![1, 2]))),
            FetchOutcome::Applied
        );
        assert_eq!(state.items, vec![1, 2]);
        assert_eq!(state.phase, LoadPhase::Ready);
    }

    #[test]
    fn test_failed_fetch_keeps_message() {
        let mut state: ListState<i64> = ListState::new("".into());
        let seq = state.begin_fetch();
        state.finish_fetch(seq, Err(ApiError::Network("offline".into())));
        assert_eq!(state.phase, LoadPhase::Failed);
        assert!(state.error.as_deref().unwrap().contains("offline"));
    }

    #[test]
    fn test_vanished_page_falls_back_to_first() {
        let mut state = loaded(30, 3, vec![21]);
        let seq = state.begin_fetch();
        assert_eq!(
            state.finish_fetch(seq, Err(ApiError::NotFound)),
            FetchOutcome::Refetch
        );
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_replace_in_place() {
        let mut state = loaded(2, 1, vec![1, 2]);
        assert!(state.replace_where(|id| *id == 2, 20));
        assert_eq!(state.items, vec![1, 20]);
        assert!(!state.replace_where(|id| *id == 7, 70));
    }
}
