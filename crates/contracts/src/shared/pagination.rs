use serde::{Deserialize, Serialize};

/// Number of records per page served by the API
pub const PAGE_SIZE: u64 = 10;

/// Paginated list envelope
///
/// `next` and `previous` carry absolute links to the neighbouring pages,
/// `None` on the first/last page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        total_pages(self.count)
    }
}

/// ceil(count / PAGE_SIZE); an empty collection still has zero pages
pub fn total_pages(count: u64) -> u64 {
    count.div_ceil(PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(11), 2);
        assert_eq!(total_pages(95), 10);
    }

    #[test]
    fn test_envelope_parses_drf_shape() {
        let json = r#"{
            "count": 12,
            "next": "http://localhost:3000/api/laboratorios/?page=2",
            "previous": null,
            "results": [1, 2, 3]
        }"#;
        let page: Page<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, 12);
        assert_eq!(page.total_pages(), 2);
        assert!(page.previous.is_none());
        assert_eq!(page.results, vec![1, 2, 3]);
    }
}
