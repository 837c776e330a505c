//! Pagination, page links and ordering for list endpoints

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use contracts::shared::pagination::{total_pages, Page, PAGE_SIZE};

use super::error::{ApiError, ApiResult};

/// Absolute URL of the current list request, used to build `next`/`previous`
#[derive(Debug, Clone)]
pub struct ListContext {
    /// `http://host/path`, without query
    pub base: String,
    /// Raw query string, already percent-encoded
    pub query: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for ListContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("localhost:3000");
        let scheme = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("http");
        Ok(ListContext {
            base: format!("{}://{}{}", scheme, host, parts.uri.path()),
            query: parts.uri.query().map(str::to_string),
        })
    }
}

impl ListContext {
    /// Value of the `page` parameter, if any
    pub fn raw_page(&self) -> Option<String> {
        self.query.as_deref().and_then(|q| {
            q.split('&').find_map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (key == "page").then(|| value.to_string())
            })
        })
    }

    /// Page number requested; missing means 1, anything unusable is 404
    pub fn page_number(&self, count: u64) -> ApiResult<u64> {
        resolve_page(self.raw_page().as_deref(), count)
    }

    /// Link to `page` keeping every other query parameter.
    /// Page 1 is linked without a `page` parameter.
    pub fn link(&self, page: u64) -> String {
        let mut pairs: Vec<String> = self
            .query
            .as_deref()
            .unwrap_or("")
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter(|pair| pair.split('=').next() != Some("page"))
            .map(str::to_string)
            .collect();
        if page > 1 {
            pairs.push(format!("page={}", page));
        }
        if pairs.is_empty() {
            self.base.clone()
        } else {
            format!("{}?{}", self.base, pairs.join("&"))
        }
    }

    pub fn page<T>(&self, results: Vec<T>, count: u64, page: u64) -> Page<T> {
        let last = total_pages(count).max(1);
        Page {
            count,
            next: (page < last).then(|| self.link(page + 1)),
            previous: (page > 1).then(|| self.link(page - 1)),
            results,
        }
    }
}

/// 1-based page resolution; page 1 is always valid, even for an empty set
pub fn resolve_page(raw: Option<&str>, count: u64) -> ApiResult<u64> {
    let invalid = || ApiError::NotFound("Invalid page.".to_string());
    let last = total_pages(count).max(1);
    let page = match raw {
        None | Some("") => 1,
        Some("last") => last,
        Some(value) => value.parse::<u64>().map_err(|_| invalid())?,
    };
    if page == 0 || page > last {
        return Err(invalid());
    }
    Ok(page)
}

/// Zero-based offset of a page
pub fn page_offset(page: u64) -> u64 {
    (page.saturating_sub(1)) * PAGE_SIZE
}

/// Parsed `ordering` parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub field: String,
    pub descending: bool,
}

/// `-field` means descending; fields outside `allowed` are ignored
pub fn parse_ordering(raw: Option<&str>, allowed: &[&str]) -> Option<Ordering> {
    let raw = raw?.split(',').next()?.trim();
    let (field, descending) = match raw.strip_prefix('-') {
        Some(field) => (field, true),
        None => (raw, false),
    };
    allowed.contains(&field).then(|| Ordering {
        field: field.to_string(),
        descending,
    })
}

/// Trimmed search term, `None` when blank
pub fn search_term(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Boolean filter value: `true/false`, `True/False` or `1/0`; blank is no filter
pub fn bool_param(name: &str, raw: &Option<String>) -> ApiResult<Option<bool>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("true") | Some("True") | Some("1") => Ok(Some(true)),
        Some("false") | Some("False") | Some("0") => Ok(Some(false)),
        Some(_) => Err(ApiError::field(name, "Seleccione una opción válida.")),
    }
}

/// Numeric id filter value; blank is no filter
pub fn id_param(name: &str, raw: &Option<String>) -> ApiResult<Option<i64>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ApiError::field(name, "Introduzca un número entero.")),
    }
}

/// ISO date filter value (`YYYY-MM-DD`); blank is no filter
pub fn date_param(name: &str, raw: &Option<String>) -> ApiResult<Option<chrono::NaiveDate>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            let date_part = value.split('T').next().unwrap_or(value);
            chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| ApiError::field(name, "Introduzca una fecha válida."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_filter_params() {
        assert_eq!(bool_param("activo", &None).unwrap(), None);
        assert_eq!(bool_param("activo", &Some("".into())).unwrap(), None);
        assert_eq!(bool_param("activo", &Some("True".into())).unwrap(), Some(true));
        assert_eq!(bool_param("activo", &Some("0".into())).unwrap(), Some(false));
        assert!(bool_param("activo", &Some("quizas".into())).is_err());

        assert_eq!(id_param("laboratorio", &Some("4".into())).unwrap(), Some(4));
        assert!(id_param("laboratorio", &Some("x".into())).is_err());

        let d = date_param("fecha_vencimiento__gte", &Some("2025-02-01".into())).unwrap();
        assert_eq!(d, chrono::NaiveDate::from_ymd_opt(2025, 2, 1));
        assert!(date_param("fecha", &Some("01/02/2025".into())).is_err());
    }

    fn ctx(query: Option<&str>) -> ListContext {
        ListContext {
            base: "http://localhost:3000/api/productos/".to_string(),
            query: query.map(str::to_string),
        }
    }

    #[test]
    fn test_resolve_page() {
        assert_eq!(resolve_page(None, 0).unwrap(), 1);
        assert_eq!(resolve_page(Some("2"), 11).unwrap(), 2);
        assert_eq!(resolve_page(Some("last"), 25).unwrap(), 3);
        assert!(resolve_page(Some("3"), 11).is_err());
        assert!(resolve_page(Some("0"), 11).is_err());
        assert!(resolve_page(Some("abc"), 11).is_err());
    }

    #[test]
    fn test_links_keep_filters() {
        let c = ctx(Some("search=para&page=2&activo=true"));
        assert_eq!(c.raw_page().as_deref(), Some("2"));
        assert_eq!(
            c.link(3),
            "http://localhost:3000/api/productos/?search=para&activo=true&page=3"
        );
        assert_eq!(
            c.link(1),
            "http://localhost:3000/api/productos/?search=para&activo=true"
        );
    }

    #[test]
    fn test_page_envelope_links() {
        let c = ctx(Some("page=2"));
        let page = c.page(vec![1, 2], 25, 2);
        assert_eq!(page.count, 25);
        assert_eq!(
            page.next.as_deref(),
            Some("http://localhost:3000/api/productos/?page=3")
        );
        assert_eq!(
            page.previous.as_deref(),
            Some("http://localhost:3000/api/productos/")
        );

        let only = ctx(None).page(Vec::<u8>::new(), 0, 1);
        assert!(only.next.is_none());
        assert!(only.previous.is_none());
    }

    #[test]
    fn test_parse_ordering() {
        let allowed = ["nombre", "precio_venta"];
        assert_eq!(
            parse_ordering(Some("-precio_venta"), &allowed),
            Some(Ordering {
                field: "precio_venta".into(),
                descending: true
            })
        );
        assert_eq!(parse_ordering(Some("id"), &allowed), None);
        assert_eq!(parse_ordering(None, &allowed), None);
    }

    #[test]
    fn test_offsets_and_search_term() {
        assert_eq!(page_offset(1), 0);
        assert_eq!(page_offset(3), 20);
        assert_eq!(search_term(&Some("  ".into())), None);
        assert_eq!(search_term(&Some(" ibu ".into())).as_deref(), Some("ibu"));
    }
}
