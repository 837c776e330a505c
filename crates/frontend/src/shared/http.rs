//! Credentialed HTTP transport
//!
//! Every request carries the session cookies (`credentials: include`).
//! Status classification happens here; the retry-on-401 policy lives in the
//! session gateway.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use web_sys::RequestCredentials;

use super::api_error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// One round trip; returns the body text of a 2xx response
pub async fn send_raw(
    method: Method,
    url: String,
    body: Option<serde_json::Value>,
) -> Result<String, ApiError> {
    let builder = match method {
        Method::Get => Request::get(&url),
        Method::Post => Request::post(&url),
        Method::Put => Request::put(&url),
        Method::Patch => Request::patch(&url),
        Method::Delete => Request::delete(&url),
    }
    .credentials(RequestCredentials::Include)
    .header("Accept", "application/json");

    let response = match body {
        Some(body) => {
            builder
                .json(&body)
                .map_err(|e| ApiError::Network(e.to_string()))?
                .send()
                .await
        }
        None => builder.send().await,
    }
    .map_err(|e| ApiError::Network(e.to_string()))?;

    let status = response.status();
    let ok = response.ok();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if ok {
        Ok(text)
    } else {
        log::debug!("{:?} {} -> {}", method, url, status);
        Err(ApiError::from_status(status, &text))
    }
}

pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::pagination::Page;

    #[test]
    fn test_decode_reports_mismatch() {
        let page: Page<i64> = decode(r#"{"count":1,"next":null,"previous":null,"results":[4]}"#).unwrap();
        assert_eq!(page.results, vec![4]);
        assert!(matches!(decode::<Page<i64>>("[]"), Err(ApiError::Decode(_))));
    }
}
