//! Session gateway
//!
//! All authenticated API traffic goes through [`request_text`]. A request
//! answered with 401 triggers one silent cookie refresh and is replayed once;
//! if the refresh fails the local session marker is cleared and the document
//! is sent to `/login`.
//!
//! There is no refresh mutex: concurrent 401s each run their own refresh.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{api, storage};
use crate::shared::api_error::ApiError;
use crate::shared::api_utils::api_url;
use crate::shared::http::{decode, send_raw, Method};

pub const LOGIN_PATH: &str = "/login";

/// Run `send`; on 401 run `refresh` and, if it succeeds, `send` once more.
///
/// The replayed request's result is returned as is, even another 401.
pub async fn with_session_refresh<T, S, SF, R, RF>(mut send: S, refresh: R) -> Result<T, ApiError>
where
    S: FnMut() -> SF,
    SF: Future<Output = Result<T, ApiError>>,
    R: FnOnce() -> RF,
    RF: Future<Output = Result<(), ApiError>>,
{
    match send().await {
        Err(ApiError::Unauthorized) => {
            refresh().await?;
            send().await
        }
        other => other,
    }
}

/// Refresh the session cookies, ending the session when that fails
pub async fn refresh_session() -> Result<(), ApiError> {
    match api::refresh().await {
        Ok(()) => {
            log::debug!("Session refreshed");
            Ok(())
        }
        Err(e) => {
            log::warn!("Session refresh failed: {}", e);
            end_session();
            Err(e)
        }
    }
}

/// Forget the local marker and go to the login page unless already there
pub fn end_session() {
    storage::clear_username();
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let on_login = location
        .pathname()
        .map(|p| p.trim_end_matches('/') == LOGIN_PATH)
        .unwrap_or(false);
    if !on_login {
        let _ = location.set_href(LOGIN_PATH);
    }
}

pub async fn request_text(
    method: Method,
    path: &str,
    body: Option<serde_json::Value>,
) -> Result<String, ApiError> {
    let url = api_url(path);
    with_session_refresh(
        move || send_raw(method, url.clone(), body.clone()),
        refresh_session,
    )
    .await
}

fn to_body<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn get<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    decode(&request_text(Method::Get, path, None).await?)
}

pub async fn post<T: DeserializeOwned, B: Serialize>(path: &str, body: &B) -> Result<T, ApiError> {
    let body = to_body(body)?;
    decode(&request_text(Method::Post, path, Some(body)).await?)
}

pub async fn patch<T: DeserializeOwned, B: Serialize>(path: &str, body: &B) -> Result<T, ApiError> {
    let body = to_body(body)?;
    decode(&request_text(Method::Patch, path, Some(body)).await?)
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    request_text(Method::Delete, path, None).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    /// Send stub answering from a script of results
    fn scripted(
        script: Vec<Result<u32, ApiError>>,
    ) -> (RefCell<VecDeque<Result<u32, ApiError>>>, Cell<u32>) {
        (RefCell::new(script.into()), Cell::new(0))
    }

    #[test]
    fn test_success_needs_no_refresh() {
        let (script, sends) = scripted(vec![Ok(1)]);
        let refreshes = Cell::new(0);
        let result = block_on(with_session_refresh(
            || {
                sends.set(sends.get() + 1);
                let next = script.borrow_mut().pop_front().unwrap();
                async move { next }
            },
            || {
                refreshes.set(refreshes.get() + 1);
                async { Ok(()) }
            },
        ));
        assert_eq!(result, Ok(1));
        assert_eq!(sends.get(), 1);
        assert_eq!(refreshes.get(), 0);
    }

    #[test]
    fn test_unauthorized_refreshes_once_and_replays() {
        let (script, sends) = scripted(vec![Err(ApiError::Unauthorized), Ok(7)]);
        let refreshes = Cell::new(0);
        let result = block_on(with_session_refresh(
            || {
                sends.set(sends.get() + 1);
                let next = script.borrow_mut().pop_front().unwrap();
                async move { next }
            },
            || {
                refreshes.set(refreshes.get() + 1);
                async { Ok(()) }
            },
        ));
        assert_eq!(result, Ok(7));
        assert_eq!(sends.get(), 2);
        assert_eq!(refreshes.get(), 1);
    }

    #[test]
    fn test_second_unauthorized_is_returned_not_retried() {
        let (script, sends) = scripted(vec![
            Err(ApiError::Unauthorized),
            Err(ApiError::Unauthorized),
            Ok(1),
        ]);
        let refreshes = Cell::new(0);
        let result = block_on(with_session_refresh(
            || {
                sends.set(sends.get() + 1);
                let next = script.borrow_mut().pop_front().unwrap();
                async move { next }
            },
            || {
                refreshes.set(refreshes.get() + 1);
                async { Ok(()) }
            },
        ));
        assert_eq!(result, Err(ApiError::Unauthorized));
        assert_eq!(sends.get(), 2);
        assert_eq!(refreshes.get(), 1);
    }

    #[test]
    fn test_failed_refresh_skips_replay() {
        let (script, sends) = scripted(vec![Err(ApiError::Unauthorized), Ok(1)]);
        let result = block_on(with_session_refresh(
            || {
                sends.set(sends.get() + 1);
                let next = script.borrow_mut().pop_front().unwrap();
                async move { next }
            },
            || async { Err(ApiError::Unauthorized) },
        ));
        assert_eq!(result, Err(ApiError::Unauthorized));
        assert_eq!(sends.get(), 1);
    }

    #[test]
    fn test_other_errors_pass_through() {
        let refreshes = Cell::new(0);
        let result: Result<u32, ApiError> = block_on(with_session_refresh(
            || async { Err(ApiError::NotFound) },
            || {
                refreshes.set(refreshes.get() + 1);
                async { Ok(()) }
            },
        ));
        assert_eq!(result, Err(ApiError::NotFound));
        assert_eq!(refreshes.get(), 0);
    }
}
