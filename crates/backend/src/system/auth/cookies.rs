//! Reading and writing the HttpOnly auth cookies

use axum::http::{header, HeaderMap, HeaderValue};

/// Value of cookie `name` from the request `Cookie` headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value for an HttpOnly cookie living `max_age_secs`
pub fn build_cookie(name: &str, value: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        name,
        value,
        max_age_secs.max(0)
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that makes the browser drop the cookie
pub fn clear_cookie(name: &str, secure: bool) -> String {
    build_cookie(name, "", 0, secure)
}

/// Append `Set-Cookie` headers; values are ASCII by construction
pub fn append_cookies(headers: &mut HeaderMap, cookies: &[String]) {
    for cookie in cookies {
        match HeaderValue::from_str(cookie) {
            Ok(value) => {
                headers.append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!("Skipping invalid Set-Cookie value: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("csrftoken=abc; access_token=tok.en.1; theme=dark"),
        );
        assert_eq!(read_cookie(&headers, "access_token").as_deref(), Some("tok.en.1"));
        assert_eq!(read_cookie(&headers, "refresh_token"), None);
    }

    #[test]
    fn test_empty_cookie_is_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("refresh_token="));
        assert_eq!(read_cookie(&headers, "refresh_token"), None);
    }

    #[test]
    fn test_build_and_clear() {
        assert_eq!(
            build_cookie("access_token", "x", 3600, false),
            "access_token=x; Path=/; HttpOnly; SameSite=Lax; Max-Age=3600"
        );
        assert!(build_cookie("access_token", "x", 60, true).ends_with("; Secure"));
        assert!(clear_cookie("refresh_token", false).contains("refresh_token=; "));
        assert!(clear_cookie("refresh_token", false).contains("Max-Age=0"));
    }
}
