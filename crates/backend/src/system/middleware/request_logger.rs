use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use contracts::shared::format::group_thousands;

/// Logs method, path, status, duration and response size of every request
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // buffer the body to learn its real size
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(
                "{} {} -> {} in {}ms (body error: {})",
                method,
                path,
                parts.status.as_u16(),
                start.elapsed().as_millis(),
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let status = parts.status.as_u16();
    let elapsed = start.elapsed().as_millis();
    let size = group_thousands(bytes.len() as u64);
    if parts.status.is_server_error() {
        tracing::error!("{} {} -> {} in {}ms, {} B", method, path, status, elapsed, size);
    } else if parts.status.is_client_error() {
        tracing::warn!("{} {} -> {} in {}ms, {} B", method, path, status, elapsed, size);
    } else {
        tracing::info!("{} {} -> {} in {}ms, {} B", method, path, status, elapsed, size);
    }

    Response::from_parts(parts, Body::from(bytes))
}
