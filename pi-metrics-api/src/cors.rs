use axum::body::Body;
use axum::http::header::HeaderMap;
use axum::http::{HeaderValue, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

// Header set kept byte-for-byte compatible with the existing browser clients,
// including the credentials + wildcard-origin combination they expect.
const ALLOW_METHODS: &str = "GET,OPTIONS,PATCH,DELETE,POST,PUT";
const ALLOW_HEADERS: &str = "X-CSRF-Token,X-Requested-With,Accept,Accept-Version,Content-Length,Content-MD5,Content-Type,Date,X-Api-Version";

/// Stamps permissive CORS headers on every response and answers `OPTIONS`
/// preflights directly with an empty 200, without touching the route handler.
pub async fn apply_cors(req: Request<Body>, next: Next<Body>) -> Response {
    if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::OK.into_response();
        set_cors_headers(resp.headers_mut());
        return resp;
    }

    let mut resp = next.run(req).await;
    set_cors_headers(resp.headers_mut());
    resp
}

pub fn set_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        "Access-Control-Allow-Credentials",
        HeaderValue::from_static("true"),
    );
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_all_four_headers() {
        let mut headers = HeaderMap::new();
        set_cors_headers(&mut headers);
        assert_eq!(
            headers.get("Access-Control-Allow-Credentials").unwrap(),
            "true"
        );
        assert_eq!(headers.get("Access-Control-Allow-Origin").unwrap(), "*");
        assert_eq!(
            headers.get("Access-Control-Allow-Methods").unwrap(),
            ALLOW_METHODS
        );
        assert_eq!(
            headers.get("Access-Control-Allow-Headers").unwrap(),
            ALLOW_HEADERS
        );
    }
}
