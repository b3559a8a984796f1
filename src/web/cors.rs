use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::web::AppState;

const ALLOW_METHODS: &str = "GET, POST, PUT, PATCH, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Cross-origin policy: allow-listed origins are echoed back with credentials
/// enabled; same-origin requests (no Origin header) get a wildcard; anything
/// else falls back to the first configured origin.
pub async fn apply(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let (allow_origin, allow_credentials) =
        resolve_origin(origin.as_deref(), &state.config().allowed_origins);

    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&allow_origin) {
        headers.insert("Access-Control-Allow-Origin", value);
    }
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    if allow_credentials {
        // The wildcard origin must never carry credentials.
        headers.insert(
            "Access-Control-Allow-Credentials",
            HeaderValue::from_static("true"),
        );
    }

    response
}

fn resolve_origin(origin: Option<&str>, allowed: &[String]) -> (String, bool) {
    match origin {
        Some(origin) if allowed.iter().any(|candidate| candidate == origin) => {
            (origin.to_string(), true)
        }
        None => ("*".to_string(), false),
        Some(_) => match allowed.first() {
            Some(fallback) => (fallback.clone(), true),
            None => ("*".to_string(), false),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec![
            "https://journal.example.org".to_string(),
            "http://localhost:5173".to_string(),
        ]
    }

    #[test]
    fn listed_origin_is_echoed_with_credentials() {
        let (origin, credentials) = resolve_origin(Some("http://localhost:5173"), &allowed());
        assert_eq!(origin, "http://localhost:5173");
        assert!(credentials);
    }

    #[test]
    fn missing_origin_gets_wildcard_without_credentials() {
        let (origin, credentials) = resolve_origin(None, &allowed());
        assert_eq!(origin, "*");
        assert!(!credentials);
    }

    #[test]
    fn unknown_origin_falls_back_to_first_configured() {
        let (origin, credentials) = resolve_origin(Some("https://evil.example"), &allowed());
        assert_eq!(origin, "https://journal.example.org");
        assert!(credentials);
    }

    #[test]
    fn empty_allow_list_degrades_to_wildcard() {
        let (origin, credentials) = resolve_origin(Some("https://anywhere.example"), &[]);
        assert_eq!(origin, "*");
        assert!(!credentials);
    }
}
