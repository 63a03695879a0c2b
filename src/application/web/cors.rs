use std::sync::Arc;

use axum::{
    extract::State,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, HOST, ORIGIN, VARY,
        },
        HeaderMap, HeaderValue, Method, StatusCode, Uri,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::AxumRequest;

const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Origin, Content-Type, Accept, Authorization";
const ANY_ORIGIN: &str = "*";

/// Liste blanche d'origins (comparaison exacte, `*` = tous).
#[derive(Debug, Clone, Default)]
pub(super) struct CorsPolicy {
    allow_any: bool,
    origins: Vec<String>,
}

impl CorsPolicy {
    pub(super) fn new(origins: &[String]) -> Self {
        let origins: Vec<String> = origins
            .iter()
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect();
        Self {
            allow_any: origins.iter().any(|o| o == ANY_ORIGIN),
            origins,
        }
    }

    pub(super) fn allows(&self, origin: &str) -> bool {
        self.allow_any || self.origins.iter().any(|o| o == origin)
    }
}

/// Requête sans `Origin` ou de même origine : laissée passer.
/// Origin autorisé : en-têtes CORS ajoutés (préflight → 204).
/// Origin refusé : 403.
pub(super) async fn cors_layer(
    State(policy): State<Arc<CorsPolicy>>,
    req: AxumRequest,
    next: Next,
) -> Response {
    let origin = match req.headers().get(ORIGIN).map(|v| v.to_str()) {
        None => return next.run(req).await,
        Some(Ok(value)) => value.to_string(),
        Some(Err(_)) => return StatusCode::FORBIDDEN.into_response(),
    };

    if !policy.allows(&origin) {
        if is_same_origin(&origin, req.headers()) {
            return next.run(req).await;
        }
        return (
            StatusCode::FORBIDDEN,
            "Requête bloquée par la politique CORS (origin non autorisée).",
        )
            .into_response();
    }

    if req.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        apply_cors_headers(response.headers_mut(), &origin);
        return response;
    }

    let mut response = next.run(req).await;
    apply_cors_headers(response.headers_mut(), &origin);
    response
}

pub(super) fn apply_cors_headers(headers: &mut HeaderMap, origin: &str) {
    if let Ok(value) = HeaderValue::from_str(origin) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.append(VARY, HeaderValue::from_static("Origin"));
}

/// Origin dont l'hôte et le port correspondent à l'en-tête `Host`.
fn is_same_origin(origin: &str, headers: &HeaderMap) -> bool {
    let Some(host) = headers.get(HOST).and_then(|h| h.to_str().ok()) else {
        return false;
    };
    let Ok(origin_uri) = origin.parse::<Uri>() else {
        return false;
    };
    let Ok(authority) = host.parse::<axum::http::uri::Authority>() else {
        return false;
    };
    let Some(origin_host) = origin_uri.host() else {
        return false;
    };
    if !origin_host.eq_ignore_ascii_case(authority.host()) {
        return false;
    }

    let scheme_port = default_port(origin_uri.scheme_str());
    origin_uri.port_u16().or(scheme_port) == authority.port_u16().or(scheme_port)
}

fn default_port(scheme: Option<&str>) -> Option<u16> {
    match scheme {
        Some("https") => Some(443),
        Some("http") => Some(80),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(origins: &[&str]) -> CorsPolicy {
        let owned: Vec<String> = origins.iter().map(|s| s.to_string()).collect();
        CorsPolicy::new(&owned)
    }

    fn host_headers(host: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_str(host).unwrap());
        headers
    }

    #[test]
    fn exact_origins_are_allowed() {
        let p = policy(&["http://localhost:5173", "http://localhost:3000/"]);
        assert!(p.allows("http://localhost:5173"));
        assert!(p.allows("http://localhost:3000"));
        assert!(!p.allows("http://localhost:8081"));
        assert!(!p.allows("http://evil.example"));
    }

    #[test]
    fn wildcard_allows_everything() {
        assert!(policy(&["*"]).allows("http://anything.lan"));
    }

    #[test]
    fn same_origin_compares_host_and_port() {
        assert!(is_same_origin(
            "http://nas.lan:8080",
            &host_headers("nas.lan:8080")
        ));
        assert!(is_same_origin("http://nas.lan", &host_headers("nas.lan:80")));
        assert!(!is_same_origin(
            "http://nas.lan:5173",
            &host_headers("nas.lan:8080")
        ));
        assert!(!is_same_origin("null", &host_headers("nas.lan")));
        assert!(!is_same_origin("http://nas.lan", &HeaderMap::new()));
    }

    #[test]
    fn cors_headers_echo_origin() {
        let mut headers = HeaderMap::new();
        apply_cors_headers(&mut headers, "http://localhost:5173");
        assert_eq!(
            headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
        assert_eq!(
            headers.get(ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            ALLOWED_METHODS
        );
        assert_eq!(headers.get(VARY).unwrap(), "Origin");
    }
}
