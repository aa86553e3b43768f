//! Request sanitization middleware.
//!
//! Runs before routing: path segments, query-string values, and JSON
//! body strings are passed through the sanitizer so no handler ever
//! sees raw markup. Escaping happens here; outright rejection of
//! hostile content is the validators' job.

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::uri::{PathAndQuery, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

use cakeshop_core::error::AppError;
use cakeshop_service::sanitize::{sanitize_json, sanitize_str};

use crate::error::ApiError;
use crate::state::AppState;

/// Bytes that cannot appear raw in a rebuilt path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'%')
    .add(b'/')
    .add(b'\\');

/// Sanitize the request URI and any JSON body, then continue.
pub async fn sanitize_request(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    if let Some(uri) = sanitized_uri(&parts.uri) {
        parts.uri = uri;
    }

    let is_json = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));

    let body = if is_json {
        let limit = state.config.server.max_body_bytes;
        let bytes = match to_bytes(body, limit).await {
            Ok(bytes) => bytes,
            Err(_) => {
                return ApiError(AppError::validation("Request body too large or unreadable"))
                    .into_response();
            }
        };
        match serde_json::from_slice::<serde_json::Value>(&bytes) {
            Ok(mut value) => {
                sanitize_json(&mut value);
                let clean = match serde_json::to_vec(&value) {
                    Ok(clean) => clean,
                    Err(_) => {
                        return ApiError(AppError::validation("Malformed JSON body"))
                            .into_response();
                    }
                };
                if let Ok(len) = clean.len().to_string().parse() {
                    parts.headers.insert(CONTENT_LENGTH, len);
                }
                Body::from(clean)
            }
            // Not valid JSON: pass through untouched and let the Json
            // extractor produce its rejection.
            Err(_) => Body::from(bytes),
        }
    } else {
        body
    };

    next.run(Request::from_parts(parts, body)).await
}

/// Rebuild the URI with sanitized path segments and query values.
/// Returns `None` when nothing changed.
fn sanitized_uri(uri: &Uri) -> Option<Uri> {
    let path = sanitized_path(uri.path());
    let query = uri.query().and_then(sanitized_query);
    if path.is_none() && query.is_none() {
        return None;
    }

    let path = path.unwrap_or_else(|| uri.path().to_string());
    let combined = match query.as_deref().or(uri.query()) {
        Some(query) => format!("{path}?{query}"),
        None => path,
    };
    let path_and_query = combined.parse::<PathAndQuery>().ok()?;
    let mut uri_parts = uri.clone().into_parts();
    uri_parts.path_and_query = Some(path_and_query);
    Uri::from_parts(uri_parts).ok()
}

/// Decode each path segment, sanitize it, and re-encode the ones that
/// changed. Returns `None` when every segment was already clean.
fn sanitized_path(path: &str) -> Option<String> {
    let mut changed = false;
    let segments: Vec<String> = path
        .split('/')
        .map(|segment| {
            let Ok(decoded) = percent_decode_str(segment).decode_utf8() else {
                return segment.to_string();
            };
            let clean = sanitize_str(&decoded);
            if clean == decoded {
                segment.to_string()
            } else {
                changed = true;
                utf8_percent_encode(&clean, SEGMENT).to_string()
            }
        })
        .collect();
    changed.then(|| segments.join("/"))
}

/// Re-serialize the query with sanitized values. Returns `None` when
/// every value was already clean.
fn sanitized_query(query: &str) -> Option<String> {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut changed = false;
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        let clean = sanitize_str(&value);
        if clean != value {
            changed = true;
        }
        serializer.append_pair(&key, &clean);
    }
    changed.then(|| serializer.finish())
}
