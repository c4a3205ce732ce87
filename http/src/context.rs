//! Per-request context handed to handler actions.
//!
//! The context is built once per request from the decomposed Hyper request
//! and owns everything an action may want: verb, path, headers, the raw
//! body, and a parameter map fed from the query string (and, for the rest
//! variant, the decoded JSON body). No state is shared across requests.

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::request::Parts;
use http::{HeaderMap, Method, Uri};
use serde_json::{Map, Value};

/// One request, as seen by handler actions.
#[derive(Debug)]
pub struct RequestContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    params: Map<String, Value>,
    body: Bytes,
}

impl RequestContext {
    /// Build a context from decomposed request parts and a fully collected
    /// body. Query-string pairs seed the parameter map.
    pub fn new(parts: Parts, body: Bytes) -> Self {
        let mut params = Map::new();

        if let Some(query) = parts.uri.query() {
            match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
                Ok(pairs) => {
                    for (key, value) in pairs {
                        params.insert(key, Value::String(value));
                    }
                }
                Err(err) => {
                    tracing::debug!(%err, "unparseable query string ignored");
                }
            }
        }

        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            params,
            body,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The raw request body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The request's parameter set: query-string pairs, plus the decoded
    /// JSON body after [`merge_json_body`](Self::merge_json_body).
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    pub fn set_param(&mut self, name: impl Into<String>, value: Value) {
        self.params.insert(name.into(), value);
    }

    /// Whether the request was made via `XMLHttpRequest`.
    pub fn is_xhr(&self) -> bool {
        self.headers
            .get("x-requested-with")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case("xmlhttprequest"))
    }

    /// Rest-variant content negotiation: when the `Content-Type` starts
    /// with `application/json`, decode the body and merge its top-level
    /// keys over the parameter set. Malformed or non-object bodies leave
    /// the parameters unchanged; a parse failure is never fatal.
    pub fn merge_json_body(&mut self) {
        let is_json = self
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim_start().starts_with("application/json"));

        if !is_json {
            return;
        }

        match serde_json::from_slice::<Value>(&self.body) {
            Ok(Value::Object(map)) => {
                for (key, value) in map {
                    self.params.insert(key, value);
                }
            }
            Ok(_) => {
                tracing::debug!("non-object JSON body ignored");
            }
            Err(err) => {
                tracing::debug!(%err, "malformed JSON body ignored");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Request;

    fn parts(method: &str, uri: &str) -> Parts {
        let (parts, ()) = Request::builder()
            .method(method)
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn test_query_string_seeds_params() {
        let ctx = RequestContext::new(parts("GET", "/users?page=2&sort=name"), Bytes::new());

        assert_eq!(ctx.param("page"), Some(&Value::String("2".into())));
        assert_eq!(ctx.param("sort"), Some(&Value::String("name".into())));
    }

    #[test]
    fn test_is_xhr() {
        let (p, ()) = Request::builder()
            .method("GET")
            .uri("/")
            .header("X-Requested-With", "XMLHttpRequest")
            .body(())
            .unwrap()
            .into_parts();

        let ctx = RequestContext::new(p, Bytes::new());
        assert!(ctx.is_xhr());

        let ctx = RequestContext::new(parts("GET", "/"), Bytes::new());
        assert!(!ctx.is_xhr());
    }

    #[test]
    fn test_merge_json_body_overrides_query() {
        let (p, ()) = Request::builder()
            .method("POST")
            .uri("/api/users?name=from-query")
            .header("Content-Type", "application/json; charset=utf-8")
            .body(())
            .unwrap()
            .into_parts();

        let body = Bytes::from(r#"{"name":"from-body","email":"a@b.c"}"#);
        let mut ctx = RequestContext::new(p, body);
        ctx.merge_json_body();

        assert_eq!(ctx.param("name"), Some(&Value::String("from-body".into())));
        assert_eq!(ctx.param("email"), Some(&Value::String("a@b.c".into())));
    }

    #[test]
    fn test_merge_json_body_tolerates_garbage() {
        let (p, ()) = Request::builder()
            .method("POST")
            .uri("/api/users?keep=1")
            .header("Content-Type", "application/json")
            .body(())
            .unwrap()
            .into_parts();

        let mut ctx = RequestContext::new(p, Bytes::from_static(b"{not json"));
        ctx.merge_json_body();

        assert_eq!(ctx.params().len(), 1);
        assert_eq!(ctx.param("keep"), Some(&Value::String("1".into())));
    }

    #[test]
    fn test_merge_json_body_skips_other_content_types() {
        let (p, ()) = Request::builder()
            .method("POST")
            .uri("/api/users")
            .header("Content-Type", "text/plain")
            .body(())
            .unwrap()
            .into_parts();

        let mut ctx = RequestContext::new(p, Bytes::from_static(b"{\"a\":1}"));
        ctx.merge_json_body();

        assert!(ctx.params().is_empty());
    }
}
