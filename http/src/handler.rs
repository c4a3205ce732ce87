//! The handler seam: what a controller object looks like to a dispatcher.
//!
//! Handlers expose a capability probe ("do you define an action named X")
//! and an invoker. The probe is what makes the convention fallbacks work:
//! a GET may fall back to the verb-less default action, HEAD may fall back
//! to GET, and a miss is classified as 404 vs 405 by probing the bare
//! chain name.

use async_trait::async_trait;
use bytes::Bytes;
use http::Response;
use http_body_util::Full;
use serde_json::Value;
use switchboard_core::HandlerError;

use crate::context::RequestContext;

/// What an invoked action hands back to the dispatcher.
pub enum ActionResult {
    /// A pre-built transport response. Both shapers pass it through
    /// unchanged, bypassing all status-code inference.
    Response(Response<Full<Bytes>>),
    /// Plain text. The web shaper treats a non-empty string as a redirect
    /// target; the rest shaper encodes it as a JSON string.
    Text(String),
    /// A JSON value: template values for the web shaper, payload for the
    /// rest shaper.
    Value(Value),
    /// Nothing. Maps to an empty template context (web) or 204 (rest).
    None,
}

impl ActionResult {
    /// The emptiness check driving the rest shaper's 204: nothing, the
    /// empty string, `null`, `false`, and empty arrays/objects all count
    /// as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            ActionResult::Response(_) => false,
            ActionResult::Text(s) => s.is_empty(),
            ActionResult::Value(v) => match v {
                Value::Null => true,
                Value::Bool(b) => !b,
                Value::Array(a) => a.is_empty(),
                Value::Object(o) => o.is_empty(),
                _ => false,
            },
            ActionResult::None => true,
        }
    }

    /// Coerce into a JSON value for encoding. Pre-built responses coerce
    /// to `null`; shapers pass them through before ever calling this.
    pub fn into_json(self) -> Value {
        match self {
            ActionResult::Response(_) => Value::Null,
            ActionResult::Text(s) => Value::String(s),
            ActionResult::Value(v) => v,
            ActionResult::None => Value::Null,
        }
    }
}

impl From<Value> for ActionResult {
    fn from(value: Value) -> Self {
        ActionResult::Value(value)
    }
}

impl std::fmt::Debug for ActionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionResult::Response(r) => f.debug_tuple("Response").field(&r.status()).finish(),
            ActionResult::Text(s) => f.debug_tuple("Text").field(s).finish(),
            ActionResult::Value(v) => f.debug_tuple("Value").field(v).finish(),
            ActionResult::None => f.write_str("None"),
        }
    }
}

/// A controller object the registry can hand out.
///
/// `params` are the positional values extracted from the path, in path
/// order; the request context always arrives last. The handler owns any
/// further validation of them.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Does this instance define a callable action named `name`?
    /// Used for existence checks and fallback retries; must not fail.
    fn has_action(&self, name: &str) -> bool;

    /// Run the named action. Only ever called with a name for which
    /// [`has_action`](Self::has_action) returned true.
    async fn invoke(
        &self,
        name: &str,
        params: &[String],
        ctx: &mut RequestContext,
    ) -> Result<ActionResult, HandlerError>;
}

impl std::fmt::Debug for dyn Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Handler")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_empty() {
        assert!(ActionResult::None.is_empty());
        assert!(ActionResult::Text(String::new()).is_empty());
        assert!(ActionResult::Value(Value::Null).is_empty());
        assert!(ActionResult::Value(json!([])).is_empty());
        assert!(ActionResult::Value(json!({})).is_empty());
        assert!(ActionResult::Value(json!(false)).is_empty());

        assert!(!ActionResult::Text("x".into()).is_empty());
        assert!(!ActionResult::Value(json!([1])).is_empty());
        assert!(!ActionResult::Value(json!(0)).is_empty());
        assert!(!ActionResult::Response(Response::new(Full::new(Bytes::new()))).is_empty());
    }

    #[test]
    fn test_into_json() {
        assert_eq!(ActionResult::Text("hi".into()).into_json(), json!("hi"));
        assert_eq!(ActionResult::None.into_json(), Value::Null);
        assert_eq!(
            ActionResult::Value(json!({"a": 1})).into_json(),
            json!({"a": 1})
        );
    }
}
