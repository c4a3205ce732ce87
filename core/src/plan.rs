use serde::Serialize;

/// How handler lookup keys are derived:
/// `prefix + lowercase(controller) + postfix`.
///
/// Configured once per mounted route group at startup.
#[derive(Debug, Clone, Serialize)]
pub struct KeyScheme {
    pub prefix: String,
    pub postfix: String,
}

impl KeyScheme {
    pub fn new(prefix: impl Into<String>, postfix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            postfix: postfix.into(),
        }
    }

    /// Build the lookup key for a controller token.
    pub fn key(&self, controller: &str) -> String {
        format!("{}{}{}", self.prefix, controller.to_lowercase(), self.postfix)
    }
}

/// The dispatch plan computed for one request.
///
/// Built fresh per request and immutable once returned by a resolver; no
/// plan is ever cached or mutated across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchPlan {
    /// Registry lookup key, already lowercased and prefixed.
    pub handler_key: String,
    /// Lowercased controller token (templates read this back).
    pub controller: String,
    /// Capitalized resource chain, e.g. `"EditComments"`.
    pub resource_chain: String,
    /// Conventional action-method name, e.g. `"putEditAction"`.
    pub method_name: String,
    /// Positional parameter values extracted from the path, in path order.
    /// The request itself is passed to the handler after these.
    pub params: Vec<String>,
    /// Rest variant only: true when the segment count after the controller
    /// is even, i.e. the final segment names a resource type rather than an
    /// instance id.
    pub collection: bool,
}

/// Result of probing the planned method name against a handler's capability
/// set, after all fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The name of the action method to invoke.
    Resolved(String),
    /// An action with this chain exists, but not under this verb.
    MethodNotAllowed,
    /// Nothing matches at all. Web variant only; the rest variant reports
    /// every probe miss as `MethodNotAllowed`.
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_scheme_lowercases_controller() {
        let keys = KeyScheme::new("controller.web.", "");
        assert_eq!(keys.key("Users"), "controller.web.users");
        assert_eq!(keys.key("users"), "controller.web.users");
    }

    #[test]
    fn test_key_scheme_postfix() {
        let keys = KeyScheme::new("rest.", ".v2");
        assert_eq!(keys.key("orders"), "rest.orders.v2");
    }
}
