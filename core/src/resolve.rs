//! Action resolution: the deterministic mapping from (HTTP verb, path
//! tokens) to a [`DispatchPlan`], plus the probe-and-fallback step that
//! classifies a miss as 404 vs 405.
//!
//! Two rule sets share the machinery but pair segments in opposite orders:
//!
//! - **Web variant** (`resolve_web` / `probe_web`): browser navigation.
//!   Segments alternate resource-name first, a GET falls back to a
//!   verb-less default action, and a miss distinguishes NotFound from
//!   MethodNotAllowed.
//! - **Rest variant** (`resolve_rest` / `probe_rest`): JSON APIs. Segments
//!   alternate parameter first, even segment counts mark collection-level
//!   operations with a `c` prefix, HEAD retries as GET, and every miss is
//!   MethodNotAllowed (an unknown controller fails earlier, in the
//!   registry).
//!
//! Resolution is pure: identical inputs always yield an identical plan, and
//! only invocation and response shaping cause side effects.

use crate::chain::{parameter_first, resource_first, segments};
use crate::plan::{ActionOutcome, DispatchPlan, KeyScheme};

/// Default action token when the web variant receives an empty action path.
const DEFAULT_ACTION: &str = "index";

/// Resolve a web-variant request.
///
/// `action` may be empty (defaults to `"index"`) and may contain `/`; a
/// trailing `.html` is stripped case-insensitively before tokenizing.
///
/// # Example
/// ```
/// use switchboard_core::{resolve_web, KeyScheme};
///
/// let keys = KeyScheme::new("controller.web.", "");
/// let plan = resolve_web("PUT", "users", "edit/5", &keys);
/// assert_eq!(plan.method_name, "putEditAction");
/// assert_eq!(plan.params, vec!["5"]);
/// assert_eq!(plan.handler_key, "controller.web.users");
/// ```
pub fn resolve_web(verb: &str, controller: &str, action: &str, keys: &KeyScheme) -> DispatchPlan {
    let action = if action.is_empty() { DEFAULT_ACTION } else { action };
    let action = strip_html_suffix(action);

    let parts = segments(action);
    let (resource_chain, params) = resource_first(&parts);

    let method_name = format!("{}{}Action", verb.to_lowercase(), resource_chain);

    DispatchPlan {
        handler_key: keys.key(controller),
        controller: controller.to_lowercase(),
        resource_chain,
        method_name,
        params,
        collection: false,
    }
}

/// Resolve a rest-variant request.
///
/// The first path segment is the controller token; the rest alternate
/// parameter-first. An even count of remaining segments means the final
/// segment names a resource type, so the operation targets the collection
/// and the verb gets a `c` prefix. POST is exempt: creation always targets
/// the collection path shape, so `post` stays unprefixed.
///
/// # Example
/// ```
/// use switchboard_core::{resolve_rest, KeyScheme};
///
/// let keys = KeyScheme::new("controller.rest.", "");
/// assert_eq!(resolve_rest("GET", "users", &keys).method_name, "cgetAction");
/// assert_eq!(resolve_rest("GET", "users/5", &keys).method_name, "getAction");
/// ```
pub fn resolve_rest(verb: &str, path: &str, keys: &KeyScheme) -> DispatchPlan {
    let mut parts = segments(path);
    let controller = if parts.is_empty() {
        String::new()
    } else {
        parts.remove(0).to_string()
    };

    let collection = parts.len() % 2 == 0;
    let (resource_chain, params) = parameter_first(&parts);

    let mut prefix = verb.to_lowercase();
    if collection && prefix != "post" {
        prefix.insert(0, 'c');
    }

    let method_name = format!("{}{}Action", prefix, resource_chain);

    DispatchPlan {
        handler_key: keys.key(&controller),
        controller: controller.to_lowercase(),
        resource_chain,
        method_name,
        params,
        collection,
    }
}

/// Probe a web-variant plan against a handler's capability set.
///
/// `has` answers "does this handler define a callable action named X"; it
/// must not fail. Fallback order: the planned verb-prefixed name, then (GET
/// only) the verb-less default `<Chain>Action`. A final miss checks whether
/// the verb-less name exists at all to decide 405 vs 404.
pub fn probe_web<F>(plan: &DispatchPlan, verb: &str, has: F) -> ActionOutcome
where
    F: Fn(&str) -> bool,
{
    let bare = format!("{}Action", plan.resource_chain);

    let mut name = plan.method_name.clone();
    if verb.eq_ignore_ascii_case("GET") && !has(&name) {
        name = bare.clone();
    }

    if has(&name) {
        return ActionOutcome::Resolved(name);
    }

    if has(&bare) {
        ActionOutcome::MethodNotAllowed
    } else {
        ActionOutcome::NotFound
    }
}

/// Probe a rest-variant plan against a handler's capability set.
///
/// HEAD retries with `get` substituted for the verb token, keeping the same
/// collection prefix rule, before giving up. There is no NotFound branch at
/// this stage.
pub fn probe_rest<F>(plan: &DispatchPlan, verb: &str, has: F) -> ActionOutcome
where
    F: Fn(&str) -> bool,
{
    let mut name = plan.method_name.clone();

    if verb.eq_ignore_ascii_case("HEAD") && !has(&name) {
        let c = if plan.collection { "c" } else { "" };
        name = format!("{}get{}Action", c, plan.resource_chain);
        tracing::debug!(fallback = %name, "HEAD action missing, retrying as GET");
    }

    if has(&name) {
        ActionOutcome::Resolved(name)
    } else {
        ActionOutcome::MethodNotAllowed
    }
}

/// Strip a trailing `.html`, case-insensitively.
fn strip_html_suffix(action: &str) -> &str {
    let n = action.len();
    if n >= 5 && action.is_char_boundary(n - 5) && action[n - 5..].eq_ignore_ascii_case(".html") {
        &action[..n - 5]
    } else {
        action
    }
}
