//! Permission gate: the allow/deny decision for a resolved request.
//!
//! Checked exactly once per request, strictly after resolution succeeds
//! and before invocation, so a denied caller cannot distinguish missing
//! actions by timing of the 403. The decision logic itself is external;
//! only the boolean contract lives here.

use crate::context::RequestContext;

pub trait PermissionGate: Send + Sync {
    fn check(&self, ctx: &RequestContext) -> bool;
}

/// Default gate: every request is allowed.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl PermissionGate for AllowAll {
    fn check(&self, _ctx: &RequestContext) -> bool {
        true
    }
}
