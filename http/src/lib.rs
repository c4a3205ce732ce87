//! # Switchboard HTTP - Hyper 1.0 Ingress Adapter
//!
//! Convention-based HTTP dispatch over Hyper: an incoming request's verb
//! and path select a handler object out of a registry and an action method
//! on it, by naming convention alone. No per-action route table.
//!
//! Two dispatcher variants share the resolution strategy from
//! `switchboard-core`:
//!
//! - [`WebDispatcher`] for browser navigation: HTML templates, redirects,
//!   AJAX awareness.
//! - [`RestDispatcher`] for JSON APIs: collection vs. item semantics,
//!   status-code mapping (200/201/204).
//!
//! ## Example
//!
//! ```rust,ignore
//! let registry = HandlerRegistry::new()
//!     .with("controller.rest.users", UserApi::default());
//!
//! HttpIngress::new()
//!     .bind("127.0.0.1:3000")
//!     .mount_rest(RestDispatcher::new(registry))?
//!     .serve()
//!     .await?;
//! ```

pub mod context;
pub mod dispatch;
pub mod guard;
pub mod handler;
pub mod ingress;
pub mod registry;
pub mod respond;
pub mod template;

pub use context::RequestContext;
pub use dispatch::{RestDispatcher, RouteConfig, WebDispatcher};
pub use guard::{AllowAll, PermissionGate};
pub use handler::{ActionResult, Handler};
pub use ingress::{HttpIngress, IngressError};
pub use registry::HandlerRegistry;
pub use template::{TemplateEngine, TemplateGlobals};

pub mod prelude {
    pub use crate::context::RequestContext;
    pub use crate::dispatch::{RestDispatcher, RouteConfig, WebDispatcher};
    pub use crate::guard::{AllowAll, PermissionGate};
    pub use crate::handler::{ActionResult, Handler};
    pub use crate::ingress::HttpIngress;
    pub use crate::registry::HandlerRegistry;
    pub use crate::template::{TemplateEngine, TemplateGlobals};
    pub use switchboard_core::{DispatchError, HandlerError};
}
