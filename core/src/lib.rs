//! # Switchboard Core - Protocol-Agnostic Action Resolution
//!
//! Convention-based dispatch: an HTTP verb and a URL path deterministically
//! select a handler lookup key, a conventional action-method name, and an
//! ordered list of positional parameters.
//!
//! This crate holds the pure half of the system: resolution and the
//! probe-and-fallback step are side-effect-free functions over string
//! tokens. Everything that touches a socket lives in `switchboard-http`.

pub mod chain;
pub mod error;
pub mod plan;
pub mod resolve;

pub use chain::capitalize;
pub use error::{DispatchError, HandlerError};
pub use plan::{ActionOutcome, DispatchPlan, KeyScheme};
pub use resolve::{probe_rest, probe_web, resolve_rest, resolve_web};
