//! Dispatchers: per-variant orchestration from parsed request to shaped
//! response.
//!
//! Both variants run the same straight-line state machine per request:
//! parse, resolve, registry lookup, probe-and-fallback, permission check,
//! invoke, shape. Every failure short-circuits to its mapped status; there
//! are no retries and no loops back.

use std::sync::Arc;

use bytes::Bytes;
use http::Response;
use http_body_util::Full;
use tracing::Instrument;
use uuid::Uuid;

use switchboard_core::{
    probe_rest, probe_web, resolve_rest, resolve_web, ActionOutcome, DispatchError, KeyScheme,
};

use crate::context::RequestContext;
use crate::guard::{AllowAll, PermissionGate};
use crate::registry::HandlerRegistry;
use crate::respond::{error_response, shape_rest, shape_web};
use crate::template::TemplateEngine;

/// Per-mount configuration: where the route group lives and how handler
/// lookup keys are derived.
#[derive(Debug, Clone)]
pub struct RouteConfig {
    /// URL prefix the dispatcher is mounted under, e.g. `"/api"`.
    pub route_prefix: String,
    /// Lookup-key prefix, e.g. `"controller.rest."`.
    pub service_prefix: String,
    /// Lookup-key postfix, usually empty.
    pub service_postfix: String,
}

impl RouteConfig {
    /// Web defaults: mounted at the root, keys under `controller.web.`.
    pub fn web() -> Self {
        Self {
            route_prefix: String::new(),
            service_prefix: "controller.web.".into(),
            service_postfix: String::new(),
        }
    }

    /// Rest defaults: mounted at `/api`, keys under `controller.rest.`.
    pub fn rest() -> Self {
        Self {
            route_prefix: "/api".into(),
            service_prefix: "controller.rest.".into(),
            service_postfix: String::new(),
        }
    }

    pub(crate) fn keys(&self) -> KeyScheme {
        KeyScheme::new(self.service_prefix.clone(), self.service_postfix.clone())
    }
}

/// Browser-facing dispatcher: templates, redirects, AJAX awareness.
pub struct WebDispatcher {
    registry: Arc<HandlerRegistry>,
    gate: Arc<dyn PermissionGate>,
    engine: Arc<dyn TemplateEngine>,
    config: RouteConfig,
}

impl WebDispatcher {
    pub fn new(registry: HandlerRegistry, engine: impl TemplateEngine + 'static) -> Self {
        Self {
            registry: Arc::new(registry),
            gate: Arc::new(AllowAll),
            engine: Arc::new(engine),
            config: RouteConfig::web(),
        }
    }

    pub fn with_gate(mut self, gate: impl PermissionGate + 'static) -> Self {
        self.gate = Arc::new(gate);
        self
    }

    pub fn with_config(mut self, config: RouteConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Dispatch one web request. Infallible at this boundary: failures
    /// become their mapped status response.
    pub async fn dispatch(
        &self,
        controller: &str,
        action: &str,
        ctx: RequestContext,
    ) -> Response<Full<Bytes>> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "WebDispatch",
            http.method = %ctx.method(),
            http.path = %ctx.path(),
            request_id = %request_id
        );

        async move {
            match self.run(controller, action, ctx).await {
                Ok(response) => response,
                Err(err) => {
                    log_failure(&err);
                    error_response(&err, false)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        controller: &str,
        action: &str,
        mut ctx: RequestContext,
    ) -> Result<Response<Full<Bytes>>, DispatchError> {
        let verb = ctx.method().as_str().to_owned();
        let plan = resolve_web(&verb, controller, action, &self.config.keys());

        let handler = self.registry.lookup(&plan.handler_key)?;

        let name = match probe_web(&plan, &verb, |name| handler.has_action(name)) {
            ActionOutcome::Resolved(name) => name,
            ActionOutcome::MethodNotAllowed => {
                return Err(DispatchError::MethodNotAllowed { verb })
            }
            ActionOutcome::NotFound => {
                return Err(DispatchError::NotFound {
                    action: plan.method_name.clone(),
                })
            }
        };

        if !self.gate.check(&ctx) {
            return Err(DispatchError::AccessDenied);
        }

        tracing::debug!(action = %name, handler = %plan.handler_key, "invoking action");

        let result = handler
            .invoke(&name, &plan.params, &mut ctx)
            .await
            .map_err(DispatchError::Handler)?;

        shape_web(result, &plan, &ctx, self.engine.as_ref())
    }
}

/// JSON-API dispatcher: collection/item semantics, status-code mapping.
pub struct RestDispatcher {
    registry: Arc<HandlerRegistry>,
    gate: Arc<dyn PermissionGate>,
    config: RouteConfig,
}

impl RestDispatcher {
    pub fn new(registry: HandlerRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            gate: Arc::new(AllowAll),
            config: RouteConfig::rest(),
        }
    }

    pub fn with_gate(mut self, gate: impl PermissionGate + 'static) -> Self {
        self.gate = Arc::new(gate);
        self
    }

    pub fn with_config(mut self, config: RouteConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Dispatch one rest request. `path` is everything after the route
    /// prefix; its first segment is the controller token.
    pub async fn dispatch(&self, path: &str, ctx: RequestContext) -> Response<Full<Bytes>> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "RestDispatch",
            http.method = %ctx.method(),
            http.path = %ctx.path(),
            request_id = %request_id
        );

        async move {
            match self.run(path, ctx).await {
                Ok(response) => response,
                Err(err) => {
                    log_failure(&err);
                    error_response(&err, true)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        path: &str,
        mut ctx: RequestContext,
    ) -> Result<Response<Full<Bytes>>, DispatchError> {
        ctx.merge_json_body();

        let method = ctx.method().clone();
        let verb = method.as_str().to_owned();
        let plan = resolve_rest(&verb, path, &self.config.keys());

        let handler = self.registry.lookup(&plan.handler_key)?;

        let name = match probe_rest(&plan, &verb, |name| handler.has_action(name)) {
            ActionOutcome::Resolved(name) => name,
            _ => return Err(DispatchError::MethodNotAllowed { verb }),
        };

        if !self.gate.check(&ctx) {
            return Err(DispatchError::AccessDenied);
        }

        tracing::debug!(action = %name, handler = %plan.handler_key, "invoking action");

        let result = handler
            .invoke(&name, &plan.params, &mut ctx)
            .await
            .map_err(DispatchError::Handler)?;

        Ok(shape_rest(result, &method))
    }
}

fn log_failure(err: &DispatchError) {
    if err.is_server_fault() {
        tracing::error!(error = %err, "dispatch failed");
    } else {
        tracing::debug!(error = %err, "request rejected");
    }
}
