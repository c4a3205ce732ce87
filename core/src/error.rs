use thiserror::Error;

/// Opaque failure raised inside an invoked handler action or a collaborator
/// such as a template engine. The dispatcher never inspects it.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can go wrong between receiving a request and producing a
/// response. Resolution-phase failures map directly to an HTTP status; none
/// are retried or recovered locally.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No action method matches under any verb.
    #[error("{action} not found")]
    NotFound { action: String },

    /// An action with this name exists, but under a different HTTP verb.
    #[error("{verb} not supported")]
    MethodNotAllowed { verb: String },

    /// The permission gate refused the request.
    #[error("Access denied")]
    AccessDenied,

    /// The handler key has no binding. A missing binding is an operator
    /// error, not a user-facing 404.
    #[error("no handler bound for '{key}'")]
    Lookup { key: String },

    /// The invoked action itself failed; propagated as-is.
    #[error("handler action failed: {0}")]
    Handler(#[source] HandlerError),

    /// Template rendering failed after a successful invocation.
    #[error("template '{template}' failed to render: {source}")]
    Render {
        template: String,
        #[source]
        source: HandlerError,
    },
}

impl DispatchError {
    /// Numeric HTTP status for this failure. Kept as a bare `u16` so the
    /// core stays free of HTTP types.
    pub fn status(&self) -> u16 {
        match self {
            DispatchError::NotFound { .. } => 404,
            DispatchError::MethodNotAllowed { .. } => 405,
            DispatchError::AccessDenied => 403,
            DispatchError::Lookup { .. } => 500,
            DispatchError::Handler(_) => 500,
            DispatchError::Render { .. } => 500,
        }
    }

    /// Whether this is a configuration/runtime fault of the operator rather
    /// than a client error. Server faults are logged at error level.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            DispatchError::Lookup { .. }
                | DispatchError::Handler(_)
                | DispatchError::Render { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = DispatchError::NotFound {
            action: "getFooAction".into(),
        };
        let not_allowed = DispatchError::MethodNotAllowed { verb: "PUT".into() };
        let lookup = DispatchError::Lookup {
            key: "controller.web.foo".into(),
        };

        assert_eq!(not_found.status(), 404);
        assert_eq!(not_allowed.status(), 405);
        assert_eq!(DispatchError::AccessDenied.status(), 403);
        assert_eq!(lookup.status(), 500);

        assert!(!not_found.is_server_fault());
        assert!(lookup.is_server_fault());
    }
}
