//! HTTP ingress: route mounting and the Hyper 1.0 serve loop.
//!
//! The ingress owns a path router whose targets are dispatchers, not
//! per-action handlers: the web variant claims three bindings under its
//! route prefix (root, `{controller}`, `{controller}/{*action}`), the rest
//! variant claims a single `{*path}` catch-all. Everything after the match
//! is convention resolution inside the dispatcher.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::{Method, Request, Response, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use thiserror::Error;
use tokio::net::TcpListener;

use switchboard_core::DispatchError;

use crate::context::RequestContext;
use crate::dispatch::{RestDispatcher, WebDispatcher};
use crate::respond::error_response;

#[derive(Error, Debug)]
pub enum IngressError {
    #[error("invalid route: {0}")]
    Route(#[from] matchit::InsertError),
    #[error("invalid bind address: {0}")]
    Addr(#[from] std::net::AddrParseError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// What a matched path dispatches to.
#[derive(Clone)]
enum Mount {
    /// `GET {prefix}/` - the default controller and action.
    WebRoot(Arc<WebDispatcher>),
    /// `{prefix}/{controller}` - empty action, defaults to index.
    WebController(Arc<WebDispatcher>),
    /// `{prefix}/{controller}/{*action}` - action may contain `/`.
    WebAction(Arc<WebDispatcher>),
    /// `{prefix}/{*path}` - first segment is the controller token.
    Rest(Arc<RestDispatcher>),
}

/// HTTP ingress builder and server.
pub struct HttpIngress {
    /// Bind address (e.g. "127.0.0.1:3000")
    addr: Option<String>,
    router: matchit::Router<Mount>,
}

impl HttpIngress {
    pub fn new() -> Self {
        Self {
            addr: None,
            router: matchit::Router::new(),
        }
    }

    /// Set the bind address for the server.
    pub fn bind(mut self, addr: impl Into<String>) -> Self {
        self.addr = Some(addr.into());
        self
    }

    /// Mount a web dispatcher's three bindings under its route prefix.
    pub fn mount_web(mut self, dispatcher: WebDispatcher) -> Result<Self, IngressError> {
        let dispatcher = Arc::new(dispatcher);
        let prefix = dispatcher.config().route_prefix.trim_end_matches('/').to_owned();

        self.router
            .insert(format!("{prefix}/"), Mount::WebRoot(dispatcher.clone()))?;
        self.router.insert(
            format!("{prefix}/{{controller}}"),
            Mount::WebController(dispatcher.clone()),
        )?;
        self.router.insert(
            format!("{prefix}/{{controller}}/{{*action}}"),
            Mount::WebAction(dispatcher),
        )?;

        Ok(self)
    }

    /// Mount a rest dispatcher's catch-all binding under its route prefix.
    pub fn mount_rest(mut self, dispatcher: RestDispatcher) -> Result<Self, IngressError> {
        let dispatcher = Arc::new(dispatcher);
        let prefix = dispatcher.config().route_prefix.trim_end_matches('/').to_owned();

        self.router
            .insert(format!("{prefix}/{{*path}}"), Mount::Rest(dispatcher))?;

        Ok(self)
    }

    /// Handle a single request. Public so tests and embedders can drive
    /// the ingress without a socket.
    pub async fn handle<B>(&self, req: Request<B>) -> Response<Full<Bytes>>
    where
        B: http_body::Body,
    {
        let (parts, body) = req.into_parts();

        let body = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(_) => {
                tracing::debug!("failed to read request body, treating as empty");
                Bytes::new()
            }
        };

        let path = parts.uri.path().to_string();

        let matched = match self.router.at(&path) {
            Ok(matched) => matched,
            Err(_) => return not_found(),
        };

        match matched.value {
            Mount::WebRoot(dispatcher) => {
                // The root binding is GET-only.
                if parts.method != Method::GET {
                    let err = DispatchError::MethodNotAllowed {
                        verb: parts.method.to_string(),
                    };
                    return error_response(&err, false);
                }

                dispatcher
                    .dispatch("index", "index", RequestContext::new(parts, body))
                    .await
            }
            Mount::WebController(dispatcher) => {
                let controller = matched.params.get("controller").unwrap_or_default().to_owned();

                dispatcher
                    .dispatch(&controller, "", RequestContext::new(parts, body))
                    .await
            }
            Mount::WebAction(dispatcher) => {
                let controller = matched.params.get("controller").unwrap_or_default().to_owned();
                let action = matched.params.get("action").unwrap_or_default().to_owned();

                dispatcher
                    .dispatch(&controller, &action, RequestContext::new(parts, body))
                    .await
            }
            Mount::Rest(dispatcher) => {
                let rest_path = matched.params.get("path").unwrap_or_default().to_owned();

                dispatcher
                    .dispatch(&rest_path, RequestContext::new(parts, body))
                    .await
            }
        }
    }

    /// Run the HTTP server. Serves each connection on its own task until
    /// interrupted.
    pub async fn serve(self) -> Result<(), IngressError> {
        let addr_str = self.addr.as_deref().unwrap_or("127.0.0.1:3000");
        let addr: SocketAddr = addr_str.parse()?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Switchboard HTTP ingress listening on http://{}", addr);

        let ingress = Arc::new(self);

        loop {
            let (stream, _) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let ingress = ingress.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req: Request<Incoming>| {
                    let ingress = ingress.clone();
                    async move { Ok::<_, Infallible>(ingress.handle(req).await) }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::error!("Error serving connection: {:?}", err);
                }
            });
        }
    }
}

impl Default for HttpIngress {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(Full::new(Bytes::from("Not Found")))
        .unwrap()
}
