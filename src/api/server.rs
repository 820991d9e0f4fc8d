//! HTTP transport for the todo dispatcher.
//!
//! Every request is routed to a single axum fallback that converts it into a
//! [`Request`] and runs [`Router::dispatch`] on tokio's blocking pool, since
//! dispatch may wait on the store lock and on disk writes. Path matching is
//! left entirely to the dispatcher. A body that cannot be read, including one
//! over axum's default 2 MiB limit, is answered as a `400` plain-text error.

use super::handlers;
use super::request::Request;
use super::router::{AppContext, Router};
use crate::db::todos::TodoStore;
use crate::libs::config::Options;
use crate::libs::error::TodoError;
use crate::libs::messages::Message;
use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

/// A running service instance.
pub struct TodoService {
    local_addr: SocketAddr,
    router: Arc<Router>,
    shutdown: oneshot::Sender<()>,
    server: JoinHandle<std::io::Result<()>>,
}

impl TodoService {
    /// Opens the store, binds the port and starts serving in the background.
    ///
    /// # Errors
    ///
    /// Fails when the store file is unreadable or corrupt, or when the port
    /// cannot be bound.
    pub async fn start(options: &Options) -> Result<TodoService> {
        let store = TodoStore::open(&options.store_file_path)?;
        let router = Arc::new(handlers::router(AppContext::new(Arc::new(store))));

        let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, options.port));
        tracing::info!("{}", Message::ServerStarting(bind_addr.to_string()));
        let listener = TcpListener::bind(bind_addr).await.with_context(|| format!("failed to bind {}", bind_addr))?;
        let local_addr = listener.local_addr()?;

        let app = axum::Router::new()
            .fallback(dispatch)
            .with_state(Arc::clone(&router))
            .layer(TraceLayer::new_for_http());

        let (shutdown, shutdown_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        tracing::info!("{}", Message::ServerListening(local_addr.to_string()));
        Ok(TodoService {
            local_addr,
            router,
            shutdown,
            server,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn store(&self) -> &Arc<TodoStore> {
        &self.router.context().store
    }

    /// Stops accepting connections, lets in-flight requests finish and waits
    /// for the server task to exit.
    pub async fn stop(self) -> Result<()> {
        tracing::info!("{}", Message::ServerStopping);
        let _ = self.shutdown.send(());
        join(self.server).await
    }

    /// Runs until the server task exits on its own.
    pub async fn wait(self) -> Result<()> {
        // Dropping the sender would resolve the graceful-shutdown future.
        let _shutdown = self.shutdown;
        join(self.server).await
    }
}

async fn join(server: JoinHandle<std::io::Result<()>>) -> Result<()> {
    server.await.context("server task panicked")??;
    tracing::info!("{}", Message::ServerStopped);
    Ok(())
}

async fn dispatch(
    State(router): State<Arc<Router>>,
    method: Method,
    uri: Uri,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            let error = TodoError::BadRequest(rejection.body_text());
            return router.reject(&method, uri.path(), &error).into_response();
        }
    };
    let request = Request::from_parts(method, &uri, body);
    match tokio::task::spawn_blocking(move || router.dispatch(&request)).await {
        Ok(reply) => reply.into_response(),
        Err(e) => {
            tracing::error!("{}", Message::ServerFailed(e.to_string()));
            (StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error").into_response()
        }
    }
}
