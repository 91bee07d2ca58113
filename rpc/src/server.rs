//! Axum router and server for the board API.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use campustalk_engine::BoardEngine;
use campustalk_store::{PollStore, PostStore};

use crate::auth::IdentityProvider;
use crate::handlers;

/// Shared state threaded through every handler.
pub struct AppState<S> {
    pub engine: Arc<BoardEngine<S>>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            identity: self.identity.clone(),
        }
    }
}

impl<S> AppState<S> {
    pub fn new(engine: Arc<BoardEngine<S>>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { engine, identity }
    }
}

/// Build the full API router.
pub fn router<S>(state: AppState<S>, permissive_cors: bool) -> Router
where
    S: PostStore + PollStore + 'static,
{
    let mut app = Router::new()
        .route(
            "/posts",
            get(handlers::list_posts::<S>).post(handlers::create_post::<S>),
        )
        .route(
            "/posts/:id",
            get(handlers::get_post::<S>)
                .put(handlers::edit_post::<S>)
                .delete(handlers::delete_post::<S>),
        )
        .route("/posts/:id/comments", post(handlers::add_comment::<S>))
        .route("/posts/:id/vote", post(handlers::vote_post::<S>))
        .route("/posts/:id/report", post(handlers::report_post::<S>))
        .route("/posts/:id/restore", post(handlers::restore_post::<S>))
        .route(
            "/polls",
            get(handlers::list_polls::<S>).post(handlers::create_poll::<S>),
        )
        .route(
            "/polls/:id",
            put(handlers::edit_poll::<S>).delete(handlers::delete_poll::<S>),
        )
        .route("/polls/:id/vote", post(handlers::vote_poll::<S>))
        .with_state(state);

    if permissive_cors {
        app = app.layer(CorsLayer::permissive());
    }
    app
}

/// The HTTP server, configured with a port and the CORS policy.
pub struct BoardServer {
    pub port: u16,
    pub permissive_cors: bool,
}

impl BoardServer {
    pub fn new(port: u16, permissive_cors: bool) -> Self {
        Self {
            port,
            permissive_cors,
        }
    }

    /// Bind and serve until shutdown.
    pub async fn start<S>(&self, state: AppState<S>) -> std::io::Result<()>
    where
        S: PostStore + PollStore + 'static,
    {
        let app = router(state, self.permissive_cors);
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("board API listening on {addr}");
        axum::serve(listener, app).await
    }
}
