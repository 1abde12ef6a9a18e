use std::{
    env,
    net::{Ipv6Addr, SocketAddr},
};

use axum::routing::get;
use log::info;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

mod authors;
mod context;
mod docs;
mod errors;
pub mod logging;
mod podcasts;
mod progress;
mod queue;
mod schemas;
mod serialized;
mod subscriptions;
mod users;
mod util;

pub use context::ServerContext;

/// The default port the server will listen on.
pub const DEFAULT_PORT: u16 = 9051;

pub type Router = axum::Router<ServerContext>;

/// Builds the full route tree with the supplied context injected as state
pub fn router(context: ServerContext) -> axum::Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    axum::Router::new()
        .nest("/users", users::router())
        .nest("/authors", authors::router())
        .nest("/podcasts", podcasts::router())
        .nest("/progress", progress::router())
        .nest("/queue", queue::router())
        .nest("/subscriptions", subscriptions::router())
        .route("/api.json", get(docs::docs))
        .layer(cors)
        .with_state(context)
}

/// Starts the podtrack server
pub async fn run_server(context: ServerContext) {
    let port = env::var("PODTRACK_SERVER_PORT")
        .map(|x| x.parse::<u16>().expect("Port must be a number"))
        .unwrap_or(DEFAULT_PORT);

    let addr: SocketAddr = (Ipv6Addr::UNSPECIFIED, port).into();
    let listener = TcpListener::bind(&addr).await.expect("listens on address");

    info!("Listening on port {port}");

    axum::serve(listener, router(context).into_make_service())
        .await
        .expect("server runs");
}
