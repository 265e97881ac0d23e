//! REST API for the Wordcard vocabulary list.
//!
//! Routes, all JSON:
//! - `GET    /api/words`      every word, in insertion order
//! - `GET    /api/words/{id}` one word, or 404
//! - `POST   /api/words`      create from `{text, definition, example, type}`, 201
//! - `PUT    /api/words/{id}` replace any subset of those fields, or 404
//! - `DELETE /api/words/{id}` 204, or 404
//!
//! Words live in one pretty-printed JSON array file, rewritten on every
//! mutation.
//!
//! # Run
//! ```sh
//! cargo run -p wordcard_server -- --port 3000 --db-file ./db.json
//! ```
use std::time::Instant;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use log::{error, info};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use config::Config;
use error::ServerError;
use routes::{
    create_word_handler, delete_word_handler, get_word_handler, list_words_handler,
    update_word_handler,
};
use state::{SharedState, State};

/// Builds the router over `state`.
pub fn app(state: SharedState) -> Router {
    Router::new()
        .route(
            "/api/words",
            get(list_words_handler).post(create_word_handler),
        )
        .route(
            "/api/words/{id}",
            get(get_word_handler)
                .put(update_word_handler)
                .delete(delete_word_handler),
        )
        .layer(middleware::from_fn(log_requests))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `config.address()` and serves until Ctrl+C or SIGTERM.
pub async fn start_server(config: Config) -> Result<(), ServerError> {
    let state = State::new(&config.db_file);
    info!(
        "event=server_init module=server status=ok db_file={}",
        state.db_file.display()
    );

    let address = config.address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
    info!("event=server_listen module=server status=ok address={address}");

    serve(listener, state).await?;
    info!("event=server_stop module=server status=ok");
    Ok(())
}

/// Serves the API on an already bound listener until Ctrl+C or SIGTERM.
pub async fn serve(listener: TcpListener, state: SharedState) -> Result<(), ServerError> {
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn log_requests(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=server method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("event=server_signal module=server signal=ctrl_c"),
            Err(err) => {
                error!("event=server_signal module=server status=error error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("event=server_signal module=server signal=terminate");
            }
            Err(err) => {
                error!("event=server_signal module=server status=error error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
