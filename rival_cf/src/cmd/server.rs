use crate::{
    cmd::{codeforces_client, load_catalog},
    modules::handlers::{compare, liveness, ratings},
};
use anyhow::{Context, Result};
use axum::{extract::Extension, routing, Router, Server};
use clap::Args;
use http::Method;
use rival_cf_libs::{ProblemCatalog, SubmissionSource};
use std::{ffi::OsString, net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, Args)]
pub struct ServerArgs {
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    catalog: Option<OsString>,
    #[arg(long)]
    api_url: Option<String>,
}

pub async fn run(args: ServerArgs) -> Result<()> {
    let catalog = load_catalog(args.catalog)?;
    let client = codeforces_client(args.api_url)?;

    let app = create_router(catalog, Arc::new(client));
    let port = match args.port {
        Some(port) => port,
        None => {
            tracing::warn!("API server will be launched at default port number 8000");
            8000u16
        }
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server start at port {}", port);
    Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context(|| {
            let message = format!("failed to serve at port {}", port);
            tracing::error!(message);
            message
        })?;

    Ok(())
}

pub fn create_router(catalog: ProblemCatalog, source: Arc<dyn SubmissionSource>) -> Router {
    Router::new()
        .route("/api/compare", routing::get(compare))
        .route("/api/ratings", routing::get(ratings))
        .route("/api/liveness", routing::get(liveness))
        .layer(Extension(Arc::new(catalog)))
        .layer(Extension(source))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET]),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler.");
    };

    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("SIGINT signal received, starting graceful shutdown.");
}
