use std::{net::SocketAddr, sync::Arc, time::Duration};

use backend::{AppState, client::AnalysisClient, create_router};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ANALYSIS_URL: &str =
    "https://pixel-prediction-1000116839323.europe-west1.run.app/deforestation";

#[derive(Parser, Debug)]
#[command(about = "Proxy for the deforestation analysis service")]
struct Args {
    /// Address to serve the API on.
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: SocketAddr,
    /// Remote analysis endpoint; falls back to ANALYSIS_API_URL.
    #[arg(long)]
    analysis_url: Option<String>,
    /// Outbound request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let endpoint = args
        .analysis_url
        .or_else(|| std::env::var("ANALYSIS_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_ANALYSIS_URL.to_string());

    let client = AnalysisClient::new(endpoint, Duration::from_secs(args.timeout_secs))
        .expect("build analysis client");
    tracing::info!("forwarding analysis requests to {}", client.endpoint());

    let state = AppState {
        client: Arc::new(client),
    };
    let app = create_router(state);

    tracing::info!("starting backend on http://{}", args.listen);
    axum::serve(
        tokio::net::TcpListener::bind(args.listen).await.unwrap(),
        app,
    )
    .await
    .unwrap();
}
