use {
    order_sync::{
        AppState, adapters::stripe::WebhookVerifier, config::Config, infra::postgres::PgOrderStore,
    },
    sqlx::postgres::PgPoolOptions,
    std::{sync::Arc, time::Duration},
    tokio::signal,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("invalid configuration");

    if config.stripe_webhook_secret.is_none() {
        tracing::error!("STRIPE_WEBHOOK_SECRET is not set, webhooks will be answered with 500");
    }

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    let state = AppState {
        store: Arc::new(PgOrderStore::new(pool)),
        verifier: WebhookVerifier::new(
            config.stripe_webhook_secret.as_deref(),
            config.webhook_tolerance_secs,
        ),
        ack_policy: config.ack_policy,
    };

    let app = order_sync::router(state, &config.webhook_path);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("failed to bind");
    tracing::info!(
        addr = %config.bind_addr,
        path = %config.webhook_path,
        ack_policy = ?config.ack_policy,
        "listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
