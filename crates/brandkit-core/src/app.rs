use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::auth::RateLimiter;
use crate::config::Config;
use crate::controllers::AppState;
use crate::routing;
use crate::synonyms::{SynonymSource, Thesaurus};

/// The brandkit application: configuration plus every service the handlers
/// need, created once at startup.
pub struct App {
    pub config: Config,
    pub db: DatabaseConnection,
    pub synonyms: Arc<dyn SynonymSource>,
    rate_limiter: Arc<RateLimiter>,
}

impl App {
    /// Create the application from environment configuration.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::from_env()?;
        Self::with_config(config).await
    }

    /// Create the application with a given config.
    ///
    /// Connects to the database, runs pending migrations and loads the
    /// synonym dictionary named by the config.
    pub async fn with_config(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let thesaurus = Thesaurus::from_config(&config)?;
        Self::with_synonyms(config, Arc::new(thesaurus)).await
    }

    /// Create the application with an explicit synonym source.
    pub async fn with_synonyms(
        config: Config,
        synonyms: Arc<dyn SynonymSource>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let db = crate::db::connect(&config).await?;
        crate::db::migrate(&db).await?;

        let rate_limiter = Arc::new(RateLimiter::new(
            config.security.rate_limit_max_attempts,
            config.security.rate_limit_window_secs,
        ));

        Ok(App {
            config,
            db,
            synonyms,
            rate_limiter,
        })
    }

    /// Shared handler state.
    pub fn state(&self) -> AppState {
        AppState {
            db: self.db.clone(),
            config: Arc::new(self.config.clone()),
            synonyms: self.synonyms.clone(),
            rate_limiter: self.rate_limiter.clone(),
        }
    }

    /// Build the Axum router.
    pub fn router(&self) -> Router {
        let mut router = routing::build_routes()
            .with_state(self.state())
            .layer(CorsLayer::permissive());

        // Request tracing and request ids in development only.
        if self.config.is_dev() {
            use tower_http::LatencyUnit;
            use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse};

            let x_request_id = axum::http::HeaderName::from_static("x-request-id");
            router = router
                .layer(SetRequestIdLayer::new(
                    x_request_id.clone(),
                    MakeRequestUuid,
                ))
                .layer(PropagateRequestIdLayer::new(x_request_id))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                        .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                        .on_response(
                            DefaultOnResponse::new()
                                .level(tracing::Level::INFO)
                                .latency_unit(LatencyUnit::Millis),
                        ),
                );
        }

        router
    }

    /// Run the server until Ctrl+C / SIGTERM.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.config.server_addr();
        let router = self.router();

        let limiter = self.rate_limiter.clone();
        let sweep_every = std::time::Duration::from_secs(
            self.config.security.rate_limit_window_secs.max(60),
        );
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(sweep_every);
            loop {
                interval.tick().await;
                limiter.cleanup();
            }
        });

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("brandkit server running on http://{}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }

    /// Run migrations only.
    pub async fn migrate(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let db = crate::db::connect(config).await?;
        crate::db::migrate(&db).await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
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
    tracing::info!("Shutting down brandkit server...");
}
