use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use hirely::config::{DistanceProvider, LoggingSettings, Settings, StorageBackend};
use hirely::core::{DistanceLookup, HaversineLookup, Ranker, Recommender};
use hirely::error::{handle_json_payload_error, handle_query_payload_error};
use hirely::models::ScoringPoints;
use hirely::routes::{self, AppState};
use hirely::services::{
    AssistantClient, AssistantOptions, InMemoryStore, MapsClient, PostgresStore, Storage,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(settings: &LoggingSettings) {
    // LOG_LEVEL wins over the configured level, e.g. LOG_LEVEL=hirely=debug
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.level.clone());
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.format.clone());

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn other_error<E: std::fmt::Display>(context: &str, err: E) -> io::Error {
    error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

async fn build_store(settings: &Settings) -> io::Result<Arc<dyn Storage>> {
    match settings.storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory storage; documents are lost on restart");
            Ok(Arc::new(InMemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let url = settings.storage.database_url.as_deref().ok_or_else(|| {
                other_error("Configuration error", "storage.database_url is required for postgres")
            })?;

            let store = PostgresStore::from_settings(
                url,
                settings.storage.max_connections,
                settings.storage.min_connections,
                settings.storage.acquire_timeout_secs,
            )
            .await
            .map_err(|e| other_error("PostgreSQL connection error", e))?;

            info!("PostgreSQL store initialized");
            Ok(Arc::new(store))
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);

    info!("Starting Hirely job service...");

    let store = build_store(&settings).await?;

    let maps = Arc::new(
        MapsClient::new(
            settings.maps.endpoint.clone(),
            settings.maps.api_key.clone(),
            Duration::from_secs(settings.maps.timeout_secs),
        )
        .map_err(|e| other_error("Maps client error", e))?,
    );

    if settings.maps.api_key.is_empty() {
        warn!("No maps API key configured; travel-time requests will fail");
    }

    let assistant = Arc::new(
        AssistantClient::new(AssistantOptions {
            endpoint: settings.assistant.endpoint.clone(),
            api_key: settings.assistant.api_key.clone(),
            model: settings.assistant.model.clone(),
            system_prompt: settings.assistant.system_prompt.clone(),
            fallback_reply: settings.assistant.fallback_reply.clone(),
            timeout: Duration::from_secs(settings.assistant.timeout_secs),
        })
        .map_err(|e| other_error("Assistant client error", e))?,
    );

    let lookup: Arc<dyn DistanceLookup> = match settings.ranking.distance_provider {
        DistanceProvider::Haversine => Arc::new(HaversineLookup),
        DistanceProvider::Maps => maps.clone(),
    };

    let points = ScoringPoints::from(&settings.ranking.points);
    info!(
        "Ranking with {:?} distances and points {:?}",
        settings.ranking.distance_provider, points
    );

    let ranker = Ranker::new(lookup, points)
        .with_lookup_timeout(Duration::from_millis(settings.ranking.distance_timeout_ms))
        .with_max_concurrent_lookups(settings.ranking.max_concurrent_lookups);
    let recommender = Recommender::new(
        store.clone(),
        Arc::new(ranker),
        settings.ranking.next_batch_size,
    );

    let app_state = AppState {
        store,
        recommender,
        maps,
        assistant,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting HTTP server on {}:{}", host, port);

    let mut server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    });

    if let Some(workers) = settings.server.workers {
        server = server.workers(workers);
    }

    server.bind((host, port))?.run().await
}
