use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::prelude::*;

use secretaria_api::config::ApiConfig;
use secretaria_api::handlers;
use secretaria_api::helpers;
use secretaria_api::integrations::{HttpRelayTransport, LogMailTransport, MailTransport};
use secretaria_api::jobs::{DispatcherSettings, MailDispatcher, NotificationScheduler};
use secretaria_api::storage::{EventStore, InMemoryEventStore, SqliteEventStore};
use secretaria_api::CommandInterpreter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,

    /// Read configuration from this file instead of the per-user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep events and chat history in memory; nothing survives a restart
    #[arg(long)]
    in_memory: bool,
}

fn startup_error(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{}: {}", context, e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = args.log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("secretaria-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter.clone())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let (config, config_path) = ApiConfig::load(args.config.as_deref())
        .map_err(|e| startup_error("Failed to load config", e))?;
    tracing::info!("Configuration loaded from {:?}", config_path);

    let in_memory = args.in_memory || config.storage.in_memory;
    let db = helpers::database::initialize_database(in_memory)
        .map_err(|e| startup_error("Failed to initialize database", e))?;

    let store: Arc<dyn EventStore> = if in_memory {
        tracing::info!("Running with in-memory storage");
        Arc::new(InMemoryEventStore::new())
    } else {
        if let Ok(db_path) = helpers::database::get_db_path() {
            tracing::info!("Database initialized at: {:?}", db_path);
        }
        Arc::new(SqliteEventStore::new(db.async_connection.clone()))
    };

    let transport: Arc<dyn MailTransport> = match &config.mail.relay_url {
        Some(relay_url) => {
            tracing::info!("Sending mail through relay {}", relay_url);
            Arc::new(
                HttpRelayTransport::new(relay_url.clone(), config.mail.from.clone())
                    .map_err(|e| startup_error("Failed to build mail relay client", e))?,
            )
        }
        None => {
            tracing::warn!("No mail relay configured, notifications will only be logged");
            Arc::new(LogMailTransport)
        }
    };

    let (dispatcher, worker) =
        MailDispatcher::new(transport, DispatcherSettings::from(&config.mail));
    tokio::spawn(worker.run());

    let offset = config.calendar.utc_offset();
    let scheduler = Arc::new(NotificationScheduler::new(
        dispatcher,
        &config.notifications,
        offset,
    ));

    // Events already on disk must not trigger "new event" mail on the first tick
    if let Err(e) = scheduler
        .seed_from_store(store.as_ref(), chrono::Utc::now().timestamp())
        .await
    {
        tracing::warn!("Failed to seed notification scheduler: {}", e);
    }

    tokio::spawn(
        scheduler
            .clone()
            .run(Duration::from_secs(config.notifications.tick_interval_secs)),
    );

    let interpreter = Arc::new(CommandInterpreter::new(
        store.clone(),
        scheduler.clone(),
        offset,
    ));

    let (host, port) = config.server_address();
    tracing::info!("Starting server on {}:{}", host, port);

    let shutdown_scheduler = scheduler.clone();
    let cors_config = config.cors.clone();
    let server = HttpServer::new(move || {
        let cors = if let Some(cors_config) = &cors_config {
            let mut cors_builder = Cors::default();
            for origin in &cors_config.allowed_origins {
                cors_builder = cors_builder.allowed_origin(origin);
            }
            cors_builder
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec!["Accept", "Content-Type", helpers::identity::OWNER_HEADER])
                .max_age(3600)
        } else {
            Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec!["Accept", "Content-Type", helpers::identity::OWNER_HEADER])
                .max_age(3600)
        };

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(scheduler.clone()))
            .app_data(web::Data::new(interpreter.clone()))
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run();

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }

        tracing::info!("Ctrl+C received, shutting down...");
        shutdown_scheduler.shutdown();

        handle.stop(true).await;
    });

    server.await
}
