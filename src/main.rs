use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use dotenvy::dotenv;

use podme_rss::{api, config::AppConfig, feed::build_feed, observability, AppState};

/// Serve PodMe podcasts as RSS feeds
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind, overrides PODME_RSS_HOST
    #[clap(long)]
    host: Option<String>,

    /// Port to listen on, overrides PODME_RSS_PORT
    #[clap(long)]
    port: Option<u16>,

    /// Build the feed for one slug, print it to stdout and exit
    #[clap(long, value_name = "SLUG")]
    dump: Option<String>,
}

fn main() -> std::io::Result<()> {
    dotenv().ok();
    observability::init_logging();

    let args = Args::parse();
    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    tracing::debug!(?config, "Loaded configuration");

    let state = AppState::new(config).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    match args.dump {
        Some(slug) => dump_feed(state, slug),
        None => run_server(state),
    }
}

#[actix_web::main]
async fn dump_feed(state: AppState, slug: String) -> std::io::Result<()> {
    match build_feed(&state.client, &slug, &state.config.channel).await {
        Ok(xml) => {
            println!("{}", xml);
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to build feed for {}: {}", slug, e);
            Err(std::io::Error::new(std::io::ErrorKind::Other, e))
        }
    }
}

#[actix_web::main]
async fn run_server(state: AppState) -> std::io::Result<()> {
    let host = state.config.host.clone();
    let port = state.config.port;
    tracing::info!("Starting server at http://{}:{}", host, port);

    let state = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::new(
                middleware::TrailingSlash::Trim,
            ))
            .app_data(state.clone())
            .service(api::health::routes())
            .service(api::routes())
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
