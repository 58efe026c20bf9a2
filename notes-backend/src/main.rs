use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware::Logger, web};
use clap::Parser;
use dotenv::dotenv;

mod config;
mod controllers;
mod notes;

use config::{Cli, Config};
use notes::NoteStore;

pub struct AppState {
    pub config: Config,
    pub store: NoteStore,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_cli(Cli::parse());
    log::info!("notes-backend v{}", env!("CARGO_PKG_VERSION"));

    let store = match NoteStore::open(config.store_dir.clone()) {
        Ok(store) => store,
        Err(e) => {
            log::error!(
                "Failed to prepare store directory {:?}: {}",
                config.store_dir,
                e
            );
            std::process::exit(1);
        }
    };
    log::info!("Store directory: {:?}", store.store_root());

    let static_dir = config::static_dir();
    let serve_static = static_dir.is_dir();
    if !serve_static {
        log::warn!("Static assets directory {:?} not found, skipping", static_dir);
    }

    let host = config.host.clone();
    let port = config.port;

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let mut app = App::new()
            .app_data(web::Data::new(AppState {
                config: config.clone(),
                store: store.clone(),
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::docs::config)
            .configure(controllers::notes::config);

        // Static assets must come after the API routes so they never
        // shadow them
        if serve_static {
            app = app.service(Files::new("/", static_dir.clone()).index_file("index.html"));
        }

        app
    })
    .bind((host.as_str(), port))?;

    log::info!("Server is running at http://{}:{}", host, port);

    server.run().await
}
