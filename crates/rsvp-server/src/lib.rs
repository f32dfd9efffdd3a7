//! Backend Server
//!
//! Wires the auth and events crates into a single actix-web server.
//!
//! ## Submodules
//!
//! - [`config`] — Flags and environment
//! - [`migrate`] — Schema creation and teardown

pub mod config;
pub mod migrate;

pub use config::Config;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use rsvp_auth::ApiError;
use rsvp_auth::Credentials;
use rsvp_auth::Crypto;
use rsvp_auth::Hasher;
use rsvp_events::Memory;
use rsvp_events::Store;
use std::sync::Arc;

async fn health(db: web::Data<dyn Store>) -> impl Responder {
    match db
        .ping()
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

/// Shared, read-mostly application state handed to every worker.
#[derive(Clone)]
pub struct State {
    crypto: web::Data<Crypto>,
    hasher: web::Data<Hasher>,
    credentials: web::Data<dyn Credentials>,
    store: web::Data<dyn Store>,
}

impl State {
    pub fn new<S>(store: S, crypto: Crypto, hasher: Hasher) -> Self
    where
        S: Store + 'static,
    {
        let store = Arc::new(store);
        let credentials: Arc<dyn Credentials> = store.clone();
        let store: Arc<dyn Store> = store;
        Self {
            crypto: web::Data::new(crypto),
            hasher: web::Data::new(hasher),
            credentials: web::Data::from(credentials),
            store: web::Data::from(store),
        }
    }

    #[rustfmt::skip]
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.crypto.clone())
            .app_data(self.hasher.clone())
            .app_data(self.credentials.clone())
            .app_data(self.store.clone())
            .app_data(web::JsonConfig::default().error_handler(|e, _| ApiError::Validation(e.to_string()).into()))
            .app_data(web::PathConfig::default().error_handler(|e, _| ApiError::Validation(e.to_string()).into()))
            .route("/health", web::get().to(health))
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(rsvp_auth::register))
                            .route("/login", web::post().to(rsvp_auth::login))
                            .route("/me", web::get().to(rsvp_auth::me)),
                    )
                    .service(
                        web::resource("/events")
                            .route(web::get().to(rsvp_events::list))
                            .route(web::post().to(rsvp_events::create)),
                    )
                    .service(
                        web::resource("/events/{id}")
                            .route(web::get().to(rsvp_events::fetch))
                            .route(web::put().to(rsvp_events::update))
                            .route(web::delete().to(rsvp_events::delete)),
                    )
                    .service(
                        web::resource("/events/{id}/attendees")
                            .route(web::get().to(rsvp_events::attendees)),
                    )
                    .service(
                        web::resource("/events/{id}/attendees/{user}")
                            .route(web::post().to(rsvp_events::attend))
                            .route(web::delete().to(rsvp_events::unattend)),
                    )
                    .service(
                        web::resource("/attendees/{id}/events")
                            .route(web::get().to(rsvp_events::attending)),
                    ),
            );
    }
}

/// Builds state from `config` and serves until shutdown.
///
/// A missing signing secret or bad hashing parameters stop startup
/// before the listener binds.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let crypto = Crypto::new(config.jwt_secret.as_bytes())?;
    let hasher = Hasher::new(
        config.hash_memory_kib,
        config.hash_iterations,
        config.hash_parallelism,
    )?;
    let state = match config.db_url.as_deref() {
        Some(url) => State::new(rsvp_pg::db(url).await?, crypto, hasher),
        None => {
            log::warn!("DB_URL not set, keeping all data in memory");
            State::new(Memory::default(), crypto, hasher)
        }
    };
    log::info!("starting server on {}", config.bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .configure(|cfg| state.configure(cfg))
    })
    .workers(config.workers)
    .bind(&config.bind)?
    .run()
    .await?;
    Ok(())
}
