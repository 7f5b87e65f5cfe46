use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use climbclub::auth::{AdminCredentials, password};
use climbclub::config::Config;
use climbclub::errors::ApiErrorResponse;
use climbclub::handlers;
use climbclub::store::Store;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let store = web::Data::new(
        Store::open(&config.data_file).expect("Failed to open data file"),
    );

    let password_hash = password::hash_password(&config.admin_password)
        .expect("Failed to hash admin password");
    let creds = web::Data::new(AdminCredentials { password_hash });

    // Session encryption key - load from SESSION_KEY env var so admin
    // sessions survive restarts
    let secret_key = match std::env::var("SESSION_KEY") {
        Ok(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Ok(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need 64+) - generating random key",
                val.len()
            );
            Key::generate()
        }
        Err(_) => {
            log::warn!("No SESSION_KEY set - generating random key (admin sessions lost on restart)");
            Key::generate()
        }
    };

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        let session_mw =
            SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                .cookie_secure(false)
                .cookie_http_only(true)
                .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .app_data(creds.clone())
            .configure(handlers::configure)
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound().json(ApiErrorResponse {
                    error: "Not found".to_string(),
                })
            }))
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await
}
