use actix_cors::Cors;
use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use itinera_api::{config, routes, store::AppState};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8000;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    // The generated-image tree must exist before the file service mounts it.
    let static_root = config::static_dir();
    config::ensure_dir(&static_root)?;

    let state = web::Data::new(AppState::in_memory());

    log::info!("starting Itinera AI on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::configure)
            .service(Files::new("/static", config::static_dir()))
    })
    .bind((host, port))?
    .run()
    .await
}
