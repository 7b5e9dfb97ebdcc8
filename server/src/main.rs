use actix_cors::Cors;
use actix_web::{web, App, HttpServer};

use server::handlers;
use server::registry::RoomRegistry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let registry = web::Data::new(RoomRegistry::default());

    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    log::info!("listening on 0.0.0.0:{}", port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(registry.clone())
            .configure(handlers::root)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
