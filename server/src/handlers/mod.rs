use actix_web::web;

use crate::connection::ws_index;
use crate::handlers::pages::configure_page_handlers;

mod pages;

pub fn root(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws/{room_id}/{username}").route(web::get().to(ws_index)));

    configure_page_handlers(cfg);
}
