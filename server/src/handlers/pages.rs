use actix_files::{Files, NamedFile};
use actix_web::{web, Responder, Result};
use askama_actix::Template;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {}

pub fn configure_page_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)));
    cfg.service(web::resource("/robots.txt").route(web::get().to(robots)));
    cfg.service(web::resource("/sitemap.xml").route(web::get().to(sitemap)));
    cfg.service(Files::new("/static", "./static"));
}

async fn index() -> impl Responder {
    IndexTemplate {}
}

async fn robots() -> Result<NamedFile> {
    Ok(NamedFile::open("./static/robots.txt")?)
}

async fn sitemap() -> Result<NamedFile> {
    Ok(NamedFile::open("./static/sitemap.xml")?)
}
