pub extern crate actix_web;

pub mod connection;
pub mod handlers;
pub mod registry;
pub mod room;
mod roster;
