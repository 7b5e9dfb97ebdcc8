pub extern crate serde;
pub extern crate serde_json;
pub extern crate uuid;

pub mod document;
pub mod message;

pub use document::Document;
pub use message::*;
