//! Entity to model mappers
//!
//! Conversions between domain entities (plural-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `encode_proxy_tags`/`decode_proxy_tags`: the JSON column format for tag lists

mod diary;
mod member;
mod message;

pub use member::{decode_proxy_tags, encode_proxy_tags};
