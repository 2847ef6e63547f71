pub mod converter;
pub mod entity;
pub mod schema;

pub use entity::{attendee, check_in, event};
pub use schema::setup_schema;
