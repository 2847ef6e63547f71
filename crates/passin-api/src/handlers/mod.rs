pub mod attendee;
pub mod event;

pub use attendee::*;
pub use event::*;
