pub mod db;
pub mod error;
pub mod gateway;
pub mod manager;
pub mod model;

pub use db::{attendee, check_in, event, setup_schema};
pub use error::{PassInError, Result};
pub use gateway::{AttendeeGateway, DatabaseGateway};
pub use manager::CheckInManager;
pub use model::{
    slugify, Attendee, AttendeeBadge, AttendeeFilter, AttendeeSummary, CheckIn, Event,
    EventSummary, NewAttendee, NewEvent, ATTENDEES_PAGE_SIZE,
};
