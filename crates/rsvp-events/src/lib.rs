//! Events and their attendee rosters.
//!
//! Reads are public. Every mutation resolves the caller through
//! [`rsvp_auth::Auth`], confirms the event exists, and only then asks the
//! ownership guard.
//!
//! - [`Event`] / [`EventRequest`] — Event record and its client-editable fields
//! - [`Attendee`] — Attendance of one member at one event
//! - [`Events`] / [`Attendees`] / [`Store`] — Persistence interfaces
//! - [`Memory`] — In-process store for development and tests
mod attendee;
mod event;
mod memory;
mod repository;

pub use attendee::*;
pub use event::*;
pub use memory::*;
pub use repository::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
pub use handlers::*;
