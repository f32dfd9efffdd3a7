//! Authentication, identity, and ownership for rsvp.
//!
//! JWT bearer tokens over Argon2id password credentials. Every mutating
//! event operation passes through the [`Auth`] extractor and then the
//! ownership [`authorize`] check.
//!
//! ## Identity Types
//!
//! - [`Member`] — Registered user, public projection only
//! - [`Identity`] — Request-scoped identity, explicitly anonymous or a member
//! - [`Claims`] — JWT payload structure
//!
//! ## Security
//!
//! - [`Hasher`] — Argon2id hashing and constant-time verification
//! - [`Crypto`] — HS256 token issuance and verification
//! - [`authorize`] — Ownership guard
//!
//! ## Persistence
//!
//! - [`Credentials`] — Credential store interface
//! - [`Memory`] — In-process credential store
mod claims;
mod crypto;
mod dto;
mod error;
mod guard;
mod identity;
mod member;
mod memory;
mod password;
mod repository;

pub use claims::*;
pub use crypto::*;
pub use dto::*;
pub use error::*;
pub use guard::*;
pub use identity::*;
pub use member::*;
pub use memory::*;
pub use password::*;
pub use repository::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub use handlers::*;
#[cfg(feature = "server")]
pub use middleware::*;
