//! PostgreSQL integration for rsvp.
//!
//! ## Connectivity
//!
//! - [`db()`] — Establishes a database connection from a URL
//! - [`timed()`] — Bounds a query by [`STORE_TIMEOUT`] and classifies its failure
//!
//! ## Schema
//!
//! - [`Schema`] — Table metadata and DDL generation
//! - [`create()`] / [`teardown()`] — Apply a schema to a connection
//!
//! ## Table Names
//!
//! Constants for all persistent entities: users, events, attendees.
mod schema;

pub use schema::*;

use rsvp_core::STORE_TIMEOUT;
use rsvp_core::StoreError;
use std::future::Future;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::error::SqlState;

/// Establishes a database connection.
///
/// Returns an `Arc<Client>` suitable for sharing across async tasks.
/// The connection driver is spawned onto the current runtime.
pub async fn db(url: &str) -> Result<Arc<Client>, PgErr> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = tokio_postgres::connect(url, tls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    Ok(Arc::new(client))
}

/// Runs a query under [`STORE_TIMEOUT`].
///
/// Elapsed deadlines become [`StoreError::Timeout`], unique violations
/// become [`StoreError::Conflict`], foreign key violations become
/// [`StoreError::Missing`]. Anything else is a backend failure.
pub async fn timed<T, F>(query: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, PgErr>>,
{
    match tokio::time::timeout(STORE_TIMEOUT, query).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) if e.code() == Some(&SqlState::UNIQUE_VIOLATION) => Err(StoreError::Conflict),
        Ok(Err(e)) if e.code() == Some(&SqlState::FOREIGN_KEY_VIOLATION) => Err(StoreError::Missing),
        Ok(Err(e)) => Err(StoreError::Backend(e.to_string())),
        Err(_) => Err(StoreError::Timeout),
    }
}

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Table for event attendance (event × user).
#[rustfmt::skip]
pub const ATTENDEES: &str = "attendees";
/// Table for events and their owners.
#[rustfmt::skip]
pub const EVENTS:    &str = "events";
/// Table for registered user accounts.
#[rustfmt::skip]
pub const USERS:     &str = "users";

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn slow_query_times_out() {
        let slow = async {
            tokio::time::sleep(STORE_TIMEOUT * 2).await;
            Ok::<_, PgErr>(())
        };
        assert_eq!(timed(slow).await, Err(StoreError::Timeout));
    }

    #[tokio::test]
    async fn fast_query_passes_through() {
        let fast = async { Ok::<_, PgErr>(7) };
        assert_eq!(timed(fast).await, Ok(7));
    }
}
