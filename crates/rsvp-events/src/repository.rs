use super::*;
use rsvp_auth::Credentials;
use rsvp_auth::Member;
use rsvp_core::ID;
use rsvp_core::StoreError;

#[async_trait::async_trait]
pub trait Events: Send + Sync {
    async fn insert(&self, event: &Event) -> Result<(), StoreError>;
    async fn event(&self, id: ID<Event>) -> Result<Option<Event>, StoreError>;
    async fn events(&self) -> Result<Vec<Event>, StoreError>;
    /// Overwrites a stored event. Absent events yield [`StoreError::Missing`].
    async fn update(&self, event: &Event) -> Result<(), StoreError>;
    /// Removes the event and its attendance records.
    async fn remove(&self, id: ID<Event>) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
pub trait Attendees: Send + Sync {
    /// Records attendance. Repeats yield [`StoreError::Conflict`] and
    /// absent events yield [`StoreError::Missing`].
    async fn attend(&self, attendee: &Attendee) -> Result<(), StoreError>;
    async fn unattend(&self, event: ID<Event>, user: ID<Member>) -> Result<(), StoreError>;
    /// Members attending an event.
    async fn attendees(&self, event: ID<Event>) -> Result<Vec<Member>, StoreError>;
    /// Events a member attends.
    async fn attending(&self, user: ID<Member>) -> Result<Vec<Event>, StoreError>;
}

/// Everything the event handlers need from persistence.
pub trait Store: Credentials + Events + Attendees {}

impl<T> Store for T where T: Credentials + Events + Attendees {}

#[cfg(feature = "database")]
mod postgres {
    use super::*;
    use rsvp_core::Unique;
    use rsvp_pg::*;
    use std::sync::Arc;
    use tokio_postgres::Client;
    use tokio_postgres::Row;

    fn event(row: &Row) -> Event {
        Event::new(
            ID::from(row.get::<_, uuid::Uuid>(0)),
            ID::from(row.get::<_, uuid::Uuid>(1)),
            EventRequest {
                name: row.get(2),
                description: row.get(3),
                date: row.get(4),
                location: row.get(5),
            },
        )
    }

    #[async_trait::async_trait]
    impl Events for Arc<Client> {
        async fn insert(&self, event: &Event) -> Result<(), StoreError> {
            timed(self.execute(
                const_format::concatcp!(
                    "INSERT INTO ",
                    EVENTS,
                    " (id, owner_id, name, description, date, location) VALUES ($1, $2, $3, $4, $5, $6)"
                ),
                &[
                    &event.id().inner(),
                    &event.owner().inner(),
                    &event.name(),
                    &event.description(),
                    &event.date(),
                    &event.location(),
                ],
            ))
            .await
            .map(|_| ())
        }

        async fn event(&self, id: ID<Event>) -> Result<Option<Event>, StoreError> {
            timed(self.query_opt(
                const_format::concatcp!(
                    "SELECT id, owner_id, name, description, date, location FROM ",
                    EVENTS,
                    " WHERE id = $1"
                ),
                &[&id.inner()],
            ))
            .await
            .map(|opt| opt.as_ref().map(event))
        }

        async fn events(&self) -> Result<Vec<Event>, StoreError> {
            timed(self.query(
                const_format::concatcp!(
                    "SELECT id, owner_id, name, description, date, location FROM ",
                    EVENTS,
                    " ORDER BY id"
                ),
                &[],
            ))
            .await
            .map(|rows| rows.iter().map(event).collect())
        }

        async fn update(&self, event: &Event) -> Result<(), StoreError> {
            timed(self.execute(
                const_format::concatcp!(
                    "UPDATE ",
                    EVENTS,
                    " SET name = $2, description = $3, date = $4, location = $5 WHERE id = $1"
                ),
                &[
                    &event.id().inner(),
                    &event.name(),
                    &event.description(),
                    &event.date(),
                    &event.location(),
                ],
            ))
            .await
            .and_then(|rows| match rows {
                0 => Err(StoreError::Missing),
                _ => Ok(()),
            })
        }

        async fn remove(&self, id: ID<Event>) -> Result<(), StoreError> {
            timed(self.execute(
                const_format::concatcp!("DELETE FROM ", EVENTS, " WHERE id = $1"),
                &[&id.inner()],
            ))
            .await
            .map(|_| ())
        }
    }

    #[async_trait::async_trait]
    impl Attendees for Arc<Client> {
        async fn attend(&self, attendee: &Attendee) -> Result<(), StoreError> {
            timed(self.execute(
                const_format::concatcp!(
                    "INSERT INTO ",
                    ATTENDEES,
                    " (id, event_id, user_id) VALUES ($1, $2, $3)"
                ),
                &[
                    &attendee.id().inner(),
                    &attendee.event().inner(),
                    &attendee.user().inner(),
                ],
            ))
            .await
            .map(|_| ())
        }

        async fn unattend(&self, event: ID<Event>, user: ID<Member>) -> Result<(), StoreError> {
            timed(self.execute(
                const_format::concatcp!(
                    "DELETE FROM ",
                    ATTENDEES,
                    " WHERE event_id = $1 AND user_id = $2"
                ),
                &[&event.inner(), &user.inner()],
            ))
            .await
            .map(|_| ())
        }

        async fn attendees(&self, event: ID<Event>) -> Result<Vec<Member>, StoreError> {
            timed(self.query(
                const_format::concatcp!(
                    "SELECT u.id, u.name, u.email FROM ",
                    USERS,
                    " u JOIN ",
                    ATTENDEES,
                    " a ON a.user_id = u.id WHERE a.event_id = $1 ORDER BY a.id"
                ),
                &[&event.inner()],
            ))
            .await
            .map(|rows| {
                rows.iter()
                    .map(|row| {
                        Member::new(
                            ID::from(row.get::<_, uuid::Uuid>(0)),
                            row.get::<_, String>(1),
                            row.get::<_, String>(2),
                        )
                    })
                    .collect()
            })
        }

        async fn attending(&self, user: ID<Member>) -> Result<Vec<Event>, StoreError> {
            timed(self.query(
                const_format::concatcp!(
                    "SELECT e.id, e.owner_id, e.name, e.description, e.date, e.location FROM ",
                    EVENTS,
                    " e JOIN ",
                    ATTENDEES,
                    " a ON a.event_id = e.id WHERE a.user_id = $1 ORDER BY a.id"
                ),
                &[&user.inner()],
            ))
            .await
            .map(|rows| rows.iter().map(event).collect())
        }
    }
}
