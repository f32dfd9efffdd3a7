use rsvp_auth::Member;
use rsvp_events::Attendee;
use rsvp_events::Event;
use rsvp_pg::PgErr;
use tokio_postgres::Client;

/// Creates all tables, parents first.
pub async fn up(client: &Client) -> Result<(), PgErr> {
    rsvp_pg::create::<Member>(client).await?;
    rsvp_pg::create::<Event>(client).await?;
    rsvp_pg::create::<Attendee>(client).await
}

/// Drops all tables, children first.
pub async fn down(client: &Client) -> Result<(), PgErr> {
    rsvp_pg::teardown::<Attendee>(client).await?;
    rsvp_pg::teardown::<Event>(client).await?;
    rsvp_pg::teardown::<Member>(client).await
}
