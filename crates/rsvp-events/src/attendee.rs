use super::*;
use rsvp_auth::Member;
use rsvp_core::ID;
use rsvp_core::Unique;

/// One member's attendance at one event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    id: ID<Self>,
    #[serde(rename = "eventId")]
    event: ID<Event>,
    #[serde(rename = "userId")]
    user: ID<Member>,
}

impl Attendee {
    pub fn new(id: ID<Self>, event: ID<Event>, user: ID<Member>) -> Self {
        Self { id, event, user }
    }
    pub fn event(&self) -> ID<Event> {
        self.event
    }
    pub fn user(&self) -> ID<Member> {
        self.user
    }
}

impl Unique for Attendee {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use rsvp_pg::*;

    impl Schema for Attendee {
        fn name() -> &'static str {
            ATTENDEES
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                ATTENDEES,
                " (
                    id          UUID PRIMARY KEY,
                    event_id    UUID NOT NULL REFERENCES ",
                EVENTS,
                "(id) ON DELETE CASCADE,
                    user_id     UUID NOT NULL REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE,
                    UNIQUE (event_id, user_id)
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_attendees_event ON ",
                ATTENDEES,
                " (event_id);
                 CREATE INDEX IF NOT EXISTS idx_attendees_user ON ",
                ATTENDEES,
                " (user_id);"
            )
        }
        fn drops() -> &'static str {
            const_format::concatcp!("DROP TABLE IF EXISTS ", ATTENDEES, ";")
        }
    }
}
