use rsvp_auth::Member;
use rsvp_core::ID;
use rsvp_core::Unique;
use serde::Deserialize;
use serde::Serialize;
use validator::Validate;

/// A scheduled event. `owner` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    id: ID<Self>,
    #[serde(rename = "ownerId")]
    owner: ID<Member>,
    name: String,
    description: String,
    date: chrono::NaiveDate,
    location: String,
}

/// Client-supplied event fields. Ownership is never accepted from the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EventRequest {
    #[validate(length(min = 3))]
    pub name: String,
    #[validate(length(min = 10))]
    pub description: String,
    pub date: chrono::NaiveDate,
    #[validate(length(min = 3))]
    pub location: String,
}

impl Event {
    pub fn new(id: ID<Self>, owner: ID<Member>, req: EventRequest) -> Self {
        Self {
            id,
            owner,
            name: req.name,
            description: req.description,
            date: req.date,
            location: req.location,
        }
    }
    /// Same event and owner with replaced details.
    pub fn revise(&self, req: EventRequest) -> Self {
        Self::new(self.id, self.owner, req)
    }
    pub fn owner(&self) -> ID<Member> {
        self.owner
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn date(&self) -> chrono::NaiveDate {
        self.date
    }
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl Unique for Event {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use rsvp_pg::*;

    impl Schema for Event {
        fn name() -> &'static str {
            EVENTS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                EVENTS,
                " (
                    id          UUID PRIMARY KEY,
                    owner_id    UUID NOT NULL REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE,
                    name        TEXT NOT NULL,
                    description TEXT NOT NULL,
                    date        DATE NOT NULL,
                    location    TEXT NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_events_owner ON ",
                EVENTS,
                " (owner_id);"
            )
        }
        fn drops() -> &'static str {
            const_format::concatcp!("DROP TABLE IF EXISTS ", EVENTS, ";")
        }
    }
}
