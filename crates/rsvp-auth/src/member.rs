use rsvp_core::ID;
use rsvp_core::Unique;

/// Public projection of a stored credential.
/// The password hash is a store-only column and never part of this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Member {
    id: ID<Self>,
    name: String,
    email: String,
}

impl Member {
    pub fn new(id: ID<Self>, name: String, email: String) -> Self {
        Self { id, name, email }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl Unique for Member {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use rsvp_pg::*;

    impl Schema for Member {
        fn name() -> &'static str {
            USERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                USERS,
                " (
                    id          UUID PRIMARY KEY,
                    name        TEXT NOT NULL,
                    email       VARCHAR(255) UNIQUE NOT NULL,
                    hashword    TEXT NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_users_email ON ",
                USERS,
                " (email);"
            )
        }
        fn drops() -> &'static str {
            const_format::concatcp!("DROP TABLE IF EXISTS ", USERS, ";")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_public_fields_only() {
        let member = Member::new(ID::default(), "A".into(), "a@x.com".into());
        let json = serde_json::to_value(&member).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(json["id"], member.id().to_string());
        assert_eq!(json["name"], "A");
        assert_eq!(json["email"], "a@x.com");
    }
}
