use super::*;
use rsvp_core::ID;
use rsvp_core::StoreError;

/// Credential store: user records keyed by id and by email.
#[async_trait::async_trait]
pub trait Credentials: Send + Sync {
    /// Inserts a new credential. Duplicate emails yield [`StoreError::Conflict`].
    async fn create(&self, name: &str, email: &str, hashword: &str) -> Result<Member, StoreError>;
    async fn member(&self, id: ID<Member>) -> Result<Option<Member>, StoreError>;
    /// Member and stored password hash for a login email.
    async fn lookup(&self, email: &str) -> Result<Option<(Member, String)>, StoreError>;
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(feature = "database")]
mod postgres {
    use super::*;
    use rsvp_core::Unique;
    use rsvp_pg::*;
    use std::sync::Arc;
    use tokio_postgres::Client;
    use tokio_postgres::Row;

    fn member(row: &Row) -> Member {
        Member::new(
            ID::from(row.get::<_, uuid::Uuid>(0)),
            row.get::<_, String>(1),
            row.get::<_, String>(2),
        )
    }

    #[async_trait::async_trait]
    impl Credentials for Arc<Client> {
        async fn create(
            &self,
            name: &str,
            email: &str,
            hashword: &str,
        ) -> Result<Member, StoreError> {
            let member = Member::new(ID::default(), name.to_string(), email.to_string());
            timed(self.execute(
                const_format::concatcp!(
                    "INSERT INTO ",
                    USERS,
                    " (id, name, email, hashword) VALUES ($1, $2, $3, $4)"
                ),
                &[&member.id().inner(), &name, &email, &hashword],
            ))
            .await
            .map(|_| member)
        }

        async fn member(&self, id: ID<Member>) -> Result<Option<Member>, StoreError> {
            timed(self.query_opt(
                const_format::concatcp!("SELECT id, name, email FROM ", USERS, " WHERE id = $1"),
                &[&id.inner()],
            ))
            .await
            .map(|opt| opt.as_ref().map(member))
        }

        async fn lookup(&self, email: &str) -> Result<Option<(Member, String)>, StoreError> {
            timed(self.query_opt(
                const_format::concatcp!(
                    "SELECT id, name, email, hashword FROM ",
                    USERS,
                    " WHERE email = $1"
                ),
                &[&email],
            ))
            .await
            .map(|opt| opt.map(|row| (member(&row), row.get::<_, String>(3))))
        }

        async fn ping(&self) -> Result<(), StoreError> {
            timed(self.execute("SELECT 1", &[])).await.map(|_| ())
        }
    }
}
