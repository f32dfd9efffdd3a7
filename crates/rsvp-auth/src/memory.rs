use super::*;
use rsvp_core::ID;
use rsvp_core::StoreError;
use rsvp_core::Unique;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process credential store for development and tests.
#[derive(Default)]
pub struct Memory {
    users: RwLock<HashMap<ID<Member>, (Member, String)>>,
}

#[async_trait::async_trait]
impl Credentials for Memory {
    async fn create(&self, name: &str, email: &str, hashword: &str) -> Result<Member, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|(m, _)| m.email() == email) {
            return Err(StoreError::Conflict);
        }
        let member = Member::new(ID::default(), name.to_string(), email.to_string());
        users.insert(member.id(), (member.clone(), hashword.to_string()));
        Ok(member)
    }

    async fn member(&self, id: ID<Member>) -> Result<Option<Member>, StoreError> {
        Ok(self.users.read().await.get(&id).map(|(m, _)| m.clone()))
    }

    async fn lookup(&self, email: &str) -> Result<Option<(Member, String)>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|(m, _)| m.email() == email)
            .cloned())
    }
}
