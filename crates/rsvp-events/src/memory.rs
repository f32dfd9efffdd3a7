use super::*;
use rsvp_auth::Credentials;
use rsvp_auth::Member;
use rsvp_core::ID;
use rsvp_core::StoreError;
use rsvp_core::Unique;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-process store for users, events, and attendance.
#[derive(Default)]
pub struct Memory {
    users: rsvp_auth::Memory,
    events: RwLock<BTreeMap<ID<Event>, Event>>,
    attendees: RwLock<Vec<Attendee>>,
}

#[async_trait::async_trait]
impl Credentials for Memory {
    async fn create(&self, name: &str, email: &str, hashword: &str) -> Result<Member, StoreError> {
        self.users.create(name, email, hashword).await
    }
    async fn member(&self, id: ID<Member>) -> Result<Option<Member>, StoreError> {
        self.users.member(id).await
    }
    async fn lookup(&self, email: &str) -> Result<Option<(Member, String)>, StoreError> {
        self.users.lookup(email).await
    }
}

#[async_trait::async_trait]
impl Events for Memory {
    async fn insert(&self, event: &Event) -> Result<(), StoreError> {
        self.events.write().await.insert(event.id(), event.clone());
        Ok(())
    }
    async fn event(&self, id: ID<Event>) -> Result<Option<Event>, StoreError> {
        Ok(self.events.read().await.get(&id).cloned())
    }
    async fn events(&self) -> Result<Vec<Event>, StoreError> {
        Ok(self.events.read().await.values().cloned().collect())
    }
    async fn update(&self, event: &Event) -> Result<(), StoreError> {
        let mut events = self.events.write().await;
        let slot = events.get_mut(&event.id()).ok_or(StoreError::Missing)?;
        *slot = event.clone();
        Ok(())
    }
    async fn remove(&self, id: ID<Event>) -> Result<(), StoreError> {
        self.events.write().await.remove(&id);
        self.attendees.write().await.retain(|a| a.event() != id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl Attendees for Memory {
    async fn attend(&self, attendee: &Attendee) -> Result<(), StoreError> {
        // hold the roster lock across the check so remove cannot interleave
        let mut attendees = self.attendees.write().await;
        if !self.events.read().await.contains_key(&attendee.event()) {
            return Err(StoreError::Missing);
        }
        if attendees
            .iter()
            .any(|a| a.event() == attendee.event() && a.user() == attendee.user())
        {
            return Err(StoreError::Conflict);
        }
        attendees.push(attendee.clone());
        Ok(())
    }
    async fn unattend(&self, event: ID<Event>, user: ID<Member>) -> Result<(), StoreError> {
        self.attendees
            .write()
            .await
            .retain(|a| !(a.event() == event && a.user() == user));
        Ok(())
    }
    async fn attendees(&self, event: ID<Event>) -> Result<Vec<Member>, StoreError> {
        let users = self
            .attendees
            .read()
            .await
            .iter()
            .filter(|a| a.event() == event)
            .map(|a| a.user())
            .collect::<Vec<_>>();
        let mut members = Vec::with_capacity(users.len());
        for user in users {
            if let Some(member) = self.users.member(user).await? {
                members.push(member);
            }
        }
        Ok(members)
    }
    async fn attending(&self, user: ID<Member>) -> Result<Vec<Event>, StoreError> {
        let attendees = self.attendees.read().await;
        let events = self.events.read().await;
        Ok(attendees
            .iter()
            .filter(|a| a.user() == user)
            .filter_map(|a| events.get(&a.event()).cloned())
            .collect())
    }
}
