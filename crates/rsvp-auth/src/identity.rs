use super::*;
use rsvp_core::ID;
use rsvp_core::Unique;

/// Request-scoped authentication state.
///
/// Absence is its own variant; there is no default member whose id
/// could coincide with a resource owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    Anonymous,
    Member(Member),
}

impl Identity {
    pub fn id(&self) -> Option<ID<Member>> {
        match self {
            Self::Member(m) => Some(m.id()),
            Self::Anonymous => None,
        }
    }
}

impl From<Member> for Identity {
    fn from(member: Member) -> Self {
        Self::Member(member)
    }
}

impl From<Option<Member>> for Identity {
    fn from(member: Option<Member>) -> Self {
        member.map(Self::Member).unwrap_or(Self::Anonymous)
    }
}
