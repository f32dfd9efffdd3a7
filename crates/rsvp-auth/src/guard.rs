use super::*;
use rsvp_core::ID;

/// Outcome of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied,
}

/// Ownership guard. Allowed iff the identity is the recorded owner.
///
/// Callers must confirm the resource exists before asking, so that
/// a missing resource reads as not-found rather than forbidden.
pub fn authorize(identity: &Identity, owner: ID<Member>) -> Decision {
    match identity.id() {
        Some(id) if id == owner => Decision::Allowed,
        _ => Decision::Denied,
    }
}

impl Decision {
    /// Maps a denial to a forbidden error carrying `reason`.
    pub fn or_forbid(self, reason: &'static str) -> Result<(), ApiError> {
        match self {
            Self::Allowed => Ok(()),
            Self::Denied => Err(ApiError::Forbidden(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsvp_core::Unique;

    fn member() -> Member {
        Member::new(ID::default(), "A".into(), "a@x.com".into())
    }

    #[test]
    fn owner_is_allowed() {
        let a = member();
        assert_eq!(authorize(&Identity::from(a.clone()), a.id()), Decision::Allowed);
    }

    #[test]
    fn non_owner_is_denied() {
        let a = member();
        let b = member();
        assert_eq!(authorize(&Identity::from(b), a.id()), Decision::Denied);
    }

    #[test]
    fn anonymous_is_always_denied() {
        let owner = ID::default();
        assert_eq!(authorize(&Identity::Anonymous, owner), Decision::Denied);
        assert_eq!(authorize(&Identity::from(None), owner), Decision::Denied);
    }

    #[test]
    fn denial_maps_to_forbidden() {
        assert!(Decision::Allowed.or_forbid("nope").is_ok());
        assert!(matches!(
            Decision::Denied.or_forbid("nope"),
            Err(ApiError::Forbidden("nope"))
        ));
    }
}
