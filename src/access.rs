//! Access control for administrative operations.
//!
//! The engine only asks whether a caller is an administrator. `RoleRegistry`
//! is the stock implementation: a single owner who is always an
//! administrator and who alone may appoint or remove other administrators.

use std::collections::HashSet;

use tracing::info;

use crate::error::{EngineError, Result};
use crate::pass::OwnerId;

/// Collaborator deciding who may administer the engine.
pub trait AccessControl: Send + Sync {
    fn is_administrator(&self, caller: &OwnerId) -> bool;

    /// `Ok(())` for administrators, `Unauthorized` otherwise.
    fn require_administrator(&self, caller: &OwnerId) -> Result<()> {
        if self.is_administrator(caller) {
            Ok(())
        } else {
            Err(EngineError::Unauthorized(caller.to_string()))
        }
    }
}

/// Owner plus a set of administrators.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    owner: OwnerId,
    administrators: HashSet<OwnerId>,
}

impl RoleRegistry {
    pub fn new(owner: impl Into<OwnerId>) -> Self {
        Self {
            owner: owner.into(),
            administrators: HashSet::new(),
        }
    }

    /// Owner with an initial set of administrators.
    pub fn with_administrators<I>(owner: impl Into<OwnerId>, administrators: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OwnerId>,
    {
        Self {
            owner: owner.into(),
            administrators: administrators.into_iter().map(Into::into).collect(),
        }
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    pub fn is_owner(&self, caller: &OwnerId) -> bool {
        &self.owner == caller
    }

    fn require_owner(&self, caller: &OwnerId) -> Result<()> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(EngineError::Unauthorized(caller.to_string()))
        }
    }

    pub fn add_admin(&mut self, caller: &OwnerId, admin: OwnerId) -> Result<()> {
        self.require_owner(caller)?;
        info!(%admin, "Administrator added");
        self.administrators.insert(admin);
        Ok(())
    }

    pub fn remove_admin(&mut self, caller: &OwnerId, admin: &OwnerId) -> Result<()> {
        self.require_owner(caller)?;
        if self.administrators.remove(admin) {
            info!(%admin, "Administrator removed");
        }
        Ok(())
    }

    /// Hand ownership to `new_owner`. The previous owner loses all rights
    /// unless separately listed as an administrator.
    pub fn change_owner(&mut self, caller: &OwnerId, new_owner: OwnerId) -> Result<()> {
        self.require_owner(caller)?;
        info!(from = %self.owner, to = %new_owner, "Ownership changed");
        self.owner = new_owner;
        Ok(())
    }
}

impl AccessControl for RoleRegistry {
    fn is_administrator(&self, caller: &OwnerId) -> bool {
        self.is_owner(caller) || self.administrators.contains(caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_is_administrator() {
        let roles = RoleRegistry::new("owner");
        assert!(roles.is_administrator(&"owner".into()));
        assert!(!roles.is_administrator(&"user1".into()));
    }

    #[test]
    fn test_owner_can_add_and_remove_admin() {
        let owner = OwnerId::from("owner");
        let user1 = OwnerId::from("user1");
        let mut roles = RoleRegistry::new(owner.clone());

        roles.add_admin(&owner, user1.clone()).unwrap();
        assert!(roles.is_administrator(&user1));

        roles.remove_admin(&owner, &user1).unwrap();
        assert!(!roles.is_administrator(&user1));
    }

    #[test]
    fn test_admin_cannot_appoint_admins() {
        let owner = OwnerId::from("owner");
        let user1 = OwnerId::from("user1");
        let mut roles = RoleRegistry::with_administrators(owner, ["user1"]);

        let err = roles.add_admin(&user1, "user2".into()).unwrap_err();
        assert_eq!(err, EngineError::Unauthorized("user1".to_string()));
    }

    #[test]
    fn test_change_owner_revokes_previous_owner() {
        let owner = OwnerId::from("owner");
        let user1 = OwnerId::from("user1");
        let mut roles = RoleRegistry::new(owner.clone());

        roles.change_owner(&owner, user1.clone()).unwrap();

        assert!(roles.require_administrator(&owner).is_err());
        assert!(roles.require_administrator(&user1).is_ok());
        assert!(roles.change_owner(&owner, owner.clone()).is_err());
    }
}
