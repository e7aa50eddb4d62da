// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership enforcement for all storage operations.
//!
//! Every bucketlist and item read or write passes through an ownership
//! check. A record owned by someone else is reported exactly like a record
//! that does not exist, so non-owners learn nothing about other users' data.

use super::{StorageError, StorageResult, UserId};

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// Get the owner's user ID.
    fn owner_id(&self) -> UserId;

    /// Human-readable label used in "does not exist" messages.
    fn describe(&self) -> String;
}

/// Narrow a lookup result to the resources owned by `owner_id`.
pub trait OwnershipCheck<T> {
    /// Return the resource only if `owner_id` owns it.
    ///
    /// # Errors
    /// Returns `StorageError::NotFound` if the resource is absent or owned by
    /// another user. The two cases are indistinguishable by design of the
    /// API surface.
    fn owned_by(self, owner_id: UserId, missing: &str) -> StorageResult<T>;
}

impl<T: OwnedResource> OwnershipCheck<T> for Option<T> {
    fn owned_by(self, owner_id: UserId, missing: &str) -> StorageResult<T> {
        match self {
            Some(resource) if resource.owner_id() == owner_id => Ok(resource),
            Some(resource) => {
                tracing::debug!(
                    owner_id,
                    resource = %resource.describe(),
                    "Ownership check rejected access"
                );
                Err(StorageError::NotFound(missing.to_string()))
            }
            None => Err(StorageError::NotFound(missing.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestResource {
        owner: UserId,
    }

    impl OwnedResource for TestResource {
        fn owner_id(&self) -> UserId {
            self.owner
        }

        fn describe(&self) -> String {
            "test resource".to_string()
        }
    }

    #[test]
    fn owned_by_passes_for_owner() {
        let resource = Some(TestResource { owner: 7 });
        assert!(resource.owned_by(7, "Bucketlist").is_ok());
    }

    #[test]
    fn owned_by_hides_foreign_resources_as_not_found() {
        let foreign = Some(TestResource { owner: 7 }).owned_by(8, "Bucketlist");
        let missing = None::<TestResource>.owned_by(8, "Bucketlist");

        let (Err(foreign), Err(missing)) = (foreign, missing) else {
            panic!("both lookups must fail");
        };
        assert!(matches!(foreign, StorageError::NotFound(_)));
        assert_eq!(foreign.to_string(), missing.to_string());
    }
}
