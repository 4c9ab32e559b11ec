use crate::{errors::ApiError, models::User};
use dashmap::{DashMap, mapref::entry::Entry};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Users known to this service, indexed by id and by username.
///
/// Identities come from the identity provider; this directory only mirrors
/// them so usernames in URLs can be resolved.
#[derive(Clone, Default)]
pub struct UserDirectory {
    users: Arc<DashMap<Uuid, User>>,
    username_index: Arc<DashMap<String, Uuid>>, // Quick lookup by username
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, username: &str) -> Result<User, ApiError> {
        self.ensure(Uuid::new_v4(), username)
    }

    /// Returns the user with `id`, creating it when unknown.
    ///
    /// Fails when `username` already belongs to another id.
    pub fn ensure(&self, id: Uuid, username: &str) -> Result<User, ApiError> {
        if let Some(user) = self.users.get(&id) {
            return Ok(user.clone());
        }

        match self.username_index.entry(username.to_string()) {
            Entry::Occupied(existing) if *existing.get() != id => Err(ApiError::UserAlreadyExists),
            Entry::Occupied(_) => self.users.get(&id).map(|u| u.clone()).ok_or_else(|| {
                ApiError::InternalError(format!("username index points at missing user {id}"))
            }),
            Entry::Vacant(slot) => {
                let user = User::new(id, username);
                self.users.insert(id, user.clone());
                slot.insert(id);
                info!("User provisioned: {} ({})", user.username, user.id);
                Ok(user)
            }
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<User> {
        self.users.get(id).map(|user| user.clone())
    }

    pub fn find_by_username(&self, username: &str) -> Option<User> {
        let id = *self.username_index.get(username)?;
        self.get(&id)
    }

    pub fn remove(&self, id: &Uuid) -> Option<User> {
        let (_, user) = self.users.remove(id)?;
        self.username_index.remove(&user.username);
        Some(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_by_username() {
        let users = UserDirectory::new();
        let leo = users.register("leo").unwrap();

        assert_eq!(users.find_by_username("leo"), Some(leo.clone()));
        assert_eq!(users.get(&leo.id), Some(leo));
        assert!(users.find_by_username("nobody").is_none());
    }

    #[test]
    fn ensure_is_stable_for_known_ids() {
        let users = UserDirectory::new();
        let id = Uuid::new_v4();

        let first = users.ensure(id, "leo").unwrap();
        let second = users.ensure(id, "leo").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn username_is_unique() {
        let users = UserDirectory::new();
        users.register("leo").unwrap();

        assert!(matches!(
            users.register("leo"),
            Err(ApiError::UserAlreadyExists)
        ));
    }

    #[test]
    fn remove_frees_username() {
        let users = UserDirectory::new();
        let leo = users.register("leo").unwrap();

        assert_eq!(users.remove(&leo.id), Some(leo));
        assert!(users.find_by_username("leo").is_none());
        assert!(users.register("leo").is_ok());
    }
}
