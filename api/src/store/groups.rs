use crate::{errors::ApiError, models::Group};
use dashmap::{DashMap, mapref::entry::Entry};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Groups by slug, with an id index for validating `Post::group_id`.
#[derive(Clone, Default)]
pub struct GroupStore {
    groups: Arc<DashMap<String, Group>>,
    slug_by_id: Arc<DashMap<Uuid, String>>,
}

impl GroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, group: Group) -> Result<Group, ApiError> {
        match self.groups.entry(group.slug.clone()) {
            Entry::Occupied(_) => Err(ApiError::GroupAlreadyExists),
            Entry::Vacant(slot) => {
                self.slug_by_id.insert(group.id, group.slug.clone());
                slot.insert(group.clone());
                info!("Group created: {} ({})", group.slug, group.id);
                Ok(group)
            }
        }
    }

    pub fn get_by_slug(&self, slug: &str) -> Option<Group> {
        self.groups.get(slug).map(|group| group.clone())
    }

    pub fn contains_id(&self, id: &Uuid) -> bool {
        self.slug_by_id.contains_key(id)
    }

    pub fn remove(&self, slug: &str) -> Option<Group> {
        let (_, group) = self.groups.remove(slug)?;
        self.slug_by_id.remove(&group.id);
        Some(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_unique() {
        let groups = GroupStore::new();
        groups.create(Group::new("Tolstoy fans", "tolstoi", "")).unwrap();

        assert!(matches!(
            groups.create(Group::new("Other", "tolstoi", "")),
            Err(ApiError::GroupAlreadyExists)
        ));
    }

    #[test]
    fn resolves_by_slug_and_id() {
        let groups = GroupStore::new();
        let group = groups
            .create(Group::new("Tolstoy fans", "tolstoi", "About the count"))
            .unwrap();

        assert_eq!(groups.get_by_slug("tolstoi"), Some(group.clone()));
        assert!(groups.contains_id(&group.id));
        assert!(!groups.contains_id(&Uuid::new_v4()));
    }

    #[test]
    fn remove_forgets_both_keys() {
        let groups = GroupStore::new();
        let group = groups.create(Group::new("T", "t", "")).unwrap();

        assert_eq!(groups.remove("t"), Some(group.clone()));
        assert!(groups.get_by_slug("t").is_none());
        assert!(!groups.contains_id(&group.id));
        assert!(groups.remove("t").is_none());
    }
}
