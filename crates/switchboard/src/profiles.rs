//! Profile Store
//!
//! In-memory storage for testing profiles, plus the active-profile slot
//! auto mode consults. Profiles are stored behind `Arc` and replaced
//! whole on save; nothing mutates a stored profile in place.

use std::sync::{Arc, RwLock};

use dashmap::DashMap;
use uuid::Uuid;

use crate::model::TestingProfile;

/// Session-scoped profile registry. Nothing here persists.
pub struct ProfileStore {
    profiles: DashMap<Uuid, Arc<TestingProfile>>,
    active: RwLock<Option<Uuid>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: DashMap::new(),
            active: RwLock::new(None),
        }
    }

    /// Insert a new profile or replace the one with the same ID.
    pub fn save(&self, profile: TestingProfile) -> Arc<TestingProfile> {
        let id = profile.id;
        let stored = Arc::new(profile);
        self.profiles.insert(id, stored.clone());
        tracing::debug!(profile_id = %id, name = %stored.name, "Saved testing profile");
        stored
    }

    pub fn get(&self, id: Uuid) -> Option<Arc<TestingProfile>> {
        self.profiles.get(&id).map(|entry| entry.value().clone())
    }

    /// Remove a profile. Removing the active one clears the active slot.
    pub fn remove(&self, id: Uuid) -> bool {
        let removed = self.profiles.remove(&id).is_some();
        if removed {
            let mut active = self.active.write().expect("active profile lock poisoned");
            if *active == Some(id) {
                *active = None;
                tracing::debug!(profile_id = %id, "Active profile removed, cleared selection");
            }
        }
        removed
    }

    /// All stored profiles, in no particular order.
    pub fn list(&self) -> Vec<Arc<TestingProfile>> {
        self.profiles
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Select which profile auto mode consults, or clear the selection.
    ///
    /// Selecting an unknown ID is refused and returns false.
    pub fn set_active(&self, id: Option<Uuid>) -> bool {
        if let Some(id) = id {
            if !self.profiles.contains_key(&id) {
                tracing::warn!(profile_id = %id, "Refusing to activate unknown profile");
                return false;
            }
        }
        *self.active.write().expect("active profile lock poisoned") = id;
        true
    }

    /// The profile auto mode consults, if one is selected.
    pub fn active(&self) -> Option<Arc<TestingProfile>> {
        let id = (*self.active.read().expect("active profile lock poisoned"))?;
        self.get(id)
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new()
    }
}
