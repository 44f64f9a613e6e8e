//! Object store: every visual object a scene has created.
//!
//! The store owns object descriptors and hands out ids. Being in the store
//! does not mean being on screen; the scene runner tracks that separately.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::object::VisualObject;

/// Names one object in an [`ObjectStore`]. Ids count up from 1 in insertion
/// order and are never reused within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// Held by objects not yet inserted.
    pub const UNASSIGNED: ObjectId = ObjectId(0);

    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({})", self.0)
    }
}

/// Errors raised when looking up objects.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ObjectError {
    /// No object with this id exists in the store.
    #[error("unknown object: {0}")]
    Unknown(ObjectId),
}

/// Registry of all objects known to one scene, keyed by id.
#[derive(Debug, Default, Clone)]
pub struct ObjectStore {
    /// Last id handed out; 0 before the first insert.
    last_id: u64,
    objects: BTreeMap<ObjectId, VisualObject>,
}

impl ObjectStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object, assigning it a fresh id.
    pub fn insert(&mut self, mut object: VisualObject) -> ObjectId {
        self.last_id += 1;
        let id = ObjectId(self.last_id);
        object.id = id;
        self.objects.insert(id, object);
        id
    }

    /// Insert several objects, returning their ids in order.
    pub fn insert_all(&mut self, objects: impl IntoIterator<Item = VisualObject>) -> Vec<ObjectId> {
        objects.into_iter().map(|o| self.insert(o)).collect()
    }

    /// Remove an object. Returns it if it existed.
    pub fn remove(&mut self, id: ObjectId) -> Option<VisualObject> {
        self.objects.remove(&id)
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&VisualObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut VisualObject> {
        self.objects.get_mut(&id)
    }

    /// Like [`get`](Self::get) but fails with [`ObjectError::Unknown`].
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::Unknown`] if `id` is not in the store.
    pub fn try_get(&self, id: ObjectId) -> Result<&VisualObject, ObjectError> {
        self.objects.get(&id).ok_or(ObjectError::Unknown(id))
    }

    /// Like [`get_mut`](Self::get_mut) but fails with [`ObjectError::Unknown`].
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::Unknown`] if `id` is not in the store.
    pub fn try_get_mut(&mut self, id: ObjectId) -> Result<&mut VisualObject, ObjectError> {
        self.objects.get_mut(&id).ok_or(ObjectError::Unknown(id))
    }

    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Iterate objects in id (creation) order.
    pub fn iter(&self) -> impl Iterator<Item = &VisualObject> {
        self.objects.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
