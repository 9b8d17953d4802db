use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use serde::{Serialize, de::DeserializeOwned};

use crate::foundation::error::ReelResult;

/// In-memory home for durable effect state, keyed by effect name.
///
/// Clones share the same storage, so a store handed to every effect of a scene
/// and to their rebuilt counterparts after a resize acts as the meeting point
/// for [`SaveState`](crate::SaveState) and [`CloneState`](crate::CloneState).
#[derive(Clone, Debug, Default)]
pub struct StateStore {
    entries: Rc<RefCell<BTreeMap<String, serde_json::Value>>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put<T: Serialize>(&self, key: impl Into<String>, value: &T) -> ReelResult<()> {
        let value = serde_json::to_value(value)?;
        self.entries.borrow_mut().insert(key.into(), value);
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> ReelResult<Option<T>> {
        let entries = self.entries.borrow();
        let Some(value) = entries.get(key) else {
            return Ok(None);
        };
        Ok(Some(T::deserialize(value)?))
    }

    pub fn remove(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/state.rs"]
mod tests;
