//! Bounded, newest-first collections mirrored into a [`KeyValueStore`] slot.
//!
//! The in-memory copy is authoritative. Every mutation is applied in memory
//! first, then written through; a failed write is logged and otherwise
//! ignored, so callers always observe the mutated state.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::KeyValueStore;
use crate::error::StoreError;

/// Encoding of a value into the string the store holds.
pub trait Codec<T> {
    fn encode(value: &T) -> Result<String, StoreError>;
    /// `None` when `raw` cannot be understood; callers treat that as absent.
    fn decode(raw: &str) -> Option<T>;
}

/// Structured values as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl<T: Serialize + DeserializeOwned> Codec<T> for Json {
    fn encode(value: &T) -> Result<String, StoreError> {
        Ok(serde_json::to_string(value)?)
    }

    fn decode(raw: &str) -> Option<T> {
        serde_json::from_str(raw).ok()
    }
}

/// Strings stored verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl Codec<String> for PlainText {
    fn encode(value: &String) -> Result<String, StoreError> {
        Ok(value.clone())
    }

    fn decode(raw: &str) -> Option<String> {
        Some(raw.to_string())
    }
}

/// Items with a stable identity, removable with [`BoundedLog::remove_by_id`].
pub trait Identified {
    fn id(&self) -> &str;
}

/// Ordered, capacity-bounded sequence; index 0 is the newest item.
#[derive(Debug, Clone)]
pub struct BoundedLog<T> {
    key: String,
    capacity: usize,
    items: Vec<T>,
}

impl<T: Serialize + DeserializeOwned> BoundedLog<T> {
    /// Hydrate from `key`. Missing, unreadable, or corrupt content yields an
    /// empty log. Stored sequences longer than `capacity` are cut down.
    pub fn load<S: KeyValueStore + ?Sized>(
        store: &S,
        key: impl Into<String>,
        capacity: usize,
    ) -> Self {
        let key = key.into();
        let capacity = capacity.max(1);
        let mut items: Vec<T> = match store.get(&key) {
            Ok(Some(raw)) => match <Json as Codec<Vec<T>>>::decode(&raw) {
                Some(items) => items,
                None => {
                    tracing::warn!(key = %key, "stored log is corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to read log, starting empty");
                Vec::new()
            }
        };
        items.truncate(capacity);
        Self { key, capacity, items }
    }

    /// Insert `item` at the front, drop anything beyond capacity, persist.
    pub fn prepend<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, item: T) -> &[T] {
        self.items.insert(0, item);
        self.items.truncate(self.capacity);
        self.persist(store);
        &self.items
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn persist<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        let written = <Json as Codec<Vec<T>>>::encode(&self.items)
            .and_then(|raw| store.set(&self.key, &raw));
        if let Err(e) = written {
            tracing::warn!(key = %self.key, error = %e, "failed to persist log");
        }
    }
}

impl<T: Identified + Serialize + DeserializeOwned> BoundedLog<T> {
    /// Remove the item whose id equals `id`, keeping the order of the rest.
    ///
    /// Returns `false` without touching the store when nothing matched.
    pub fn remove_by_id<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        if self.items.len() == before {
            return false;
        }
        self.persist(store);
        true
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }
}

/// One optional value under one key.
#[derive(Debug, Clone)]
pub struct SingleSlot<T, C = Json> {
    key: String,
    value: Option<T>,
    codec: PhantomData<C>,
}

impl<T, C: Codec<T>> SingleSlot<T, C> {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, key: impl Into<String>) -> Self {
        let key = key.into();
        let value = match store.get(&key) {
            Ok(Some(raw)) => {
                let decoded = C::decode(&raw);
                if decoded.is_none() {
                    tracing::warn!(key = %key, "stored value is corrupt, treating as absent");
                }
                decoded
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to read slot, treating as absent");
                None
            }
        };
        Self {
            key,
            value,
            codec: PhantomData,
        }
    }

    /// Slot holding `value` in memory without touching the store.
    pub(crate) fn hydrated(key: impl Into<String>, value: T) -> Self {
        Self {
            key: key.into(),
            value: Some(value),
            codec: PhantomData,
        }
    }

    /// Overwrite the slot.
    pub fn set<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, value: T) -> &T {
        let written = C::encode(&value).and_then(|raw| store.set(&self.key, &raw));
        if let Err(e) = written {
            tracing::warn!(key = %self.key, error = %e, "failed to persist slot");
        }
        self.value.insert(value)
    }

    /// Empty the slot and remove its key.
    pub fn clear<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) {
        self.value = None;
        if let Err(e) = store.remove(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "failed to clear slot");
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}
