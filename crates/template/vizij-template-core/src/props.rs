//! Keyed capture maps of property handles.

use hashbrown::HashMap;

use crate::handle::SharedHandle;

/// Key → handles captured under it, in visitation order.
///
/// Keys are only inserted together with a handle, so a present key always has a
/// non-empty list.
pub struct PropMap<V> {
    entries: HashMap<String, Vec<SharedHandle<V>>>,
}

impl<V> Default for PropMap<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V> PropMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: String, handle: SharedHandle<V>) {
        self.entries.entry(key).or_default().push(handle);
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn handles(&self, key: &str) -> Option<&[SharedHandle<V>]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of the first handle; later handles are not consulted.
    pub fn get(&self, key: &str) -> Option<V> {
        self.entries
            .get(key)
            .and_then(|handles| handles.first())
            .map(|h| h.get())
    }

    /// Write `value` to every handle under `key`. Returns `false` for unknown keys.
    pub fn set(&self, key: &str, value: &V) -> bool {
        match self.entries.get(key) {
            Some(handles) => {
                for handle in handles {
                    handle.set(value);
                }
                true
            }
            None => false,
        }
    }
}
