//! Reference-counted, content-addressed cache of stylesheet nodes
//!
//! Entries are keyed by their content id and kept in first-seen order.
//! Adding an id that is already present bumps its reference count and, for
//! composite nodes, merges the incoming children into the stored node in
//! place. The rendered text of every entry is kept in a parallel list so the
//! whole cache can be emitted without re-rendering untouched entries.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// A node that can be stored in a [`Cache`]
pub trait Container: Clone {
    /// Whether the node owns a child cache that merges structurally.
    ///
    /// Leaves only ever have their reference count adjusted.
    const COMPOSITE: bool;

    /// Content-derived identifier
    fn id(&self) -> &str;

    /// Render the node and its children to CSS text
    fn to_css(&self) -> String;

    /// Change counter of the owned child cache (always 0 for leaves)
    fn change_id(&self) -> u64 {
        0
    }

    /// Add every child of `other` to this node's child cache
    fn merge_children(&mut self, _other: &Self) {}

    /// Remove every child of `other` from this node's child cache
    fn unmerge_children(&mut self, _other: &Self) {}
}

/// Observer for structural changes at one cache level
///
/// `change` always reports the same old and new index: merges never move an
/// entry.
pub trait Changes<T> {
    fn add(&self, _item: &T, _index: usize) {}
    fn change(&self, _item: &T, _old_index: usize, _new_index: usize) {}
    fn remove(&self, _item: &T, _index: usize) {}
}

/// Default observer that ignores every change
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopChanges;

impl<T> Changes<T> for NoopChanges {}

struct Entry<T> {
    item: T,
    count: usize,
}

/// Ordered, reference-counted container of [`Container`] nodes
pub struct Cache<T> {
    /// Rendered text, index-aligned with `keys`
    sheet: Vec<String>,
    change_id: u64,
    keys: Vec<String>,
    entries: HashMap<String, Entry<T>>,
    changes: Rc<dyn Changes<T>>,
}

impl<T: Container> Cache<T> {
    pub fn new() -> Self {
        Self::with_changes(Rc::new(NoopChanges))
    }

    pub fn with_changes(changes: Rc<dyn Changes<T>>) -> Self {
        Self {
            sheet: Vec::new(),
            change_id: 0,
            keys: Vec::new(),
            entries: HashMap::new(),
            changes,
        }
    }

    /// Register one reference to `item`
    pub fn add(&mut self, item: T) {
        let id = item.id().to_string();

        match self.entries.get_mut(&id) {
            None => {
                self.keys.push(id.clone());
                self.sheet.push(item.to_css());
                self.change_id += 1;

                let index = self.keys.len() - 1;
                trace!(id = ?id, index, "cache add");
                self.changes.add(&item, index);
                self.entries.insert(id, Entry { item, count: 1 });
            }
            Some(entry) => {
                entry.count += 1;
                trace!(id = ?id, count = entry.count, "cache add existing");

                if !T::COMPOSITE {
                    return;
                }

                let prev_change_id = entry.item.change_id();
                entry.item.merge_children(&item);

                if entry.item.change_id() != prev_change_id {
                    if let Some(index) = self.keys.iter().position(|key| *key == id) {
                        self.sheet[index] = entry.item.to_css();
                        self.change_id += 1;
                        trace!(id = ?id, index, "cache merge changed entry");
                        self.changes.change(&entry.item, index, index);
                    }
                }
            }
        }

        debug_assert_eq!(self.keys.len(), self.sheet.len());
    }

    /// Drop one reference to `item`
    ///
    /// Unknown ids are ignored.
    pub fn remove(&mut self, item: &T) {
        let id = item.id();

        let count = match self.entries.get(id) {
            Some(entry) => entry.count,
            None => return,
        };
        let index = match self.keys.iter().position(|key| key == id) {
            Some(index) => index,
            None => return,
        };

        if count == 1 {
            let Some(entry) = self.entries.remove(id) else {
                return;
            };
            self.keys.remove(index);
            self.sheet.remove(index);
            self.change_id += 1;
            trace!(id = ?id, index, "cache remove");
            self.changes.remove(&entry.item, index);
        } else if let Some(entry) = self.entries.get_mut(id) {
            entry.count -= 1;
            trace!(id = ?id, count = entry.count, "cache release");

            if !T::COMPOSITE {
                return;
            }

            let prev_change_id = entry.item.change_id();
            entry.item.unmerge_children(item);

            if entry.item.change_id() != prev_change_id {
                self.sheet[index] = entry.item.to_css();
                self.change_id += 1;
                trace!(id = ?id, index, "cache unmerge changed entry");
                self.changes.change(&entry.item, index, index);
            }
        }

        debug_assert_eq!(self.keys.len(), self.sheet.len());
    }

    /// Current nodes in insertion order
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.keys
            .iter()
            .filter_map(|key| self.entries.get(key).map(|entry| &entry.item))
    }

    /// Add every node of `other`
    pub fn merge(&mut self, other: &Cache<T>) -> &mut Self {
        for item in other.values() {
            self.add(item.clone());
        }
        self
    }

    /// Remove every node of `other`
    pub fn unmerge(&mut self, other: &Cache<T>) -> &mut Self {
        for item in other.values() {
            self.remove(item);
        }
        self
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id).map(|entry| &entry.item)
    }

    /// Outstanding references to `id` (0 when absent)
    pub fn count(&self, id: &str) -> usize {
        self.entries.get(id).map_or(0, |entry| entry.count)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn change_id(&self) -> u64 {
        self.change_id
    }

    /// Rendered text of every entry, in insertion order
    pub fn sheet(&self) -> &[String] {
        &self.sheet
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn changes(&self) -> Rc<dyn Changes<T>> {
        Rc::clone(&self.changes)
    }
}

impl<T: Container> Default for Cache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Independent copy holding one reference to every node
///
/// The copy starts with a fresh change counter and no observer.
impl<T: Container> Clone for Cache<T> {
    fn clone(&self) -> Self {
        let mut cache = Cache::new();
        cache.merge(self);
        cache
    }
}

impl<T: fmt::Debug> fmt::Debug for Cache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("change_id", &self.change_id)
            .field("keys", &self.keys)
            .field("sheet", &self.sheet)
            .finish()
    }
}
