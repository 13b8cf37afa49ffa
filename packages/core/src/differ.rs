//! Sheet patches - incremental updates for a mirrored stylesheet
//!
//! A consumer that injects styles into a page does not want to re-read the
//! full sheet text after every registration. [`ChangeLog`] records what
//! changed at the sheet level and [`apply_patches`] replays it onto a mirror.

use crate::cache::{Changes, Container};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// A single sheet-level change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SheetPatch {
    /// Insert a new entry
    Add { index: usize, css: String },

    /// Replace the text of an existing entry
    Change { index: usize, css: String },

    /// Remove an entry
    Remove { index: usize },
}

/// Records patches emitted by a cache
#[derive(Debug, Default)]
pub struct ChangeLog {
    patches: RefCell<Vec<SheetPatch>>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain every recorded patch
    pub fn take(&self) -> Vec<SheetPatch> {
        std::mem::take(&mut *self.patches.borrow_mut())
    }

    pub fn patches(&self) -> Vec<SheetPatch> {
        self.patches.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.patches.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.borrow().is_empty()
    }
}

impl<T: Container> Changes<T> for ChangeLog {
    fn add(&self, item: &T, index: usize) {
        self.patches.borrow_mut().push(SheetPatch::Add {
            index,
            css: item.to_css(),
        });
    }

    fn change(&self, item: &T, _old_index: usize, new_index: usize) {
        self.patches.borrow_mut().push(SheetPatch::Change {
            index: new_index,
            css: item.to_css(),
        });
    }

    fn remove(&self, _item: &T, index: usize) {
        self.patches.borrow_mut().push(SheetPatch::Remove { index });
    }
}

/// Apply patches to a mirror of the sheet's entry list
///
/// Out-of-range indexes are ignored.
pub fn apply_patches(mirror: &mut Vec<String>, patches: &[SheetPatch]) {
    for patch in patches {
        match patch {
            SheetPatch::Add { index, css } => {
                let index = (*index).min(mirror.len());
                mirror.insert(index, css.clone());
            }
            SheetPatch::Change { index, css } => {
                if let Some(existing) = mirror.get_mut(*index) {
                    *existing = css.clone();
                }
            }
            SheetPatch::Remove { index } => {
                if *index < mirror.len() {
                    mirror.remove(*index);
                }
            }
        }
    }
}
