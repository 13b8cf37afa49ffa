pub mod cache;
pub mod composer;
pub mod differ;
pub mod error;
pub mod id_generator;
pub mod nodes;
pub mod parser;
pub mod sheet;
pub mod stylizer;
pub mod utils;
pub mod value;

#[cfg(test)]
mod tests_registration;

#[cfg(test)]
mod tests_removal;

pub use cache::{Cache, Changes, Container, NoopChanges};
pub use differ::{apply_patches, ChangeLog, SheetPatch};
pub use error::{StyleError, StyleResult};
pub use nodes::{Node, Rule, Selector, Style};
pub use sheet::{create, create_with_changes, Sheet, SheetOptions};
pub use utils::{escape, hyphenate, is_unitless, string_hash};
pub use value::{Scalar, StyleValue, Styles};
