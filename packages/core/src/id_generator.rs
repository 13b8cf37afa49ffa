use crate::utils::{string_hash, to_base36};
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counter behind every unique id. Starts at zero, never reset.
static UNIQUE_ID: AtomicU64 = AtomicU64::new(0);

/// Next value of the process-wide counter (the first call returns 1)
pub fn next_unique_id() -> u64 {
    UNIQUE_ID.fetch_add(1, Ordering::Relaxed) + 1
}

/// Id for a `$unique` declaration block, never shared with another entry
pub fn unique_style_id() -> String {
    format!("u\0{}", to_base36(next_unique_id()))
}

/// Id for a freshly created sheet
pub fn sheet_id() -> String {
    format!("f{}", string_hash(&next_unique_id().to_string()))
}
