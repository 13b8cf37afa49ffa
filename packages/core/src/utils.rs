//! Pure helpers shared by the parser, stylizer and sheet
//!
//! Nothing in here holds state. The string hash is the one used for every
//! generated identifier, so its output must never change between releases.

/// Properties that accept a bare number without a `px` unit.
const CSS_NUMBER: &[&str] = &[
    "animation-iteration-count",
    "border-image-outset",
    "border-image-slice",
    "border-image-width",
    "box-flex",
    "box-flex-group",
    "box-ordinal-group",
    "column-count",
    "columns",
    "counter-increment",
    "counter-reset",
    "flex",
    "flex-grow",
    "flex-positive",
    "flex-shrink",
    "flex-negative",
    "flex-order",
    "font-weight",
    "grid-area",
    "grid-column",
    "grid-column-end",
    "grid-column-span",
    "grid-column-start",
    "grid-row",
    "grid-row-end",
    "grid-row-span",
    "grid-row-start",
    "line-clamp",
    "line-height",
    "opacity",
    "order",
    "orphans",
    "tab-size",
    "widows",
    "z-index",
    "zoom",
    // SVG properties.
    "fill-opacity",
    "flood-opacity",
    "stop-opacity",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
];

const VENDOR_PREFIXES: &[&str] = &["-webkit-", "-ms-", "-moz-", "-o-"];

/// Characters escaped when an identifier is used directly as selector text.
const ESCAPED_CHARS: &str = " !#$%&()*+,./;<=>?@[]^`{|}~\"'\\";

/// Check whether a hyphenated property renders numbers without a unit
///
/// Vendor-prefixed variants of every listed property are accepted too.
pub fn is_unitless(property: &str) -> bool {
    let base = VENDOR_PREFIXES
        .iter()
        .find_map(|prefix| property.strip_prefix(prefix))
        .unwrap_or(property);

    CSS_NUMBER.contains(&base)
}

/// Convert a camelCase property name to its CSS form
///
/// Examples:
/// - `backgroundColor` → `background-color`
/// - `msTransform` → `-ms-transform`
/// - `WebkitTransition` → `-webkit-transition`
pub fn hyphenate(property: &str) -> String {
    let mut result = String::with_capacity(property.len() + 4);

    for ch in property.chars() {
        if ch.is_ascii_uppercase() {
            result.push('-');
            result.push(ch.to_ascii_lowercase());
        } else {
            result.push(ch);
        }
    }

    // Internet Explorer vendor prefix is written without the leading capital.
    if result.starts_with("ms-") {
        result.insert(0, '-');
    }

    result
}

/// Backslash-escape characters that are not valid in a class selector
pub fn escape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());

    for ch in value.chars() {
        if ESCAPED_CHARS.contains(ch) {
            result.push('\\');
        }
        result.push(ch);
    }

    result
}

/// Short, stable, non-cryptographic fingerprint of a string
///
/// djb2-xor over UTF-16 code units, walked back to front with 32-bit
/// wrapping arithmetic, rendered in base 36.
pub fn string_hash(value: &str) -> String {
    let units: Vec<u16> = value.encode_utf16().collect();
    let mut hash: i32 = 5381;

    for unit in units.iter().rev() {
        hash = hash.wrapping_mul(33) ^ i32::from(*unit);
    }

    to_base36(u64::from(hash as u32))
}

/// Render an unsigned integer in lowercase base 36
pub fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut buf = Vec::with_capacity(13);
    while value > 0 {
        buf.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    buf.reverse();

    // Only ASCII digits were pushed.
    buf.into_iter().map(char::from).collect()
}

/// Resolve a nested selector against its parent
///
/// Every `&` is replaced by the parent; a selector without `&` becomes a
/// descendant of the parent.
pub fn interpolate(selector: &str, parent: &str) -> String {
    if selector.contains('&') {
        selector.replace('&', parent)
    } else {
        format!("{} {}", parent, selector)
    }
}
