//! Style tree input model
//!
//! A style tree is an ordered mapping from keys to values. Values are either
//! declarations (a scalar or a list of scalars for fallbacks), nested style
//! trees (selectors and at-rules), or null.

use crate::error::{StyleError, StyleResult};
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Control key that opts a declaration block out of deduplication.
pub const IS_UNIQUE: &str = "$unique";

/// Control key carrying a human-readable label for generated identifiers.
pub const DISPLAY_NAME: &str = "$displayName";

/// A single declaration value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Number(f64),
    Bool(bool),
    String(String),
}

impl Scalar {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn is_truthy(&self) -> bool {
        match self {
            Scalar::Number(n) => *n != 0.0 && !n.is_nan(),
            Scalar::Bool(b) => *b,
            Scalar::String(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Scalar::Number(n) => write_number(f, *n),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

/// Shortest round-trip form, switching to exponent notation outside
/// `1e-6..1e21` (`1e+21`, `1e-7`)
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    let magnitude = n.abs();
    if n == 0.0 {
        f.write_str("0")
    } else if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", n);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                write!(f, "{}e+{}", mantissa, exponent)
            }
            _ => f.write_str(&formatted),
        }
    } else {
        write!(f, "{}", n)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Number(f64::from(value))
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Number(f64::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value as f64)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

/// Value stored under a style tree key
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Ignored when parsing; lets callers switch declarations off.
    Null,
    Scalar(Scalar),
    /// Fallback list, rendered as one declaration per element.
    List(Vec<Scalar>),
    Nested(Styles),
}

impl StyleValue {
    /// JavaScript-style truthiness, used for the `$unique` control key
    pub fn is_truthy(&self) -> bool {
        match self {
            StyleValue::Null => false,
            StyleValue::Scalar(scalar) => scalar.is_truthy(),
            StyleValue::List(_) | StyleValue::Nested(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StyleValue::Null)
    }
}

macro_rules! scalar_style_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for StyleValue {
                fn from(value: $ty) -> Self {
                    StyleValue::Scalar(value.into())
                }
            }
        )*
    };
}

scalar_style_value!(Scalar, f64, i32, u32, i64, bool, &str, String);

impl<T: Into<Scalar>> From<Vec<T>> for StyleValue {
    fn from(values: Vec<T>) -> Self {
        StyleValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<Styles> for StyleValue {
    fn from(styles: Styles) -> Self {
        StyleValue::Nested(styles)
    }
}

impl<T: Into<StyleValue>> From<Option<T>> for StyleValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(StyleValue::Null, Into::into)
    }
}

/// Ordered style tree
///
/// Keys keep their authoring order. Setting an existing key replaces the
/// value without moving the key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Styles {
    entries: Vec<(String, StyleValue)>,
}

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Styles::insert`]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        let key = key.into();
        let value = value.into();

        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the `$unique` control key is set to a truthy value
    pub fn is_unique(&self) -> bool {
        self.get(IS_UNIQUE).is_some_and(StyleValue::is_truthy)
    }

    /// Label from the `$displayName` control key, if it is a string
    pub fn display_name(&self) -> Option<&str> {
        self.get(DISPLAY_NAME)
            .and_then(StyleValue::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Parse a JSON object into a style tree, keeping key order
    pub fn from_json_str(source: &str) -> StyleResult<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for Styles {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut styles = Styles::new();
        for (key, value) in iter {
            styles.insert(key, value);
        }
        styles
    }
}

impl TryFrom<serde_json::Value> for Styles {
    type Error = StyleError;

    fn try_from(value: serde_json::Value) -> StyleResult<Self> {
        match value {
            serde_json::Value::Object(map) => styles_from_map(map, ""),
            other => Err(StyleError::not_an_object(json_kind(&other))),
        }
    }
}

fn styles_from_map(
    map: serde_json::Map<String, serde_json::Value>,
    path: &str,
) -> StyleResult<Styles> {
    let mut styles = Styles::new();

    for (key, value) in map {
        let child_path = if path.is_empty() {
            key.clone()
        } else {
            format!("{} > {}", path, key)
        };
        let value = style_value_from_json(value, &child_path)?;
        styles.insert(key, value);
    }

    Ok(styles)
}

fn style_value_from_json(value: serde_json::Value, path: &str) -> StyleResult<StyleValue> {
    use serde_json::Value;

    match value {
        Value::Null => Ok(StyleValue::Null),
        Value::Object(map) => Ok(StyleValue::Nested(styles_from_map(map, path)?)),
        Value::Array(items) => {
            let mut list = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                let scalar = scalar_from_json(item).map_err(|found| {
                    StyleError::invalid_value(
                        format!("{}[{}]", path, index),
                        format!("fallback lists may only hold scalars, found {}", found),
                    )
                })?;
                list.push(scalar);
            }
            Ok(StyleValue::List(list))
        }
        scalar => scalar_from_json(scalar)
            .map(StyleValue::Scalar)
            .map_err(|found| StyleError::invalid_value(path, format!("unexpected {}", found))),
    }
}

fn scalar_from_json(value: serde_json::Value) -> Result<Scalar, &'static str> {
    use serde_json::Value;

    match value {
        Value::Bool(b) => Ok(Scalar::Bool(b)),
        Value::Number(n) => n.as_f64().map(Scalar::Number).ok_or("number"),
        Value::String(s) => Ok(Scalar::String(s)),
        other => Err(json_kind(&other)),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                serializer.serialize_i64(*n as i64)
            }
            Scalar::Number(n) => serializer.serialize_f64(*n),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for StyleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StyleValue::Null => serializer.serialize_unit(),
            StyleValue::Scalar(scalar) => scalar.serialize(serializer),
            StyleValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            StyleValue::Nested(styles) => styles.serialize(serializer),
        }
    }
}

impl Serialize for Styles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, boolean or string")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
        Ok(Scalar::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
        Ok(Scalar::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
        Ok(Scalar::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
        Ok(Scalar::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
        Ok(Scalar::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
        Ok(Scalar::String(v))
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

struct StyleValueVisitor;

impl<'de> Visitor<'de> for StyleValueVisitor {
    type Value = StyleValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a declaration value, a list of fallbacks or a nested style object")
    }

    fn visit_unit<E: de::Error>(self) -> Result<StyleValue, E> {
        Ok(StyleValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<StyleValue, E> {
        Ok(StyleValue::Null)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<StyleValue, E> {
        ScalarVisitor.visit_bool(v).map(StyleValue::Scalar)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<StyleValue, E> {
        ScalarVisitor.visit_i64(v).map(StyleValue::Scalar)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<StyleValue, E> {
        ScalarVisitor.visit_u64(v).map(StyleValue::Scalar)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<StyleValue, E> {
        ScalarVisitor.visit_f64(v).map(StyleValue::Scalar)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<StyleValue, E> {
        ScalarVisitor.visit_str(v).map(StyleValue::Scalar)
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<StyleValue, E> {
        ScalarVisitor.visit_string(v).map(StyleValue::Scalar)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<StyleValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Scalar>()? {
            items.push(item);
        }
        Ok(StyleValue::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<StyleValue, A::Error> {
        StylesVisitor.visit_map(map).map(StyleValue::Nested)
    }
}

impl<'de> Deserialize<'de> for StyleValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StyleValueVisitor)
    }
}

struct StylesVisitor;

impl<'de> Visitor<'de> for StylesVisitor {
    type Value = Styles;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a style object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Styles, A::Error> {
        let mut styles = Styles::new();
        while let Some((key, value)) = map.next_entry::<String, StyleValue>()? {
            styles.insert(key, value);
        }
        Ok(styles)
    }
}

impl<'de> Deserialize<'de> for Styles {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StylesVisitor)
    }
}
