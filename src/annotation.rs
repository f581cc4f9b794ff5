//! Annotation bags and tag extraction.
//!
//! Every state, item, equipment piece and definition record carries an
//! [`AnnotationBag`]: a structured key/value map plus a free-text note.
//! Numeric tags are read from the structured map first and fall back to a
//! `<name: NUMBER>` pattern embedded in the note. The core does not
//! interpret anything else in the bag.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Name of a numeric annotation tag.
///
/// The same name is used as the structured key and inside the note
/// pattern `<name: NUMBER>`.
///
/// # Examples
///
/// ```rust
/// use critstat::AnnotationTag;
///
/// assert_eq!(AnnotationTag::CRITICAL_DAMAGE.name(), "criticalDamage");
/// assert_eq!(AnnotationTag::EXT_CRITICAL_RATE.name(), "extCriticalRate");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnnotationTag(&'static str);

impl AnnotationTag {
    /// Critical damage multiplier, readable from any annotated entity.
    pub const CRITICAL_DAMAGE: AnnotationTag = AnnotationTag("criticalDamage");

    /// Additive critical rate bonus, read from skills and items only.
    pub const EXT_CRITICAL_RATE: AnnotationTag = AnnotationTag("extCriticalRate");

    /// Create a tag with a custom name.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Get the tag name.
    pub fn name(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for AnnotationTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

/// Free-form metadata attached to an entity.
///
/// # Examples
///
/// ```rust
/// use critstat::{AnnotationBag, AnnotationTag};
///
/// let mut bag = AnnotationBag::with_note("Forged in dragon fire. <criticalDamage: 1.5>");
/// assert_eq!(bag.read(AnnotationTag::CRITICAL_DAMAGE), Some(1.5));
///
/// bag.set("criticalDamage", 2.0);
/// assert_eq!(bag.read(AnnotationTag::CRITICAL_DAMAGE), Some(2.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationBag {
    /// Structured fields.
    #[serde(default)]
    meta: HashMap<String, Value>,

    /// Free-text note that may embed `<name: NUMBER>` tags.
    #[serde(default)]
    note: String,
}

impl AnnotationBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bag with only a note.
    pub fn with_note(note: impl Into<String>) -> Self {
        Self {
            meta: HashMap::new(),
            note: note.into(),
        }
    }

    /// Builder form of [`set`](Self::set).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use critstat::{AnnotationBag, AnnotationTag};
    ///
    /// let bag = AnnotationBag::new().with_meta("extCriticalRate", "0.25");
    /// assert_eq!(bag.read(AnnotationTag::EXT_CRITICAL_RATE), Some(0.25));
    /// ```
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        self.set(key, value);
        self
    }

    /// Set a structured field.
    ///
    /// The value must be serializable. If serialization fails, the value
    /// is silently not added.
    pub fn set(&mut self, key: impl Into<String>, value: impl Serialize) {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.meta.insert(key.into(), json_value);
        }
    }

    /// Get a raw structured field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.meta.get(key)
    }

    /// Check if a structured field is defined.
    pub fn contains_key(&self, key: &str) -> bool {
        self.meta.contains_key(key)
    }

    /// Get the free-text note.
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Replace the free-text note.
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Read a numeric tag. See [`extract`].
    pub fn read(&self, tag: AnnotationTag) -> Option<f64> {
        extract(self, tag)
    }
}

/// Read a numeric tag from a bag.
///
/// A defined structured key always wins: its value is parsed as a number
/// and a malformed value yields `None` without consulting the note.
/// Otherwise the first well-formed `<name: NUMBER>` in the note is used.
/// Tag names in the note match case-insensitively.
///
/// `None` means "no value" and is distinct from `Some(0.0)`.
///
/// # Examples
///
/// ```rust
/// use critstat::annotation::extract;
/// use critstat::{AnnotationBag, AnnotationTag};
///
/// let bag = AnnotationBag::with_note("<CriticalDamage : 0>");
/// assert_eq!(extract(&bag, AnnotationTag::CRITICAL_DAMAGE), Some(0.0));
///
/// let empty = AnnotationBag::new();
/// assert_eq!(extract(&empty, AnnotationTag::CRITICAL_DAMAGE), None);
/// ```
pub fn extract(bag: &AnnotationBag, tag: AnnotationTag) -> Option<f64> {
    match bag.meta.get(tag.name()) {
        Some(value) => parse_structured(value),
        None => scan_note(&bag.note, tag.name()),
    }
}

fn parse_structured(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

fn scan_note(note: &str, name: &str) -> Option<f64> {
    let bytes = note.as_bytes();
    let mut start = 0;
    while let Some(offset) = note[start..].find('<') {
        let open = start + offset;
        if let Some(value) = match_tag(&bytes[open + 1..], name.as_bytes()) {
            return Some(value);
        }
        start = open + 1;
    }
    None
}

/// Match `name \s* : \s* \d+(\.\d+)? \s* >` at the start of `rest`.
///
/// Signed numbers do not match; scanning moves on to the next `<`.
fn match_tag(rest: &[u8], name: &[u8]) -> Option<f64> {
    if rest.len() < name.len() || !rest[..name.len()].eq_ignore_ascii_case(name) {
        return None;
    }
    let mut i = skip_whitespace(rest, name.len());
    if rest.get(i) != Some(&b':') {
        return None;
    }
    i = skip_whitespace(rest, i + 1);

    let number_start = i;
    i = skip_digits(rest, i);
    if i == number_start {
        return None;
    }
    if rest.get(i) == Some(&b'.') {
        let fraction_start = i + 1;
        i = skip_digits(rest, fraction_start);
        if i == fraction_start {
            return None;
        }
    }
    let number_end = i;

    i = skip_whitespace(rest, i);
    if rest.get(i) != Some(&b'>') {
        return None;
    }
    std::str::from_utf8(&rest[number_start..number_end])
        .ok()?
        .parse()
        .ok()
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    i
}

fn skip_digits(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    i
}
