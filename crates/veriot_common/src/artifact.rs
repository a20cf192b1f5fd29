//! Configuration artifact - the payload under verification.
//!
//! Upstream generators are not schema-constrained: the `commands` field of a
//! verification request may be free text, a JSON object, an array, or anything
//! else serializable. The rule sets therefore work against two views of the
//! same value: a string form for substring checks, and (when the payload is or
//! parses to a JSON object) a structured form for key lookups. All rule sets
//! resolve fields through this type instead of re-deriving their own views.

use serde_json::{Map, Value};

/// A configuration artifact with a string view and an optional object view.
///
/// Built once per verification request and immutable afterwards.
#[derive(Debug, Clone)]
pub struct ConfigArtifact {
    /// Case-preserved string form. A JSON string payload contributes its
    /// inner text; any other payload contributes its JSON serialization.
    text: String,
    /// Lowercased copy of `text` for case-insensitive checks.
    lower: String,
    /// Parsed object view, present when the payload is a JSON object or a
    /// string that itself parses to one. Parse failures degrade silently.
    object: Option<Map<String, Value>>,
}

impl ConfigArtifact {
    /// Build an artifact from a raw `commands` payload.
    pub fn from_value(value: &Value) -> Self {
        let (text, object) = match value {
            Value::String(s) => {
                let parsed = serde_json::from_str::<Value>(s)
                    .ok()
                    .and_then(|v| v.as_object().cloned());
                (s.clone(), parsed)
            }
            other => (other.to_string(), other.as_object().cloned()),
        };
        let lower = text.to_lowercase();
        Self { text, lower, object }
    }

    /// Build an artifact directly from free text.
    pub fn from_text(text: &str) -> Self {
        Self::from_value(&Value::String(text.to_string()))
    }

    /// Case-preserved string form.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Case-sensitive substring check against the string form.
    pub fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }

    /// Case-insensitive substring check (needle must be lowercase).
    pub fn contains_lower(&self, needle: &str) -> bool {
        self.lower.contains(needle)
    }

    /// Whether the object view has `key` as a direct member.
    pub fn has_key(&self, key: &str) -> bool {
        self.object.as_ref().is_some_and(|o| o.contains_key(key))
    }

    /// Resolve an optional field: direct key in the object view, else
    /// lowercased substring in the string form.
    pub fn resolve_direct(&self, key: &str) -> bool {
        self.has_key(key) || self.contains_lower(key)
    }

    /// Resolve a required protocol field through the full lookup tiers:
    /// 1. direct key in the object view;
    /// 2. key inside any object element of a `subscriptions` array;
    /// 3. any alias as a direct key;
    /// 4. lowercased substring in the string form.
    ///
    /// Generators emit flat objects, nested subscription lists, and renamed
    /// keys interchangeably; each tier is tried in order until one matches.
    pub fn resolve_field(&self, key: &str, aliases: &[&str]) -> bool {
        if self.has_key(key) {
            return true;
        }
        if self.subscription_has_key(key) {
            return true;
        }
        if aliases.iter().any(|alias| self.has_key(alias)) {
            return true;
        }
        self.contains_lower(key)
    }

    fn subscription_has_key(&self, key: &str) -> bool {
        let Some(object) = &self.object else {
            return false;
        };
        let Some(Value::Array(subs)) = object.get("subscriptions") else {
            return false;
        };
        subs.iter()
            .filter_map(|sub| sub.as_object())
            .any(|sub| sub.contains_key(key))
    }
}
