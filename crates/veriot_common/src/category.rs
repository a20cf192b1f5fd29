//! Verification categories.
//!
//! A closed set of five device categories drives rule-set dispatch. Tags are
//! two-letter codes produced by the translator stage; anything else routes to
//! the permissive default rule set.

use std::fmt;

/// The five known verification categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// `SD` - sensor device configuration.
    Sensor,
    /// `AD` - actuator device configuration.
    Actuator,
    /// `GW` - gateway configuration.
    Gateway,
    /// `CP` - communication protocol configuration.
    Protocol,
    /// `SC` - security configuration.
    Security,
}

/// All known category tags, in dispatch order.
pub const CATEGORY_TAGS: &[&str] = &["SD", "AD", "GW", "CP", "SC"];

impl Category {
    /// Parse an exact tag. Unknown tags yield `None` (the caller decides what
    /// permissive default applies; unknown is never an error).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "SD" => Some(Category::Sensor),
            "AD" => Some(Category::Actuator),
            "GW" => Some(Category::Gateway),
            "CP" => Some(Category::Protocol),
            "SC" => Some(Category::Security),
            _ => None,
        }
    }

    /// Two-letter wire tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Category::Sensor => "SD",
            Category::Actuator => "AD",
            Category::Gateway => "GW",
            Category::Protocol => "CP",
            Category::Security => "SC",
        }
    }

    /// Human-readable name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Sensor => "Sensor Device",
            Category::Actuator => "Actuator Device",
            Category::Gateway => "Gateway",
            Category::Protocol => "Communication Protocol",
            Category::Security => "Security Configuration",
        }
    }

    /// All five categories.
    pub fn all() -> [Category; 5] {
        [
            Category::Sensor,
            Category::Actuator,
            Category::Gateway,
            Category::Protocol,
            Category::Security,
        ]
    }

    /// Extract a category tag from a translator reply: the first two
    /// characters when they form a valid tag, otherwise the first valid tag
    /// appearing anywhere in the reply.
    pub fn extract(reply: &str) -> Option<Self> {
        let prefix: String = reply.trim_start().chars().take(2).collect();
        if let Some(category) = Category::from_tag(prefix.trim()) {
            return Some(category);
        }
        CATEGORY_TAGS
            .iter()
            .find(|tag| reply.contains(*tag))
            .and_then(|tag| Category::from_tag(tag))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
