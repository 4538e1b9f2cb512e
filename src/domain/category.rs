//! Category Tag
//!
//! Notes carry a category tag. Three well-known categories get dedicated
//! presentation; any other string is accepted as a free-form custom tag
//! rather than being rejected.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A note category: a closed set of well-known tags plus one explicit
/// custom variant carrying the raw string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Work,
    Study,
    Personal,
    /// Any tag outside the well-known set, kept verbatim
    Custom(String),
}

impl Category {
    /// Parse a raw tag. Matching is case-insensitive; an empty tag falls
    /// back to `Personal` (the historical default of the note form).
    pub fn parse(tag: &str) -> Self {
        let trimmed = tag.trim();
        match trimmed.to_lowercase().as_str() {
            "work" => Category::Work,
            "study" => Category::Study,
            "personal" | "" => Category::Personal,
            _ => Category::Custom(trimmed.to_string()),
        }
    }

    /// The wire/storage tag (lowercase for well-known categories,
    /// verbatim for custom ones)
    pub fn as_tag(&self) -> &str {
        match self {
            Category::Work => "work",
            Category::Study => "study",
            Category::Personal => "personal",
            Category::Custom(tag) => tag,
        }
    }

    /// Human-readable label: well-known categories have fixed labels,
    /// custom tags are shown with the first letter upper-cased.
    pub fn label(&self) -> String {
        match self {
            Category::Work => "Work".to_string(),
            Category::Study => "Study".to_string(),
            Category::Personal => "Personal".to_string(),
            Category::Custom(tag) => {
                let mut chars = tag.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            }
        }
    }

}

impl Default for Category {
    fn default() -> Self {
        Category::Personal
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

// On the wire a category is just its tag string.
impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Category::parse(&tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_known() {
        assert_eq!(Category::parse("work"), Category::Work);
        assert_eq!(Category::parse("Study"), Category::Study);
        assert_eq!(Category::parse("PERSONAL"), Category::Personal);
    }

    #[test]
    fn test_parse_custom_keeps_raw_tag() {
        let cat = Category::parse("Groceries");
        assert_eq!(cat, Category::Custom("Groceries".to_string()));
        assert_eq!(cat.as_tag(), "Groceries");
        assert_eq!(cat.label(), "Groceries");
    }

    #[test]
    fn test_empty_tag_defaults_to_personal() {
        assert_eq!(Category::parse(""), Category::Personal);
        assert_eq!(Category::parse("   "), Category::Personal);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Category::Work.label(), "Work");
        assert_eq!(Category::Custom("ideas".to_string()).label(), "Ideas");
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&Category::Study).unwrap();
        assert_eq!(json, "\"study\"");
        let parsed: Category = serde_json::from_str("\"shopping\"").unwrap();
        assert_eq!(parsed, Category::Custom("shopping".to_string()));
    }
}
