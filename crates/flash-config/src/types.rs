//! Canonical configuration types.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_yaml::Value;

/// Normalized internal representation of one declarative document.
///
/// Section order is significant and preserved from declaration order.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct CanonicalConfig {
    pub background: Background,
    pub metadata: BTreeMap<String, String>,
    pub sections: Vec<SectionSpec>,
    pub custom: Custom,
}

/// Body background declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Background {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Document-level custom assets (`custom{css, js}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Custom {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub js: Option<String>,
}

/// One section of the document, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionSpec {
    /// Built-in text block.
    Text(TextSection),
    /// Externally-resolved bit plugin.
    Bit(BitSection),
}

/// Canonical text section.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct TextSection {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub style: TextStyle,
}

/// Recognized text styling; unrecognized keys are ignored upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct TextStyle {
    pub bold: bool,
    pub align: Align,
}

/// Horizontal/vertical alignment declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Align {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<String>,
}

/// Canonical bit section: the plugin name and its opaque configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BitSection {
    pub name: String,
    pub config: Value,
}

// Canonical sections serialize back into the typed `sections` array shape,
// so normalizing an already-canonical structure is a fixed point.
impl Serialize for SectionSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(t) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "text")?;
                map.serialize_entry("content", &t.content)?;
                if let Some(color) = &t.color {
                    map.serialize_entry("color", color)?;
                }
                if let Some(id) = &t.id {
                    map.serialize_entry("id", id)?;
                }
                map.serialize_entry("style", &t.style)?;
                map.end()
            }
            Self::Bit(b) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", &b.name)?;
                map.serialize_entry("config", &b.config)?;
                map.end()
            }
        }
    }
}
