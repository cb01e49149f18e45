//! Bit plugin definitions.

use serde_yaml::Value;

use crate::Error;

/// A resolved bit plugin: style text and behavior text, both optional.
///
/// The definition format accepts `CSS`/`css` and `JS`/`js` field names
/// case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitDefinition {
    pub css: Option<String>,
    pub script: Option<String>,
}

impl BitDefinition {
    /// Parse definition text. Text that parses to anything other than a
    /// mapping is rejected so the source chain advances to the next
    /// candidate.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let value: Value = serde_yaml::from_str(text)?;
        let Some(mapping) = value.as_mapping() else {
            return Err(Error::Definition {
                message: "bit definition is not a mapping".to_string(),
            });
        };

        let mut def = Self::default();
        for (k, v) in mapping {
            let (Some(key), Some(text)) = (k.as_str(), v.as_str()) else {
                continue;
            };
            if key.eq_ignore_ascii_case("css") {
                def.css = Some(text.to_string());
            } else if key.eq_ignore_ascii_case("js") {
                def.script = Some(text.to_string());
            }
        }
        Ok(def)
    }
}
