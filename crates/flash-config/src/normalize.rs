//! Conversion of an arbitrary parsed document tree into the canonical form.
//!
//! One explicit pattern-matching pass over the raw value; every legacy and
//! shorthand shape is matched here rather than probed for at consumption
//! sites. Missing or malformed fields default to empty/absent.

use serde_yaml::Value;

use crate::types::{
    Align, Background, BitSection, CanonicalConfig, Custom, SectionSpec, TextSection, TextStyle,
};

/// Normalize a raw document value. Never fails.
pub fn normalize(doc: &Value) -> CanonicalConfig {
    let mut cfg = CanonicalConfig::default();

    if let Some(bg) = doc.get("background") {
        cfg.background = Background {
            color: str_field(bg, "color"),
            image: str_field(bg, "image"),
        };
    }

    if let Some(meta) = doc.get("metadata").and_then(Value::as_mapping) {
        for (k, v) in meta {
            if let (Some(key), Some(val)) = (k.as_str(), v.as_str()) {
                cfg.metadata.insert(key.to_string(), val.to_string());
            }
        }
    }

    if let Some(custom) = doc.get("custom") {
        cfg.custom = Custom {
            css: str_field(custom, "css"),
            js: str_field(custom, "js"),
        };
    }

    // Legacy single `section` map: the `text` key is the built-in text
    // block, every other key names a bit section.
    if let Some(section) = doc.get("section").and_then(Value::as_mapping) {
        for (k, v) in section {
            let Some(key) = k.as_str() else { continue };
            if key == "text" {
                cfg.sections.push(SectionSpec::Text(text_section(v)));
            } else {
                cfg.sections.push(SectionSpec::Bit(BitSection {
                    name: key.to_string(),
                    config: v.clone(),
                }));
            }
        }
    }

    if let Some(sections) = doc.get("sections").and_then(Value::as_sequence) {
        for entry in sections {
            if let Some(section) = normalize_entry(entry) {
                cfg.sections.push(section);
            }
        }
    }

    cfg
}

/// Match one `sections` array entry against the recognized shapes.
fn normalize_entry(entry: &Value) -> Option<SectionSpec> {
    let map = entry.as_mapping()?;

    match entry.get("type").and_then(Value::as_str) {
        Some("text") => return Some(SectionSpec::Text(text_section(entry))),
        Some(name) => {
            // `config` and `options` are accepted spellings; a typed entry
            // without either carries its configuration inline.
            let config = entry
                .get("config")
                .or_else(|| entry.get("options"))
                .cloned()
                .unwrap_or_else(|| entry.clone());
            return Some(SectionSpec::Bit(BitSection {
                name: name.to_string(),
                config,
            }));
        }
        None => {}
    }

    // Single-key shorthand: `text` -> Text, any other key -> Bit named by
    // that key. Multi-key untyped objects are not a recognized shape.
    if map.len() == 1 {
        let (k, v) = map.iter().next()?;
        let key = k.as_str()?;
        if key == "text" {
            return Some(SectionSpec::Text(text_section(v)));
        }
        return Some(SectionSpec::Bit(BitSection {
            name: key.to_string(),
            config: v.clone(),
        }));
    }
    None
}

/// Build a text section from a raw value. A bare string is the content
/// shorthand; unknown style keys are ignored.
fn text_section(v: &Value) -> TextSection {
    if let Some(content) = v.as_str() {
        return TextSection {
            content: content.to_string(),
            ..TextSection::default()
        };
    }
    let style = v.get("style");
    let align = style.and_then(|s| s.get("align"));
    TextSection {
        content: str_field(v, "content").unwrap_or_default(),
        color: str_field(v, "color"),
        id: str_field(v, "id"),
        style: TextStyle {
            bold: style
                .and_then(|s| s.get("bold"))
                .and_then(Value::as_bool)
                .unwrap_or(false),
            align: Align {
                horizontal: align.and_then(|a| str_field(a, "horizontal")),
                vertical: align.and_then(|a| str_field(a, "vertical")),
            },
        },
    }
}

fn str_field(v: &Value, key: &str) -> Option<String> {
    v.get(key).and_then(Value::as_str).map(str::to_string)
}
