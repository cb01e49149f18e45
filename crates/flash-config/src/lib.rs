//! Document parsing and normalization for the FLASH runtime.
//!
//! Converts the YAML-like declarative document (several legacy and
//! shorthand shapes) into one canonical, strongly-shaped configuration,
//! resolves declared bit source chains, and parses redirect mappings and
//! bit definitions. Normalization never fails: malformed or missing fields
//! degrade to empty/absent values.
#![allow(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

mod bit;
mod color;
mod error;
mod normalize;
mod redirect;
mod sources;
mod types;

#[cfg(test)]
mod test_normalize;
#[cfg(test)]
mod test_sources;

pub use bit::BitDefinition;
pub use color::normalize_color;
pub use error::Error;
pub use normalize::normalize;
pub use redirect::RedirectMapping;
pub use sources::{LOCAL_BIT_SOURCE, PUBLIC_BIT_SOURCE, SourceDefaults, SourceEntry, resolve_sources};
pub use types::{
    Align, Background, BitSection, CanonicalConfig, Custom, SectionSpec, TextSection, TextStyle,
};

/// Parse raw document text; malformed text yields an empty, valid config.
pub fn parse_document(text: &str) -> CanonicalConfig {
    normalize(&parse_value(text))
}

/// Parse raw document text into a YAML value, `Null` on parse failure.
pub fn parse_value(text: &str) -> serde_yaml::Value {
    match serde_yaml::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "document parse failed, treating as empty");
            serde_yaml::Value::Null
        }
    }
}
