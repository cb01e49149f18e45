//! URL-parameter-driven source redirection rules.

use serde_yaml::Value;

/// A declarative rule set associating query-parameter values with alternate
/// document sources, consulted before any other processing of a pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RedirectMapping {
    /// (parameter key, rule) pairs in declaration order.
    rules: Vec<(String, RedirectRule)>,
}

/// The destination rule for one parameter key.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RedirectRule {
    /// Any value of the parameter redirects to this source.
    Source(String),
    /// Exact value matches, with an optional `default` destination.
    ByValue {
        values: Vec<(String, String)>,
        default: Option<String>,
    },
}

impl RedirectMapping {
    /// Extract the mapping from a parsed document (`Params` or `params`).
    pub fn from_document(doc: &Value) -> Option<Self> {
        let params = doc.get("Params").or_else(|| doc.get("params"))?;
        let mapping = params.as_mapping()?;

        let mut rules = Vec::new();
        for (k, v) in mapping {
            let Some(key) = k.as_str() else { continue };
            if let Some(dest) = v.as_str() {
                rules.push((key.to_string(), RedirectRule::Source(dest.to_string())));
                continue;
            }
            let Some(by_value) = v.as_mapping() else {
                continue;
            };
            let mut values = Vec::new();
            let mut default = None;
            for (vk, vv) in by_value {
                let (Some(value), Some(dest)) = (vk.as_str(), vv.as_str()) else {
                    continue;
                };
                if value == "default" {
                    default = Some(dest.to_string());
                } else {
                    values.push((value.to_string(), dest.to_string()));
                }
            }
            rules.push((key.to_string(), RedirectRule::ByValue { values, default }));
        }

        if rules.is_empty() {
            return None;
        }
        Some(Self { rules })
    }

    /// Resolve against the URL's query pairs.
    ///
    /// Keys are consulted in declaration order; the first key present in
    /// the query wins. Within a key, an exact value match takes precedence
    /// over `default`; when neither matches, the next key is tried.
    pub fn resolve(&self, query: &[(String, String)]) -> Option<&str> {
        for (key, rule) in &self.rules {
            let Some((_, present)) = query.iter().find(|(k, _)| k == key) else {
                continue;
            };
            match rule {
                RedirectRule::Source(dest) => return Some(dest),
                RedirectRule::ByValue { values, default } => {
                    if let Some((_, dest)) = values.iter().find(|(v, _)| v == present) {
                        return Some(dest);
                    }
                    if let Some(dest) = default {
                        return Some(dest);
                    }
                }
            }
        }
        None
    }
}
