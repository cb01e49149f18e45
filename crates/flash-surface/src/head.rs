//! Document head: title, meta tags, injected style sheets.

/// Meta tags the runtime writes into the host document head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKey {
    Description,
    Author,
    OgTitle,
    OgDescription,
    OgImage,
}

impl MetaKey {
    /// Attribute value the tag carries in host markup.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Author => "author",
            Self::OgTitle => "og:title",
            Self::OgDescription => "og:description",
            Self::OgImage => "og:image",
        }
    }

    /// Open-Graph tags use a `property` attribute, plain metas use `name`.
    pub fn is_property(self) -> bool {
        matches!(self, Self::OgTitle | Self::OgDescription | Self::OgImage)
    }
}

/// Head state: created-if-absent, overwritten-if-present semantics.
#[derive(Debug, Default)]
pub struct Head {
    pub title: Option<String>,
    metas: Vec<(MetaKey, String)>,
    styles: Vec<(String, String)>,
}

impl Head {
    /// Create or overwrite a meta tag.
    pub fn set_meta(&mut self, key: MetaKey, content: &str) {
        match self.metas.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = content.to_string(),
            None => self.metas.push((key, content.to_string())),
        }
    }

    /// Content of a meta tag.
    pub fn meta(&self, key: MetaKey) -> Option<&str> {
        self.metas
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, c)| c.as_str())
    }

    /// Insert or replace the style sheet owned by `owner`.
    pub fn upsert_style(&mut self, owner: &str, css: &str) {
        match self.styles.iter_mut().find(|(o, _)| o == owner) {
            Some((_, existing)) => *existing = css.to_string(),
            None => self.styles.push((owner.to_string(), css.to_string())),
        }
    }

    /// Style sheet text for an owner.
    pub fn style(&self, owner: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(o, _)| o == owner)
            .map(|(_, c)| c.as_str())
    }
}
