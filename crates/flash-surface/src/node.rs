//! Rendered node tree.

use serde::Serialize;

/// One rendered node inside a mount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    /// Literal text with optional presentation.
    Text(TextNode),
    /// Named container populated by a bit plugin.
    Container(ContainerNode),
    /// Embedded secondary sub-surface.
    Frame(FrameNode),
}

/// Horizontal text alignment values the document format recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// A text section rendered to the surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextNode {
    pub content: String,
    /// Normalized color (`#RRGGBB`) or a passthrough value.
    pub color: Option<String>,
    pub bold: bool,
    pub text_align: Option<TextAlign>,
    /// Vertical `middle` alignment: full-viewport flexible-box centering.
    pub viewport_center: bool,
    pub id: Option<String>,
}

impl TextNode {
    /// Unstyled text node.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            color: None,
            bold: false,
            text_align: None,
            viewport_center: false,
            id: None,
        }
    }
}

/// Container for a bit plugin's output, tagged with the bit name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerNode {
    pub bit: String,
    pub id: Option<String>,
    pub children: Vec<Node>,
}

/// An isolated sub-surface pointing at an external target.
///
/// When the target is itself a configuration document, `bootstrap` holds a
/// generated wrapper document that mounts the runtime against the target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameNode {
    pub target: String,
    pub bootstrap: Option<String>,
    pub id: Option<String>,
}
