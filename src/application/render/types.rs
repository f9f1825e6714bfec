use std::{fmt, str::FromStr};

use thiserror::Error;

/// Which side of a node the tree walker is on when it consults a hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeEvent {
    Entering,
    Leaving,
}

impl NodeEvent {
    pub fn is_entering(self) -> bool {
        matches!(self, NodeEvent::Entering)
    }
}

/// The node kinds a render hook can intercept. Everything else is `Other` and
/// always rendered by the markdown emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookNode<'n> {
    /// A link with its destination and the concatenated inline text of its children.
    Link { destination: &'n str, text: String },
    /// Raw HTML appearing inline, e.g. `<b>`.
    RawHtmlSpan { literal: &'n str },
    /// Raw HTML forming its own block.
    RawHtmlBlock { literal: &'n str },
    /// Inline code without its backtick delimiters.
    InlineCode { literal: &'n str },
    Other,
}

impl HookNode<'_> {
    /// Block-level nodes are replaced by block markup so paragraph structure survives.
    pub fn is_block(&self) -> bool {
        matches!(self, HookNode::RawHtmlBlock { .. })
    }
}

/// Outcome of consulting a hook for one node event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderDecision {
    /// Let the markdown emitter render the node and descend into its children.
    Default,
    /// The hook rendered this event. The walker raises the matching leaving
    /// event, and the node's content is exactly what the hook emitted.
    Handled(String),
    /// The hook rendered the node and its whole subtree in one go. No leaving
    /// event is raised.
    HandledSkipSubtree(String),
}

/// Per-node interception point consulted while walking a parsed document.
///
/// Implementations must not keep state between calls: a decision depends only
/// on the node and the event.
pub trait NodeHook {
    fn on_node(&self, node: &HookNode<'_>, event: NodeEvent) -> RenderDecision;
}

/// Output form requested from the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Sanitized HTML fragment for display.
    #[default]
    Html,
    /// Markup-free text for notifications and previews.
    PlainText,
}

impl RenderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Html => "html",
            RenderMode::PlainText => "text",
        }
    }

    /// Render `markdown` in this mode.
    pub fn render(self, markdown: &str) -> String {
        match self {
            RenderMode::Html => super::render_full(markdown),
            RenderMode::PlainText => super::render_plain_text(markdown),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown render mode `{0}`, expected `html` or `text`")]
pub struct ParseRenderModeError(String);

impl FromStr for RenderMode {
    type Err = ParseRenderModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(RenderMode::Html),
            "text" | "plain" | "plain_text" | "plaintext" => Ok(RenderMode::PlainText),
            other => Err(ParseRenderModeError(other.to_string())),
        }
    }
}
