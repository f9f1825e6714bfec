//! Render hooks for the two output modes.
//!
//! Both hooks escape raw HTML rather than passing it through, and both use the
//! same payment-URI classifier so a link is recognised identically whichever
//! output is being produced.

use tracing::debug;

use crate::domain::payment_uri::classify_payment_uri;

use super::types::{HookNode, NodeEvent, NodeHook, RenderDecision};

/// Hook used when producing display HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlHook;

/// Hook used when producing plain text. Its output is still HTML-ish and is
/// stripped of markup afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextHook;

impl NodeHook for HtmlHook {
    fn on_node(&self, node: &HookNode<'_>, event: NodeEvent) -> RenderDecision {
        match node {
            HookNode::RawHtmlSpan { literal } => escaped_span(literal, event),
            HookNode::RawHtmlBlock { literal } => escaped_block(literal, event),
            HookNode::Link { destination, text } => {
                let Some(scheme) = classify_payment_uri(destination) else {
                    return RenderDecision::Default;
                };
                if !event.is_entering() {
                    return RenderDecision::Handled("</a>".to_string());
                }
                debug!(
                    target = "application::render::hooks",
                    scheme = %scheme,
                    "rendering payment link"
                );
                RenderDecision::Handled(format!(
                    "<a href=\"{}\" rel=\"noopener\">{}",
                    escape_html(&encode_href(destination)),
                    escape_html(text)
                ))
            }
            HookNode::InlineCode { .. } | HookNode::Other => RenderDecision::Default,
        }
    }
}

impl NodeHook for TextHook {
    fn on_node(&self, node: &HookNode<'_>, event: NodeEvent) -> RenderDecision {
        match node {
            HookNode::RawHtmlSpan { literal } => escaped_span(literal, event),
            HookNode::RawHtmlBlock { literal } => escaped_block(literal, event),
            HookNode::InlineCode { literal } => {
                RenderDecision::HandledSkipSubtree(format!("`{}`", escape_html(literal)))
            }
            HookNode::Link { destination, text } => {
                if classify_payment_uri(destination).is_none() {
                    return RenderDecision::Default;
                }
                RenderDecision::HandledSkipSubtree(format!(
                    "{}: {}",
                    escape_html(text),
                    escape_html(destination)
                ))
            }
            HookNode::Other => RenderDecision::Default,
        }
    }
}

fn escaped_span(literal: &str, event: NodeEvent) -> RenderDecision {
    match event {
        NodeEvent::Entering => RenderDecision::Handled(escape_html(literal)),
        NodeEvent::Leaving => RenderDecision::Handled(String::new()),
    }
}

fn escaped_block(literal: &str, event: NodeEvent) -> RenderDecision {
    match event {
        NodeEvent::Entering => RenderDecision::Handled(format!("\n{}\n", escape_html(literal))),
        NodeEvent::Leaving => RenderDecision::Handled(String::new()),
    }
}

/// Escape text for use in HTML content or a double-quoted attribute.
pub(crate) fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Keep the destination verbatim apart from characters that could end the
/// attribute or the tag.
fn encode_href(destination: &str) -> String {
    let mut encoded = String::with_capacity(destination.len());
    for ch in destination.chars() {
        match ch {
            '"' => encoded.push_str("%22"),
            '\'' => encoded.push_str("%27"),
            '<' => encoded.push_str("%3C"),
            '>' => encoded.push_str("%3E"),
            '`' => encoded.push_str("%60"),
            ch if ch.is_whitespace() => encoded.push_str("%20"),
            _ => encoded.push(ch),
        }
    }
    encoded
}
