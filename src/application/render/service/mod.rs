pub(crate) mod config;
mod links;

use comrak::{Arena, format_html, nodes::AstNode, parse_document};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use super::dispatch::apply_hook;
use super::hooks::{HtmlHook, TextHook, escape_html};
use super::types::NodeHook;
use super::typography::apply_fraction_glyphs;
use config::{build_html_sanitizer, build_text_sanitizer, markdown_options};
use links::finish_links;

static NEWLINE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n+").expect("newline pattern must compile"));

/// Parser and emitter configuration for exactly one render call.
///
/// comrak documents must not be shared between renders, so every call builds a
/// fresh pipeline, with its own arena, and rendering consumes it.
struct RenderPipeline {
    options: comrak::Options<'static>,
}

impl RenderPipeline {
    fn new() -> Self {
        Self {
            options: markdown_options(),
        }
    }

    /// Parse `markdown`, run `hook` over the tree and emit HTML.
    fn render_with<H>(self, markdown: &str, hook: &H) -> String
    where
        H: NodeHook + ?Sized,
    {
        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &self.options);
        apply_fraction_glyphs(root);
        apply_hook(root, hook);
        self.emit(root)
    }

    fn emit<'a>(&self, root: &'a AstNode<'a>) -> String {
        let mut html = String::new();
        if let Err(err) = format_html(root, &self.options, &mut html) {
            // Writing into a String cannot fail; keep whatever was produced.
            warn!(
                target = "application::render::service",
                error = %err,
                "markdown emitter reported an error"
            );
        }
        html
    }
}

/// Render user markdown as an HTML fragment safe to embed in a page.
///
/// Raw HTML is always escaped, allow-listed payment links are kept with
/// `rel="noopener"`, and every other link gets `rel="nofollow noreferrer"`.
/// Links and images outside the allowed URL schemes lose their target. The
/// result has no leading or trailing whitespace.
pub fn render_full(markdown: &str) -> String {
    let html = RenderPipeline::new().render_with(markdown, &HtmlHook);
    let sanitized = build_html_sanitizer().clean(&html).to_string();

    match finish_links(&sanitized) {
        Ok(html) => html.trim().to_string(),
        Err(err) => {
            warn!(
                target = "application::render::links",
                error = %err,
                "link finishing pass failed; falling back to escaped source"
            );
            escaped_fallback(markdown)
        }
    }
}

/// Render user markdown as plain text for notifications and previews.
///
/// All markup is removed, runs of newlines collapse to one, and the result is
/// trimmed. Inline code keeps its backticks, and payment links render as
/// `text: destination`.
pub fn render_plain_text(markdown: &str) -> String {
    let html = RenderPipeline::new().render_with(markdown, &TextHook);

    let stripped = build_text_sanitizer().clean(&html).to_string();
    let collapsed = NEWLINE_RUNS.replace_all(&stripped, "\n");
    collapsed.trim().to_string()
}

fn escaped_fallback(markdown: &str) -> String {
    let trimmed = markdown.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    format!("<p>{}</p>", escape_html(trimmed))
}
