//! Markdown rendering for user-authored content.
//!
//! Two outputs are produced from the same source: an HTML fragment for display
//! ([`render_full`]) and plain text for notifications ([`render_plain_text`]).
//! Both walk the parsed document with a [`NodeHook`] that escapes raw HTML and
//! recognises allow-listed payment links before the markdown emitter runs.
//! Rendering is synchronous, allocation-local and never fails.

mod dispatch;
mod hooks;
mod service;
mod types;
mod typography;

pub use hooks::{HtmlHook, TextHook};
pub use service::{render_full, render_plain_text};
pub use types::{HookNode, NodeEvent, NodeHook, ParseRenderModeError, RenderDecision, RenderMode};
