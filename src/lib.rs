//! Markdown rendering with allow-listed payment links.
//!
//! ```
//! let html = tipmark::render_full("Hello <b>World</b>");
//! assert_eq!(html, "<p>Hello &lt;b&gt;World&lt;/b&gt;</p>");
//!
//! let text = tipmark::render_plain_text("# Hello\n\nHow are you?");
//! assert_eq!(text, "Hello\nHow are you?");
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;

pub use application::render::{RenderMode, render_full, render_plain_text};
pub use domain::payment_uri::{
    PaymentScheme, classify_payment_uri, is_payment_uri, payment_scheme_prefix,
};
