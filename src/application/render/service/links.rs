//! Finishing pass over sanitized display HTML.
//!
//! The sanitizer has already removed every link or image target outside the
//! allowed schemes. This pass unwraps anchors left without a target, drops
//! images left without a source, marks every anchor the HTML hook did not
//! author with `rel="nofollow noreferrer"`, and writes void elements in their
//! self-closing form.

use lol_html::{
    RewriteStrSettings, element, errors::RewritingError, html_content::ContentType, rewrite_str,
};

pub(crate) const DEFAULT_LINK_REL: &str = "nofollow noreferrer";

pub(crate) fn finish_links(html: &str) -> Result<String, RewritingError> {
    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("a:not([href])", |el| {
                    el.remove_and_keep_content();
                    Ok(())
                }),
                element!("a[href]:not([rel])", |el| {
                    el.set_attribute("rel", DEFAULT_LINK_REL)?;
                    Ok(())
                }),
                element!("img:not([src])", |el| {
                    el.remove();
                    Ok(())
                }),
                element!("br, hr, img[src]", |el| {
                    let mut markup = format!("<{}", el.tag_name());
                    for attribute in el.attributes() {
                        markup.push_str(&format!(
                            " {}=\"{}\"",
                            attribute.name(),
                            escape_angle_brackets(&attribute.value())
                        ));
                    }
                    markup.push_str(" />");
                    el.replace(&markup, ContentType::Html);
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::default()
        },
    )
}

/// Attribute values arrive still entity-encoded; only bare angle brackets
/// need escaping when the tag is rewritten.
fn escape_angle_brackets(value: &str) -> String {
    value.replace('<', "&lt;").replace('>', "&gt;")
}
