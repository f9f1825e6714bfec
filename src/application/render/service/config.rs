use std::{borrow::Cow, collections::HashSet};

use ammonia::Builder as AmmoniaBuilder;
use comrak::options::Options;

use crate::domain::payment_uri::{is_payment_uri, payment_scheme_prefix};

/// URL schemes links and images may keep in HTML output. The payment schemes
/// are only honoured on anchors whose target classifies as a payment URI.
pub(crate) const HTML_URL_SCHEMES: [&str; 6] =
    ["http", "https", "mailto", "tel", "monero", "bitcoin"];

/// Build the markdown options shared by both output modes.
///
/// Called once per render; the returned options must not be cached across calls.
pub(crate) fn markdown_options() -> Options<'static> {
    let mut options = Options::default();
    configure_extensions(&mut options);
    options
}

/// Sanitizer for display HTML: the tags comrak emits, payment-link `rel`, and
/// the allowed URL schemes. `rel` defaults are added afterwards by the link
/// finishing pass, so ammonia adds none.
pub(crate) fn build_html_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    let tags: HashSet<&'static str> = HashSet::from([
        "a",
        "blockquote",
        "br",
        "code",
        "dd",
        "del",
        "dl",
        "dt",
        "em",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "hr",
        "img",
        "li",
        "ol",
        "p",
        "pre",
        "strong",
        "table",
        "tbody",
        "td",
        "th",
        "thead",
        "tr",
        "ul",
    ]);
    builder.tags(tags);

    builder.link_rel(None);
    builder.add_tag_attributes("a", &["rel"]);
    builder.add_tag_attributes("code", &["class"]);
    builder.url_schemes(HashSet::from(HTML_URL_SCHEMES));

    builder.attribute_filter(|element, attribute, value| {
        let claims_payment = matches!(attribute, "href" | "src")
            && payment_scheme_prefix(value).is_some();
        if claims_payment && !(element == "a" && is_payment_uri(value)) {
            None
        } else {
            Some(Cow::Borrowed(value))
        }
    });

    builder
}

/// Sanitizer for the plain-text path: no tags survive, and the content of
/// script-like elements is dropped along with the element.
pub(crate) fn build_text_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::empty();
    builder.clean_content_tags(HashSet::from(["script", "style"]));
    builder
}

fn configure_extensions(options: &mut Options<'static>) {
    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.tagfilter = false;
    ext.table = true;
    ext.autolink = true;
    ext.description_lists = true;

    options.parse.smart = true;

    let render = &mut options.render;
    render.hardbreaks = true;
    // Raw nodes only ever carry hook output; see `dispatch`.
    render.r#unsafe = true;
    render.sourcepos = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_sanitizer_strips_every_tag() {
        let sanitizer = build_text_sanitizer();
        let text = sanitizer
            .clean("<h1>Title</h1><p><a href=\"https://x.test\">link</a> <em>em</em></p>")
            .to_string();

        assert_eq!(text, "Titlelink em");
    }

    #[test]
    fn text_sanitizer_drops_script_content() {
        let sanitizer = build_text_sanitizer();
        let text = sanitizer
            .clean("<p>keep</p><script>alert(1)</script>")
            .to_string();

        assert_eq!(text, "keep");
    }

    #[test]
    fn text_sanitizer_keeps_escaped_markup_escaped() {
        let sanitizer = build_text_sanitizer();
        let text = sanitizer.clean("<p>&lt;b&gt;</p>").to_string();

        assert_eq!(text, "&lt;b&gt;");
    }

    #[test]
    fn html_sanitizer_keeps_payment_anchors_and_plain_links() {
        let sanitizer = build_html_sanitizer();
        let payment = "<a href=\"bitcoin:1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2\" rel=\"noopener\">tip</a>";
        assert_eq!(sanitizer.clean(payment).to_string(), payment);

        let plain = sanitizer
            .clean("<a href=\"https://example.com/\">site</a>")
            .to_string();
        assert_eq!(plain, "<a href=\"https://example.com/\">site</a>");
    }

    #[test]
    fn html_sanitizer_drops_disallowed_targets() {
        let sanitizer = build_html_sanitizer();
        for (input, expected) in [
            ("<a href=\"javascript:alert(1)\">x</a>", "<a>x</a>"),
            ("<a href=\"bitcoin:tooshort\">x</a>", "<a>x</a>"),
            ("<a href=\"ftp://a.test/f\">x</a>", "<a>x</a>"),
            ("<img src=\"data:image/png;base64,AAAA\" alt=\"\">", "<img alt=\"\">"),
            (
                "<img src=\"bitcoin:1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2\" alt=\"\">",
                "<img alt=\"\">",
            ),
        ] {
            assert_eq!(sanitizer.clean(input).to_string(), expected, "input: {input}");
        }
    }

    #[test]
    fn html_sanitizer_keeps_relative_urls_and_code_languages() {
        let sanitizer = build_html_sanitizer();
        let html = "<p><a href=\"#notes\">n</a> <img src=\"/a.png\" alt=\"a\"></p>\n<pre><code class=\"language-rust\">fn main() {}\n</code></pre>";
        assert_eq!(sanitizer.clean(html).to_string(), html);
    }

    #[test]
    fn options_enable_smart_punctuation_and_autolinks() {
        let options = markdown_options();
        assert!(options.parse.smart);
        assert!(options.extension.autolink);
        assert!(options.render.hardbreaks);
    }
}
