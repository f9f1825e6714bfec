//! Fraction glyph substitution for text nodes.
//!
//! comrak's smart punctuation covers quotes and dashes; the common vulgar
//! fractions are substituted here. A fraction is only replaced when it stands
//! alone as a word, so dates such as `1/2/2024` and numbers like `11/2` are left
//! as written. `1/4th` and `3/4ths` keep their ordinal suffix.

use std::borrow::Cow;

use comrak::nodes::{AstNode, NodeValue};

/// Pattern, glyph, and the ordinal suffix that may follow it directly.
const FRACTIONS: [(&str, char, Option<&str>); 3] = [
    ("1/2", '½', None),
    ("1/4", '¼', Some("th")),
    ("3/4", '¾', Some("ths")),
];

/// Rewrite every text node below `root` in place.
pub(crate) fn apply_fraction_glyphs<'a>(root: &'a AstNode<'a>) {
    for node in root.descendants() {
        let mut data = node.data.borrow_mut();
        if let NodeValue::Text(text) = &mut data.value {
            let replaced = match fraction_glyphs(text) {
                Cow::Owned(replaced) => replaced,
                Cow::Borrowed(_) => continue,
            };
            *text = replaced.into();
        }
    }
}

pub(crate) fn fraction_glyphs(text: &str) -> Cow<'_, str> {
    if !text.contains('/') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut previous: Option<char> = None;
    let mut rest = text;
    let mut replaced = false;

    while let Some(ch) = rest.chars().next() {
        if let Some((glyph, len)) = match_fraction(previous, rest) {
            out.push(glyph);
            previous = rest[..len].chars().last();
            rest = &rest[len..];
            replaced = true;
            continue;
        }
        out.push(ch);
        previous = Some(ch);
        rest = &rest[ch.len_utf8()..];
    }

    if replaced {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(text)
    }
}

fn match_fraction(previous: Option<char>, rest: &str) -> Option<(char, usize)> {
    if !previous.is_none_or(|ch| is_word_boundary(ch) && ch != '/') {
        return None;
    }

    FRACTIONS.iter().find_map(|&(pattern, glyph, suffix)| {
        let tail = rest.strip_prefix(pattern)?;
        let standalone = match tail.chars().next() {
            None => true,
            Some(next) => {
                (is_word_boundary(next) && next != '/')
                    || suffix.is_some_and(|suffix| starts_with_ignore_case(tail, suffix))
            }
        };
        standalone.then_some((glyph, pattern.len()))
    })
}

fn is_word_boundary(ch: char) -> bool {
    ch.is_whitespace() || ch.is_ascii_punctuation()
}

fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
