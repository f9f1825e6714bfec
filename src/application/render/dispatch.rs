//! Applies a [`NodeHook`] to a parsed comrak document.
//!
//! The walker presents every node to the hook before HTML emission. Nodes the
//! hook handles are rewritten into raw HTML nodes carrying the hook's markup,
//! so the emitter writes them verbatim; all other nodes are left for comrak's
//! own rendering. Raw passthrough is only safe because every raw HTML node the
//! parser produced is offered to the hook here first, with one exception:
//! image descriptions, which comrak always emits as escaped plain text.
//!
//! The walk is iterative, so nesting depth is bounded by the heap rather than
//! the call stack.

use comrak::arena_tree::NodeEdge;
use comrak::nodes::{AstNode, NodeHtmlBlock, NodeValue};

use super::types::{HookNode, NodeEvent, NodeHook, RenderDecision};

enum Visit {
    Children,
    /// Leave the node and its subtree to the emitter untouched.
    Opaque,
    Replace { markup: String, block: bool },
}

/// Walk `root` depth-first, applying `hook` to every node.
pub(crate) fn apply_hook<'a, H>(root: &'a AstNode<'a>, hook: &H)
where
    H: NodeHook + ?Sized,
{
    // `Traverse` computes its next edge ahead of time, so the tree is only
    // rewritten once the walk is over.
    let mut replacements = Vec::new();
    let mut skipped: Option<&'a AstNode<'a>> = None;

    for edge in root.traverse() {
        match edge {
            NodeEdge::Start(node) => {
                if skipped.is_some() {
                    continue;
                }
                match decide(node, hook) {
                    Visit::Children => {}
                    Visit::Opaque => skipped = Some(node),
                    Visit::Replace { markup, block } => {
                        replacements.push((node, markup, block));
                        skipped = Some(node);
                    }
                }
            }
            NodeEdge::End(node) => {
                if skipped.is_some_and(|outer| outer.same_node(node)) {
                    skipped = None;
                }
            }
        }
    }

    for (node, markup, block) in replacements {
        replace_node(node, markup, block);
    }
}

fn decide<H>(node: &AstNode<'_>, hook: &H) -> Visit
where
    H: NodeHook + ?Sized,
{
    let data = node.data.borrow();
    let view = match &data.value {
        NodeValue::Image(_) => return Visit::Opaque,
        NodeValue::HtmlInline(literal) => HookNode::RawHtmlSpan { literal },
        NodeValue::HtmlBlock(block) => HookNode::RawHtmlBlock {
            literal: &block.literal,
        },
        NodeValue::Code(code) => HookNode::InlineCode {
            literal: &code.literal,
        },
        NodeValue::Link(link) => HookNode::Link {
            destination: &link.url,
            text: collect_inline_text(node),
        },
        _ => HookNode::Other,
    };

    let block = view.is_block();
    match hook.on_node(&view, NodeEvent::Entering) {
        RenderDecision::Default => Visit::Children,
        RenderDecision::Handled(mut markup) => {
            match hook.on_node(&view, NodeEvent::Leaving) {
                RenderDecision::Handled(tail) | RenderDecision::HandledSkipSubtree(tail) => {
                    markup.push_str(&tail)
                }
                RenderDecision::Default => {}
            }
            Visit::Replace { markup, block }
        }
        RenderDecision::HandledSkipSubtree(markup) => Visit::Replace { markup, block },
    }
}

fn replace_node(node: &AstNode<'_>, markup: String, block: bool) {
    {
        let mut data = node.data.borrow_mut();
        data.value = if block {
            NodeValue::HtmlBlock(NodeHtmlBlock {
                block_type: 0,
                literal: markup,
            })
        } else {
            NodeValue::HtmlInline(markup)
        };
    }

    while let Some(child) = node.first_child() {
        child.detach();
    }
}

/// Flatten the text below `node` into a single line, as a link label reads
/// once its formatting is dropped. Raw HTML contributes nothing.
pub(crate) fn collect_inline_text(node: &AstNode<'_>) -> String {
    node.descendants()
        .skip(1)
        .fold(String::new(), |mut label, descendant| {
            match &descendant.data.borrow().value {
                NodeValue::Text(text) => label.push_str(text),
                NodeValue::Code(code) => label.push_str(&code.literal),
                NodeValue::LineBreak | NodeValue::SoftBreak => label.push(' '),
                _ => {}
            }
            label
        })
}
