//! Canonical text form of a structural tree.
//!
//! The rule engine matches against this form, so it must be stable: every
//! command argument is braced, scripts are always `_{...}^{...}`, alphabetic
//! zero-argument commands are followed by a space, and whitespace is
//! collapsed to single spaces.

use crate::node::StructuralNode;

/// Render `node` in canonical form. A top-level `Group` is emitted without
/// its braces.
pub fn linearize(node: &StructuralNode) -> String {
    let mut out = String::new();
    match node {
        StructuralNode::Group(children) => {
            for child in children {
                write_node(child, &mut out);
            }
        }
        other => write_node(other, &mut out),
    }
    collapse_whitespace(&out)
}

fn write_node(node: &StructuralNode, out: &mut String) {
    match node {
        StructuralNode::Leaf(text) => out.push_str(text),
        StructuralNode::Group(children) => {
            out.push('{');
            for child in children {
                write_node(child, out);
            }
            out.push('}');
        }
        StructuralNode::Command {
            name,
            args,
            optional_arg,
        } => {
            out.push('\\');
            out.push_str(name);
            if let Some(opt) = optional_arg {
                out.push('[');
                write_inner(opt, out);
                out.push(']');
            }
            for arg in args {
                out.push('{');
                write_inner(arg, out);
                out.push('}');
            }
            let alphabetic = name.chars().all(|c| c.is_ascii_alphabetic());
            if alphabetic && args.is_empty() && optional_arg.is_none() {
                out.push(' ');
            }
        }
        StructuralNode::Script { base, sub, sup } => {
            write_node(base, out);
            if out.ends_with(' ') {
                out.pop();
            }
            if let Some(sub) = sub {
                out.push_str("_{");
                write_inner(sub, out);
                out.push('}');
            }
            if let Some(sup) = sup {
                out.push_str("^{");
                write_inner(sup, out);
                out.push('}');
            }
        }
        StructuralNode::Environment { name, rows } => {
            out.push_str("\\begin{");
            out.push_str(name);
            out.push('}');
            for (r, row) in rows.iter().enumerate() {
                if r > 0 {
                    out.push_str(" \\\\ ");
                }
                for (c, cell) in row.iter().enumerate() {
                    if c > 0 {
                        out.push_str(" & ");
                    }
                    write_inner(cell, out);
                }
            }
            out.push_str("\\end{");
            out.push_str(name);
            out.push('}');
        }
    }
}

/// Write a node that is already inside braces/brackets: a group contributes
/// its children only.
fn write_inner(node: &StructuralNode, out: &mut String) {
    match node {
        StructuralNode::Group(children) => {
            for child in children {
                write_node(child, out);
            }
        }
        other => write_node(other, out),
    }
}

/// Collapse whitespace runs into a single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }
    out
}
