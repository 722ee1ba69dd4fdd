//! Structural tree produced by the parser.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A node of the parsed LaTeX structure.
///
/// Trees are exclusively owned by the pipeline call that built them. Depth is
/// bounded by the parser, so the recursive helpers below cannot blow the
/// stack; traversal helpers still use an explicit stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructuralNode {
    /// A run of literal text (letters, digits, operators, spaces).
    Leaf(String),
    /// A braced group `{...}`, or the implicit top-level sequence.
    Group(Vec<StructuralNode>),
    /// `\name[optional]{arg}...`
    Command {
        name: String,
        args: Vec<StructuralNode>,
        optional_arg: Option<Box<StructuralNode>>,
    },
    /// `base_{sub}^{sup}`
    Script {
        base: Box<StructuralNode>,
        sub: Option<Box<StructuralNode>>,
        sup: Option<Box<StructuralNode>>,
    },
    /// `\begin{name} ... \end{name}`; rows of cells.
    Environment {
        name: String,
        rows: Vec<Vec<StructuralNode>>,
    },
}

impl StructuralNode {
    pub fn leaf(text: impl Into<String>) -> Self {
        StructuralNode::Leaf(text.into())
    }

    pub fn command(name: impl Into<String>, args: Vec<StructuralNode>) -> Self {
        StructuralNode::Command {
            name: name.into(),
            args,
            optional_arg: None,
        }
    }

    pub fn is_empty_group(&self) -> bool {
        matches!(self, StructuralNode::Group(children) if children.is_empty())
    }

    /// Direct children in source order.
    pub fn children(&self) -> SmallVec<[&StructuralNode; 4]> {
        let mut out = SmallVec::new();
        match self {
            StructuralNode::Leaf(_) => {}
            StructuralNode::Group(children) => out.extend(children.iter()),
            StructuralNode::Command {
                args, optional_arg, ..
            } => {
                if let Some(opt) = optional_arg {
                    out.push(opt.as_ref());
                }
                out.extend(args.iter());
            }
            StructuralNode::Script { base, sub, sup } => {
                out.push(base.as_ref());
                if let Some(s) = sub {
                    out.push(s.as_ref());
                }
                if let Some(s) = sup {
                    out.push(s.as_ref());
                }
            }
            StructuralNode::Environment { rows, .. } => {
                for row in rows {
                    out.extend(row.iter());
                }
            }
        }
        out
    }

    /// Pre-order traversal with an explicit stack.
    ///
    /// The callback returns `false` to skip the children of a node.
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&'a StructuralNode) -> bool) {
        let mut stack: SmallVec<[&'a StructuralNode; 16]> = SmallVec::new();
        stack.push(self);
        while let Some(node) = stack.pop() {
            if !visit(node) {
                continue;
            }
            let children = node.children();
            for child in children.into_iter().rev() {
                stack.push(child);
            }
        }
    }

    /// Tree depth (a lone leaf has depth 1).
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(&StructuralNode, usize)> = vec![(self, 1)];
        while let Some((node, d)) = stack.pop() {
            max = max.max(d);
            for child in node.children() {
                stack.push((child, d + 1));
            }
        }
        max
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(|_| {
            count += 1;
            true
        });
        count
    }

    /// Names of every command in the tree, in pre-order.
    pub fn command_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.walk(|node| {
            if let StructuralNode::Command { name, .. } = node {
                names.push(name.as_str());
            }
            true
        });
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(a: &str, b: &str) -> StructuralNode {
        StructuralNode::command(
            "frac",
            vec![
                StructuralNode::Group(vec![StructuralNode::leaf(a)]),
                StructuralNode::Group(vec![StructuralNode::leaf(b)]),
            ],
        )
    }

    #[test]
    fn depth_counts_levels() {
        assert_eq!(StructuralNode::leaf("x").depth(), 1);
        assert_eq!(frac("1", "2").depth(), 3);
        let nested = StructuralNode::Group(vec![frac("1", "2")]);
        assert_eq!(nested.depth(), 4);
    }

    #[test]
    fn walk_is_preorder() {
        let tree = StructuralNode::Group(vec![frac("a", "b"), StructuralNode::leaf("+c")]);
        let mut seen = Vec::new();
        tree.walk(|node| {
            if let StructuralNode::Leaf(t) = node {
                seen.push(t.clone());
            }
            true
        });
        assert_eq!(seen, vec!["a", "b", "+c"]);
    }

    #[test]
    fn walk_can_skip_subtrees() {
        let tree = StructuralNode::Group(vec![frac("a", "b"), StructuralNode::leaf("c")]);
        let mut leaves = 0;
        tree.walk(|node| match node {
            StructuralNode::Command { .. } => false,
            StructuralNode::Leaf(_) => {
                leaves += 1;
                true
            }
            _ => true,
        });
        assert_eq!(leaves, 1);
    }

    #[test]
    fn command_names_and_counts() {
        let tree = StructuralNode::Group(vec![frac("a", "b")]);
        assert_eq!(tree.command_names(), vec!["frac"]);
        assert_eq!(tree.node_count(), 6);
    }
}
