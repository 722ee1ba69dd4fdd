//! Cheap facts about a parsed expression, gathered in one walk and shared by
//! the domain and subcontext detectors.

use mspeak_ast::{linearize, StructuralNode};
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Default)]
pub struct Features {
    commands: FxHashSet<String>,
    environments: FxHashSet<String>,
    /// Lowercase alphabetic words from literal text, including the
    /// arguments of `\text`-like commands.
    words: FxHashSet<String>,
    text: String,
}

impl Features {
    pub fn from_tree(tree: &StructuralNode) -> Self {
        let mut features = Features {
            text: linearize(tree),
            ..Features::default()
        };
        tree.walk(|node| {
            match node {
                StructuralNode::Command { name, .. } => {
                    features.commands.insert(name.clone());
                }
                StructuralNode::Environment { name, .. } => {
                    features.environments.insert(name.trim_end_matches('*').to_string());
                }
                StructuralNode::Leaf(text) => {
                    features.words.extend(
                        text.split(|c: char| !c.is_ascii_alphabetic())
                            .filter(|w| !w.is_empty())
                            .map(str::to_ascii_lowercase),
                    );
                }
                _ => {}
            }
            true
        });
        features
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.commands.contains(name)
    }

    pub fn has_any_command(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.commands.contains(*n))
    }

    pub fn has_environment(&self, name: &str) -> bool {
        self.environments.contains(name)
    }

    pub fn has_any_environment(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.environments.contains(*n))
    }

    pub fn has_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn has_any_word(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.words.contains(*w))
    }

    /// The canonical linearization the rule engine will rewrite.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }

    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(String::as_str)
    }
}
