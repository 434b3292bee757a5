// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Generic YAML node tree that keeps the comments written above each node.

mod loader;


pub use loader::load;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Scalar,
    Sequence,
    Mapping,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeTag {
    Str,
    Bool,
    Int,
    Float,
    Null,
    Seq,
    Map,
    Alias,
    Other(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub tag: NodeTag,
    // Scalar text. Empty for sequences and mappings.
    pub value: String,
    // Mappings store their entries flattened: key, value, key, value, ...
    pub children: Vec<Node>,
    // Comment lines directly above the node, '#' markers included.
    pub head_comment: String,
    // 1-based.
    pub line: usize,
}

impl Node {
    pub fn is_scalar(&self) -> bool {
        self.kind == NodeKind::Scalar
    }

    pub fn is_null(&self) -> bool {
        self.tag == NodeTag::Null
    }

    /// Iterates over the (key, value) pairs of a mapping node.
    ///
    /// A trailing key without a value is skipped.
    pub fn entries(&self) -> impl Iterator<Item = (&Node, &Node)> + '_ {
        self.children.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Renders the node as compact flow-style text, e.g. `[a, b]` or `{k: v}`.
    pub fn to_flow_string(&self) -> String {
        match self.kind {
            NodeKind::Scalar => {
                if self.value.is_empty() && self.tag == NodeTag::Str {
                    "\"\"".to_string()
                } else {
                    self.value.clone()
                }
            }
            NodeKind::Sequence => {
                let items: Vec<String> = self.children.iter().map(Node::to_flow_string).collect();
                format!("[{}]", items.join(", "))
            }
            NodeKind::Mapping => {
                let items: Vec<String> = self
                    .entries()
                    .map(|(key, value)| format!("{}: {}", key.to_flow_string(), value.to_flow_string()))
                    .collect();
                format!("{{{}}}", items.join(", "))
            }
        }
    }
}
