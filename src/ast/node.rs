use std::fmt::Display;

use crate::{lexer::tokens::Token, Position};

/// Head of a statement sequence.
pub const SEQ: &str = "seq";
/// Head of an indexing expression, `a[i]` is `(access a i)`.
pub const ACCESS: &str = "access";
/// Head of an array literal, `[1, 2]` is `(array_lit 1 2)`.
pub const ARRAY_LIT: &str = "array_lit";
/// Head of a parenthesised group that is not a single expression, such as `(a, b)`.
pub const ID: &str = "id";

/// Tokens and tree nodes share this one recursive type.
///
/// A `Tree`'s children are in source order (operands left to right, or
/// condition, body and continuation for control constructs).
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf {
        value: String,
        position: Position,
    },
    Tree {
        head: String,
        children: Vec<Node>,
        position: Position,
    },
}

impl Node {
    pub fn leaf(value: impl Into<String>, position: Position) -> Self {
        Node::Leaf {
            value: value.into(),
            position,
        }
    }

    pub fn tree(head: impl Into<String>, children: Vec<Node>, position: Position) -> Self {
        Node::Tree {
            head: head.into(),
            children,
            position,
        }
    }

    pub fn position(&self) -> &Position {
        match self {
            Node::Leaf { position, .. } | Node::Tree { position, .. } => position,
        }
    }

    /// The head of a tree. Leaves have none.
    pub fn head(&self) -> Option<&str> {
        match self {
            Node::Tree { head, .. } => Some(head),
            Node::Leaf { .. } => None,
        }
    }

    /// The value of a leaf. Trees have none.
    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Leaf { value, .. } => Some(value),
            Node::Tree { .. } => None,
        }
    }

    /// Leaf value or tree head.
    pub fn label(&self) -> &str {
        match self {
            Node::Leaf { value, .. } => value,
            Node::Tree { head, .. } => head,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Tree { children, .. } => children,
            Node::Leaf { .. } => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Appends a child. A leaf becomes a tree headed by its value.
    pub fn with_child(self, child: Node) -> Node {
        match self {
            Node::Leaf { value, position } => Node::Tree {
                head: value,
                children: vec![child],
                position,
            },
            Node::Tree {
                head,
                mut children,
                position,
            } => {
                children.push(child);
                Node::Tree {
                    head,
                    children,
                    position,
                }
            }
        }
    }

    /// Structural equality, positions ignored.
    pub fn same_shape(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Leaf { value: a, .. }, Node::Leaf { value: b, .. }) => a == b,
            (
                Node::Tree {
                    head: a,
                    children: left,
                    ..
                },
                Node::Tree {
                    head: b,
                    children: right,
                    ..
                },
            ) => {
                a == b
                    && left.len() == right.len()
                    && left
                        .iter()
                        .zip(right.iter())
                        .all(|(left, right)| left.same_shape(right))
            }
            _ => false,
        }
    }
}

impl From<Token> for Node {
    fn from(token: Token) -> Self {
        Node::Leaf {
            value: token.value,
            position: token.span.start,
        }
    }
}

/// Canonical s-expression form: `(head child ...)` for trees, the value for leaves.
impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Leaf { value, .. } => write!(f, "{}", value),
            Node::Tree { head, children, .. } => {
                write!(f, "({}", head)?;
                for child in children {
                    write!(f, " {}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}
