//! Turns a tree back into source text.
//!
//! Expressions are printed with every nested operator parenthesised, so the
//! text parses back to the same tree no matter how the precedence table ranks
//! the operators. Block constructs are printed as indented lines.

use crate::parser::lookups::{continues, is_binary_operator};

use super::node::{Node, ACCESS, ARRAY_LIT, ID, SEQ};

const INDENT: &str = "  ";

/// Keywords printed as `keyword:` followed by an indented body.
const BLOCK_KEYWORDS: [&str; 4] = ["else", "init", "code", "shared"];

pub fn to_source(node: &Node) -> String {
    let mut lines = Vec::new();
    print_statement(node, 0, &mut lines);

    let mut source = lines.join("\n");
    source.push('\n');
    source
}

fn print_statement(node: &Node, depth: usize, out: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);

    match node {
        Node::Tree { head, children, .. } if head == SEQ => {
            for child in children {
                print_statement(child, depth, out);
            }
        }
        Node::Tree { head, children, .. }
            if (head == "if" || head == "elif") && !children.is_empty() =>
        {
            let condition = print_expression(&children[0], true);
            out.push(format!("{}{} {}:", indent, head, condition));
            print_body(head, &children[1..], depth, out);
        }
        Node::Tree { head, children, .. }
            if BLOCK_KEYWORDS.contains(&head.as_str()) && !children.is_empty() =>
        {
            out.push(format!("{}{}:", indent, head));
            print_body(head, children, depth, out);
        }
        _ => out.push(format!("{}{}", indent, print_expression(node, true))),
    }
}

// The first node is the indented body, anything after it continues the chain
// and goes back to the keyword's own indentation.
fn print_body(head: &str, rest: &[Node], depth: usize, out: &mut Vec<String>) {
    let Some((body, continuations)) = rest.split_first() else {
        return;
    };

    let body_is_continuation = continuations.is_empty()
        && body.head().is_some_and(|next| continues(head, next));
    if body_is_continuation {
        print_statement(body, depth, out);
        return;
    }

    print_statement(body, depth + 1, out);
    for continuation in continuations {
        print_statement(continuation, depth, out);
    }
}

fn print_expression(node: &Node, outermost: bool) -> String {
    let (head, children) = match node {
        Node::Leaf { value, .. } => return value.clone(),
        Node::Tree { head, children, .. } => (head.as_str(), children.as_slice()),
    };

    match (head, children) {
        ("!", [operand]) => parenthesise(
            format!("!{}", print_expression(operand, false)),
            outermost,
        ),
        (operator, [left, right]) if is_binary_operator(operator) => parenthesise(
            format!(
                "{} {} {}",
                print_expression(left, false),
                operator,
                print_expression(right, false)
            ),
            outermost,
        ),
        (ACCESS, [collection, indices @ ..]) => format!(
            "{}[{}]",
            print_expression(collection, false),
            print_arguments(indices)
        ),
        (ARRAY_LIT, elements) => format!("[{}]", print_arguments(elements)),
        (ID, elements) => format!("({})", print_arguments(elements)),
        (name, arguments) => format!("{}({})", name, print_arguments(arguments)),
    }
}

fn print_arguments(arguments: &[Node]) -> String {
    arguments
        .iter()
        .map(|argument| print_expression(argument, true))
        .collect::<Vec<_>>()
        .join(", ")
}

fn parenthesise(text: String, outermost: bool) -> String {
    if outermost {
        text
    } else {
        format!("({})", text)
    }
}
