//! Reduces a postfix stream to one tree per line.

use tracing::trace;

use crate::{
    ast::node::{Node, ACCESS, ARRAY_LIT, ID},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::postfix::{to_postfix, Postfix};

/// Value stack entries. Open markers and sentinels stay on the stack until
/// the close marker of their group uncovers them.
enum Entry {
    Open(Token),
    Sentinel(Position),
    Value(Node),
}

impl Entry {
    fn describe(&self) -> String {
        match self {
            Entry::Open(token) => token.value.clone(),
            Entry::Sentinel(_) => String::from(ID),
            Entry::Value(node) => node.to_string(),
        }
    }
}

/// Parses the tokens of one logical line into a single tree.
pub fn parse_expression(tokens: Vec<Token>) -> Result<Node, Error> {
    let postfix = to_postfix(tokens);
    trace!(
        postfix = %postfix.iter().map(ToString::to_string).collect::<Vec<_>>().join(" "),
        "reordered line"
    );

    build_tree(postfix)
}

pub fn build_tree(postfix: Vec<Postfix>) -> Result<Node, Error> {
    let origin = postfix
        .first()
        .map(|item| item.position().clone())
        .unwrap_or_else(Position::null);
    let mut stack: Vec<Entry> = vec![];

    for item in postfix {
        match item {
            Postfix::Operand(token) => stack.push(Entry::Value(Node::from(token))),
            Postfix::Open(token) => stack.push(Entry::Open(token)),
            Postfix::Sentinel(position) => stack.push(Entry::Sentinel(position)),
            Postfix::Unary(token) => {
                let operand = pop_operand(&mut stack, &token)?;
                stack.push(Entry::Value(Node::tree(
                    token.value,
                    vec![operand],
                    token.span.start,
                )));
            }
            Postfix::Binary(token) => {
                // Operands were pushed left first
                let right = pop_operand(&mut stack, &token)?;
                let left = pop_operand(&mut stack, &token)?;
                stack.push(Entry::Value(Node::tree(
                    token.value,
                    vec![left, right],
                    token.span.start,
                )));
            }
            Postfix::Close(token) => {
                let group = close_group(&mut stack, token)?;
                stack.push(Entry::Value(group));
            }
        }
    }

    if stack.len() > 1 {
        return Err(Error::new(
            ErrorImpl::TooManyValues {
                leftover: stack.iter().map(Entry::describe).collect(),
            },
            origin,
        ));
    }

    match stack.pop() {
        Some(Entry::Value(node)) => Ok(node),
        Some(entry) => Err(Error::new(
            ErrorImpl::TooManyValues {
                leftover: vec![entry.describe()],
            },
            origin,
        )),
        None => Err(Error::new(ErrorImpl::EmptyReduction, origin)),
    }
}

fn pop_operand(stack: &mut Vec<Entry>, operator: &Token) -> Result<Node, Error> {
    match stack.pop() {
        Some(Entry::Value(node)) => Ok(node),
        _ => Err(Error::new(
            ErrorImpl::MissingOperand {
                operator: operator.value.clone(),
            },
            operator.span.start.clone(),
        )),
    }
}

/// Pops everything above the innermost open marker and turns it into a call,
/// an index, an array literal or a plain grouped expression.
fn close_group(stack: &mut Vec<Entry>, close: Token) -> Result<Node, Error> {
    let unmatched = |close: &Token| {
        Error::new(
            ErrorImpl::UnmatchedClose {
                token: close.value.clone(),
            },
            close.span.start.clone(),
        )
    };

    let mut collected = vec![];
    let open = loop {
        match stack.pop() {
            Some(Entry::Open(open)) => break open,
            Some(entry) => collected.push(entry),
            None => return Err(unmatched(&close)),
        }
    };
    collected.reverse();

    let bracket = close.kind == TokenKind::CloseBracket;
    if bracket != (open.kind == TokenKind::OpenBracket) {
        return Err(unmatched(&close));
    }

    let mut entries = collected.into_iter();
    let designator = entries.next();
    let mut arguments = entries
        .map(|entry| match entry {
            Entry::Value(node) => Ok(node),
            _ => Err(unmatched(&close)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    match (designator, bracket) {
        (Some(Entry::Sentinel(position)), false) => {
            if arguments.len() == 1 {
                Ok(arguments.remove(0))
            } else {
                Ok(Node::tree(ID, arguments, position))
            }
        }
        (Some(Entry::Sentinel(position)), true) => Ok(Node::tree(ARRAY_LIT, arguments, position)),
        (Some(Entry::Value(collection)), true) => {
            let position = collection.position().clone();
            arguments.insert(0, collection);
            Ok(Node::tree(ACCESS, arguments, position))
        }
        (Some(Entry::Value(Node::Leaf { value, position })), false) => {
            Ok(Node::tree(value, arguments, position))
        }
        (Some(Entry::Value(target)), false) => Err(Error::new(
            ErrorImpl::InvalidCallTarget {
                target: target.to_string(),
            },
            target.position().clone(),
        )),
        (Some(Entry::Open(_)), _) | (None, _) => Err(Error::new(
            ErrorImpl::EmptyReduction,
            open.span.start,
        )),
    }
}
