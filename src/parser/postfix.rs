//! Reorders the tokens of one logical line into postfix order.
//!
//! A single left-to-right pass with an explicit operator stack. Parentheses
//! and brackets are shared by calls, indexing, grouping and array literals, so
//! every open marker is written to the output followed by what it applies to:
//! the callee or collection, or a [`Postfix::Sentinel`] when nothing precedes
//! it. The tree builder resolves the sentinel once the group is closed.

use std::fmt::Display;

use crate::{
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::lookups::{precedence_of, role_of, Role};

// Negation binds tighter than every binary operator, so `3 - -2` keeps its
// `0 - 2` together.
const NEGATION_RANK: u8 = 0;

#[derive(Debug, Clone, PartialEq)]
pub enum Postfix {
    /// An identifier, literal or colon.
    Operand(Token),
    /// Start of a group, always directly followed by its designator.
    Open(Token),
    /// Designator of a group with nothing in front of it.
    Sentinel(Position),
    Close(Token),
    Unary(Token),
    Binary(Token),
}

impl Postfix {
    pub fn position(&self) -> &Position {
        match self {
            Postfix::Operand(token)
            | Postfix::Open(token)
            | Postfix::Close(token)
            | Postfix::Unary(token)
            | Postfix::Binary(token) => &token.span.start,
            Postfix::Sentinel(position) => position,
        }
    }
}

impl Display for Postfix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Postfix::Operand(token)
            | Postfix::Open(token)
            | Postfix::Close(token)
            | Postfix::Unary(token)
            | Postfix::Binary(token) => write!(f, "{}", token.value),
            Postfix::Sentinel(_) => write!(f, "id"),
        }
    }
}

enum Pending {
    Open(Token),
    Unary(Token),
    Binary(Token, u8),
}

impl From<Pending> for Postfix {
    fn from(pending: Pending) -> Self {
        match pending {
            Pending::Open(token) => Postfix::Open(token),
            Pending::Unary(token) => Postfix::Unary(token),
            Pending::Binary(token, _) => Postfix::Binary(token),
        }
    }
}

pub fn to_postfix(tokens: Vec<Token>) -> Vec<Postfix> {
    let mut output: Vec<Postfix> = vec![];
    let mut stack: Vec<Pending> = vec![];
    let mut previous: Option<Role> = None;

    for token in tokens {
        let role = role_of(&token);
        let follows_operand = matches!(previous, Some(Role::Atom | Role::CloseGroup));

        match role {
            Role::Atom => output.push(Postfix::Operand(token)),
            Role::OpenGroup => {
                let mut designator = if follows_operand {
                    take_operand(&mut output)
                } else {
                    vec![]
                };
                if designator.is_empty() {
                    designator.push(Postfix::Sentinel(token.span.start.clone()));
                }

                output.push(Postfix::Open(token.clone()));
                output.extend(designator);
                stack.push(Pending::Open(token));
            }
            Role::CloseGroup => {
                pop_until_open(&mut stack, &mut output);
                // The open marker is already in the output
                stack.pop();
                output.push(Postfix::Close(token));
            }
            Role::UnaryOp | Role::BinaryOp => {
                let negation = token.kind == TokenKind::Dash && !follows_operand;
                let rank = if negation {
                    output.push(Postfix::Operand(zero(&token)));
                    NEGATION_RANK
                } else {
                    precedence_of(&token.value).unwrap_or(NEGATION_RANK)
                };

                // A prefix operator has no left operand to complete
                let prefix = negation || role == Role::UnaryOp;
                while let Some(Pending::Binary(_, top)) = stack.last() {
                    if prefix || *top > rank {
                        break;
                    }
                    if let Some(pending) = stack.pop() {
                        output.push(pending.into());
                    }
                }

                if role == Role::UnaryOp {
                    stack.push(Pending::Unary(token));
                } else {
                    stack.push(Pending::Binary(token, rank));
                }
            }
            Role::Comma | Role::Colon => {
                pop_until_open(&mut stack, &mut output);
                if role == Role::Colon {
                    output.push(Postfix::Operand(token));
                }
            }
        }

        previous = Some(role);
    }

    // An unclosed open marker is already in the output
    while let Some(pending) = stack.pop() {
        if !matches!(pending, Pending::Open(_)) {
            output.push(pending.into());
        }
    }

    output
}

/// Moves operators to the output until an open marker is on top of the stack.
fn pop_until_open(stack: &mut Vec<Pending>, output: &mut Vec<Postfix>) {
    while let Some(top) = stack.pop() {
        if let Pending::Open(_) = top {
            stack.push(top);
            break;
        }
        output.push(top.into());
    }
}

/// Removes the operand that was written last: a single token, or a whole
/// group from its open marker to its close marker.
fn take_operand(output: &mut Vec<Postfix>) -> Vec<Postfix> {
    if !matches!(output.last(), Some(Postfix::Close(_))) {
        return output.pop().into_iter().collect();
    }

    let mut depth = 0usize;
    for index in (0..output.len()).rev() {
        match output[index] {
            Postfix::Close(_) => depth += 1,
            Postfix::Open(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return output.split_off(index);
                }
            }
            _ => {}
        }
    }

    vec![]
}

fn zero(token: &Token) -> Token {
    Token {
        kind: TokenKind::Number,
        value: String::from("0"),
        span: token.span.clone(),
    }
}
