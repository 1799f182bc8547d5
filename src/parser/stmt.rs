//! Groups lines into nested blocks by indentation.
//!
//! Every line at a block's indentation is one statement; the more deeply
//! indented lines right below it form its body. Adjacent statements such as
//! `if`/`elif`/`else` are spliced into one nested chain.

use tracing::{debug, trace};

use crate::{
    ast::node::{Node, SEQ},
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::tokenize_line,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{expr::parse_expression, lookups::continues, parser::Parser};

/// Width of the leading whitespace run.
pub fn space_count(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Parses `lines` as one block whose statements sit at `indent` spaces.
/// `first_line` is the 1-based line number of `lines[0]`.
pub fn parse_block(
    parser: &mut Parser,
    lines: &[String],
    first_line: usize,
    indent: usize,
) -> Node {
    debug!(first_line, indent, lines = lines.len(), "structuring block");

    let mut statements: Vec<Node> = vec![];
    let mut index = 0;

    while index < lines.len() {
        let line = &lines[index];
        let line_number = first_line + index;

        if is_blank(line) {
            index += 1;
            continue;
        }

        let spaces = space_count(line);
        if spaces != indent {
            parser.report(Error::new(
                ErrorImpl::IndentMismatch {
                    expected: indent,
                    found: spaces,
                },
                parser.position(line_number, spaces + 1),
            ));
        }

        let body_end = body_end(lines, index, spaces);

        let statement = match parse_line(parser, line, spaces, line_number) {
            Ok(Some(statement)) => statement,
            // Blank or comment-only, the lines below are not its body
            Ok(None) => {
                index += 1;
                continue;
            }
            Err(error) => {
                parser.report(error);
                index = body_end;
                continue;
            }
        };

        let body = &lines[index + 1..body_end];
        let statement = match body.iter().find(|line| !is_blank(line)) {
            Some(first) => {
                let body_indent = space_count(first);
                statement.with_child(parse_block(parser, body, line_number + 1, body_indent))
            }
            None => statement,
        };

        push_statement(&mut statements, statement);
        index = body_end;
    }

    if statements.len() == 1 {
        if let Some(statement) = statements.pop() {
            return statement;
        }
    }

    let position = statements
        .first()
        .map(|statement| statement.position().clone())
        .unwrap_or_else(|| parser.position(first_line, indent + 1));
    Node::tree(SEQ, statements, position)
}

/// Index one past the body of the line at `index`: the following lines
/// indented deeper than `spaces`. Blank lines belong to the body only when
/// more body lines follow them.
fn body_end(lines: &[String], index: usize, spaces: usize) -> usize {
    let mut end = index + 1;

    for (offset, line) in lines.iter().enumerate().skip(index + 1) {
        if is_blank(line) {
            continue;
        }
        if space_count(line) <= spaces {
            break;
        }
        end = offset + 1;
    }

    end
}

/// Parses the logical content of one line, `None` when nothing is left of it.
fn parse_line(
    parser: &Parser,
    line: &str,
    spaces: usize,
    line_number: usize,
) -> Result<Option<Node>, Error> {
    let origin = parser.position(line_number, spaces + 1);
    let tokens = tokenize_line(&line[spaces..], origin)?;

    let (keyword, tokens) = strip_decorations(tokens);
    if tokens.is_empty() {
        return Ok(None);
    }

    trace!(line = line_number, tokens = tokens.len(), "parsing line");
    let expression = parse_expression(tokens)?;

    Ok(Some(match keyword {
        Some(keyword) => Node::tree(keyword.value, vec![expression], keyword.span.start),
        None => expression,
    }))
}

/// Drops a comment and everything after it, then a trailing `:`, then splits
/// off a leading `if`/`elif` unless it is all that is left.
fn strip_decorations(mut tokens: Vec<Token>) -> (Option<Token>, Vec<Token>) {
    if let Some(comment) = tokens.iter().position(Token::is_comment_marker) {
        tokens.truncate(comment);
    }

    if tokens.last().is_some_and(|token| token.kind == TokenKind::Colon) {
        tokens.pop();
    }

    if tokens.len() > 1 && tokens[0].is_bodied() {
        let keyword = tokens.remove(0);
        return (Some(keyword), tokens);
    }

    (None, tokens)
}

/// Appends a statement to a block, splicing it into the previous statement
/// when it continues it.
fn push_statement(statements: &mut Vec<Node>, statement: Node) {
    // A bare `else` without a body is still part of the chain
    let continues_previous = match statements.last() {
        Some(Node::Tree { head, .. }) => continues(head, statement.label()),
        _ => false,
    };

    match statements.pop() {
        Some(previous) if continues_previous => {
            statements.push(splice_continuation(previous, statement));
        }
        previous => {
            statements.extend(previous);
            statements.push(statement);
        }
    }
}

struct Frame {
    head: String,
    children: Vec<Node>,
    position: Position,
}

/// Attaches `continuation` as the last child of the deepest node on the right
/// spine of `chain` that it continues, then rebuilds the spine above it.
pub fn splice_continuation(chain: Node, continuation: Node) -> Node {
    let next = continuation.label().to_string();
    trace!(chain = chain.label(), continuation = %next, "splicing continuation");

    let mut path: Vec<Frame> = vec![];
    let mut focus = chain;

    loop {
        match focus {
            Node::Tree {
                head,
                mut children,
                position,
            } => {
                let descend = children
                    .last()
                    .and_then(Node::head)
                    .is_some_and(|last| continues(last, &next));

                match children.pop() {
                    Some(last) if descend => {
                        path.push(Frame {
                            head,
                            children,
                            position,
                        });
                        focus = last;
                    }
                    last => {
                        children.extend(last);
                        children.push(continuation);
                        focus = Node::Tree {
                            head,
                            children,
                            position,
                        };
                        break;
                    }
                }
            }
            leaf => {
                focus = leaf.with_child(continuation);
                break;
            }
        }
    }

    while let Some(Frame {
        head,
        mut children,
        position,
    }) = path.pop()
    {
        children.push(focus);
        focus = Node::Tree {
            head,
            children,
            position,
        };
    }

    focus
}
