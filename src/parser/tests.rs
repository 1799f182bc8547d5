//! Unit tests for the parser module.
//!
//! This module contains tests for:
//! - Operator ranks and token roles
//! - The postfix reordering of one line
//! - Tree building, including call/group/index/literal disambiguation
//! - Block structuring and continuation chains

use std::sync::Arc;

use proptest::prelude::*;
use rstest::rstest;

use super::{
    expr::parse_expression,
    lookups::{continues, precedence_of, role_of, Role},
    parser::{parse_source, split_lines, ParseOptions},
    postfix::to_postfix,
    stmt::splice_continuation,
};
use crate::{
    ast::node::Node,
    errors::errors::{ErrorImpl, Severity},
    lexer::lexer::tokenize_line,
    Position,
};

fn origin() -> Position {
    Position::new(Arc::new("test.se".to_string()), 1, 1)
}

fn expression(source: &str) -> String {
    let tokens = tokenize_line(source, origin()).unwrap();
    parse_expression(tokens).unwrap().to_string()
}

fn expression_error(source: &str) -> ErrorImpl {
    let tokens = tokenize_line(source, origin()).unwrap();
    parse_expression(tokens).unwrap_err().get_kind().clone()
}

fn postfix(source: &str) -> String {
    let tokens = tokenize_line(source, origin()).unwrap();
    to_postfix(tokens)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn block(source: &str) -> String {
    let (node, diagnostics) = parse_source(source, "test.se");
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {:?}", diagnostics);
    node.to_string()
}

// LOOKUPS

#[rstest]
#[case("!", Some(0))]
#[case("^", Some(1))]
#[case("@%", Some(2))]
#[case("-", Some(3))]
#[case("@>=", Some(4))]
#[case("xor", Some(5))]
#[case("==", Some(5))]
#[case("and", Some(6))]
#[case("&&", Some(6))]
#[case("or", Some(7))]
#[case("=", Some(10))]
#[case("foo", None)]
#[case("(", None)]
fn test_precedence_of(#[case] symbol: &str, #[case] rank: Option<u8>) {
    assert_eq!(precedence_of(symbol), rank);
}

#[test]
fn test_role_of() {
    let tokens = tokenize_line("( ] , : ! + and x 5 \"s\" if", origin()).unwrap();
    let roles = tokens.iter().map(role_of).collect::<Vec<_>>();

    assert_eq!(
        roles,
        vec![
            Role::OpenGroup,
            Role::CloseGroup,
            Role::Comma,
            Role::Colon,
            Role::UnaryOp,
            Role::BinaryOp,
            Role::BinaryOp,
            Role::Atom,
            Role::Atom,
            Role::Atom,
            Role::Atom,
        ]
    );
}

#[test]
fn test_continuation_table() {
    assert!(continues("if", "elif"));
    assert!(continues("if", "else"));
    assert!(continues("elif", "elif"));
    assert!(continues("elif", "else"));
    assert!(continues("init", "code"));
    assert!(continues("shared", "init"));

    assert!(!continues("else", "elif"));
    assert!(!continues("if", "if"));
    assert!(!continues("code", "init"));
}

// POSTFIX

#[rstest]
#[case("2 + 3 * 5", "2 3 5 * +")]
#[case("a - b - c", "a b - c -")]
#[case("f(x)", "( f x )")]
#[case("(x)", "( id x )")]
#[case("a[i]", "[ a i ]")]
#[case("[1, 2]", "[ id 1 2 ]")]
#[case("-x", "0 x -")]
#[case("x[1:2]", "[ x 1 : 2 ]")]
#[case("a[i][j]", "[ [ a i ] j ]")]
fn test_postfix(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(postfix(source), expected);
}

// EXPRESSIONS

#[rstest]
#[case("2 + 3 * 5", "(+ 2 (* 3 5))")]
#[case("(2 + 3) * 5", "(* (+ 2 3) 5)")]
#[case("2 * 3 + 5", "(+ (* 2 3) 5)")]
#[case("a - b - c", "(- (- a b) c)")]
#[case("a / b * c", "(* (/ a b) c)")]
#[case("2 ^ 3 * 4", "(* (^ 2 3) 4)")]
#[case("a < b and c >= d", "(and (< a b) (>= c d))")]
#[case("a || b && c", "(|| a (&& b c))")]
#[case("a == b | c", "(| (== a b) c)")]
#[case("a @< b @% c", "(@< a (@% b c))")]
#[case("x = y + 1", "(= x (+ y 1))")]
fn test_binary_precedence(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(expression(source), expected);
}

#[rstest]
#[case("-x", "(- 0 x)")]
#[case("3 - -2", "(- 3 (- 0 2))")]
#[case("-2 + 3", "(+ (- 0 2) 3)")]
#[case("a * -b", "(* a (- 0 b))")]
#[case("- -x", "(- 0 (- 0 x))")]
#[case("f(-x)", "(f (- 0 x))")]
#[case("-(a + b)", "(- 0 (+ a b))")]
#[case("x = -1", "(= x (- 0 1))")]
fn test_unary_minus(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(expression(source), expected);
}

#[test]
fn test_logical_not() {
    assert_eq!(expression("!x"), "(! x)");
    assert_eq!(expression("!(a + b)"), "(! (+ a b))");
    // Binary operators never pop a pending `!`
    assert_eq!(expression("!a + b"), "(! (+ a b))");
    assert_eq!(expression("(!a) + b"), "(+ (! a) b)");
}

#[rstest]
#[case("f(x)", "(f x)")]
#[case("f(x, y + 1)", "(f x (+ y 1))")]
#[case("f()", "(f)")]
#[case("f(g(x), h[1])", "(f (g x) (access h 1))")]
#[case("(x)", "x")]
#[case("((x))", "x")]
#[case("(a, b)", "(id a b)")]
#[case("()", "(id)")]
#[case("a[i]", "(access a i)")]
#[case("a[i + 1]", "(access a (+ i 1))")]
#[case("a[]", "(access a)")]
#[case("a[i][j]", "(access (access a i) j)")]
#[case("f(x)[0]", "(access (f x) 0)")]
#[case("(a + b)[0]", "(access (+ a b) 0)")]
#[case("[1, 2, 3]", "(array_lit 1 2 3)")]
#[case("[]", "(array_lit)")]
#[case("[[1], [2, 3]]", "(array_lit (array_lit 1) (array_lit 2 3))")]
#[case("x[1:2]", "(access x 1 : 2)")]
#[case("msg.sender", "msg.sender")]
#[case("send(msg.sender, \"hi\")", "(send msg.sender \"hi\")")]
fn test_groups(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(expression(source), expected);
}

#[test]
fn test_synthesized_nodes_take_trigger_position() {
    let tokens = tokenize_line("a - -b", origin()).unwrap();
    let node = parse_expression(tokens).unwrap();

    let negation = &node.children()[1];
    assert_eq!(negation.position().column, 5);
    assert_eq!(negation.children()[0].value(), Some("0"));
    assert_eq!(negation.children()[0].position().column, 5);
}

#[test]
fn test_call_node_takes_callee_position() {
    let tokens = tokenize_line("x + foo(1)", origin()).unwrap();
    let node = parse_expression(tokens).unwrap();

    assert_eq!(node.children()[1].head(), Some("foo"));
    assert_eq!(node.children()[1].position().column, 5);
}

#[test]
fn test_too_many_values() {
    assert_eq!(
        expression_error("a b"),
        ErrorImpl::TooManyValues {
            leftover: vec!["a".to_string(), "b".to_string()]
        }
    );
}

#[rstest]
#[case("a)", ")")]
#[case("a[i)", ")")]
#[case("f(x]", "]")]
#[case("[1, 2)", ")")]
#[case("(x]", "]")]
fn test_unmatched_close(#[case] source: &str, #[case] token: &str) {
    assert_eq!(
        expression_error(source),
        ErrorImpl::UnmatchedClose {
            token: token.to_string()
        }
    );
}

#[test]
fn test_unclosed_group_leaves_values() {
    assert!(matches!(
        expression_error("f(x"),
        ErrorImpl::TooManyValues { .. }
    ));
}

#[test]
fn test_missing_operand() {
    assert_eq!(
        expression_error("a +"),
        ErrorImpl::MissingOperand {
            operator: "+".to_string()
        }
    );
}

#[test]
fn test_only_names_can_be_called() {
    assert_eq!(
        expression_error("f(x)(y)"),
        ErrorImpl::InvalidCallTarget {
            target: "(f x)".to_string()
        }
    );
}

#[test]
fn test_empty_reduction() {
    assert_eq!(expression_error(","), ErrorImpl::EmptyReduction);
}

// BLOCKS

#[test]
fn test_single_statement_is_the_root() {
    assert_eq!(block("x = 1\n"), "(= x 1)");
}

#[test]
fn test_statements_form_a_seq() {
    assert_eq!(block("x = 1\ny = 2\nf(x, y)\n"), "(seq (= x 1) (= y 2) (f x y))");
}

#[test]
fn test_empty_source_is_an_empty_seq() {
    assert_eq!(block(""), "(seq)");
    assert_eq!(block("\n  \n# only a comment\n"), "(seq)");
}

#[test]
fn test_if_chain_is_nested() {
    let source = "if x:\n  a\nelif y:\n  b\nelse:\n  c\n";
    assert_eq!(block(source), "(if x a (elif y b (else c)))");
}

#[test]
fn test_if_chain_with_multi_statement_bodies() {
    let source = "if x:\n  a\n  b\nelif y:\n  c\n  d\nelse:\n  e\n  f\n";
    assert_eq!(
        block(source),
        "(if x (seq a b) (elif y (seq c d) (else (seq e f))))"
    );
}

#[test]
fn test_elif_chain() {
    let source = "if a:\n  x\nelif b:\n  y\nelif c:\n  z\nelse:\n  w\n";
    assert_eq!(
        block(source),
        "(if a x (elif b y (elif c z (else w))))"
    );
}

#[test]
fn test_if_else_without_elif() {
    assert_eq!(block("if a < 5:\n  x\nelse:\n  y\n"), "(if (< a 5) x (else y))");
}

#[test]
fn test_bare_else_joins_the_chain() {
    assert_eq!(block("if x:\n  a\nelse\n"), "(if x a else)");
    assert_eq!(
        block("if x:\n  a\nelif y:\n  b\nelse\n"),
        "(if x a (elif y b else))"
    );
}

#[test]
fn test_new_if_starts_a_new_chain() {
    let source = "if a:\n  x\nif b:\n  y\nelse:\n  z\n";
    assert_eq!(block(source), "(seq (if a x) (if b y (else z)))");
}

#[test]
fn test_declaration_continuations() {
    assert_eq!(
        block("init:\n  b = 2\ncode:\n  c = 3\n"),
        "(init (= b 2) (code (= c 3)))"
    );
    assert_eq!(
        block("shared:\n  a = 1\ninit:\n  b = 2\n"),
        "(shared (= a 1) (init (= b 2)))"
    );
    // Only the head of the previous statement is checked
    assert_eq!(
        block("shared:\n  a = 1\ninit:\n  b = 2\ncode:\n  c = 3\n"),
        "(seq (shared (= a 1) (init (= b 2))) (code (= c 3)))"
    );
}

#[test]
fn test_nested_blocks() {
    let source = "if a:\n  if b:\n    x\n  else:\n    y\n  z\nw\n";
    assert_eq!(block(source), "(seq (if a (seq (if b x (else y)) z)) w)");
}

#[test]
fn test_comments_and_blank_lines() {
    let source = "# header\nx = 1 # trailing\n\nif x: // why\n  a\n\n  b\n";
    assert_eq!(block(source), "(seq (= x 1) (if x (seq a b)))");
}

#[test]
fn test_statement_with_body_becomes_a_tree() {
    assert_eq!(block("while(x < 3):\n  x = x + 1\n"), "(while (< x 3) (= x (+ x 1)))");
    assert_eq!(block("loop:\n  a\n"), "(loop a)");
}

#[test]
fn test_lone_keyword_is_a_plain_statement() {
    assert_eq!(block("if"), "if");
}

#[test]
fn test_tabs_expand_to_tab_width() {
    assert_eq!(block("if x:\n\ta\n\tb\n"), "(if x (seq a b))");
    assert_eq!(
        split_lines("\t\tx\r\n y", 2),
        vec!["    x".to_string(), " y".to_string()]
    );
    assert_eq!(ParseOptions::new().with_tab_width(8).tab_width, 8);
}

#[test]
fn test_indent_mismatch_is_reported_and_recovered() {
    let source = "if x:\n   a\n  b\n";
    let (node, diagnostics) = parse_source(source, "test.se");

    assert_eq!(node.to_string(), "(if x (seq a b))");
    assert_eq!(diagnostics.len(), 1);

    let warning = &diagnostics.all()[0];
    assert_eq!(warning.severity(), Severity::Warning);
    assert_eq!(
        warning.get_kind(),
        &ErrorImpl::IndentMismatch {
            expected: 3,
            found: 2
        }
    );
    assert_eq!(warning.get_position().line, 3);
}

#[test]
fn test_indented_first_line_is_reported() {
    let (node, diagnostics) = parse_source("  x = 1\n", "test.se");

    assert_eq!(node.to_string(), "(= x 1)");
    assert_eq!(diagnostics.warnings().count(), 1);
}

#[test]
fn test_failed_line_is_dropped_with_its_body() {
    let source = "x = 1\na b:\n  inner\ny = 2\n";
    let (node, diagnostics) = parse_source(source, "test.se");

    assert_eq!(node.to_string(), "(seq (= x 1) (= y 2))");
    assert_eq!(diagnostics.errors().count(), 1);

    let error = diagnostics.errors().next().unwrap();
    assert!(error.is_reduction_failure());
    assert_eq!(error.get_position().line, 2);
}

#[test]
fn test_unrecognised_character_fails_the_line() {
    let (node, diagnostics) = parse_source("a = $\nb = 1\n", "test.se");

    assert_eq!(node.to_string(), "(= b 1)");
    assert!(matches!(
        diagnostics.all()[0].get_kind(),
        ErrorImpl::UnrecognisedToken { .. }
    ));
}

#[test]
fn test_statement_positions() {
    let (node, _) = parse_source("x = 1\nif y:\n  z\n", "test.se");

    assert_eq!(node.position().line, 1);
    assert_eq!(node.children()[1].position().line, 2);
    assert_eq!(node.children()[1].children()[1].position().line, 3);
    assert_eq!(node.children()[1].children()[1].position().column, 3);
    assert_eq!(node.position().file.as_str(), "test.se");
}

#[test]
fn test_splice_continuation_follows_right_spine() {
    let leaf = |value: &str| Node::leaf(value, Position::null());
    let tree = |head: &str, children: Vec<Node>| Node::tree(head, children, Position::null());

    let chain = tree("if", vec![leaf("x"), leaf("a"), tree("elif", vec![leaf("y"), leaf("b")])]);
    let spliced = splice_continuation(chain, tree("else", vec![leaf("c")]));

    assert_eq!(spliced.to_string(), "(if x a (elif y b (else c)))");
}

// PROPERTIES

const ARITHMETIC: [char; 4] = ['+', '-', '*', '/'];

#[derive(Debug, Clone)]
enum Arith {
    Number(i64),
    Binary(Box<Arith>, char, Box<Arith>),
}

impl Arith {
    fn source(&self) -> String {
        match self {
            Arith::Number(value) => value.to_string(),
            Arith::Binary(left, operator, right) => {
                format!("({} {} {})", left.source(), operator, right.source())
            }
        }
    }

    fn value(&self) -> Option<i64> {
        match self {
            Arith::Number(value) => Some(*value),
            Arith::Binary(left, operator, right) => {
                apply(*operator, left.value()?, right.value()?)
            }
        }
    }
}

/// `None` once a division by zero happens anywhere below.
fn apply(operator: char, left: i64, right: i64) -> Option<i64> {
    match operator {
        '+' => Some(left.wrapping_add(right)),
        '-' => Some(left.wrapping_sub(right)),
        '*' => Some(left.wrapping_mul(right)),
        '/' => left.checked_div(right),
        _ => unreachable!(),
    }
}

fn evaluate(node: &Node) -> Option<i64> {
    match node {
        Node::Leaf { value, .. } => Some(value.parse().unwrap()),
        Node::Tree { head, children, .. } => {
            let operator = head.chars().next().unwrap();
            apply(operator, evaluate(&children[0])?, evaluate(&children[1])?)
        }
    }
}

fn arith() -> impl Strategy<Value = Arith> {
    let leaf = (0i64..100).prop_map(Arith::Number);
    leaf.prop_recursive(4, 32, 2, |inner| {
        (inner.clone(), prop::sample::select(ARITHMETIC.to_vec()), inner).prop_map(
            |(left, operator, right)| Arith::Binary(Box::new(left), operator, Box::new(right)),
        )
    })
}

/// Standard evaluation of a flat chain: `*` and `/` left to right first, then
/// `+` and `-` left to right.
fn evaluate_flat(numbers: &[i64], operators: &[char]) -> Option<i64> {
    let mut terms = vec![numbers[0]];
    let mut signs = vec![];
    for (operator, number) in operators.iter().zip(&numbers[1..]) {
        match operator {
            '*' | '/' => {
                let last = terms.pop()?;
                terms.push(apply(*operator, last, *number)?);
            }
            _ => {
                signs.push(*operator);
                terms.push(*number);
            }
        }
    }

    let mut result = terms[0];
    for (sign, term) in signs.iter().zip(&terms[1..]) {
        result = apply(*sign, result, *term)?;
    }
    Some(result)
}

proptest! {
    #[test]
    fn test_parenthesised_arithmetic_evaluates_like_source(expr in arith()) {
        let tokens = tokenize_line(&expr.source(), origin()).unwrap();
        let node = parse_expression(tokens).unwrap();
        prop_assert_eq!(evaluate(&node), expr.value());
    }

    #[test]
    fn test_flat_arithmetic_respects_precedence(
        numbers in prop::collection::vec(0i64..100, 1..8),
        operators in prop::collection::vec(prop::sample::select(ARITHMETIC.to_vec()), 7),
    ) {
        let operators = &operators[..numbers.len() - 1];
        let mut source = numbers[0].to_string();
        for (operator, number) in operators.iter().zip(&numbers[1..]) {
            source.push_str(&format!(" {} {}", operator, number));
        }

        let tokens = tokenize_line(&source, origin()).unwrap();
        let node = parse_expression(tokens).unwrap();
        prop_assert_eq!(evaluate(&node), evaluate_flat(&numbers, operators));
    }
}
