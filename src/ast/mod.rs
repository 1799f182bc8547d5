/// AST (Abstract Syntax Tree) module
/// Contains the tree handed to code generation
///
/// Submodules:
/// - node: The `Node` value shared by every stage, and its well-known heads
/// - printer: Re-serializes a tree into source text
pub mod node;
pub mod printer;
