/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to parsed value definition syntax
///
/// Submodules:
/// - ast: The syntax node enum and its supporting types
/// - display: Canonical rendering of nodes back into syntax
pub mod ast;
pub mod display;
