//! Front end of the symalg expression engine.
//!
//! Text goes through three stages before it becomes a tree:
//!
//! 1. the [`lexer`] splits it into lexical units, inserting implicit multiplication and
//!    negation markers,
//! 2. [`classify`] tags each unit as an operand, operator, function, bracket, or separator,
//! 3. the [`shunting_yard`] converter reorders the tokens into postfix (RPN) order.
//!
//! ```
//! use symalg_parser::postfix;
//!
//! let rpn = postfix("2x + 1").unwrap()
//!     .into_iter()
//!     .map(|token| token.lexeme)
//!     .collect::<Vec<_>>();
//! assert_eq!(rpn, ["2", "x", "*", "1", "+"]);
//! ```
//!
//! Building the tree from the postfix tokens is done by `symalg-core`.

pub mod classify;
pub mod error;
pub mod lexer;
pub mod op;
pub mod shunting_yard;
pub mod tokenizer;

pub use classify::{ConstantKind, FunctionKind, ParseToken, TokenClass};
pub use op::OpKind;

use error::Error;

/// Lexes, classifies, and converts the input into postfix order.
pub fn postfix(input: &str) -> Result<Vec<ParseToken>, Error> {
    postfix_at(input, 0)
}

/// Like [`postfix`], with every span shifted right by `offset`.
pub fn postfix_at(input: &str, offset: usize) -> Result<Vec<ParseToken>, Error> {
    let units = lexer::lex_at(input, offset);
    shunting_yard::to_postfix(classify::classify(units))
}
