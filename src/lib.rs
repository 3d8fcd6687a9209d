//! Integer evaluation of infix expressions given as a sequence of tokens.
//!
//! ```
//! let result = calc::evaluate(["2", "+", "3", "x", "4"]).unwrap();
//! assert_eq!(result.to_string(), "14");
//! ```

pub mod evaluator;
pub mod parser;
pub mod tokenizer;

use thiserror::Error;

pub use evaluator::{evaluate_postfix, EvaluateError, Evaluator};
pub use parser::{to_postfix, Parser, Postfix};
pub use tokenizer::{tokenize, Operation, Token, TokenizeError, Tokenizer, Value};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExpressionError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    #[error(transparent)]
    Evaluate(#[from] EvaluateError),
}

/// Validates raw tokens and converts them to postfix order.
pub fn compile<I, S>(tokens: I) -> Result<Postfix, ExpressionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(to_postfix(tokenize(tokens)?))
}

pub fn execute(postfix: Postfix) -> Result<Value, ExpressionError> {
    Ok(Evaluator::run(postfix)?)
}

pub fn evaluate<I, S>(tokens: I) -> Result<Value, ExpressionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    execute(compile(tokens)?)
}
