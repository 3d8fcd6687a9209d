use crate::parser::Postfix;
use crate::tokenizer::{Operation, Token, Value};
use compact_str::{CompactString, ToCompactString};
use malachite::num::basic::traits::Zero;
use thiserror::Error;

/// Stack machine over postfix tokens.
#[derive(Debug, Default)]
pub struct Evaluator {
    operands: Vec<Value>,
}

impl Evaluator {
    pub fn handle_token(&mut self, token: Token) -> Result<(), EvaluateError> {
        match token {
            Token::Val(v) => self.operands.push(v),
            Token::Op(op) => {
                // Leave the stack untouched when the operator cannot apply
                if self.operands.len() < 2 {
                    return Err(EvaluateError::InsufficientOperands(op));
                }
                let (Some(r), Some(l)) = (self.operands.pop(), self.operands.pop()) else {
                    return Err(EvaluateError::InsufficientOperands(op));
                };
                self.operands.push(Action { l, op }.execute(r)?);
            }
        }

        Ok(())
    }

    pub fn finalize(&mut self) -> Result<Value, EvaluateError> {
        let remaining = self.operands.len();
        let result = match self.operands.pop() {
            Some(v) if remaining == 1 => Ok(v),
            _ => Err(EvaluateError::MalformedPostfix(remaining)),
        };
        self.operands.clear();
        result
    }

    pub fn run(postfix: Postfix) -> Result<Value, EvaluateError> {
        let mut evaluator = Evaluator::default();
        for token in postfix {
            evaluator.handle_token(token)?;
        }
        evaluator.finalize()
    }
}

/// Evaluates elements that are already in postfix order, without the
/// infix validation pass.
pub fn evaluate_postfix<I, S>(raw: I) -> Result<Value, EvaluateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut evaluator = Evaluator::default();
    for s in raw {
        let s = s.as_ref();
        let token = s
            .parse()
            .map_err(|_| EvaluateError::UnknownOperator(s.to_compact_string()))?;
        evaluator.handle_token(token)?;
    }
    evaluator.finalize()
}

#[derive(Debug)]
struct Action {
    l: Value,
    op: Operation,
}

impl Action {
    fn execute(self, r: Value) -> Result<Value, EvaluateError> {
        Ok(match self.op {
            Operation::Add => self.l + r,
            Operation::Sub => self.l - r,
            Operation::Mul => self.l * r,
            Operation::Div if r == Value::ZERO => return Err(EvaluateError::DivisionByZero),
            // Truncates toward zero
            Operation::Div => self.l / r,
            Operation::Rem if r == Value::ZERO => return Err(EvaluateError::ModuloByZero),
            // Sign follows the dividend
            Operation::Rem => self.l % r,
        })
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EvaluateError {
    #[error("Not enough operands for '{0}'")]
    InsufficientOperands(Operation),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Modulo by zero")]
    ModuloByZero,
    #[error("Unknown operator: {0}")]
    UnknownOperator(CompactString),
    #[error("Malformed postfix expression: {0} operands left on the stack")]
    MalformedPostfix(usize),
}
