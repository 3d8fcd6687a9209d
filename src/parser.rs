use crate::tokenizer::{Operation, Token};
use std::fmt;

/// Shunting-yard conversion of validated infix tokens into postfix order.
///
/// Input is assumed to have passed the tokenizer, so conversion never fails.
#[derive(Debug, Default)]
pub struct Parser {
    pending: Vec<Operation>,
    output: Vec<Token>,
}

impl Parser {
    pub fn handle_token(&mut self, token: Token) {
        match token {
            Token::Val(_) => self.output.push(token),
            Token::Op(op) => self.prioritized_push(op),
        }
    }

    // Equal priority pops too, which keeps same-level operators left associative
    fn prioritized_push(&mut self, new: Operation) {
        while let Some(&top) = self.pending.last() {
            if top.priority() < new.priority() {
                break;
            }
            self.pending.pop();
            self.output.push(Token::Op(top));
        }
        self.pending.push(new);
    }

    pub fn finalize(&mut self) -> Postfix {
        while let Some(op) = self.pending.pop() {
            self.output.push(Token::Op(op));
        }
        Postfix(std::mem::take(&mut self.output))
    }
}

pub fn to_postfix<I>(tokens: I) -> Postfix
where
    I: IntoIterator<Item = Token>,
{
    let mut parser = Parser::default();
    for token in tokens {
        parser.handle_token(token);
    }
    parser.finalize()
}

/// Tokens in operator-last order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Postfix(Vec<Token>);

impl Postfix {
    pub fn tokens(&self) -> &[Token] {
        &self.0
    }
}

impl From<Vec<Token>> for Postfix {
    fn from(tokens: Vec<Token>) -> Self {
        Postfix(tokens)
    }
}

impl IntoIterator for Postfix {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}
