use compact_str::{CompactString, ToCompactString};
use malachite::Integer;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum TokenizerState {
    #[default]
    Clean,
    AfterValue,
    AfterOperator,
}

/// Validates raw expression elements one at a time.
///
/// Feed every element through [`Tokenizer::update`] and close the sequence
/// with [`Tokenizer::finalize`]. The first violation is fatal.
#[derive(Debug, Default)]
pub struct Tokenizer {
    state: TokenizerState,
}

impl Tokenizer {
    pub fn update(&mut self, raw: &str) -> Result<Token, TokenizeError> {
        use TokenizerState::*;

        match self.state {
            // Expression must open with a number
            Clean => match raw.parse() {
                Ok(token @ Token::Val(_)) => {
                    self.state = AfterValue;
                    Ok(token)
                }
                _ => Err(TokenizeError::IncompleteExpression),
            },
            AfterValue => match raw.parse()? {
                Token::Val(_) => Err(TokenizeError::MissingOperator(raw.to_compact_string())),
                token => {
                    self.state = AfterOperator;
                    Ok(token)
                }
            },
            AfterOperator => match raw.parse()? {
                Token::Op(_) => Err(TokenizeError::ConsecutiveOperators(raw.to_compact_string())),
                token => {
                    self.state = AfterValue;
                    Ok(token)
                }
            },
        }
    }

    pub fn finalize(&mut self) -> Result<(), TokenizeError> {
        let result = match self.state {
            TokenizerState::Clean => Err(TokenizeError::EmptyExpression),
            TokenizerState::AfterOperator => Err(TokenizeError::IncompleteExpression),
            TokenizerState::AfterValue => Ok(()),
        };
        self.state = TokenizerState::Clean;
        result
    }
}

/// Validates a whole sequence of raw elements.
pub fn tokenize<I, S>(raw: I) -> Result<Vec<Token>, TokenizeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokenizer = Tokenizer::default();
    let mut raw = raw.into_iter().peekable();
    let mut tokens = vec![];
    while let Some(s) = raw.next() {
        let s = s.as_ref();
        // Expression must close with a number, ahead of any per-token check
        if raw.peek().is_none() && !matches!(s.parse::<Token>(), Ok(Token::Val(_))) {
            return Err(TokenizeError::IncompleteExpression);
        }
        tokens.push(tokenizer.update(s)?);
    }
    tokenizer.finalize()?;
    Ok(tokens)
}

/// Reasons a raw sequence is rejected as an invalid expression.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("Empty expression")]
    EmptyExpression,
    #[error("Incomplete expression: must start and end with a number")]
    IncompleteExpression,
    #[error("Unsupported character in '{0}'")]
    UnsupportedCharacter(CompactString),
    #[error("Malformed token: '{0}'")]
    MalformedToken(CompactString),
    #[error("Token contains whitespace: '{0}'")]
    ContainsWhitespace(CompactString),
    #[error("Operator expected before '{0}'")]
    MissingOperator(CompactString),
    #[error("Number expected, found operator '{0}'")]
    ConsecutiveOperators(CompactString),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Val(Value),
    Op(Operation),
}

impl FromStr for Token {
    type Err = TokenizeError;

    /// Lexical classification of a single element, with no regard to its
    /// neighbours. A leading `+` is dropped, a leading `-` negates.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if let Some(op) = Operation::from_symbol(raw) {
            return Ok(Token::Op(op));
        }
        if let Some(value) = parse_literal(raw) {
            return Ok(Token::Val(value));
        }

        if raw.chars().any(char::is_whitespace) {
            Err(TokenizeError::ContainsWhitespace(raw.to_compact_string()))
        } else if raw
            .chars()
            .any(|c| !c.is_ascii_digit() && Operation::from_char(c).is_none())
        {
            Err(TokenizeError::UnsupportedCharacter(raw.to_compact_string()))
        } else {
            Err(TokenizeError::MalformedToken(raw.to_compact_string()))
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Val(v) => write!(f, "{}", v),
            Token::Op(op) => write!(f, "{}", op),
        }
    }
}

fn parse_literal(raw: &str) -> Option<Value> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = Integer::from_str(digits).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl Operation {
    pub fn from_symbol(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operation::Add),
            '-' => Some(Operation::Sub),
            'x' => Some(Operation::Mul),
            '/' => Some(Operation::Div),
            '%' => Some(Operation::Rem),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Sub => '-',
            Operation::Mul => 'x',
            Operation::Div => '/',
            Operation::Rem => '%',
        }
    }

    /// Binding strength; higher binds tighter.
    pub fn priority(self) -> u8 {
        match self {
            Operation::Add | Operation::Sub => 1,
            Operation::Mul | Operation::Div | Operation::Rem => 2,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

pub type Value = Integer;
