use anyhow::{bail, Error};
use calc::{EvaluateError, ExpressionError, TokenizeError};
use std::io::BufRead;
use std::io::Write;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(exit_code(&e));
    }
}

fn run() -> Result<(), Error> {
    let mut args = std::env::args_os().skip(1).peekable();
    let show_postfix = args
        .next_if(|arg| arg == "-p" || arg == "--postfix")
        .is_some();

    let stdout = std::io::stdout();
    let lock = stdout.lock();
    let mut w = std::io::BufWriter::new(lock);

    if args.peek().is_some() {
        let mut tokens = vec![];
        for arg in args {
            let Ok(utf8_arg) = arg.into_string() else {
                bail!("Arguments contain invalid UTF-8 string");
            };
            tokens.push(utf8_arg);
        }

        eval_line(&mut w, &tokens, show_postfix)?;
    } else {
        let stdin = std::io::stdin();
        let reader = std::io::BufReader::new(stdin);
        let is_interactive = atty::is(atty::Stream::Stdin);

        if is_interactive {
            write!(&mut w, ">>> ")?;
            w.flush()?;
        }

        for expr in reader.lines() {
            let expr = expr?;
            let tokens: Vec<&str> = expr.split_whitespace().collect();

            match eval_line(&mut w, &tokens, show_postfix) {
                Ok(()) => {}
                // Keep the session alive on bad input
                Err(e) if is_interactive && e.is::<ExpressionError>() => {
                    w.flush()?;
                    eprintln!("{}", e);
                }
                Err(e) => return Err(e),
            }

            if is_interactive {
                write!(&mut w, ">>> ")?;
                w.flush()?;
            }
        }
    }
    w.flush()?;

    Ok(())
}

fn eval_line<W, S>(w: &mut W, tokens: &[S], show_postfix: bool) -> Result<(), Error>
where
    W: Write,
    S: AsRef<str>,
{
    let postfix = calc::compile(tokens)?;
    if show_postfix {
        writeln!(w, "postfix: {}", postfix)?;
    }
    let result = calc::execute(postfix)?;
    writeln!(w, "{}", result)?;
    Ok(())
}

fn exit_code(e: &Error) -> i32 {
    match e.downcast_ref::<ExpressionError>() {
        Some(ExpressionError::Tokenize(e)) => match e {
            TokenizeError::EmptyExpression => 2,
            TokenizeError::IncompleteExpression => 3,
            TokenizeError::UnsupportedCharacter(_) => 4,
            TokenizeError::MalformedToken(_) => 5,
            TokenizeError::ContainsWhitespace(_) => 6,
            TokenizeError::MissingOperator(_) => 7,
            TokenizeError::ConsecutiveOperators(_) => 8,
        },
        Some(ExpressionError::Evaluate(e)) => match e {
            EvaluateError::DivisionByZero => 10,
            EvaluateError::ModuloByZero => 11,
            EvaluateError::InsufficientOperands(_) => 12,
            EvaluateError::UnknownOperator(_) => 13,
            EvaluateError::MalformedPostfix(_) => 14,
        },
        None => 1,
    }
}
