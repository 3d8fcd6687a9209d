use calc::{evaluate, EvaluateError, ExpressionError, TokenizeError, Value};

fn assert_value(tokens: &[&str], expected: i64) {
    assert_eq!(
        evaluate(tokens),
        Ok(Value::from(expected)),
        "expression {:?}",
        tokens
    );
}

fn assert_error(tokens: &[&str], expected: impl Into<ExpressionError>) {
    assert_eq!(evaluate(tokens), Err(expected.into()), "expression {:?}", tokens);
}

#[test]
fn precedence() {
    assert_value(&["2", "+", "3", "x", "4"], 14);
    assert_value(&["2", "x", "3", "+", "4"], 10);
    assert_value(&["20", "-", "6", "/", "3", "%", "4"], 18);
}

#[test]
fn left_associativity() {
    assert_value(&["8", "-", "3", "-", "2"], 3);
    assert_value(&["100", "/", "10", "/", "5"], 2);
    assert_value(&["17", "%", "7", "x", "3"], 9);
}

#[test]
fn truncating_division() {
    assert_value(&["7", "/", "2"], 3);
    assert_value(&["-7", "/", "2"], -3);
    assert_value(&["-7", "%", "2"], -1);
}

#[test]
fn signed_literals() {
    assert_value(&["-3", "-", "-4"], 1);
    assert_value(&["+3", "x", "-4"], -12);
}

#[test]
fn division_by_zero() {
    assert_error(&["5", "/", "0"], EvaluateError::DivisionByZero);
    assert_error(&["5", "%", "0"], EvaluateError::ModuloByZero);
    assert_error(&["1", "+", "5", "/", "0", "x", "2"], EvaluateError::DivisionByZero);
}

#[test]
fn structural_rejection() {
    assert_error(&["2", "3", "+"], TokenizeError::MissingOperator("3".into()));
    assert_error(&["2", "+", "+", "3"], TokenizeError::ConsecutiveOperators("+".into()));
    assert_error(&[], TokenizeError::EmptyExpression);
    assert_error(&["2", "+"], TokenizeError::IncompleteExpression);
    assert_error(&["2", "+", "a"], TokenizeError::IncompleteExpression);
    assert_error(&["2", "x", "+"], TokenizeError::IncompleteExpression);
    assert_error(&["2", "+", "a", "+", "1"], TokenizeError::UnsupportedCharacter("a".into()));
}

#[test]
fn error_messages() {
    let err = evaluate(["5", "/", "0"]).unwrap_err();
    assert_eq!(err.to_string(), "Division by zero");
    let err = evaluate(["2", "+", "+", "3"]).unwrap_err();
    assert_eq!(err.to_string(), "Number expected, found operator '+'");
}

/// Computes `x / %` runs first, then folds `+ -` left to right.
fn reference(numbers: &[i64], ops: &[char]) -> Option<i64> {
    let mut sum = 0;
    let mut sign = 1;
    let mut term = numbers[0];
    for (op, &n) in ops.iter().zip(&numbers[1..]) {
        match op {
            'x' => term *= n,
            '/' => term = term.checked_div(n)?,
            '%' => term = term.checked_rem(n)?,
            '+' | '-' => {
                sum += sign * term;
                sign = if *op == '+' { 1 } else { -1 };
                term = n;
            }
            _ => unreachable!(),
        }
    }
    Some(sum + sign * term)
}

#[test]
fn matches_reference_evaluation() {
    const OPS: [char; 5] = ['+', '-', 'x', '/', '%'];

    // Small LCG so runs are reproducible
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = |bound: u64| {
        seed = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (seed >> 33) % bound
    };

    for _ in 0..500 {
        let len = 1 + next(5) as usize;
        let numbers: Vec<i64> = (0..len).map(|_| next(41) as i64 - 20).collect();
        let ops: Vec<char> = (1..len).map(|_| OPS[next(5) as usize]).collect();

        let mut tokens = vec![numbers[0].to_string()];
        for (op, n) in ops.iter().zip(&numbers[1..]) {
            tokens.push(op.to_string());
            tokens.push(n.to_string());
        }

        let actual = evaluate(&tokens);
        match reference(&numbers, &ops) {
            Some(expected) => assert_eq!(actual, Ok(Value::from(expected)), "{:?}", tokens),
            None => assert!(
                matches!(
                    actual,
                    Err(ExpressionError::Evaluate(
                        EvaluateError::DivisionByZero | EvaluateError::ModuloByZero
                    ))
                ),
                "{:?} gave {:?}",
                tokens,
                actual
            ),
        }
    }
}
