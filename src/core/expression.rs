//! Recursive-descent evaluator for plain arithmetic expressions.
//!
//! Grammar:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! `%` is the floating-point remainder. Nothing is ever executed: the input
//! is tokenised against a fixed character set and folded into a number.

use crate::utils::error::{CalcError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionLimits {
    pub max_length: usize,
    pub max_depth: usize,
}

impl Default for ExpressionLimits {
    fn default() -> Self {
        Self {
            max_length: 256,
            max_depth: 32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_whitespace() || "+-*/.()%".contains(c)
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    if let Some(bad) = input.chars().find(|c| !is_allowed(*c)) {
        return Err(CalcError::invalid_expression(format!(
            "unsupported character '{}'",
            bad
        )));
    }

    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        match c {
            b' ' | b'\t' | b'\n' | b'\r' | b'\x0c' => {
                i += 1;
                continue;
            }
            b'+' => tokens.push(Token::Plus),
            b'-' => tokens.push(Token::Minus),
            b'*' => tokens.push(Token::Star),
            b'/' => tokens.push(Token::Slash),
            b'%' => tokens.push(Token::Percent),
            b'(' => tokens.push(Token::LParen),
            b')' => tokens.push(Token::RParen),
            _ => {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                    i += 1;
                }
                let literal = &input[start..i];
                let value = literal.parse::<f64>().map_err(|_| {
                    CalcError::invalid_expression(format!("malformed number '{}'", literal))
                })?;
                tokens.push(Token::Number(value));
                continue;
            }
        }
        i += 1;
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(CalcError::invalid_expression(format!(
                "nesting deeper than {} levels",
                self.max_depth
            )));
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<f64> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Token::Plus {
                value + rhs
            } else {
                value - rhs
            };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash | Token::Percent)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            if op != Token::Star && rhs == 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            value = match op {
                Token::Star => value * rhs,
                Token::Slash => value / rhs,
                _ => value % rhs,
            };
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                self.descend()?;
                let value = -self.unary()?;
                self.depth -= 1;
                Ok(value)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(value)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64> {
        match self.next() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::LParen) => {
                self.descend()?;
                let value = self.expr()?;
                if self.next() != Some(Token::RParen) {
                    return Err(CalcError::invalid_expression("missing closing parenthesis"));
                }
                self.depth -= 1;
                Ok(value)
            }
            Some(token) => Err(CalcError::invalid_expression(format!(
                "unexpected token {:?}",
                token
            ))),
            None => Err(CalcError::invalid_expression("unexpected end of expression")),
        }
    }
}

/// Evaluates `input`, rejecting anything outside the arithmetic grammar and
/// any result that is not a finite number.
pub fn evaluate(input: &str, limits: &ExpressionLimits) -> Result<f64> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CalcError::invalid_expression("expression is empty"));
    }
    if input.chars().count() > limits.max_length {
        return Err(CalcError::invalid_expression(format!(
            "expression longer than {} characters",
            limits.max_length
        )));
    }

    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
        max_depth: limits.max_depth,
    };
    let value = parser.expr()?;
    if let Some(token) = parser.peek() {
        return Err(CalcError::invalid_expression(format!(
            "unexpected token {:?}",
            token
        )));
    }

    if !value.is_finite() {
        return Err(CalcError::invalid_expression("result is not a finite number"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> Result<f64> {
        evaluate(input, &ExpressionLimits::default())
    }

    #[test]
    fn test_precedence_and_parentheses() {
        assert_eq!(eval("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(eval("(2 + 3) * 4").unwrap(), 20.0);
        assert_eq!(eval("10 - 4 - 3").unwrap(), 3.0);
        assert_eq!(eval("100 / 10 / 5").unwrap(), 2.0);
        assert_eq!(eval("7 % 4 + 1").unwrap(), 4.0);
    }

    #[test]
    fn test_decimals_and_unary_sign() {
        assert_eq!(eval("1.5 * 2").unwrap(), 3.0);
        assert_eq!(eval("-3 + 5").unwrap(), 2.0);
        assert_eq!(eval("-(2 + 3)").unwrap(), -5.0);
        assert_eq!(eval("4 * -2").unwrap(), -8.0);
        assert_eq!(eval(".5 + .5").unwrap(), 1.0);
    }

    #[test]
    fn test_rejects_disallowed_characters() {
        for input in ["2 + a", "alert(1)", "2 ** 3 ^ 1", "1;2", "Math.PI", "2e3"] {
            let err = eval(input).unwrap_err();
            assert_eq!(err.code(), "InvalidExpression", "{}", input);
        }
    }

    #[test]
    fn test_rejects_malformed_syntax() {
        for input in ["", "   ", "2 +", "(1 + 2", "1 + 2)", "1..2", "()", "3 4", "* 2"] {
            assert!(eval(input).is_err(), "{} should be rejected", input);
        }
    }

    #[test]
    fn test_non_finite_results_are_rejected() {
        let limits = ExpressionLimits {
            max_length: 1024,
            max_depth: 32,
        };
        let huge = format!("1{}", "0".repeat(200));
        let err = evaluate(&format!("{} * {}", huge, huge), &limits).unwrap_err();
        assert_eq!(err.code(), "InvalidExpression");
        assert_eq!(evaluate(&format!("{} / {}", huge, huge), &limits).unwrap(), 1.0);
    }

    #[test]
    fn test_division_by_zero_anywhere_is_rejected() {
        for input in ["1 / 0", "0 / 0", "5 % 0", "1/(1/0)", "2 % (1-1)", "3 / -0"] {
            let err = eval(input).unwrap_err();
            assert_eq!(err.code(), "DivisionByZero", "{}", input);
        }
    }

    #[test]
    fn test_depth_limit() {
        let limits = ExpressionLimits {
            max_length: 256,
            max_depth: 3,
        };
        assert_eq!(evaluate("((1 + 2))", &limits).unwrap(), 3.0);
        assert!(evaluate("((((1))))", &limits).is_err());
        assert!(evaluate("----1", &limits).is_err());
    }

    #[test]
    fn test_length_limit() {
        let limits = ExpressionLimits {
            max_length: 8,
            max_depth: 32,
        };
        assert!(evaluate("1+1", &limits).is_ok());
        assert!(evaluate("1+1+1+1+1", &limits).is_err());
    }
}
