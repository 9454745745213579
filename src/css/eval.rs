//! Arithmetic evaluation of variable-free CSS expressions.
//!
//! A small recursive-descent evaluator over the restricted grammar the
//! checks need: `+ - * /`, parentheses, `calc`/`clamp`/`min`/`max`
//! calls, and numeric literals with length units. The unit conversion
//! happens in the lexer, so `1rem + 10px` tokenizes straight to
//! `16 + 10` for any viewport.
//!
//! Failure is data here: every malformed or unsupported input maps to
//! `f64::NAN`, which callers treat as "insufficient data, skip the
//! assertion".

use thiserror::Error;

/// Root font size used for `rem` conversion.
pub const BASE_FONT_SIZE: f64 = 16.0;

#[derive(Debug, Error)]
enum EvalError {
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
    #[error("unknown identifier `{0}`")]
    UnknownIdent(String),
    #[error("unknown unit `{0}`")]
    UnknownUnit(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("trailing input after expression")]
    TrailingInput,
    #[error("wrong argument count for `{0}`")]
    ArgCount(&'static str),
}

/// Evaluate a variable-free CSS length expression to pixels.
///
/// Returns `NaN` when the expression cannot be evaluated: unknown
/// units or identifiers, malformed syntax, or a non-finite result.
/// An empty expression evaluates to `0.0`.
pub fn evaluate(expression: &str, viewport: f64) -> f64 {
    // env() never resolves statically; treat it as zero like the
    // browsers' no-inset default.
    let cleaned = strip_env(expression);
    if cleaned.trim().is_empty() {
        return 0.0;
    }
    match Parser::new(&cleaned, viewport).parse() {
        Ok(value) if value.is_finite() => value,
        _ => f64::NAN,
    }
}

/// Replace every `env(...)` occurrence with `0`.
fn strip_env(expression: &str) -> String {
    let mut out = String::with_capacity(expression.len());
    let mut rest = expression;
    while let Some(pos) = rest.find("env(") {
        out.push_str(&rest[..pos]);
        out.push('0');
        let after = &rest[pos + 4..];
        let mut depth = 1usize;
        let mut end = after.len();
        for (i, ch) in after.char_indices() {
            match ch {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        end = i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }
        rest = &after[end..];
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Comma,
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(input: &str, viewport: f64) -> Self {
        Self {
            tokens: lex(input, viewport).unwrap_or_default(),
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<f64, EvalError> {
        if self.tokens.is_empty() {
            return Err(EvalError::UnexpectedEnd);
        }
        let value = self.expr()?;
        if self.pos != self.tokens.len() {
            return Err(EvalError::TrailingInput);
        }
        Ok(value)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Result<Token, EvalError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(EvalError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, token: Token) -> Result<(), EvalError> {
        if self.bump()? == token {
            Ok(())
        } else {
            Err(EvalError::TrailingInput)
        }
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Token::Minus => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.factor()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                Token::Slash => {
                    self.pos += 1;
                    value /= self.factor()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, EvalError> {
        match self.bump()? {
            Token::Number(n) => Ok(n),
            Token::Minus => Ok(-self.factor()?),
            Token::LParen => {
                let value = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(value)
            }
            Token::Ident(name) => self.call(&name),
            _ => Err(EvalError::UnexpectedEnd),
        }
    }

    fn call(&mut self, name: &str) -> Result<f64, EvalError> {
        self.expect(Token::LParen)?;
        let mut args = vec![self.expr()?];
        while self.peek() == Some(&Token::Comma) {
            self.pos += 1;
            args.push(self.expr()?);
        }
        self.expect(Token::RParen)?;
        match name {
            // calc() is pure grouping once units are resolved
            "calc" => match args.as_slice() {
                [value] => Ok(*value),
                _ => Err(EvalError::ArgCount("calc")),
            },
            "clamp" => match args.as_slice() {
                [lo, mid, hi] => Ok(mid.max(*lo).min(*hi)),
                _ => Err(EvalError::ArgCount("clamp")),
            },
            "min" => Ok(args.iter().copied().fold(f64::INFINITY, f64::min)),
            "max" => Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
            _ => Err(EvalError::UnknownIdent(name.to_string())),
        }
    }
}

fn lex(input: &str, viewport: f64) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let ch = bytes[i] as char;
        match ch {
            c if c.is_ascii_whitespace() => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < bytes.len()
                    && ((bytes[i] as char).is_ascii_digit() || bytes[i] == b'.')
                {
                    i += 1;
                }
                let literal = &input[start..i];
                let number: f64 = literal
                    .parse()
                    .map_err(|_| EvalError::UnexpectedChar(c))?;

                // Unit suffix binds directly to the literal.
                let unit_start = i;
                while i < bytes.len() && (bytes[i] as char).is_ascii_alphabetic() {
                    i += 1;
                }
                let unit = if i > unit_start {
                    &input[unit_start..i]
                } else if i < bytes.len() && bytes[i] == b'%' {
                    i += 1;
                    "%"
                } else {
                    ""
                };
                tokens.push(Token::Number(to_pixels(number, unit, viewport)?));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < bytes.len()
                    && ((bytes[i] as char).is_ascii_alphanumeric() || bytes[i] == b'_')
                {
                    i += 1;
                }
                tokens.push(Token::Ident(input[start..i].to_string()));
            }
            other => return Err(EvalError::UnexpectedChar(other)),
        }
    }
    Ok(tokens)
}

/// Convert a unit-suffixed literal to pixels for the given viewport.
///
/// `vh` uses a 16:9 approximation of the viewport height.
fn to_pixels(number: f64, unit: &str, viewport: f64) -> Result<f64, EvalError> {
    match unit {
        "" | "px" => Ok(number),
        "rem" => Ok(number * BASE_FONT_SIZE),
        "vw" => Ok(number * viewport / 100.0),
        "vh" => Ok(number * (viewport * 0.5625).round() / 100.0),
        "%" => Ok(number / 100.0),
        other => Err(EvalError::UnknownUnit(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rem_plus_px() {
        assert_eq!(evaluate("calc(1rem + 10px)", 1280.0), 26.0);
    }

    #[test]
    fn test_vw_conversion() {
        assert_eq!(evaluate("50vw", 400.0), 200.0);
    }

    #[test]
    fn test_vh_uses_rounded_169_height() {
        // 390 * 0.5625 = 219.375, rounds to 219
        assert_eq!(evaluate("100vh", 390.0), 219.0);
    }

    #[test]
    fn test_percent_is_ratio() {
        assert_eq!(evaluate("150%", 1280.0), 1.5);
    }

    #[test]
    fn test_clamp_picks_preferred_within_bounds() {
        assert_eq!(evaluate("clamp(16px, 20px, 24px)", 1280.0), 20.0);
        assert_eq!(evaluate("clamp(16px, 4px, 24px)", 1280.0), 16.0);
        assert_eq!(evaluate("clamp(16px, 40px, 24px)", 1280.0), 24.0);
    }

    #[test]
    fn test_min_max_fold_arguments() {
        assert_eq!(evaluate("min(1rem, 10px, 2rem)", 1280.0), 10.0);
        assert_eq!(evaluate("max(1rem, 10px)", 1280.0), 16.0);
    }

    #[test]
    fn test_nested_calc() {
        assert_eq!(evaluate("calc(calc(2rem) * 2 - 4px)", 1280.0), 60.0);
    }

    #[test]
    fn test_env_collapses_to_zero() {
        assert_eq!(evaluate("calc(env(safe-area-inset-left) + 8px)", 1280.0), 8.0);
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(evaluate("calc(-0.5rem + 10px)", 1280.0), 2.0);
    }

    #[test]
    fn test_empty_expression_is_zero() {
        assert_eq!(evaluate("", 1280.0), 0.0);
        assert_eq!(evaluate("   ", 1280.0), 0.0);
    }

    #[test]
    fn test_non_numeric_yields_nan() {
        assert!(evaluate("nowrap", 1280.0).is_nan());
        assert!(evaluate("#ffffff", 1280.0).is_nan());
        assert!(evaluate("1fr", 1280.0).is_nan());
    }

    #[test]
    fn test_malformed_yields_nan() {
        assert!(evaluate("calc(1rem +", 1280.0).is_nan());
        assert!(evaluate("calc(1px, 2px)", 1280.0).is_nan());
        assert!(evaluate("1px 2px", 1280.0).is_nan());
    }

    #[test]
    fn test_division_by_zero_yields_nan() {
        assert!(evaluate("calc(1px / 0)", 1280.0).is_nan());
    }

    #[test]
    fn test_leading_dot_literal() {
        assert_eq!(evaluate(".5rem", 1280.0), 8.0);
    }
}
