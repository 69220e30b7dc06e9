//! Linear contrast expressions such as `"A - B"` or `"(go + stop) / 2"`.
//!
//! Grammar:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := number | identifier | '`' name '`' | '(' expr ')'
//! ```
//!
//! Identifiers start with a letter or `_` and may contain letters, digits, `_`
//! and `.`. Column names outside that alphabet can be written between
//! backticks. Regressors may only be scaled by constants, and the expression
//! may not carry a constant offset.

use super::traits::{ContrastError, ContrastVectorBuilder};
use std::collections::HashMap;

/// Deepest nesting of parentheses and unary signs the parser accepts.
const MAX_NESTING: usize = 256;

/// Default contrast builder: parses linear expressions over column names.
///
/// # Example
///
/// ```
/// use contrast_vif::contrast::{ContrastVectorBuilder, LinearExpressionParser};
///
/// let columns = vec!["go".to_string(), "stop".to_string(), "rt".to_string()];
/// let weights = LinearExpressionParser.build("0.5 * (go + stop) - rt", &columns).unwrap();
/// assert_eq!(weights, vec![0.5, 0.5, -1.0]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearExpressionParser;

impl ContrastVectorBuilder for LinearExpressionParser {
    fn build(&self, expression: &str, columns: &[String]) -> Result<Vec<f64>, ContrastError> {
        let tokens = tokenize(expression)?;
        let mut lookup = HashMap::with_capacity(columns.len());
        for (j, name) in columns.iter().enumerate() {
            lookup.entry(name.as_str()).or_insert(j);
        }

        let mut parser = Parser {
            tokens: &tokens,
            pos: 0,
            depth: 0,
            end: expression.len(),
            lookup: &lookup,
            n_columns: columns.len(),
        };

        if tokens.is_empty() {
            return Err(ContrastError::Syntax {
                position: 0,
                message: "empty expression".to_string(),
            });
        }

        let form = parser.expr()?;
        if let Some(extra) = parser.peek() {
            return Err(ContrastError::Syntax {
                position: extra.position,
                message: format!("unexpected {}", extra.token.describe()),
            });
        }

        if let Some(index) = form.weights.iter().position(|w| !w.is_finite()) {
            return Err(ContrastError::NonFiniteWeight { index });
        }
        if !form.has_terms || form.offset != 0.0 {
            return Err(ContrastError::ConstantTerm);
        }

        Ok(form.weights)
    }
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
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(v) => format!("number {v}"),
            Token::Ident(name) => format!("name `{name}`"),
            Token::Plus => "`+`".to_string(),
            Token::Minus => "`-`".to_string(),
            Token::Star => "`*`".to_string(),
            Token::Slash => "`/`".to_string(),
            Token::LParen => "`(`".to_string(),
            Token::RParen => "`)`".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Spanned {
    token: Token,
    position: usize,
}

fn tokenize(expression: &str) -> Result<Vec<Spanned>, ContrastError> {
    let bytes = expression.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        let start = i;

        let token = match c {
            b' ' | b'\t' | b'\n' | b'\r' => {
                i += 1;
                continue;
            }
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b'`' => {
                let close = expression[start + 1..].find('`').ok_or_else(|| {
                    ContrastError::Syntax {
                        position: start,
                        message: "unterminated quoted name".to_string(),
                    }
                })?;
                let name = &expression[start + 1..start + 1 + close];
                if name.is_empty() {
                    return Err(ContrastError::Syntax {
                        position: start,
                        message: "empty quoted name".to_string(),
                    });
                }
                i = start + close + 2;
                tokens.push(Spanned {
                    token: Token::Ident(name.to_string()),
                    position: start,
                });
                continue;
            }
            b'0'..=b'9' | b'.' => {
                i = scan_number(bytes, start);
                let text = &expression[start..i];
                let value = text.parse::<f64>().map_err(|_| ContrastError::Syntax {
                    position: start,
                    message: format!("invalid number `{text}`"),
                })?;
                tokens.push(Spanned {
                    token: Token::Number(value),
                    position: start,
                });
                continue;
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                while i < bytes.len()
                    && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'.')
                {
                    i += 1;
                }
                tokens.push(Spanned {
                    token: Token::Ident(expression[start..i].to_string()),
                    position: start,
                });
                continue;
            }
            _ => {
                let ch = expression[start..].chars().next().unwrap_or('?');
                return Err(ContrastError::Syntax {
                    position: start,
                    message: format!("unexpected character `{ch}`"),
                });
            }
        };

        i += 1;
        tokens.push(Spanned {
            token,
            position: start,
        });
    }

    Ok(tokens)
}

/// End of the numeric literal starting at `start`: digits, an optional
/// fraction and an optional exponent.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    i
}

/// `weights · columns + offset`
#[derive(Debug, Clone)]
struct LinearForm {
    weights: Vec<f64>,
    offset: f64,
    has_terms: bool,
}

impl LinearForm {
    fn constant(value: f64, n: usize) -> Self {
        Self {
            weights: vec![0.0; n],
            offset: value,
            has_terms: false,
        }
    }

    fn regressor(index: usize, n: usize) -> Self {
        let mut weights = vec![0.0; n];
        weights[index] = 1.0;
        Self {
            weights,
            offset: 0.0,
            has_terms: true,
        }
    }

    fn combine(mut self, other: &LinearForm, sign: f64) -> Self {
        for (w, o) in self.weights.iter_mut().zip(&other.weights) {
            *w += sign * o;
        }
        self.offset += sign * other.offset;
        self.has_terms |= other.has_terms;
        self
    }

    fn scale(mut self, factor: f64) -> Self {
        for w in &mut self.weights {
            *w *= factor;
        }
        self.offset *= factor;
        self
    }
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    depth: usize,
    end: usize,
    lookup: &'a HashMap<&'a str, usize>,
    n_columns: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn position(&self) -> usize {
        self.peek().map_or(self.end, |t| t.position)
    }

    fn expr(&mut self) -> Result<LinearForm, ContrastError> {
        let mut form = self.term()?;
        loop {
            let sign = match self.peek().map(|t| &t.token) {
                Some(Token::Plus) => 1.0,
                Some(Token::Minus) => -1.0,
                _ => return Ok(form),
            };
            self.pos += 1;
            let rhs = self.term()?;
            form = form.combine(&rhs, sign);
        }
    }

    fn term(&mut self) -> Result<LinearForm, ContrastError> {
        let mut form = self.unary()?;
        loop {
            let (is_mul, position) = match self.peek() {
                Some(Spanned {
                    token: Token::Star,
                    position,
                }) => (true, *position),
                Some(Spanned {
                    token: Token::Slash,
                    position,
                }) => (false, *position),
                _ => return Ok(form),
            };
            self.pos += 1;
            let rhs = self.unary()?;

            form = if is_mul {
                match (form.has_terms, rhs.has_terms) {
                    (false, _) => rhs.scale(form.offset),
                    (_, false) => form.scale(rhs.offset),
                    (true, true) => return Err(ContrastError::Nonlinear { position }),
                }
            } else {
                if rhs.has_terms {
                    return Err(ContrastError::Nonlinear { position });
                }
                if rhs.offset == 0.0 {
                    return Err(ContrastError::DivisionByZero { position });
                }
                form.scale(1.0 / rhs.offset)
            };
        }
    }

    fn unary(&mut self) -> Result<LinearForm, ContrastError> {
        if self.depth >= MAX_NESTING {
            return Err(ContrastError::Syntax {
                position: self.position(),
                message: "expression nested too deeply".to_string(),
            });
        }
        self.depth += 1;
        let form = self.signed();
        self.depth -= 1;
        form
    }

    fn signed(&mut self) -> Result<LinearForm, ContrastError> {
        match self.peek().map(|t| &t.token) {
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(self.unary()?.scale(-1.0))
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<LinearForm, ContrastError> {
        let position = self.position();
        let Some(spanned) = self.peek() else {
            return Err(ContrastError::Syntax {
                position,
                message: "unexpected end of expression".to_string(),
            });
        };

        match &spanned.token {
            Token::Number(value) => {
                let value = *value;
                self.pos += 1;
                Ok(LinearForm::constant(value, self.n_columns))
            }
            Token::Ident(name) => {
                let index = *self.lookup.get(name.as_str()).ok_or_else(|| {
                    ContrastError::UnknownRegressor { name: name.clone() }
                })?;
                self.pos += 1;
                Ok(LinearForm::regressor(index, self.n_columns))
            }
            Token::LParen => {
                self.pos += 1;
                let inner = self.expr()?;
                match self.peek() {
                    Some(Spanned {
                        token: Token::RParen,
                        ..
                    }) => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    _ => Err(ContrastError::Syntax {
                        position: self.position(),
                        message: "expected `)`".to_string(),
                    }),
                }
            }
            other => Err(ContrastError::Syntax {
                position,
                message: format!("unexpected {}", other.describe()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<String> {
        ["A", "B", "C"].iter().map(|s| s.to_string()).collect()
    }

    fn parse(expression: &str) -> Result<Vec<f64>, ContrastError> {
        LinearExpressionParser.build(expression, &columns())
    }

    #[test]
    fn test_simple_difference() {
        assert_eq!(parse("A - B").unwrap(), vec![1.0, -1.0, 0.0]);
    }

    #[test]
    fn test_single_regressor() {
        assert_eq!(parse("C").unwrap(), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_scaling_and_grouping() {
        assert_eq!(parse("(A + B) / 2 - C").unwrap(), vec![0.5, 0.5, -1.0]);
        assert_eq!(parse("2 * A - 0.5 * B * 4").unwrap(), vec![2.0, -2.0, 0.0]);
        assert_eq!(parse("-(A - C)").unwrap(), vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_repeated_regressor_accumulates() {
        assert_eq!(parse("A + A - B").unwrap(), vec![2.0, -1.0, 0.0]);
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(parse(".5*A + 1e-1*B + 2.E1*C").unwrap(), vec![0.5, 0.1, 20.0]);
    }

    #[test]
    fn test_unknown_regressor() {
        assert_eq!(
            parse("A - D").unwrap_err(),
            ContrastError::UnknownRegressor { name: "D".into() }
        );
    }

    #[test]
    fn test_identifier_alphabet() {
        let cols: Vec<String> = vec!["cond_1.mod".into(), "rt".into()];
        let weights = LinearExpressionParser.build("cond_1.mod - rt", &cols).unwrap();
        assert_eq!(weights, vec![1.0, -1.0]);
    }

    #[test]
    fn test_backtick_names() {
        let cols: Vec<String> = vec!["go trial".into(), "stop-signal".into()];
        let weights = LinearExpressionParser
            .build("`go trial` - `stop-signal`", &cols)
            .unwrap();
        assert_eq!(weights, vec![1.0, -1.0]);

        assert!(matches!(
            LinearExpressionParser.build("`go trial", &cols),
            Err(ContrastError::Syntax { position: 0, .. })
        ));
    }

    #[test]
    fn test_nonlinear_rejected() {
        assert_eq!(parse("A * B").unwrap_err(), ContrastError::Nonlinear { position: 2 });
        assert_eq!(parse("A / B").unwrap_err(), ContrastError::Nonlinear { position: 2 });
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            parse("A / (1 - 1)").unwrap_err(),
            ContrastError::DivisionByZero { position: 2 }
        );
    }

    #[test]
    fn test_constant_terms_rejected() {
        assert_eq!(parse("A + 1").unwrap_err(), ContrastError::ConstantTerm);
        assert_eq!(parse("3").unwrap_err(), ContrastError::ConstantTerm);
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(parse(""), Err(ContrastError::Syntax { position: 0, .. })));
        assert!(matches!(parse("   "), Err(ContrastError::Syntax { .. })));
        assert!(matches!(parse("A -"), Err(ContrastError::Syntax { position: 3, .. })));
        assert!(matches!(parse("(A - B"), Err(ContrastError::Syntax { position: 6, .. })));
        assert!(matches!(parse("A B"), Err(ContrastError::Syntax { position: 2, .. })));
        assert!(matches!(parse("A $ B"), Err(ContrastError::Syntax { position: 2, .. })));
        assert!(matches!(parse("1.2.3 * A"), Err(ContrastError::Syntax { position: 0, .. })));
    }

    #[test]
    fn test_non_finite_weight() {
        assert_eq!(
            parse("1e308 * 10 * A").unwrap_err(),
            ContrastError::NonFiniteWeight { index: 0 }
        );
    }

    #[test]
    fn test_deep_nesting_rejected() {
        let signs = format!("{}A", "-".repeat(1_000_000));
        assert!(matches!(
            parse(&signs),
            Err(ContrastError::Syntax { position: 256, ref message }) if message.contains("nested too deeply")
        ));

        let parens = format!("{}A{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(matches!(parse(&parens), Err(ContrastError::Syntax { position: 256, .. })));

        // Moderate nesting still parses
        let shallow = format!("{}A - B{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(parse(&shallow).unwrap(), vec![1.0, -1.0, 0.0]);
    }
}
