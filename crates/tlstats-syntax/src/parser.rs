//! Runtime parser for CTL*-family formulas.
//!
//! # Syntax
//!
//! ## Atoms
//! - identifiers: `[A-Za-z_][A-Za-z0-9_.]*`, e.g. `p`, `sys.ready`, `u_eq_n9`
//!
//! ## Unary operators
//! - `! p` - negation
//! - `X p`, `F p`, `G p` - next, finally, globally
//! - `A p`, `E p` - universal/existential path quantifier
//!
//! ## Binary operators
//! - `p & q` - conjunction
//! - `p | q` - disjunction
//! - `p -> q` - implication
//! - `p U q`, `p R q` - until, release
//!
//! ## Operator precedence (lowest to highest)
//! 1. Implication (`->`) - right-associative
//! 2. Or (`|`)
//! 3. And (`&`)
//! 4. Until / Release (`U`, `R`) - right-associative
//! 5. Unary operators and atoms
//!
//! The seven capital letters `A E X F G U R` are reserved operator tokens
//! and cannot be used as atomic propositions. Associative `&`/`|` chains
//! collapse into a single n-ary node.

use crate::ast::Formula;

/// Error type for formula parsing.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Human-readable error message.
    pub message: String,
    /// Byte position in the input string where the error occurred.
    pub position: usize,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "parse error at position {}: {}",
            self.position, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Parse a canonical-form formula string into a [`Formula`].
///
/// # Example
///
/// ```
/// use tlstats_syntax::parse;
///
/// let formula = parse("G (req -> F ack)").unwrap();
/// assert_eq!(formula.height(), 3);
/// ```
pub fn parse(input: &str) -> Result<Formula, ParseError> {
    let mut parser = Parser::new(input);
    let formula = parser.parse_formula()?;
    parser.skip_whitespace();
    if parser.pos < parser.input.len() {
        return Err(ParseError {
            message: format!(
                "unexpected trailing characters: '{}'",
                &parser.input[parser.pos..]
            ),
            position: parser.pos,
        });
    }
    Ok(formula)
}

/// Internal parser state.
struct Parser<'a> {
    /// Full input expression being parsed.
    input: &'a str,
    /// Current byte offset into `input`.
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser { input, pos: 0 }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            position: self.pos,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn is_ident_start(c: char) -> bool {
        c.is_alphabetic() || c == '_'
    }

    fn is_ident_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_' || c == '.'
    }

    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if Self::is_ident_start(c) => self.bump(),
            Some(c) => return Err(self.error(format!("expected identifier, found '{c}'"))),
            None => return Err(self.error("expected identifier, found end of input")),
        }
        while let Some(c) = self.peek() {
            if Self::is_ident_char(c) {
                self.bump();
            } else {
                break;
            }
        }
        Ok(self.input[start..self.pos].to_string())
    }

    /// Entry point: implication level, right-associative.
    fn parse_formula(&mut self) -> Result<Formula, ParseError> {
        let left = self.parse_or()?;
        self.skip_whitespace();
        if self.input[self.pos..].starts_with("->") {
            self.pos += 2;
            let right = self.parse_formula()?;
            return Ok(Formula::Imply(Box::new(left), Box::new(right)));
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Formula, ParseError> {
        let mut children = vec![self.parse_and()?];
        loop {
            self.skip_whitespace();
            if self.peek() == Some('|') {
                self.bump();
                children.push(self.parse_and()?);
            } else {
                break;
            }
        }
        if children.len() == 1 {
            return Ok(children.remove(0));
        }
        Ok(Formula::Or(children))
    }

    fn parse_and(&mut self) -> Result<Formula, ParseError> {
        let mut children = vec![self.parse_until()?];
        loop {
            self.skip_whitespace();
            if self.peek() == Some('&') {
                self.bump();
                children.push(self.parse_until()?);
            } else {
                break;
            }
        }
        if children.len() == 1 {
            return Ok(children.remove(0));
        }
        Ok(Formula::And(children))
    }

    /// Until/release level, right-associative.
    fn parse_until(&mut self) -> Result<Formula, ParseError> {
        let left = self.parse_unary()?;
        self.skip_whitespace();
        let saved = self.pos;
        if matches!(self.peek(), Some(c) if Self::is_ident_start(c)) {
            let ident = self.parse_identifier()?;
            match ident.as_str() {
                "U" => {
                    let right = self.parse_until()?;
                    return Ok(Formula::Until(Box::new(left), Box::new(right)));
                }
                "R" => {
                    let right = self.parse_until()?;
                    return Ok(Formula::Release(Box::new(left), Box::new(right)));
                }
                _ => self.pos = saved,
            }
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Formula, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some('!') => {
                self.bump();
                Ok(Formula::Not(Box::new(self.parse_unary()?)))
            }
            Some('(') => {
                self.bump();
                let inner = self.parse_formula()?;
                self.skip_whitespace();
                if self.peek() != Some(')') {
                    return Err(self.error("expected ')'"));
                }
                self.bump();
                Ok(inner)
            }
            Some(c) if Self::is_ident_start(c) => {
                let ident = self.parse_identifier()?;
                match ident.as_str() {
                    "X" => Ok(Formula::Next(Box::new(self.parse_unary()?))),
                    "F" => Ok(Formula::Finally(Box::new(self.parse_unary()?))),
                    "G" => Ok(Formula::Globally(Box::new(self.parse_unary()?))),
                    "A" => Ok(Formula::ForAll(Box::new(self.parse_unary()?))),
                    "E" => Ok(Formula::Exists(Box::new(self.parse_unary()?))),
                    "U" | "R" => {
                        Err(self.error(format!("binary operator '{ident}' has no left operand")))
                    }
                    _ => Ok(Formula::Atom(ident)),
                }
            }
            Some(c) => Err(self.error(format!("unexpected character '{c}'"))),
        }
    }
}
