//! Term syntax used by application descriptors
//!
//! Covers the Erlang term syntax that appears in `.app` files: atoms,
//! strings (adjacent literals concatenate), integers including `$c` and
//! `Base#Digits`, floats, lists, tuples, maps, binaries and `%` comments. A
//! document holds exactly one term followed by a terminating `.`.

use thiserror::Error;

/// Deepest list/tuple/map/binary nesting accepted in a document
pub const MAX_DEPTH: usize = 256;

/// A parsed term
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Atom(String),
    Str(String),
    Int(i64),
    Float(f64),
    List(Vec<Term>),
    Tuple(Vec<Term>),
    Map(Vec<(Term, Term)>),
    Binary(Vec<u8>),
}

impl Term {
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Term::Atom(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Term::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Term]> {
        match self {
            Term::List(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the term's type, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Term::Atom(_) => "atom",
            Term::Str(_) => "string",
            Term::Int(_) => "integer",
            Term::Float(_) => "float",
            Term::List(_) => "list",
            Term::Tuple(_) => "tuple",
            Term::Map(_) => "map",
            Term::Binary(_) => "binary",
        }
    }
}

/// Syntax error in a term document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("unexpected character '{ch}' on line {line}")]
    UnexpectedChar { ch: char, line: usize },

    #[error("invalid number '{text}' on line {line}")]
    InvalidNumber { text: String, line: usize },

    #[error("unterminated {what} starting on line {line}")]
    Unterminated { what: &'static str, line: usize },

    #[error("expected '.' after term on line {line}")]
    MissingTerminator { line: usize },

    #[error("unexpected content after terminating '.' on line {line}")]
    TrailingContent { line: usize },

    #[error("terms nested deeper than {max} levels on line {line}", max = MAX_DEPTH)]
    TooDeep { line: usize },

    #[error("binary segment must be a string or integer, found {found} on line {line}")]
    InvalidSegment { found: &'static str, line: usize },
}

/// Parse a document holding a single `.`-terminated term
pub fn parse_document(src: &str) -> Result<Term, ParseError> {
    let mut parser = Parser::new(src);
    parser.skip_trivia();
    let term = parser.parse_term()?;
    parser.skip_trivia();
    if parser.bump() != Some('.') {
        return Err(ParseError::MissingTerminator { line: parser.line });
    }
    parser.skip_trivia();
    if parser.peek().is_some() {
        return Err(ParseError::TrailingContent { line: parser.line });
    }
    Ok(term)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    depth: usize,
}

impl Parser {
    fn new(src: &str) -> Self {
        Self {
            chars: src.chars().collect(),
            pos: 0,
            line: 1,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Consume `token` if the input continues with it
    fn eat(&mut self, token: &str) -> bool {
        let matches = token
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c));
        if matches {
            for _ in token.chars() {
                self.bump();
            }
        }
        matches
    }

    fn expect(&mut self, token: &str) -> Result<(), ParseError> {
        if self.eat(token) {
            return Ok(());
        }
        match self.peek() {
            Some(ch) => Err(ParseError::UnexpectedChar {
                ch,
                line: self.line,
            }),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    /// Skip whitespace and `%` comments
    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '%' {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.bump();
                }
            } else {
                break;
            }
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep { line: self.line });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_term(&mut self) -> Result<Term, ParseError> {
        let Some(c) = self.peek() else {
            return Err(ParseError::UnexpectedEof);
        };
        match c {
            '[' => self.nested(|p| p.parse_sequence("]", "list").map(Term::List)),
            '{' => self.nested(|p| p.parse_sequence("}", "tuple").map(Term::Tuple)),
            '#' if self.peek_at(1) == Some('{') => self.nested(|p| p.parse_map().map(Term::Map)),
            '<' if self.peek_at(1) == Some('<') => self.nested(|p| p.parse_binary().map(Term::Binary)),
            '"' => self.parse_strings().map(Term::Str),
            '\'' => self.parse_quoted('\'', "quoted atom").map(Term::Atom),
            '$' => self.parse_char().map(|c| Term::Int(i64::from(u32::from(c)))),
            '-' | '0'..='9' => self.parse_number(),
            c if c.is_ascii_lowercase() => Ok(Term::Atom(self.parse_bare_atom())),
            ch => Err(ParseError::UnexpectedChar {
                ch,
                line: self.line,
            }),
        }
    }

    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T, ParseError>) -> Result<T, ParseError> {
        self.enter()?;
        let result = parse(self)?;
        self.leave();
        Ok(result)
    }

    /// Comma-separated items up to `close`; the opening token is already peeked
    fn parse_items<T>(
        &mut self,
        close: &str,
        what: &'static str,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let start_line = self.line;
        let mut items = Vec::new();

        self.skip_trivia();
        if self.eat(close) {
            return Ok(items);
        }

        loop {
            self.skip_trivia();
            items.push(item(self)?);
            self.skip_trivia();
            if self.eat(close) {
                return Ok(items);
            }
            match self.bump() {
                Some(',') => {}
                Some(ch) => {
                    return Err(ParseError::UnexpectedChar {
                        ch,
                        line: self.line,
                    });
                }
                None => {
                    return Err(ParseError::Unterminated {
                        what,
                        line: start_line,
                    });
                }
            }
        }
    }

    fn parse_sequence(&mut self, close: &str, what: &'static str) -> Result<Vec<Term>, ParseError> {
        self.bump();
        self.parse_items(close, what, Self::parse_term)
    }

    fn parse_map(&mut self) -> Result<Vec<(Term, Term)>, ParseError> {
        self.expect("#{")?;
        self.parse_items("}", "map", |p| {
            let key = p.parse_term()?;
            p.skip_trivia();
            p.expect("=>")?;
            p.skip_trivia();
            let value = p.parse_term()?;
            Ok((key, value))
        })
    }

    /// Binary with string, integer or character segments, truncated to bytes
    /// unless a string segment is tagged `/utf8`
    fn parse_binary(&mut self) -> Result<Vec<u8>, ParseError> {
        self.expect("<<")?;
        let segments = self.parse_items(">>", "binary", |p| {
            let segment = match p.peek() {
                Some('"') => p.parse_strings()?,
                _ => match p.parse_term()? {
                    Term::Int(n) => return Ok(vec![n.to_le_bytes()[0]]),
                    other => {
                        return Err(ParseError::InvalidSegment {
                            found: other.kind(),
                            line: p.line,
                        });
                    }
                },
            };
            p.skip_trivia();
            if p.eat("/utf8") {
                Ok(segment.into_bytes())
            } else {
                Ok(segment.chars().map(|c| u32::from(c).to_le_bytes()[0]).collect())
            }
        })?;
        Ok(segments.concat())
    }

    /// One or more adjacent string literals, concatenated
    fn parse_strings(&mut self) -> Result<String, ParseError> {
        let mut out = self.parse_quoted('"', "string")?;
        loop {
            let save = (self.pos, self.line);
            self.skip_trivia();
            if self.peek() == Some('"') {
                out.push_str(&self.parse_quoted('"', "string")?);
            } else {
                (self.pos, self.line) = save;
                return Ok(out);
            }
        }
    }

    fn parse_quoted(&mut self, delim: char, what: &'static str) -> Result<String, ParseError> {
        let start_line = self.line;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => {
                    return Err(ParseError::Unterminated {
                        what,
                        line: start_line,
                    });
                }
                Some(c) if c == delim => return Ok(out),
                Some('\\') => {
                    let escaped = self.bump().ok_or(ParseError::Unterminated {
                        what,
                        line: start_line,
                    })?;
                    out.push(unescape(escaped));
                }
                Some(c) => out.push(c),
            }
        }
    }

    /// `$c` character literal
    fn parse_char(&mut self) -> Result<char, ParseError> {
        self.bump();
        match self.bump() {
            Some('\\') => self.bump().map(unescape).ok_or(ParseError::UnexpectedEof),
            Some(c) => Ok(c),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    fn parse_bare_atom(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '@' {
                out.push(c);
                self.bump();
            } else {
                break;
            }
        }
        out
    }

    fn parse_number(&mut self) -> Result<Term, ParseError> {
        let mut text = String::new();
        if self.peek() == Some('-') {
            text.push('-');
            self.bump();
        }
        self.take_digits(&mut text);

        if self.peek() == Some('#') {
            return self.parse_radix(text);
        }

        // A '.' only belongs to the number when a digit follows; otherwise it
        // is the document terminator.
        let is_float = self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit());
        if is_float {
            text.push('.');
            self.bump();
            self.take_digits(&mut text);
            if matches!(self.peek(), Some('e' | 'E')) {
                text.push('e');
                self.bump();
                if let Some(sign @ ('-' | '+')) = self.peek() {
                    text.push(sign);
                    self.bump();
                }
                self.take_digits(&mut text);
            }
            return text
                .parse::<f64>()
                .map(Term::Float)
                .map_err(|_| ParseError::InvalidNumber {
                    text,
                    line: self.line,
                });
        }

        text.parse::<i64>()
            .map(Term::Int)
            .map_err(|_| ParseError::InvalidNumber {
                text,
                line: self.line,
            })
    }

    /// `Base#Digits` with `base` already consumed as `prefix`
    fn parse_radix(&mut self, prefix: String) -> Result<Term, ParseError> {
        self.bump();
        let mut digits = String::new();
        while let Some(c) = self.peek().filter(char::is_ascii_alphanumeric) {
            digits.push(c);
            self.bump();
        }
        let text = format!("{prefix}#{digits}");
        let (negative, base) = match prefix.strip_prefix('-') {
            Some(base) => (true, base),
            None => (false, prefix.as_str()),
        };
        let value = base
            .parse::<u32>()
            .ok()
            .filter(|b| (2..=36).contains(b))
            .and_then(|b| i64::from_str_radix(&digits, b).ok());
        match value {
            Some(v) if negative => Ok(Term::Int(-v)),
            Some(v) => Ok(Term::Int(v)),
            None => Err(ParseError::InvalidNumber {
                text,
                line: self.line,
            }),
        }
    }

    fn take_digits(&mut self, text: &mut String) {
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            text.push(c);
            self.bump();
        }
    }
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        's' => ' ',
        'e' => '\u{1b}',
        '0' => '\0',
        other => other,
    }
}
