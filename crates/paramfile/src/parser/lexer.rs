//! Tokenizer for assignment-style parameter files.

use super::arith::BinOp;

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Tok {
    Name(String),
    Int(i64),
    Float(f64),
    Str(String),
    Op(BinOp),
    AugAssign(BinOp),
    Assign,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Newline,
    Eof,
}

impl Tok {
    pub(super) fn describe(&self) -> String {
        match self {
            Tok::Name(n) => format!("name '{n}'"),
            Tok::Int(i) => format!("number {i}"),
            Tok::Float(x) => format!("number {x}"),
            Tok::Str(_) => "string literal".to_string(),
            Tok::Op(op) => format!("'{}'", op.symbol()),
            Tok::AugAssign(op) => format!("'{}='", op.symbol()),
            Tok::Assign => "'='".to_string(),
            Tok::Comma => "','".to_string(),
            Tok::LParen => "'('".to_string(),
            Tok::RParen => "')'".to_string(),
            Tok::LBracket => "'['".to_string(),
            Tok::RBracket => "']'".to_string(),
            Tok::Newline => "end of line".to_string(),
            Tok::Eof => "end of file".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Token {
    pub tok: Tok,
    pub line: usize,
}

/// A syntax or evaluation failure at a 1-based line.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl ScriptError {
    pub(super) fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Split `source` into tokens. The stream always ends with `Newline, Eof`
/// unless the file holds no statements at all, in which case it is `[Eof]`.
pub(super) fn tokenize(source: &str) -> Result<Vec<Token>, ScriptError> {
    let mut lexer = Lexer {
        chars: source.chars().collect(),
        pos: 0,
        line: 1,
        depth: 0,
        tokens: Vec::new(),
    };
    lexer.run()?;
    Ok(lexer.tokens)
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    /// Open `(`/`[` count; newlines inside brackets do not end a statement.
    depth: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    fn run(&mut self) -> Result<(), ScriptError> {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\x0c' => self.pos += 1,
                '#' => self.skip_comment(),
                '\\' => self.continuation()?,
                '\n' => {
                    if self.depth == 0 {
                        self.newline();
                    }
                    self.pos += 1;
                    self.line += 1;
                }
                ';' => {
                    if self.depth > 0 {
                        return Err(self.error("unexpected ';' inside brackets"));
                    }
                    self.newline();
                    self.pos += 1;
                }
                '(' | '[' => {
                    self.depth += 1;
                    self.push(if c == '(' { Tok::LParen } else { Tok::LBracket });
                    self.pos += 1;
                }
                ')' | ']' => {
                    self.depth = self.depth.saturating_sub(1);
                    self.push(if c == ')' { Tok::RParen } else { Tok::RBracket });
                    self.pos += 1;
                }
                ',' => {
                    self.push(Tok::Comma);
                    self.pos += 1;
                }
                '=' => {
                    if self.peek_at(1) == Some('=') {
                        return Err(self.error("comparisons are not supported"));
                    }
                    self.push(Tok::Assign);
                    self.pos += 1;
                }
                '+' | '-' | '*' | '/' | '%' => self.operator(c),
                '\'' | '"' => self.string(c)?,
                '.' if self.peek_at(1).is_some_and(|n| n.is_ascii_digit()) => self.number()?,
                c if c.is_ascii_digit() => self.number()?,
                c if c.is_alphabetic() || c == '_' => self.name(),
                other => return Err(self.error(format!("unexpected character '{other}'"))),
            }
        }
        if self.depth > 0 {
            return Err(self.error("unexpected end of file inside brackets"));
        }
        self.newline();
        self.push(Tok::Eof);
        Ok(())
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn push(&mut self, tok: Tok) {
        self.tokens.push(Token {
            tok,
            line: self.line,
        });
    }

    fn newline(&mut self) {
        let after_statement = self
            .tokens
            .last()
            .is_some_and(|t| t.tok != Tok::Newline);
        if after_statement {
            self.push(Tok::Newline);
        }
    }

    fn error(&self, message: impl Into<String>) -> ScriptError {
        ScriptError::new(self.line, message)
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek().filter(|c| pred(*c)) {
            out.push(c);
            self.pos += 1;
        }
        out
    }

    fn skip_comment(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.pos += 1;
        }
    }

    fn continuation(&mut self) -> Result<(), ScriptError> {
        self.pos += 1;
        if self.peek() == Some('\r') {
            self.pos += 1;
        }
        if self.peek() != Some('\n') {
            return Err(self.error("unexpected character after line continuation"));
        }
        self.pos += 1;
        self.line += 1;
        Ok(())
    }

    fn operator(&mut self, c: char) {
        let (op, width) = match (c, self.peek_at(1)) {
            ('*', Some('*')) => (BinOp::Pow, 2),
            ('/', Some('/')) => (BinOp::FloorDiv, 2),
            ('+', _) => (BinOp::Add, 1),
            ('-', _) => (BinOp::Sub, 1),
            ('*', _) => (BinOp::Mul, 1),
            ('/', _) => (BinOp::Div, 1),
            _ => (BinOp::Mod, 1),
        };
        self.pos += width;
        if self.peek() == Some('=') && self.peek_at(1) != Some('=') {
            self.pos += 1;
            self.push(Tok::AugAssign(op));
        } else {
            self.push(Tok::Op(op));
        }
    }

    fn name(&mut self) {
        let name = self.take_while(|c| c.is_alphanumeric() || c == '_');
        self.push(Tok::Name(name));
    }

    fn number(&mut self) -> Result<(), ScriptError> {
        let radix = match (self.peek(), self.peek_at(1)) {
            (Some('0'), Some('x' | 'X')) => Some(16),
            (Some('0'), Some('o' | 'O')) => Some(8),
            (Some('0'), Some('b' | 'B')) => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            self.pos += 2;
            let digits = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
            let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
            let value = i64::from_str_radix(&cleaned, radix)
                .map_err(|e| self.error(format!("invalid integer literal '{digits}': {e}")))?;
            self.push(Tok::Int(value));
            return Ok(());
        }

        let digit = |c: char| c.is_ascii_digit() || c == '_';
        let mut text = self.take_while(digit);
        let mut is_float = false;
        if self.peek() == Some('.') {
            is_float = true;
            self.pos += 1;
            text.push('.');
            text.push_str(&self.take_while(digit));
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let sign = self.peek_at(1).filter(|c| matches!(c, '+' | '-'));
            let first_digit = if sign.is_some() { 2 } else { 1 };
            if self.peek_at(first_digit).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                self.pos += first_digit;
                text.push('e');
                if let Some(sign) = sign {
                    text.push(sign);
                }
                text.push_str(&self.take_while(digit));
            }
        }
        if self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            return Err(self.error(format!("invalid numeric literal '{text}'")));
        }

        let cleaned: String = text.chars().filter(|c| *c != '_').collect();
        if is_float {
            let value: f64 = cleaned
                .parse()
                .map_err(|_| self.error(format!("invalid float literal '{text}'")))?;
            self.push(Tok::Float(value));
        } else {
            let value: i64 = cleaned
                .parse()
                .map_err(|_| self.error(format!("integer literal '{text}' is too large")))?;
            self.push(Tok::Int(value));
        }
        Ok(())
    }

    fn string(&mut self, quote: char) -> Result<(), ScriptError> {
        let start_line = self.line;
        self.pos += 1;
        let mut out = String::new();
        loop {
            let Some(c) = self.peek() else {
                return Err(ScriptError::new(start_line, "unterminated string literal"));
            };
            self.pos += 1;
            match c {
                c if c == quote => break,
                '\n' => return Err(ScriptError::new(start_line, "unterminated string literal")),
                '\\' => {
                    let Some(escaped) = self.peek() else {
                        continue;
                    };
                    self.pos += 1;
                    match escaped {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        '0' => out.push('\0'),
                        '\\' | '\'' | '"' => out.push(escaped),
                        '\n' => self.line += 1,
                        other => {
                            out.push('\\');
                            out.push(other);
                        }
                    }
                }
                c => out.push(c),
            }
        }
        self.push(Tok::Str(out));
        Ok(())
    }
}
