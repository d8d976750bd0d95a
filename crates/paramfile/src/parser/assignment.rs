//! Parser for assignment-style parameter files.
//!
//! Each statement binds a name: `name = expr`, `a = b = expr`, or
//! `name += expr` (and the other arithmetic operators). Expressions are
//! literals, lists, tuples, arithmetic and names bound earlier in the same
//! file. Nothing is executed; every other statement is a syntax error.
//!
//! ```text
//! # survey parameters
//! n_freq = 64
//! band = (700.0, 800.0)
//! width = (band[1] - band[0]) / n_freq   # error: indexing is not supported
//! ```

use std::path::Path;

use super::SourceParser;
use super::arith::{self, BinOp};
use super::lexer::{ScriptError, Tok, Token, tokenize};
use crate::error::ParamError;
use crate::model::{Params, Value};

/// Parser for `.py`, `.ini`, `.par` and any other non-structured file.
pub struct AssignmentParser;

impl SourceParser for AssignmentParser {
    fn supports(path: &Path) -> bool {
        !super::is_structured(path)
    }

    fn parse(content: &str, path: &Path) -> Result<Params, ParamError> {
        evaluate(content).map_err(|e| ParamError::Script {
            path: path.to_path_buf(),
            line: e.line,
            message: e.message,
        })
    }
}

fn evaluate(content: &str) -> Result<Params, ScriptError> {
    let tokens = tokenize(content)?;
    let mut eval = Evaluator {
        tokens: &tokens,
        pos: 0,
        depth: 0,
        bindings: Params::new(),
    };
    eval.run()?;
    Ok(eval.bindings)
}

static EOF: Token = Token {
    tok: Tok::Eof,
    line: 0,
};

const CONSTANTS: [&str; 3] = ["True", "False", "None"];

/// Deepest allowed nesting of brackets and unary or power operators.
const MAX_DEPTH: usize = 100;

struct Evaluator<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
    bindings: Params,
}

impl<'t> Evaluator<'t> {
    fn run(&mut self) -> Result<(), ScriptError> {
        loop {
            match self.current().tok {
                Tok::Eof => return Ok(()),
                Tok::Newline => self.pos += 1,
                _ => self.statement()?,
            }
        }
    }

    fn current(&self) -> &'t Token {
        self.lookahead(0)
    }

    fn lookahead(&self, offset: usize) -> &'t Token {
        let tokens: &'t [Token] = self.tokens;
        tokens
            .get(self.pos + offset)
            .or_else(|| tokens.last())
            .unwrap_or(&EOF)
    }

    fn line(&self) -> usize {
        self.current().line
    }

    fn error(&self, message: impl Into<String>) -> ScriptError {
        ScriptError::new(self.line(), message)
    }

    /// Run `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        line: usize,
        parse: impl FnOnce(&mut Self) -> Result<T, ScriptError>,
    ) -> Result<T, ScriptError> {
        if self.depth >= MAX_DEPTH {
            return Err(ScriptError::new(line, "expression nested too deeply"));
        }
        self.depth += 1;
        let out = parse(self);
        self.depth -= 1;
        out
    }

    fn statement(&mut self) -> Result<(), ScriptError> {
        let mut targets: Vec<String> = Vec::new();
        loop {
            match (&self.current().tok, &self.lookahead(1).tok) {
                (Tok::Name(name), Tok::Assign) => {
                    self.check_target(name)?;
                    targets.push(name.clone());
                    self.pos += 2;
                }
                (Tok::Name(name), Tok::AugAssign(op)) if targets.is_empty() => {
                    self.check_target(name)?;
                    self.pos += 2;
                    return self.augmented(name.clone(), *op);
                }
                _ => break,
            }
        }
        if targets.is_empty() {
            let message = match &self.current().tok {
                Tok::Name(name) => {
                    format!("expected '=' after '{name}'; only assignments are supported")
                }
                other => format!("expected a parameter name, found {}", other.describe()),
            };
            return Err(self.error(message));
        }

        let value = self.expression_list()?;
        self.end_statement()?;
        for target in targets {
            self.bindings.insert(target, value.clone());
        }
        Ok(())
    }

    fn check_target(&self, name: &str) -> Result<(), ScriptError> {
        if CONSTANTS.contains(&name) {
            return Err(self.error(format!("cannot assign to {name}")));
        }
        Ok(())
    }

    fn augmented(&mut self, name: String, op: BinOp) -> Result<(), ScriptError> {
        let line = self.line();
        let rhs = self.expression_list()?;
        self.end_statement()?;
        let current = self
            .bindings
            .get(&name)
            .cloned()
            .ok_or_else(|| ScriptError::new(line, format!("name '{name}' is not defined")))?;
        let value = arith::binary(op, current, rhs).map_err(|m| ScriptError::new(line, m))?;
        self.bindings.insert(name, value);
        Ok(())
    }

    fn end_statement(&mut self) -> Result<(), ScriptError> {
        match &self.current().tok {
            Tok::Newline => {
                self.pos += 1;
                Ok(())
            }
            Tok::Eof => Ok(()),
            other => Err(self.error(format!("unexpected {} after expression", other.describe()))),
        }
    }

    /// `a, b, c` without brackets builds a tuple.
    fn expression_list(&mut self) -> Result<Value, ScriptError> {
        let first = self.expression()?;
        if self.current().tok != Tok::Comma {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.current().tok == Tok::Comma {
            self.pos += 1;
            if matches!(self.current().tok, Tok::Newline | Tok::Eof) {
                break;
            }
            items.push(self.expression()?);
        }
        Ok(Value::List(items))
    }

    fn expression(&mut self) -> Result<Value, ScriptError> {
        let mut lhs = self.term()?;
        while let Tok::Op(op @ (BinOp::Add | BinOp::Sub)) = self.current().tok {
            let line = self.line();
            self.pos += 1;
            let rhs = self.term()?;
            lhs = arith::binary(op, lhs, rhs).map_err(|m| ScriptError::new(line, m))?;
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Value, ScriptError> {
        let mut lhs = self.unary()?;
        while let Tok::Op(op @ (BinOp::Mul | BinOp::Div | BinOp::FloorDiv | BinOp::Mod)) =
            self.current().tok
        {
            let line = self.line();
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = arith::binary(op, lhs, rhs).map_err(|m| ScriptError::new(line, m))?;
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Value, ScriptError> {
        let line = self.line();
        match self.current().tok {
            Tok::Op(BinOp::Sub) => {
                self.pos += 1;
                let operand = self.nested(line, Self::unary)?;
                arith::negate(operand).map_err(|m| ScriptError::new(line, m))
            }
            Tok::Op(BinOp::Add) => {
                self.pos += 1;
                let operand = self.nested(line, Self::unary)?;
                arith::plus(operand).map_err(|m| ScriptError::new(line, m))
            }
            _ => self.power(),
        }
    }

    /// `**` binds tighter than a unary minus on its left and is right-associative.
    fn power(&mut self) -> Result<Value, ScriptError> {
        let base = self.atom()?;
        if self.current().tok != Tok::Op(BinOp::Pow) {
            return Ok(base);
        }
        let line = self.line();
        self.pos += 1;
        let exponent = self.nested(line, Self::unary)?;
        arith::binary(BinOp::Pow, base, exponent).map_err(|m| ScriptError::new(line, m))
    }

    fn atom(&mut self) -> Result<Value, ScriptError> {
        let token = self.current();
        self.pos += 1;
        match &token.tok {
            Tok::Int(i) => Ok(Value::Int(*i)),
            Tok::Float(x) => Ok(Value::Float(*x)),
            Tok::Str(s) => {
                let mut s = s.clone();
                while let Tok::Str(next) = &self.current().tok {
                    s.push_str(next);
                    self.pos += 1;
                }
                Ok(Value::Str(s))
            }
            Tok::Name(name) => {
                if self.current().tok == Tok::LParen {
                    return Err(ScriptError::new(
                        token.line,
                        format!("cannot call '{name}': function calls are not supported"),
                    ));
                }
                self.lookup(name, token.line)
            }
            Tok::LParen => self.nested(token.line, Self::parenthesized),
            Tok::LBracket => {
                self.nested(token.line, |eval| eval.sequence(Tok::RBracket, Vec::new()))
            }
            other => Err(ScriptError::new(
                token.line,
                format!("unexpected {}", other.describe()),
            )),
        }
    }

    /// `()`, `(expr)` or a tuple, after the opening parenthesis.
    fn parenthesized(&mut self) -> Result<Value, ScriptError> {
        if self.current().tok == Tok::RParen {
            self.pos += 1;
            return Ok(Value::List(Vec::new()));
        }
        let first = self.expression()?;
        match &self.current().tok {
            Tok::RParen => {
                self.pos += 1;
                Ok(first)
            }
            Tok::Comma => {
                self.pos += 1;
                self.sequence(Tok::RParen, vec![first])
            }
            other => Err(self.error(format!("expected ')', found {}", other.describe()))),
        }
    }

    /// Remaining items of a list or tuple up to and including `close`.
    fn sequence(&mut self, close: Tok, mut items: Vec<Value>) -> Result<Value, ScriptError> {
        loop {
            if self.current().tok == close {
                self.pos += 1;
                return Ok(Value::List(items));
            }
            items.push(self.expression()?);
            match &self.current().tok {
                Tok::Comma => self.pos += 1,
                tok if *tok == close => {}
                other => {
                    return Err(self.error(format!(
                        "expected ',' or {}, found {}",
                        close.describe(),
                        other.describe()
                    )));
                }
            }
        }
    }

    fn lookup(&self, name: &str, line: usize) -> Result<Value, ScriptError> {
        match name {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::None),
            _ => self
                .bindings
                .get(name)
                .cloned()
                .ok_or_else(|| ScriptError::new(line, format!("name '{name}' is not defined"))),
        }
    }
}
