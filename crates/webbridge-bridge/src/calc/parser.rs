//! Recursive-descent parser for calculator expressions.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '//' | '%') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('**' unary)?
//! primary := NUMBER | NAME | NAME '(' items ')' | '(' expr ')' | '[' items ']'
//! items   := (expr (',' expr)* ','?)?
//! ```
//!
//! Names are resolved here, so an unknown identifier never reaches the
//! evaluator.

use super::builtins::{Constant, Function};
use super::lexer::{Lexer, Token};
use crate::error::CalcError;

pub(crate) const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl BinOp {
    pub(crate) fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::FloorDiv => "//",
            BinOp::Mod => "%",
            BinOp::Pow => "**",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Int(i64),
    Float(f64),
    Constant(Constant),
    List(Vec<Expr>),
    Neg(Box<Expr>),
    Pos(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        func: Function,
        args: Vec<Expr>,
    },
}

pub(crate) struct Parser {
    lexer: Lexer,
    cur: Token,
    depth: usize,
}

impl Parser {
    pub(crate) fn new(input: &str) -> Result<Self, CalcError> {
        let mut lexer = Lexer::new(input);
        let cur = lexer.next_token()?;
        Ok(Self {
            lexer,
            cur,
            depth: 0,
        })
    }

    fn bump(&mut self) -> Result<Token, CalcError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.cur, next))
    }

    fn expect(&mut self, want: Token) -> Result<(), CalcError> {
        if self.cur == want {
            self.bump()?;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn unexpected(&self) -> CalcError {
        match self.cur {
            Token::Eof => CalcError::UnexpectedEnd,
            ref other => CalcError::UnexpectedToken(other.describe()),
        }
    }

    /// Parse a whole expression; trailing input is an error.
    pub(crate) fn parse(mut self) -> Result<Expr, CalcError> {
        if self.cur == Token::Eof {
            return Err(CalcError::Empty);
        }
        let expr = self.expr()?;
        if self.cur != Token::Eof {
            return Err(self.unexpected());
        }
        Ok(expr)
    }

    fn expr(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.cur {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.bump()?;
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.cur {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                Token::DoubleSlash => BinOp::FloorDiv,
                Token::Percent => BinOp::Mod,
                _ => return Ok(lhs),
            };
            self.bump()?;
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Expr, CalcError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::TooDeep);
        }
        let result = match self.cur {
            Token::Minus => {
                self.bump()?;
                self.unary().map(|e| Expr::Neg(Box::new(e)))
            }
            Token::Plus => {
                self.bump()?;
                self.unary().map(|e| Expr::Pos(Box::new(e)))
            }
            _ => self.power(),
        };
        self.depth -= 1;
        result
    }

    fn power(&mut self) -> Result<Expr, CalcError> {
        let base = self.primary()?;
        if self.cur == Token::DoubleStar {
            self.bump()?;
            // Right-associative, and binds tighter than a unary minus on its left.
            let exponent = self.unary()?;
            return Ok(binary(BinOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, CalcError> {
        match self.bump()? {
            Token::Int(n) => Ok(Expr::Int(n)),
            Token::Float(f) => Ok(Expr::Float(f)),
            Token::LParen => {
                let inner = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::LBracket => Ok(Expr::List(self.items(Token::RBracket)?)),
            Token::Ident(name) => self.name(name),
            other => Err(match other {
                Token::Eof => CalcError::UnexpectedEnd,
                other => CalcError::UnexpectedToken(other.describe()),
            }),
        }
    }

    fn name(&mut self, name: String) -> Result<Expr, CalcError> {
        if self.cur == Token::LParen {
            self.bump()?;
            let Some(func) = Function::from_name(&name) else {
                return Err(if Constant::from_name(&name).is_some() {
                    CalcError::NotCallable(name)
                } else {
                    CalcError::UndefinedName(name)
                });
            };
            let args = self.items(Token::RParen)?;
            return Ok(Expr::Call { func, args });
        }

        if let Some(constant) = Constant::from_name(&name) {
            Ok(Expr::Constant(constant))
        } else if Function::from_name(&name).is_some() {
            Err(CalcError::BareFunction(name))
        } else {
            Err(CalcError::UndefinedName(name))
        }
    }

    /// Comma-separated expressions up to `close`, which is consumed.
    fn items(&mut self, close: Token) -> Result<Vec<Expr>, CalcError> {
        let mut items = Vec::new();
        while self.cur != close {
            items.push(self.expr()?);
            if self.cur == Token::Comma {
                self.bump()?;
            } else {
                break;
            }
        }
        self.expect(close)?;
        Ok(items)
    }
}

fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}
