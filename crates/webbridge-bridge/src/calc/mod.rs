//! Arithmetic evaluator backing the `calculate` operation.
//!
//! Only numbers, arithmetic operators, list literals and a fixed set of
//! functions and constants are accepted (see [`builtins`]). There is no
//! variable lookup, attribute access, or string literal, so an expression
//! can never reach anything outside the evaluator.

mod builtins;
mod lexer;
mod parser;
mod value;


pub use value::CalcValue;

use parser::{Expr, Parser};

use crate::error::CalcError;

pub const MAX_EXPRESSION_LEN: usize = 1000;

/// Parse and evaluate `input`.
pub fn evaluate(input: &str) -> Result<CalcValue, CalcError> {
    if input.chars().count() > MAX_EXPRESSION_LEN {
        return Err(CalcError::TooLong {
            max: MAX_EXPRESSION_LEN,
        });
    }
    let expr = Parser::new(input)?.parse()?;
    let value = eval(&expr)?;
    if !value.is_finite() {
        return Err(CalcError::NonFinite);
    }
    Ok(value)
}

fn eval(expr: &Expr) -> Result<CalcValue, CalcError> {
    match expr {
        Expr::Int(n) => Ok(CalcValue::Int(*n)),
        Expr::Float(f) => Ok(CalcValue::Float(*f)),
        Expr::Constant(c) => Ok(c.value()),
        Expr::List(items) => {
            let items = items.iter().map(eval).collect::<Result<Vec<_>, _>>()?;
            value::check_list_size(value::contents_size(&items))?;
            Ok(CalcValue::List(items))
        }
        Expr::Neg(inner) => eval(inner)?.negate(),
        Expr::Pos(inner) => eval(inner)?.positive(),
        Expr::Binary { op, lhs, rhs } => {
            let lhs = eval(lhs)?;
            let rhs = eval(rhs)?;
            lhs.binary(*op, rhs)
        }
        Expr::Call { func, args } => {
            let args = args.iter().map(eval).collect::<Result<Vec<_>, _>>()?;
            func.call(args)
        }
    }
}
