use std::fmt;

use serde_json::{json, Value as JsonValue};

use super::parser::BinOp;
use crate::error::CalcError;

/// Upper bound on the values a single result may hold, counting the
/// elements of nested lists as well as the lists themselves.
pub(crate) const MAX_LIST_LEN: usize = 10_000;

/// Result of evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcValue {
    Int(i64),
    Float(f64),
    List(Vec<CalcValue>),
}

impl CalcValue {
    /// `"int"`, `"float"` or `"list"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            CalcValue::Int(_) => "int",
            CalcValue::Float(_) => "float",
            CalcValue::List(_) => "list",
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            CalcValue::Int(n) => json!(n),
            CalcValue::Float(f) => json!(f),
            CalcValue::List(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        match self {
            CalcValue::Int(_) => true,
            CalcValue::Float(f) => f.is_finite(),
            CalcValue::List(items) => items.iter().all(Self::is_finite),
        }
    }

    /// Number of values this one occupies: 1 for a number, 1 plus the size
    /// of every element for a list.
    pub(crate) fn size(&self) -> usize {
        match self {
            CalcValue::List(items) => 1 + contents_size(items),
            _ => 1,
        }
    }

    /// Numeric view, or a type error naming `context`.
    pub(crate) fn as_f64(&self, context: &str) -> Result<f64, CalcError> {
        match self {
            CalcValue::Int(n) => Ok(*n as f64),
            CalcValue::Float(f) => Ok(*f),
            CalcValue::List(_) => Err(CalcError::Type(format!(
                "{context}: must be a number, not 'list'"
            ))),
        }
    }

    pub(crate) fn negate(self) -> Result<Self, CalcError> {
        match self {
            CalcValue::Int(n) => n.checked_neg().map(CalcValue::Int).ok_or(CalcError::Overflow),
            CalcValue::Float(f) => Ok(CalcValue::Float(-f)),
            CalcValue::List(_) => Err(CalcError::Type(
                "bad operand type for unary -: 'list'".into(),
            )),
        }
    }

    pub(crate) fn positive(self) -> Result<Self, CalcError> {
        match self {
            CalcValue::List(_) => Err(CalcError::Type(
                "bad operand type for unary +: 'list'".into(),
            )),
            number => Ok(number),
        }
    }

    pub(crate) fn binary(self, op: BinOp, rhs: CalcValue) -> Result<Self, CalcError> {
        use CalcValue::{Float, Int, List};

        match (op, self, rhs) {
            (BinOp::Add, List(mut a), List(b)) => {
                check_list_size(contents_size(&a).saturating_add(contents_size(&b)))?;
                a.extend(b);
                Ok(List(a))
            }
            (BinOp::Mul, List(items), Int(n)) | (BinOp::Mul, Int(n), List(items)) => {
                repeat(items, n)
            }
            (op, List(_), rhs) => Err(unsupported(op, "list", rhs.type_name())),
            (op, lhs, List(_)) => Err(unsupported(op, lhs.type_name(), "list")),
            (op, Int(a), Int(b)) => int_op(op, a, b),
            (op, a, b) => {
                let a = a.as_f64(op.symbol())?;
                let b = b.as_f64(op.symbol())?;
                float_op(op, a, b)
            }
        }
    }
}

/// Python `repr` of the value: floats always carry a fractional part or an
/// exponent, lists are bracketed.
impl fmt::Display for CalcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcValue::Int(n) => write!(f, "{n}"),
            CalcValue::Float(x) => f.write_str(&format_float(*x)),
            CalcValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".into();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf".into() } else { "-inf".into() };
    }
    let abs = x.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let formatted = format!("{x:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(d) => ('-', d),
                    None => ('+', exp),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => formatted,
        };
    }
    if x.fract() == 0.0 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

fn unsupported(op: BinOp, lhs: &str, rhs: &str) -> CalcError {
    CalcError::Type(format!(
        "unsupported operand type(s) for {}: '{lhs}' and '{rhs}'",
        op.symbol()
    ))
}

/// Total size of a list's elements, nested lists included.
pub(crate) fn contents_size(items: &[CalcValue]) -> usize {
    items.iter().map(CalcValue::size).fold(0, usize::saturating_add)
}

pub(crate) fn check_list_size(size: usize) -> Result<(), CalcError> {
    if size > MAX_LIST_LEN {
        return Err(CalcError::ListTooLong { max: MAX_LIST_LEN });
    }
    Ok(())
}

fn repeat(items: Vec<CalcValue>, times: i64) -> Result<CalcValue, CalcError> {
    let times = usize::try_from(times).unwrap_or(0);
    check_list_size(contents_size(&items).saturating_mul(times))?;
    let mut out = Vec::with_capacity(items.len() * times);
    for _ in 0..times {
        out.extend(items.iter().cloned());
    }
    Ok(CalcValue::List(out))
}

fn int_op(op: BinOp, a: i64, b: i64) -> Result<CalcValue, CalcError> {
    let int = |r: Option<i64>| r.map(CalcValue::Int).ok_or(CalcError::Overflow);
    match op {
        BinOp::Add => int(a.checked_add(b)),
        BinOp::Sub => int(a.checked_sub(b)),
        BinOp::Mul => int(a.checked_mul(b)),
        BinOp::Div => float_op(op, a as f64, b as f64),
        BinOp::FloorDiv => {
            if b == 0 {
                return Err(CalcError::ZeroDivision(
                    "integer division or modulo by zero",
                ));
            }
            let q = a.checked_div(b).ok_or(CalcError::Overflow)?;
            // Round toward negative infinity.
            if (a % b != 0) && ((a < 0) != (b < 0)) {
                int(q.checked_sub(1))
            } else {
                Ok(CalcValue::Int(q))
            }
        }
        BinOp::Mod => {
            if b == 0 {
                return Err(CalcError::ZeroDivision(
                    "integer division or modulo by zero",
                ));
            }
            let r = a.checked_rem(b).ok_or(CalcError::Overflow)?;
            // Result takes the sign of the divisor.
            if r != 0 && ((r < 0) != (b < 0)) {
                int(r.checked_add(b))
            } else {
                Ok(CalcValue::Int(r))
            }
        }
        BinOp::Pow => {
            if b < 0 {
                return float_op(op, a as f64, b as f64);
            }
            // These never overflow, whatever the exponent.
            match a {
                0 => return Ok(CalcValue::Int(if b == 0 { 1 } else { 0 })),
                1 => return Ok(CalcValue::Int(1)),
                -1 => return Ok(CalcValue::Int(if b % 2 == 0 { 1 } else { -1 })),
                _ => {}
            }
            let exp = u32::try_from(b).map_err(|_| CalcError::Overflow)?;
            int(a.checked_pow(exp))
        }
    }
}

fn float_op(op: BinOp, a: f64, b: f64) -> Result<CalcValue, CalcError> {
    let value = match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div => {
            if b == 0.0 {
                return Err(CalcError::ZeroDivision("division by zero"));
            }
            a / b
        }
        BinOp::FloorDiv => {
            if b == 0.0 {
                return Err(CalcError::ZeroDivision("float floor division by zero"));
            }
            (a / b).floor()
        }
        BinOp::Mod => {
            if b == 0.0 {
                return Err(CalcError::ZeroDivision("float modulo"));
            }
            let r = a % b;
            if r != 0.0 && ((r < 0.0) != (b < 0.0)) {
                r + b
            } else {
                r
            }
        }
        BinOp::Pow => {
            if a == 0.0 && b < 0.0 {
                return Err(CalcError::ZeroDivision(
                    "0.0 cannot be raised to a negative power",
                ));
            }
            if a < 0.0 && b.fract() != 0.0 {
                return Err(CalcError::Domain);
            }
            let r = a.powf(b);
            if r.is_infinite() {
                return Err(CalcError::Overflow);
            }
            r
        }
    };
    Ok(CalcValue::Float(value))
}
