//! The only names an expression may reference.

use std::cmp::Ordering;

use super::parser::BinOp;
use super::value::CalcValue;
use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Function {
    Abs,
    Round,
    Min,
    Max,
    Sum,
    Len,
    Sin,
    Cos,
    Tan,
    Sqrt,
}

impl Function {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "abs" => Self::Abs,
            "round" => Self::Round,
            "min" => Self::Min,
            "max" => Self::Max,
            "sum" => Self::Sum,
            "len" => Self::Len,
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "sqrt" => Self::Sqrt,
            _ => return None,
        })
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Round => "round",
            Self::Min => "min",
            Self::Max => "max",
            Self::Sum => "sum",
            Self::Len => "len",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sqrt => "sqrt",
        }
    }

    pub(crate) fn call(self, args: Vec<CalcValue>) -> Result<CalcValue, CalcError> {
        match self {
            Self::Abs => match one(self, args)? {
                CalcValue::Int(n) => n.checked_abs().map(CalcValue::Int).ok_or(CalcError::Overflow),
                CalcValue::Float(f) => Ok(CalcValue::Float(f.abs())),
                CalcValue::List(_) => Err(bad_operand(self, "list")),
            },
            Self::Round => round(args),
            Self::Min => extreme(self, args, Ordering::Less),
            Self::Max => extreme(self, args, Ordering::Greater),
            Self::Sum => {
                let items = list_arg(self, one(self, args)?)?;
                items
                    .into_iter()
                    .try_fold(CalcValue::Int(0), |acc, item| acc.binary(BinOp::Add, item))
            }
            Self::Len => {
                let items = list_arg(self, one(self, args)?)?;
                Ok(CalcValue::Int(items.len() as i64))
            }
            Self::Sin | Self::Cos | Self::Tan | Self::Sqrt => {
                let x = one(self, args)?.as_f64(self.name())?;
                let y = match self {
                    Self::Sin => x.sin(),
                    Self::Cos => x.cos(),
                    Self::Tan => x.tan(),
                    _ => {
                        if x < 0.0 {
                            return Err(CalcError::Domain);
                        }
                        x.sqrt()
                    }
                };
                if y.is_nan() {
                    return Err(CalcError::Domain);
                }
                Ok(CalcValue::Float(y))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constant {
    Pi,
    E,
}

impl Constant {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }

    pub(crate) fn value(self) -> CalcValue {
        match self {
            Self::Pi => CalcValue::Float(std::f64::consts::PI),
            Self::E => CalcValue::Float(std::f64::consts::E),
        }
    }
}

fn arity(func: Function, expected: &str, given: usize) -> CalcError {
    CalcError::Type(format!(
        "{}() takes {expected} ({given} given)",
        func.name()
    ))
}

fn bad_operand(func: Function, type_name: &str) -> CalcError {
    CalcError::Type(format!(
        "bad operand type for {}(): '{type_name}'",
        func.name()
    ))
}

fn one(func: Function, mut args: Vec<CalcValue>) -> Result<CalcValue, CalcError> {
    match args.len() {
        1 => Ok(args.remove(0)),
        n => Err(arity(func, "exactly one argument", n)),
    }
}

fn list_arg(func: Function, value: CalcValue) -> Result<Vec<CalcValue>, CalcError> {
    match value {
        CalcValue::List(items) => Ok(items),
        other => Err(CalcError::Type(format!(
            "{}() argument must be a list, not '{}'",
            func.name(),
            other.type_name()
        ))),
    }
}

/// `round(x)` gives an int, `round(x, n)` keeps the type of `x`. Ties go to
/// the even neighbour.
fn round(args: Vec<CalcValue>) -> Result<CalcValue, CalcError> {
    let given = args.len();
    let mut args = args.into_iter();
    let (x, digits) = match (args.next(), args.next()) {
        (Some(x), digits) if given <= 2 => (x, digits),
        _ => return Err(arity(Function::Round, "1 or 2 arguments", given)),
    };

    let digits = match digits {
        None => None,
        Some(CalcValue::Int(n)) => Some(n),
        Some(other) => {
            return Err(CalcError::Type(format!(
                "round() digits must be an integer, not '{}'",
                other.type_name()
            )))
        }
    };

    match (x, digits) {
        (CalcValue::List(_), _) => Err(bad_operand(Function::Round, "list")),
        (CalcValue::Int(n), None) => Ok(CalcValue::Int(n)),
        (CalcValue::Int(n), Some(d)) if d >= 0 => Ok(CalcValue::Int(n)),
        (CalcValue::Int(n), Some(d)) => round_int(n, d.unsigned_abs()),
        (CalcValue::Float(f), None) => {
            let r = f.round_ties_even();
            if !r.is_finite() || r < i64::MIN as f64 || r >= i64::MAX as f64 {
                return Err(CalcError::Overflow);
            }
            Ok(CalcValue::Int(r as i64))
        }
        (CalcValue::Float(f), Some(d)) => {
            let scale = 10f64.powi(i32::try_from(d.clamp(-400, 400)).unwrap_or(0));
            if !scale.is_finite() || scale == 0.0 {
                return Ok(CalcValue::Float(if scale == 0.0 { 0.0 } else { f }));
            }
            let scaled = f * scale;
            if !scaled.is_finite() {
                return Ok(CalcValue::Float(f));
            }
            Ok(CalcValue::Float(scaled.round_ties_even() / scale))
        }
    }
}

/// Round `n` to a multiple of `10^places`, ties to even, in exact integer
/// arithmetic.
fn round_int(n: i64, places: u64) -> Result<CalcValue, CalcError> {
    // |n| < 10^19, so anything coarser than 10^38 rounds to zero.
    let Some(unit) = u32::try_from(places).ok().and_then(|p| 10i128.checked_pow(p)) else {
        return Ok(CalcValue::Int(0));
    };
    let n = i128::from(n);
    let mut q = n.div_euclid(unit);
    let r = n.rem_euclid(unit);
    if 2 * r > unit || (2 * r == unit && q % 2 != 0) {
        q += 1;
    }
    q.checked_mul(unit)
        .and_then(|v| i64::try_from(v).ok())
        .map(CalcValue::Int)
        .ok_or(CalcError::Overflow)
}

/// `min`/`max` over several arguments or over the elements of one list.
/// Ties keep the first candidate.
fn extreme(
    func: Function,
    args: Vec<CalcValue>,
    want: Ordering,
) -> Result<CalcValue, CalcError> {
    let candidates = match args.len() {
        0 => return Err(arity(func, "at least one argument", 0)),
        1 => list_arg(func, args.into_iter().next().unwrap_or(CalcValue::List(Vec::new())))?,
        _ => args,
    };

    let mut best: Option<(f64, CalcValue)> = None;
    for candidate in candidates {
        let key = candidate.as_f64(func.name())?;
        let replace = match &best {
            None => true,
            Some((best_key, _)) => key.partial_cmp(best_key) == Some(want),
        };
        if replace {
            best = Some((key, candidate));
        }
    }
    best.map(|(_, value)| value).ok_or_else(|| {
        CalcError::Type(format!("{}() arg is an empty sequence", func.name()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use CalcValue::{Float, Int, List};

    #[test]
    fn names_resolve() {
        assert_eq!(Function::from_name("sqrt"), Some(Function::Sqrt));
        assert_eq!(Function::from_name("eval"), None);
        assert_eq!(Constant::from_name("pi"), Some(Constant::Pi));
        assert_eq!(Constant::from_name("tau"), None);
    }

    #[test]
    fn round_variants() {
        assert_eq!(round(vec![Float(2.5)]).unwrap(), Int(2));
        assert_eq!(round(vec![Float(3.5)]).unwrap(), Int(4));
        assert_eq!(round(vec![Float(-2.5)]).unwrap(), Int(-2));
        assert_eq!(round(vec![Float(3.14159), Int(2)]).unwrap(), Float(3.14));
        assert_eq!(round(vec![Int(7)]).unwrap(), Int(7));
        assert_eq!(round(vec![Int(1234), Int(-2)]).unwrap(), Int(1200));
        assert!(matches!(round(vec![]), Err(CalcError::Type(_))));
        assert!(matches!(
            round(vec![Float(1.0), Float(1.0)]),
            Err(CalcError::Type(_))
        ));
    }

    #[test]
    fn round_int_negative_digits_is_exact() {
        assert_eq!(
            round(vec![Int(9_007_199_254_740_993), Int(-1)]).unwrap(),
            Int(9_007_199_254_740_990)
        );
        assert_eq!(round(vec![Int(25), Int(-1)]).unwrap(), Int(20));
        assert_eq!(round(vec![Int(35), Int(-1)]).unwrap(), Int(40));
        assert_eq!(round(vec![Int(-25), Int(-1)]).unwrap(), Int(-20));
        assert_eq!(round(vec![Int(-26), Int(-1)]).unwrap(), Int(-30));
        assert_eq!(round(vec![Int(i64::MAX), Int(-40)]).unwrap(), Int(0));
        assert_eq!(
            round(vec![Int(i64::MAX), Int(-19)]).unwrap_err(),
            CalcError::Overflow
        );
    }

    #[test]
    fn min_max_accept_args_or_list() {
        assert_eq!(Function::Max.call(vec![Int(1), Float(2.5), Int(2)]).unwrap(), Float(2.5));
        assert_eq!(
            Function::Min.call(vec![List(vec![Int(4), Int(-1), Int(3)])]).unwrap(),
            Int(-1)
        );
        assert!(matches!(
            Function::Max.call(vec![List(vec![])]),
            Err(CalcError::Type(_))
        ));
        assert!(matches!(
            Function::Max.call(vec![Int(1)]),
            Err(CalcError::Type(_))
        ));
    }

    #[test]
    fn sum_and_len_take_lists() {
        assert_eq!(
            Function::Sum.call(vec![List(vec![Int(1), Int(2), Float(0.5)])]).unwrap(),
            Float(3.5)
        );
        assert_eq!(Function::Sum.call(vec![List(vec![])]).unwrap(), Int(0));
        assert_eq!(
            Function::Len.call(vec![List(vec![Int(1), Int(2)])]).unwrap(),
            Int(2)
        );
        assert!(matches!(
            Function::Len.call(vec![Int(5)]),
            Err(CalcError::Type(_))
        ));
    }

    #[test]
    fn sqrt_domain() {
        assert_eq!(Function::Sqrt.call(vec![Int(16)]).unwrap(), Float(4.0));
        assert_eq!(
            Function::Sqrt.call(vec![Int(-1)]).unwrap_err(),
            CalcError::Domain
        );
    }

    #[test]
    fn abs_int_overflow() {
        assert_eq!(Function::Abs.call(vec![Int(-3)]).unwrap(), Int(3));
        assert_eq!(
            Function::Abs.call(vec![Int(i64::MIN)]).unwrap_err(),
            CalcError::Overflow
        );
    }
}
