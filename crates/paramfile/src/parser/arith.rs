//! Arithmetic on parameter values for assignment-style files.
//!
//! Integers stay integers except under `/`; any float operand promotes the
//! result to float. `//` and `%` round toward negative infinity. Booleans
//! count as 0 and 1.

use crate::model::Value;

/// Longest string (in bytes) or list a repetition may produce.
const MAX_REPEAT_LEN: usize = 1 << 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl BinOp {
    pub(super) fn symbol(self) -> &'static str {
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

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

fn number(value: &Value) -> Option<Number> {
    match value {
        Value::Int(i) => Some(Number::Int(*i)),
        Value::Float(x) => Some(Number::Float(*x)),
        Value::Bool(b) => Some(Number::Int(i64::from(*b))),
        _ => None,
    }
}

fn as_f64(n: Number) -> f64 {
    match n {
        Number::Int(i) => i as f64,
        Number::Float(x) => x,
    }
}

pub(super) fn binary(op: BinOp, lhs: Value, rhs: Value) -> Result<Value, String> {
    if let (Some(a), Some(b)) = (number(&lhs), number(&rhs)) {
        return match (a, b) {
            (Number::Int(a), Number::Int(b)) => int_op(op, a, b),
            (a, b) => float_op(op, as_f64(a), as_f64(b)).map(Value::Float),
        };
    }
    match (op, lhs, rhs) {
        (BinOp::Add, Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
        (BinOp::Add, Value::List(mut a), Value::List(b)) => {
            a.extend(b);
            Ok(Value::List(a))
        }
        (BinOp::Mul, Value::Str(s), Value::Int(n)) | (BinOp::Mul, Value::Int(n), Value::Str(s)) => {
            let count = repeat_count(n, s.len())?;
            Ok(Value::Str(s.repeat(count)))
        }
        (BinOp::Mul, Value::List(items), Value::Int(n))
        | (BinOp::Mul, Value::Int(n), Value::List(items)) => {
            let count = repeat_count(n, items.len())?;
            let mut out = Vec::with_capacity(items.len() * count);
            for _ in 0..count {
                out.extend(items.iter().cloned());
            }
            Ok(Value::List(out))
        }
        (op, lhs, rhs) => Err(format!(
            "unsupported operand types for {}: '{}' and '{}'",
            op.symbol(),
            lhs.kind(),
            rhs.kind()
        )),
    }
}

pub(super) fn negate(value: Value) -> Result<Value, String> {
    match number(&value) {
        Some(Number::Int(i)) => i
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| "integer overflow".to_string()),
        Some(Number::Float(x)) => Ok(Value::Float(-x)),
        None => Err(format!("bad operand type for unary -: '{}'", value.kind())),
    }
}

pub(super) fn plus(value: Value) -> Result<Value, String> {
    match number(&value) {
        Some(Number::Int(i)) => Ok(Value::Int(i)),
        Some(Number::Float(x)) => Ok(Value::Float(x)),
        None => Err(format!("bad operand type for unary +: '{}'", value.kind())),
    }
}

/// Clamp a repetition count to zero and reject results over [`MAX_REPEAT_LEN`].
fn repeat_count(n: i64, len: usize) -> Result<usize, String> {
    if len == 0 {
        return Ok(0);
    }
    let count = usize::try_from(n).unwrap_or(0);
    match len.checked_mul(count) {
        Some(total) if total <= MAX_REPEAT_LEN => Ok(count),
        _ => Err(format!(
            "repeated sequence too long: {len} * {n} exceeds {MAX_REPEAT_LEN}"
        )),
    }
}

fn int_op(op: BinOp, a: i64, b: i64) -> Result<Value, String> {
    let overflow = || "integer overflow".to_string();
    let zero_div = || "integer division or modulo by zero".to_string();
    let value = match op {
        BinOp::Add => a.checked_add(b).ok_or_else(overflow)?,
        BinOp::Sub => a.checked_sub(b).ok_or_else(overflow)?,
        BinOp::Mul => a.checked_mul(b).ok_or_else(overflow)?,
        BinOp::Div => return float_op(op, a as f64, b as f64).map(Value::Float),
        BinOp::FloorDiv => {
            if b == 0 {
                return Err(zero_div());
            }
            let q = a.checked_div(b).ok_or_else(overflow)?;
            if a % b != 0 && ((a < 0) != (b < 0)) { q - 1 } else { q }
        }
        BinOp::Mod => {
            if b == 0 {
                return Err(zero_div());
            }
            let r = a.checked_rem(b).unwrap_or(0);
            if r != 0 && ((r < 0) != (b < 0)) { r + b } else { r }
        }
        BinOp::Pow => {
            if b < 0 {
                return float_op(op, a as f64, b as f64).map(Value::Float);
            }
            let exp = u32::try_from(b).map_err(|_| overflow())?;
            a.checked_pow(exp).ok_or_else(overflow)?
        }
    };
    Ok(Value::Int(value))
}

fn float_op(op: BinOp, a: f64, b: f64) -> Result<f64, String> {
    match op {
        BinOp::Add => Ok(a + b),
        BinOp::Sub => Ok(a - b),
        BinOp::Mul => Ok(a * b),
        BinOp::Div => {
            if b == 0.0 {
                Err("division by zero".to_string())
            } else {
                Ok(a / b)
            }
        }
        BinOp::FloorDiv => {
            if b == 0.0 {
                Err("float floor division by zero".to_string())
            } else {
                Ok((a / b).floor())
            }
        }
        BinOp::Mod => {
            if b == 0.0 {
                return Err("float modulo by zero".to_string());
            }
            let r = a % b;
            Ok(if r != 0.0 && ((r < 0.0) != (b < 0.0)) { r + b } else { r })
        }
        BinOp::Pow => {
            if a == 0.0 && b < 0.0 {
                return Err("zero cannot be raised to a negative power".to_string());
            }
            let out = a.powf(b);
            if out.is_nan() && !a.is_nan() && !b.is_nan() {
                return Err("negative number cannot be raised to a fractional power".to_string());
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(i: i64) -> Value {
        Value::Int(i)
    }

    #[test]
    fn integer_arithmetic_floors() {
        assert_eq!(binary(BinOp::FloorDiv, int(7), int(2)), Ok(int(3)));
        assert_eq!(binary(BinOp::FloorDiv, int(-7), int(2)), Ok(int(-4)));
        assert_eq!(binary(BinOp::Mod, int(-7), int(3)), Ok(int(2)));
        assert_eq!(binary(BinOp::Mod, int(7), int(-3)), Ok(int(-2)));
        assert_eq!(binary(BinOp::Div, int(7), int(2)), Ok(Value::Float(3.5)));
        assert_eq!(binary(BinOp::Pow, int(2), int(10)), Ok(int(1024)));
        assert_eq!(binary(BinOp::Pow, int(2), int(-1)), Ok(Value::Float(0.5)));
    }

    #[test]
    fn mixed_operands_promote() {
        assert_eq!(binary(BinOp::Add, int(1), Value::Float(0.5)), Ok(Value::Float(1.5)));
        assert_eq!(binary(BinOp::Add, Value::Bool(true), int(1)), Ok(int(2)));
        assert_eq!(binary(BinOp::Mod, Value::Float(-1.0), Value::Float(3.0)), Ok(Value::Float(2.0)));
    }

    #[test]
    fn sequences_concatenate_and_repeat() {
        assert_eq!(
            binary(BinOp::Add, Value::from("ab"), Value::from("cd")),
            Ok(Value::from("abcd"))
        );
        assert_eq!(binary(BinOp::Mul, Value::from("ab"), int(2)), Ok(Value::from("abab")));
        assert_eq!(
            binary(BinOp::Mul, int(2), Value::from(vec![1])),
            Ok(Value::from(vec![1, 1]))
        );
        assert_eq!(binary(BinOp::Mul, Value::from("x"), int(-3)), Ok(Value::from("")));
    }

    #[test]
    fn failures() {
        assert!(binary(BinOp::Div, int(1), int(0)).is_err());
        assert!(binary(BinOp::Mod, int(1), int(0)).is_err());
        assert!(binary(BinOp::Add, int(i64::MAX), int(1)).is_err());
        assert!(binary(BinOp::Pow, Value::Float(-8.0), Value::Float(0.5)).is_err());
        let err = binary(BinOp::Sub, Value::from("a"), int(1)).expect_err("str - int");
        assert_eq!(err, "unsupported operand types for -: 'str' and 'int'");
        assert!(negate(Value::from("a")).is_err());
        assert_eq!(negate(int(3)), Ok(int(-3)));

        let err = binary(BinOp::Mul, Value::from("ab"), int(i64::MAX)).expect_err("huge str");
        assert!(err.starts_with("repeated sequence too long"), "{err}");
        let err = binary(BinOp::Mul, int(i64::MAX), Value::from(vec![1, 2, 3]))
            .expect_err("huge list");
        assert!(err.starts_with("repeated sequence too long"), "{err}");
        let err = binary(BinOp::Mul, Value::from("x"), int(MAX_REPEAT_LEN as i64 + 1))
            .expect_err("just over the limit");
        assert!(err.starts_with("repeated sequence too long"), "{err}");
    }

    #[test]
    fn repetition_limit_is_inclusive() {
        let at_limit = binary(BinOp::Mul, Value::from("x"), int(MAX_REPEAT_LEN as i64))
            .expect("at limit");
        assert_eq!(at_limit.as_str().map(str::len), Some(MAX_REPEAT_LEN));
        // Empty sequences repeat any number of times.
        assert_eq!(
            binary(BinOp::Mul, Value::from(""), int(i64::MAX)),
            Ok(Value::from(""))
        );
        assert_eq!(
            binary(BinOp::Mul, Value::List(Vec::new()), int(i64::MAX)),
            Ok(Value::List(Vec::new()))
        );
    }
}
