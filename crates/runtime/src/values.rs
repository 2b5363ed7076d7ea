use std::fmt::{Debug, Display};
use std::rc::Rc;

mod function;
mod value_errors;

pub use function::Function;
pub use value_errors::ValueError;

use frontend::ast::LiteralValue;
use frontend::lexer::TokenKind;


pub type NativeFn = Rc<dyn Fn(&[RuntimeVal]) -> RuntimeVal>;

#[derive(Clone)]
pub enum RuntimeVal {
    Nil,
    Number(f64),
    Str(String),
    Bool(bool),
    NativeFunction {
        name: &'static str,
        arity: usize,
        func: NativeFn,
    },
    // Shared so every copy of the value sees the same closure
    Function(Rc<Function>),
}

impl Debug for RuntimeVal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RuntimeVal::Str(s) => write!(f, "{:?}", s),
            // Function closures can reference the function itself
            _ => write!(f, "{}", self),
        }
    }
}

impl Display for RuntimeVal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeVal::Nil => write!(f, "nil"),
            RuntimeVal::Number(nb) => {
                // Integral numbers are displayed without decimal part
                let text = format!("{:?}", nb);
                write!(f, "{}", text.strip_suffix(".0").unwrap_or(&text))
            }
            RuntimeVal::Str(s) => write!(f, "{}", s),
            RuntimeVal::Bool(b) => write!(f, "{}", b),
            RuntimeVal::NativeFunction { name, .. } => write!(f, "<native fn {}>", name),
            RuntimeVal::Function(func) => write!(f, "<fn {}>", func.name()),
        }
    }
}

// No coercion here: 1 == "1" is false
impl PartialEq for RuntimeVal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RuntimeVal::Nil, RuntimeVal::Nil) => true,
            (RuntimeVal::Number(a), RuntimeVal::Number(b)) => a == b,
            (RuntimeVal::Str(a), RuntimeVal::Str(b)) => a == b,
            (RuntimeVal::Bool(a), RuntimeVal::Bool(b)) => a == b,
            (RuntimeVal::NativeFunction { name: a, .. }, RuntimeVal::NativeFunction { name: b, .. }) => a == b,
            (RuntimeVal::Function(a), RuntimeVal::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&LiteralValue> for RuntimeVal {
    fn from(value: &LiteralValue) -> Self {
        match value {
            LiteralValue::Nil => RuntimeVal::Nil,
            LiteralValue::Bool(b) => RuntimeVal::Bool(*b),
            LiteralValue::Number(nb) => RuntimeVal::Number(*nb),
            LiteralValue::Str(s) => RuntimeVal::Str(s.clone()),
        }
    }
}

impl RuntimeVal {
    pub fn type_name(&self) -> &'static str {
        match self {
            RuntimeVal::Nil => "nil",
            RuntimeVal::Number(_) => "number",
            RuntimeVal::Str(_) => "string",
            RuntimeVal::Bool(_) => "bool",
            RuntimeVal::NativeFunction { .. } => "native function",
            RuntimeVal::Function(_) => "function",
        }
    }

    // nil and false are the only falsy values
    pub fn is_truthy(&self) -> bool {
        match self {
            RuntimeVal::Nil => false,
            RuntimeVal::Bool(b) => *b,
            _ => true,
        }
    }

    // Numbers, and strings holding a decimal number, can be used in arithmetic
    pub fn to_number(&self) -> Option<f64> {
        match self {
            RuntimeVal::Number(nb) => Some(*nb),
            RuntimeVal::Str(s) => {
                let text = s.trim();

                match is_decimal_text(text) {
                    true => text.parse::<f64>().ok(),
                    false => None,
                }
            }
            _ => None,
        }
    }

    // Unary minus doesn't coerce strings
    pub fn negate(&self) -> Result<RuntimeVal, ValueError> {
        match self {
            RuntimeVal::Number(nb) => Ok(RuntimeVal::Number(-nb)),
            other => Err(ValueError::NonNumericOperand(other.type_name().into())),
        }
    }

    pub fn calculate(&self, rhs: &RuntimeVal, operator: TokenKind) -> Result<RuntimeVal, ValueError> {
        match operator {
            TokenKind::Plus => {
                // A single string is enough to concatenate: 1 + "2" gives "12"
                if matches!(self, RuntimeVal::Str(_)) || matches!(rhs, RuntimeVal::Str(_)) {
                    return Ok(RuntimeVal::Str(format!("{}{}", self, rhs)));
                }

                match (self.to_number(), rhs.to_number()) {
                    (Some(a), Some(b)) => Ok(RuntimeVal::Number(a + b)),
                    _ => Err(ValueError::InvalidAddOperands(
                        self.type_name().into(),
                        rhs.type_name().into(),
                    )),
                }
            }
            TokenKind::Minus => {
                let (a, b) = self.numeric_operands(rhs)?;
                Ok(RuntimeVal::Number(a - b))
            }
            TokenKind::Slash => {
                let (a, b) = self.numeric_operands(rhs)?;
                if b == 0. {
                    return Err(ValueError::DivisionByZero);
                }
                Ok(RuntimeVal::Number(a / b))
            }
            // A side that can't be a number counts as 0, only both failing is an error
            TokenKind::Star => match (self.to_number(), rhs.to_number()) {
                (Some(a), Some(b)) => Ok(RuntimeVal::Number(a * b)),
                (Some(a), None) => Ok(RuntimeVal::Number(a * 0.)),
                (None, Some(b)) => Ok(RuntimeVal::Number(0. * b)),
                (None, None) => Err(ValueError::NonNumericOperands(
                    self.type_name().into(),
                    rhs.type_name().into(),
                )),
            },
            TokenKind::Greater => self.compare(rhs, |a, b| a > b),
            TokenKind::GreaterEqual => self.compare(rhs, |a, b| a >= b),
            TokenKind::Less => self.compare(rhs, |a, b| a < b),
            TokenKind::LessEqual => self.compare(rhs, |a, b| a <= b),
            TokenKind::EqualEqual => Ok(RuntimeVal::Bool(self == rhs)),
            TokenKind::BangEqual => Ok(RuntimeVal::Bool(self != rhs)),
            other => Err(ValueError::UndefinedOperator(format!("{:?}", other))),
        }
    }

    fn numeric_operands(&self, rhs: &RuntimeVal) -> Result<(f64, f64), ValueError> {
        match (self.to_number(), rhs.to_number()) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(ValueError::NonNumericOperands(
                self.type_name().into(),
                rhs.type_name().into(),
            )),
        }
    }

    fn compare(&self, rhs: &RuntimeVal, cmp: fn(f64, f64) -> bool) -> Result<RuntimeVal, ValueError> {
        let (a, b) = self.numeric_operands(rhs)?;
        Ok(RuntimeVal::Bool(cmp(a, b)))
    }
}

// Sign, digits with an optional fraction, optional exponent: "-1.5e3", ".5", "2."
// Rejects the "inf" and "nan" spellings Rust's float parser accepts
fn is_decimal_text(text: &str) -> bool {
    let is_sign = |c: char| c == '+' || c == '-';
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());

    let unsigned = text.strip_prefix(is_sign).unwrap_or(text);
    let (mantissa, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
        Some(idx) => (&unsigned[..idx], Some(&unsigned[idx + 1..])),
        None => (unsigned, None),
    };
    let (integral, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    if integral.is_empty() && fraction.is_empty() {
        return false;
    }
    if !all_digits(integral) || !all_digits(fraction) {
        return false;
    }

    match exponent {
        Some(exp) => {
            let digits = exp.strip_prefix(is_sign).unwrap_or(exp);
            !digits.is_empty() && all_digits(digits)
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(nb: f64) -> RuntimeVal {
        RuntimeVal::Number(nb)
    }

    fn string(s: &str) -> RuntimeVal {
        RuntimeVal::Str(s.into())
    }

    #[test]
    fn display() {
        assert_eq!(RuntimeVal::Nil.to_string(), "nil");
        assert_eq!(num(3.).to_string(), "3");
        assert_eq!(num(-0.5).to_string(), "-0.5");
        assert_eq!(num(2.25).to_string(), "2.25");
        assert_eq!(RuntimeVal::Bool(false).to_string(), "false");
        assert_eq!(string("hi").to_string(), "hi");
    }

    #[test]
    fn truthiness() {
        assert!(!RuntimeVal::Nil.is_truthy());
        assert!(!RuntimeVal::Bool(false).is_truthy());
        assert!(RuntimeVal::Bool(true).is_truthy());
        assert!(num(0.).is_truthy());
        assert!(string("").is_truthy());
    }

    #[test]
    fn number_coercion() {
        assert_eq!(num(4.).to_number(), Some(4.));
        assert_eq!(string("4.5").to_number(), Some(4.5));
        assert_eq!(string(" 12 ").to_number(), Some(12.));
        assert_eq!(string("abc").to_number(), None);
        assert_eq!(RuntimeVal::Bool(true).to_number(), None);
        assert_eq!(RuntimeVal::Nil.to_number(), None);
        assert_eq!(string("-1.5e2").to_number(), Some(-150.));
        assert_eq!(string(".5").to_number(), Some(0.5));
        assert_eq!(string("+2.").to_number(), Some(2.));
    }

    #[test]
    fn special_float_spellings_are_not_numbers() {
        for text in ["inf", "-inf", "Infinity", "infinity", "NaN", "nan", "", ".", "1e", "1.2.3", "0x10", "1_000"] {
            assert_eq!(string(text).to_number(), None, "{:?}", text);
        }
    }

    #[test]
    fn addition() {
        assert_eq!(num(1.).calculate(&num(2.), TokenKind::Plus), Ok(num(3.)));
        assert_eq!(string("a").calculate(&num(1.), TokenKind::Plus), Ok(string("a1")));
        assert_eq!(num(1.).calculate(&string("2"), TokenKind::Plus), Ok(string("12")));
        assert_eq!(string("x").calculate(&RuntimeVal::Nil, TokenKind::Plus), Ok(string("xnil")));
        assert!(matches!(
            RuntimeVal::Bool(true).calculate(&num(1.), TokenKind::Plus),
            Err(ValueError::InvalidAddOperands(..))
        ));
    }

    #[test]
    fn subtraction_and_division_coerce() {
        assert_eq!(string("10").calculate(&num(4.), TokenKind::Minus), Ok(num(6.)));
        assert_eq!(num(9.).calculate(&string("3"), TokenKind::Slash), Ok(num(3.)));
        assert!(matches!(
            string("a").calculate(&num(4.), TokenKind::Minus),
            Err(ValueError::NonNumericOperands(..))
        ));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(num(10.).calculate(&num(0.), TokenKind::Slash), Err(ValueError::DivisionByZero));
        assert_eq!(num(10.).calculate(&string("0"), TokenKind::Slash), Err(ValueError::DivisionByZero));
    }

    #[test]
    fn permissive_multiplication() {
        assert_eq!(num(5.).calculate(&num(3.), TokenKind::Star), Ok(num(15.)));
        assert_eq!(num(5.).calculate(&string("x"), TokenKind::Star), Ok(num(0.)));
        assert_eq!(RuntimeVal::Nil.calculate(&string("2"), TokenKind::Star), Ok(num(0.)));
        assert_eq!(num(5.).calculate(&string("inf"), TokenKind::Star), Ok(num(0.)));
        assert!(matches!(
            string("nan").calculate(&num(1.), TokenKind::Minus),
            Err(ValueError::NonNumericOperands(..))
        ));
        assert!(string("infinity").calculate(&num(1.), TokenKind::Greater).is_err());
        assert!(matches!(
            string("x").calculate(&RuntimeVal::Bool(true), TokenKind::Star),
            Err(ValueError::NonNumericOperands(..))
        ));
    }

    #[test]
    fn comparison() {
        assert_eq!(num(3.).calculate(&num(2.), TokenKind::Greater), Ok(RuntimeVal::Bool(true)));
        assert_eq!(string("10").calculate(&num(9.), TokenKind::Greater), Ok(RuntimeVal::Bool(true)));
        assert_eq!(num(2.).calculate(&num(2.), TokenKind::LessEqual), Ok(RuntimeVal::Bool(true)));
        assert_eq!(num(2.).calculate(&num(2.), TokenKind::Less), Ok(RuntimeVal::Bool(false)));
        assert!(RuntimeVal::Nil.calculate(&num(1.), TokenKind::GreaterEqual).is_err());
    }

    #[test]
    fn equality_without_coercion() {
        assert_eq!(RuntimeVal::Nil.calculate(&RuntimeVal::Nil, TokenKind::EqualEqual), Ok(RuntimeVal::Bool(true)));
        assert_eq!(RuntimeVal::Nil.calculate(&RuntimeVal::Bool(false), TokenKind::EqualEqual), Ok(RuntimeVal::Bool(false)));
        assert_eq!(num(1.).calculate(&string("1"), TokenKind::EqualEqual), Ok(RuntimeVal::Bool(false)));
        assert_eq!(string("a").calculate(&string("a"), TokenKind::BangEqual), Ok(RuntimeVal::Bool(false)));
    }

    #[test]
    fn negate_requires_number() {
        assert_eq!(num(2.).negate(), Ok(num(-2.)));
        assert!(string("2").negate().is_err());
    }

    #[test]
    fn unknown_operator() {
        assert!(matches!(
            num(1.).calculate(&num(1.), TokenKind::Comma),
            Err(ValueError::UndefinedOperator(_))
        ));
    }
}
