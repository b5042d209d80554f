use lazy_static::lazy_static;
use rustc_hash::FxHashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Modulo,
    BitAnd,
    BitOr,
    BitXor,
    BitShiftLeft,
    BitShiftRight,
    UnsignedBitShiftRight,
    Identical,
    Equal,
    NotEqual,
    And,
    Or,
    InstanceOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Not,
    BitNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

const BINARY_OPERATOR_NAMES: &[(&str, BinaryOperator)] = &[
    ("<", BinaryOperator::LessThan),
    ("<=", BinaryOperator::LessThanOrEqual),
    (">", BinaryOperator::GreaterThan),
    (">=", BinaryOperator::GreaterThanOrEqual),
    ("mod", BinaryOperator::Modulo),
    ("bit-and", BinaryOperator::BitAnd),
    ("bit-or", BinaryOperator::BitOr),
    ("bit-xor", BinaryOperator::BitXor),
    ("bit-shift-left", BinaryOperator::BitShiftLeft),
    ("bit-shift-right", BinaryOperator::BitShiftRight),
    (
        "unsigned-bit-shift-right",
        BinaryOperator::UnsignedBitShiftRight,
    ),
    ("identical?", BinaryOperator::Identical),
    ("=", BinaryOperator::Equal),
    ("not=", BinaryOperator::NotEqual),
    ("and", BinaryOperator::And),
    ("or", BinaryOperator::Or),
    ("instance?", BinaryOperator::InstanceOf),
];

const UNARY_OPERATOR_NAMES: &[(&str, UnaryOperator)] =
    &[("not", UnaryOperator::Not), ("bit-not", UnaryOperator::BitNot)];

const ARITHMETIC_OPERATOR_NAMES: &[(&str, ArithmeticOperator)] = &[
    ("+", ArithmeticOperator::Add),
    ("-", ArithmeticOperator::Subtract),
    ("*", ArithmeticOperator::Multiply),
    ("/", ArithmeticOperator::Divide),
];

lazy_static! {
    static ref BINARY_OPERATORS: FxHashMap<&'static str, BinaryOperator> =
        BINARY_OPERATOR_NAMES.iter().cloned().collect();
    static ref UNARY_OPERATORS: FxHashMap<&'static str, UnaryOperator> =
        UNARY_OPERATOR_NAMES.iter().cloned().collect();
    static ref ARITHMETIC_OPERATORS: FxHashMap<&'static str, ArithmeticOperator> =
        ARITHMETIC_OPERATOR_NAMES.iter().cloned().collect();
}

/// Every operator name, in no particular order.
pub fn names() -> impl Iterator<Item = &'static str> {
    BINARY_OPERATOR_NAMES
        .iter()
        .map(|(name, _)| *name)
        .chain(UNARY_OPERATOR_NAMES.iter().map(|(name, _)| *name))
        .chain(ARITHMETIC_OPERATOR_NAMES.iter().map(|(name, _)| *name))
}

fn source_name<T: PartialEq + Copy>(table: &[(&'static str, T)], op: T) -> &'static str {
    table
        .iter()
        .find(|(_, candidate)| *candidate == op)
        .map(|(name, _)| *name)
        .unwrap_or("?")
}

impl BinaryOperator {
    pub fn lookup(name: &str) -> Option<Self> {
        BINARY_OPERATORS.get(name).copied()
    }

    pub fn source_name(&self) -> &'static str {
        source_name(BINARY_OPERATOR_NAMES, *self)
    }
}

impl UnaryOperator {
    pub fn lookup(name: &str) -> Option<Self> {
        UNARY_OPERATORS.get(name).copied()
    }

    pub fn source_name(&self) -> &'static str {
        source_name(UNARY_OPERATOR_NAMES, *self)
    }
}

impl ArithmeticOperator {
    pub fn lookup(name: &str) -> Option<Self> {
        ARITHMETIC_OPERATORS.get(name).copied()
    }

    pub fn source_name(&self) -> &'static str {
        source_name(ARITHMETIC_OPERATOR_NAMES, *self)
    }

    /// The value of the operator applied to no operands, if it has one.
    pub fn identity(&self) -> Option<i64> {
        match self {
            Self::Add => Some(0),
            Self::Multiply => Some(1),
            _ => None,
        }
    }
}

macro_rules! display_source_name {
    ($($t:ty),*) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.source_name())
            }
        })*
    };
}

display_source_name!(BinaryOperator, UnaryOperator, ArithmeticOperator);
