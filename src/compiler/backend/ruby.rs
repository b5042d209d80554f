pub mod code_generator;

use crate::compiler::frontend::syntax::operator::{
    ArithmeticOperator, BinaryOperator, UnaryOperator,
};
use crate::compiler::utils::mangle::Mangler;

pub const RESERVED_WORDS: &[(&str, &str)] = &[
    ("BEGIN", "__BEGIN_BLOCK__"),
    ("END", "__END_BLOCK__"),
    ("__FILE__", "__SOURCE_FILE__"),
    ("__LINE__", "__SOURCE_LINE__"),
    ("alias", "__ALIAS__"),
    ("and", "__AND__"),
    ("begin", "__BEGIN__"),
    ("break", "__BREAK__"),
    ("case", "__CASE__"),
    ("class", "__CLASS__"),
    ("def", "__DEF__"),
    ("default", "__DEFAULT__"),
    ("do", "__DO__"),
    ("else", "__ELSE__"),
    ("elsif", "__ELSIF__"),
    ("end", "__END__"),
    ("ensure", "__ENSURE__"),
    ("false", "__FALSE__"),
    ("for", "__FOR__"),
    ("if", "__IF__"),
    ("in", "__IN__"),
    ("module", "__MODULE__"),
    ("next", "__NEXT__"),
    ("nil", "__NIL__"),
    ("not", "__NOT__"),
    ("or", "__OR__"),
    ("redo", "__REDO__"),
    ("rescue", "__RESCUE__"),
    ("retry", "__RETRY__"),
    ("return", "__RETURN__"),
    ("super", "__SUPER__"),
    ("then", "__THEN__"),
    ("true", "__TRUE__"),
    ("undef", "__UNDEF__"),
    ("unless", "__UNLESS__"),
    ("until", "__UNTIL__"),
    ("when", "__WHEN__"),
    ("while", "__WHILE__"),
    ("yield", "__YIELD__"),
];

pub const OPERATOR_TOKENS: &[&str] = &[
    "<", "<=", ">", ">=", "%", "&", "|", "^", "<<", ">>", "==", "!=", "&&", "||", "!", "~", "+",
    "-", "*", "/",
];

pub static MANGLER: Mangler = Mangler::new(RESERVED_WORDS, OPERATOR_TOKENS);

/// Infix tokens. Operators that are method calls in ruby have none.
pub fn binary_token(operator: BinaryOperator) -> Option<&'static str> {
    let token = match operator {
        BinaryOperator::LessThan => "<",
        BinaryOperator::LessThanOrEqual => "<=",
        BinaryOperator::GreaterThan => ">",
        BinaryOperator::GreaterThanOrEqual => ">=",
        BinaryOperator::Modulo => "%",
        BinaryOperator::BitAnd => "&",
        BinaryOperator::BitOr => "|",
        BinaryOperator::BitXor => "^",
        BinaryOperator::BitShiftLeft => "<<",
        // integers are unbounded, there is no unsigned shift
        BinaryOperator::BitShiftRight | BinaryOperator::UnsignedBitShiftRight => ">>",
        BinaryOperator::Equal => "==",
        BinaryOperator::NotEqual => "!=",
        BinaryOperator::And => "&&",
        BinaryOperator::Or => "||",
        BinaryOperator::Identical | BinaryOperator::InstanceOf => return None,
    };
    Some(token)
}

pub fn binary_method(operator: BinaryOperator) -> Option<&'static str> {
    match operator {
        BinaryOperator::Identical => Some("equal?"),
        BinaryOperator::InstanceOf => Some("is_a?"),
        _ => None,
    }
}

pub fn unary_token(operator: UnaryOperator) -> &'static str {
    match operator {
        UnaryOperator::Not => "!",
        UnaryOperator::BitNot => "~",
    }
}

pub fn arithmetic_token(operator: ArithmeticOperator) -> &'static str {
    match operator {
        ArithmeticOperator::Add => "+",
        ArithmeticOperator::Subtract => "-",
        ArithmeticOperator::Multiply => "*",
        ArithmeticOperator::Divide => "/",
    }
}

/// Calls that are emitted inline. `name` is the mangled name of the callee.
pub fn primitive(name: &str, args: &[String]) -> Option<String> {
    match (name, args) {
        ("aget", [array, index]) => Some(format!("{}[{}]", array, index)),
        ("aset", [array, index, value]) => Some(format!("({}[{}] = {})", array, index, value)),
        ("array", _) => Some(format!("[{}]", args.join(", "))),
        ("str", _) => Some(format!("[{}].join", args.join(", "))),
        ("p", _) => Some(format!("p({})", args.join(", "))),
        _ => None,
    }
}

pub fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            other => quoted.push(other),
        }
    }
    quoted.push('\'');
    quoted
}

/// Module name of a namespace segment.
pub fn constant_name(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
