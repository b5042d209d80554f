pub mod code_generator;

use crate::compiler::frontend::syntax::operator::{
    ArithmeticOperator, BinaryOperator, UnaryOperator,
};
use crate::compiler::utils::mangle::Mangler;

pub const RESERVED_WORDS: &[(&str, &str)] = &[
    ("arguments", "__ARGUMENTS__"),
    ("await", "__AWAIT__"),
    ("break", "__BREAK__"),
    ("case", "__CASE__"),
    ("catch", "__CATCH__"),
    ("class", "__CLASS__"),
    ("const", "__CONST__"),
    ("continue", "__CONTINUE__"),
    ("debugger", "__DEBUGGER__"),
    ("default", "__DEFAULT__"),
    ("delete", "__DELETE__"),
    ("do", "__DO__"),
    ("else", "__ELSE__"),
    ("enum", "__ENUM__"),
    ("eval", "__EVAL__"),
    ("export", "__EXPORT__"),
    ("extends", "__EXTENDS__"),
    ("false", "__FALSE__"),
    ("finally", "__FINALLY__"),
    ("for", "__FOR__"),
    ("function", "__FUNCTION__"),
    ("if", "__IF__"),
    ("implements", "__IMPLEMENTS__"),
    ("import", "__IMPORT__"),
    ("in", "__IN__"),
    ("interface", "__INTERFACE__"),
    ("let", "__LET__"),
    ("new", "__NEW__"),
    ("null", "__NULL__"),
    ("package", "__PACKAGE__"),
    ("private", "__PRIVATE__"),
    ("protected", "__PROTECTED__"),
    ("public", "__PUBLIC__"),
    ("return", "__RETURN__"),
    ("static", "__STATIC__"),
    ("super", "__SUPER__"),
    ("switch", "__SWITCH__"),
    ("throw", "__THROW__"),
    ("true", "__TRUE__"),
    ("try", "__TRY__"),
    ("typeof", "__TYPEOF__"),
    ("var", "__VAR__"),
    ("void", "__VOID__"),
    ("while", "__WHILE__"),
    ("with", "__WITH__"),
    ("yield", "__YIELD__"),
];

pub const OPERATOR_TOKENS: &[&str] = &[
    "<", "<=", ">", ">=", "%", "&", "|", "^", "<<", ">>", ">>>", "===", "!==", "&&", "||",
    "instanceof", "!", "~", "+", "-", "*", "/",
];

pub static MANGLER: Mangler = Mangler::new(RESERVED_WORDS, OPERATOR_TOKENS);

/// Runtime constructor thrown by `recur` and caught by the enclosing loop.
pub const RECURSION_POINT: &str = "ws.core.RecursionPoint";

pub fn binary_token(operator: BinaryOperator) -> &'static str {
    match operator {
        BinaryOperator::LessThan => "<",
        BinaryOperator::LessThanOrEqual => "<=",
        BinaryOperator::GreaterThan => ">",
        BinaryOperator::GreaterThanOrEqual => ">=",
        BinaryOperator::Modulo => "%",
        BinaryOperator::BitAnd => "&",
        BinaryOperator::BitOr => "|",
        BinaryOperator::BitXor => "^",
        BinaryOperator::BitShiftLeft => "<<",
        BinaryOperator::BitShiftRight => ">>",
        BinaryOperator::UnsignedBitShiftRight => ">>>",
        BinaryOperator::Identical => "===",
        BinaryOperator::Equal => "===",
        BinaryOperator::NotEqual => "!==",
        BinaryOperator::And => "&&",
        BinaryOperator::Or => "||",
        BinaryOperator::InstanceOf => " instanceof ",
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

/// Calls that are emitted inline instead of as function calls. `name` is the
/// mangled name of the callee.
pub fn primitive(name: &str, args: &[String]) -> Option<String> {
    match (name, args) {
        ("aget", [array, index]) => Some(format!("{}[{}]", array, index)),
        ("aset", [array, index, value]) => Some(format!("({}[{}]={})", array, index, value)),
        ("array", _) => Some(format!("[{}]", args.join(", "))),
        ("str", _) => Some(format!("[{}].join('')", args.join(", "))),
        ("object", _) if args.len() % 2 == 0 => {
            let entries: Vec<String> = args
                .chunks(2)
                .map(|pair| format!("[{}]: {}", pair[0], pair[1]))
                .collect();
            Some(format!("({{{}}})", entries.join(", ")))
        }
        ("__TYPEOF__", [value]) => Some(format!("(typeof {})", value)),
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
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            other => quoted.push(other),
        }
    }
    quoted.push('\'');
    quoted
}
