use nom::branch::alt;
use nom::bytes::complete::{is_not, take_while};
use nom::character::complete::{char, digit1, one_of, satisfy};
use nom::combinator::{cut, map, map_res, not, opt, peek, recognize, value};
use nom::multi::fold_many0;
use nom::sequence::{pair, preceded, terminated, tuple};

use super::form::Form;
use super::parser::{Input, ParseResult};

//////////////////////////////////////////
// Numbers
/////////////////////////////////////////

pub fn parse_number(input: Input) -> ParseResult<Form> {
    let number = alt((parse_decimal, parse_rational, parse_integer));

    terminated(number, not(peek(satisfy(is_symbol_subsequent))))(input)
}

#[inline]
fn parse_signed_digits(input: Input) -> ParseResult<Input> {
    recognize(pair(opt(one_of("+-")), digit1))(input)
}

#[inline]
fn parse_integer(input: Input) -> ParseResult<Form> {
    map_res(parse_signed_digits, |s: &str| s.parse::<i64>().map(Form::Integer))(input)
}

#[inline]
fn parse_rational(input: Input) -> ParseResult<Form> {
    let ratio = tuple((parse_signed_digits, char('/'), digit1));

    map_res(ratio, |(numerator, _, denominator): (&str, char, &str)| {
        let n = numerator.parse::<i64>()?;
        let d = denominator.parse::<i64>()?;
        Ok::<Form, std::num::ParseIntError>(Form::Rational(n, d))
    })(input)
}

#[inline]
fn parse_decimal(input: Input) -> ParseResult<Form> {
    let exponent = tuple((one_of("eE"), opt(one_of("+-")), digit1));
    let decimal = recognize(tuple((
        parse_signed_digits,
        char('.'),
        digit1,
        opt(exponent),
    )));

    map_res(decimal, |s: &str| s.parse::<f64>().map(Form::Decimal))(input)
}

//////////////////////////////////////////
// Strings
/////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringElement<'a> {
    Literal(&'a str),
    EscapedChar(char),
}

pub fn parse_string(input: Input) -> ParseResult<Form> {
    let elements = fold_many0(
        parse_string_element,
        String::new(),
        |mut string, element| {
            match element {
                StringElement::Literal(s) => string.push_str(s),
                StringElement::EscapedChar(c) => string.push(c),
            }
            string
        },
    );

    map(
        preceded(char('"'), cut(terminated(elements, char('"')))),
        Form::String,
    )(input)
}

#[inline]
fn parse_string_element(input: Input) -> ParseResult<StringElement> {
    alt((
        map(parse_escape, StringElement::EscapedChar),
        map(is_not("\"\\"), StringElement::Literal),
    ))(input)
}

#[inline]
fn parse_escape(input: Input) -> ParseResult<char> {
    preceded(
        char('\\'),
        alt((
            value('\n', char('n')),
            value('\t', char('t')),
            value('\r', char('r')),
            value('"', char('"')),
            value('\\', char('\\')),
        )),
    )(input)
}

//////////////////////////////////////////
// Symbols and keywords
/////////////////////////////////////////

pub const SYMBOL_SPECIAL_INITIAL: &str = "!$%&*/<=>?^_~|.+-@\\";

#[inline]
fn is_symbol_initial(c: char) -> bool {
    c.is_alphabetic() || SYMBOL_SPECIAL_INITIAL.contains(c)
}

#[inline]
fn is_symbol_subsequent(c: char) -> bool {
    is_symbol_initial(c) || c.is_ascii_digit() || c == '#' || c == ':' || c == '\''
}

#[inline]
fn parse_identifier(input: Input) -> ParseResult<Input> {
    recognize(pair(
        satisfy(is_symbol_initial),
        take_while(is_symbol_subsequent),
    ))(input)
}

/// Symbols, including the reserved tokens `true`, `false` and `nil`
pub fn parse_symbol(input: Input) -> ParseResult<Form> {
    map(parse_identifier, |token: &str| match token {
        "true" => Form::Boolean(true),
        "false" => Form::Boolean(false),
        "nil" => Form::Nil,
        other => Form::symbol(other),
    })(input)
}

pub fn parse_keyword(input: Input) -> ParseResult<Form> {
    map(preceded(char(':'), parse_identifier), Form::keyword)(input)
}

#[cfg(test)]
mod tests {
    use crate::compiler::frontend::reader::tests::*;

    #[test]
    fn test_read_numbers() {
        assert_reads_as("42", Form::Integer(42));
        assert_reads_as("-7", Form::Integer(-7));
        assert_reads_as("+7", Form::Integer(7));
        assert_reads_as("1/3", Form::Rational(1, 3));
        assert_reads_as("2.5", Form::Decimal(2.5));
        assert_reads_as("1.5e3", Form::Decimal(1500.0));
    }

    #[test]
    fn test_read_signs_as_symbols() {
        assert_reads_as("-", Form::symbol("-"));
        assert_reads_as("+", Form::symbol("+"));
        assert_reads_as("/", Form::symbol("/"));
        assert_reads_as("->list", Form::symbol("->list"));
    }

    #[test]
    fn test_read_string() {
        assert_reads_as("\"foo\"", Form::string("foo"));
        assert_reads_as("\"\"", Form::string(""));
        assert_reads_as(r#""a\"b\n""#, Form::string("a\"b\n"));
    }

    #[test]
    fn test_read_symbols() {
        let symbols = vec!["foo", "ws.core/map", "list?", "set!", ".-", "a34kTMNs", "<="];

        for sym in symbols.iter() {
            assert_reads_as(sym, Form::symbol(*sym))
        }
    }

    #[test]
    fn test_read_reserved_tokens() {
        assert_reads_as("true", Form::Boolean(true));
        assert_reads_as("false", Form::Boolean(false));
        assert_reads_as("nil", Form::Nil);
        assert_reads_as("nil?", Form::symbol("nil?"));
    }

    #[test]
    fn test_read_keyword() {
        assert_reads_as(":else", Form::keyword("else"));
        assert_reads_as(":ws.core/key", Form::keyword("ws.core/key"));
    }
}
