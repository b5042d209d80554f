use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while1};
use nom::character::complete::char;
use nom::combinator::value;
use nom::multi::many0;
use nom::sequence::{pair, preceded};

use super::parser::{parse_form, Input, ParseResult};

/// Commas are whitespace in this notation
#[inline]
fn is_white_space(c: char) -> bool {
    c.is_whitespace() || c == ','
}

#[inline]
pub fn parse_inter_token_space(input: Input) -> ParseResult<()> {
    let atmosphere = alt((parse_white_space, parse_comment, parse_discard));
    value((), many0(atmosphere))(input)
}

#[inline]
fn parse_white_space(input: Input) -> ParseResult<()> {
    value((), take_while1(is_white_space))(input)
}

#[inline]
fn parse_comment(input: Input) -> ParseResult<()> {
    value((), pair(char(';'), take_while(|c: char| c != '\n')))(input)
}

/// `#_ form` reads and drops the next form
#[inline]
fn parse_discard(input: Input) -> ParseResult<()> {
    value((), preceded(tag("#_"), parse_form))(input)
}

#[cfg(test)]
mod tests {
    use crate::compiler::frontend::reader::tests::*;

    #[test]
    fn test_comments_and_commas_are_skipped() {
        assert_reads_as(
            "[1, 2 ; two\n 3]",
            Form::vector(vec![Form::Integer(1), Form::Integer(2), Form::Integer(3)]),
        );
    }

    #[test]
    fn test_discard() {
        assert_reads_as("(a #_ b c)", Form::list(vec![Form::symbol("a"), Form::symbol("c")]));
    }
}
