use nom::bytes::complete::tag;
use nom::character::complete::char;
use nom::combinator::{cut, map, verify};
use nom::multi::many0;
use nom::sequence::{delimited, preceded};

use super::form::Form;
use super::parser::{parse_form, Input, ParseResult};
use super::whitespace::parse_inter_token_space;

/// Elements up to the closing delimiter. Once the opening delimiter
/// has been seen, a missing closing one is a failure, not a backtrack.
#[inline]
fn parse_elements<'a>(
    open: &'static str,
    close: char,
) -> impl FnMut(Input<'a>) -> ParseResult<'a, Vec<Form>> {
    move |input| {
        preceded(
            tag(open),
            cut(delimited(
                parse_inter_token_space,
                many0(parse_form),
                preceded(parse_inter_token_space, char(close)),
            )),
        )(input)
    }
}

#[inline]
pub fn parse_list(input: Input) -> ParseResult<Form> {
    map(parse_elements("(", ')'), Form::List)(input)
}

#[inline]
pub fn parse_vector(input: Input) -> ParseResult<Form> {
    map(parse_elements("[", ']'), Form::Vector)(input)
}

#[inline]
pub fn parse_set(input: Input) -> ParseResult<Form> {
    map(parse_elements("#{", '}'), Form::set)(input)
}

#[inline]
pub fn parse_map(input: Input) -> ParseResult<Form> {
    let even = verify(parse_elements("{", '}'), |elements: &Vec<Form>| {
        elements.len() % 2 == 0
    });

    map(even, |elements| {
        let mut pairs = vec![];
        let mut iter = elements.into_iter();
        while let (Some(k), Some(v)) = (iter.next(), iter.next()) {
            pairs.push((k, v));
        }
        Form::Map(pairs)
    })(input)
}
