use nom::branch::alt;
use nom::character::complete::char;
use nom::combinator::map;
use nom::error::{context, VerboseError};
use nom::sequence::preceded;
use nom::IResult;

use super::form::Form;
use super::{atom, collection, whitespace};

pub type Input<'a> = &'a str;

pub type ParseResult<'a, T> = IResult<Input<'a>, T, VerboseError<Input<'a>>>;

// Parse a single form from input
pub fn parse_form(input: Input) -> ParseResult<Form> {
    let form = context("form", alt((parse_compound_form, parse_simple_form)));
    preceded(whitespace::parse_inter_token_space, form)(input)
}

#[inline]
fn parse_simple_form(input: Input) -> ParseResult<Form> {
    context(
        "simple form",
        alt((
            context("number", atom::parse_number),
            context("string", atom::parse_string),
            context("keyword", atom::parse_keyword),
            context("symbol", atom::parse_symbol),
        )),
    )(input)
}

#[inline]
fn parse_compound_form(input: Input) -> ParseResult<Form> {
    context(
        "compound form",
        alt((
            context("list", collection::parse_list),
            context("vector", collection::parse_vector),
            context("map", collection::parse_map),
            context("set", collection::parse_set),
            context("quotation", parse_quotation),
        )),
    )(input)
}

/// `'x` is shorthand for `(quote x)`
#[inline]
fn parse_quotation(input: Input) -> ParseResult<Form> {
    map(preceded(char('\''), parse_form), Form::quote)(input)
}
