use crate::error::{Error, Result};
use nom::{
    character::complete::multispace0,
    combinator::all_consuming,
    error::{convert_error, ParseError, VerboseError},
    sequence::{preceded, terminated},
    Finish,
};

pub type IResult<I, O, E = VerboseError<I>> = std::result::Result<(I, O), nom::Err<E>>;

pub(crate) type In<'a> = &'a str;

//////////////////////////////////////

pub fn wsl<'a, F, O, E>(inner: F) -> impl FnMut(In<'a>) -> IResult<In<'a>, O, E>
where
    E: ParseError<In<'a>>,
    F: FnMut(In<'a>) -> IResult<In<'a>, O, E> + 'a,
{
    preceded(multispace0, inner)
}

pub fn wsr<'a, F, O, E>(inner: F) -> impl FnMut(In<'a>) -> IResult<In<'a>, O, E>
where
    E: ParseError<In<'a>>,
    F: FnMut(In<'a>) -> IResult<In<'a>, O, E> + 'a,
{
    terminated(inner, multispace0)
}

/// Accepts only if `inner` consumes everything but trailing whitespace.
pub fn ended<'a, F, O>(inner: F) -> impl FnMut(In<'a>) -> IResult<In<'a>, O>
where
    F: FnMut(In<'a>) -> IResult<In<'a>, O> + 'a,
{
    all_consuming(wsr(inner))
}

pub(crate) fn parse_all<'a, F, O>(input: &'a str, parser: F) -> Result<O>
where
    F: FnMut(In<'a>) -> IResult<In<'a>, O> + 'a,
{
    match ended(parser)(input).finish() {
        Ok((_rest, o)) => Ok(o),
        Err(e) => Err(Error::Parse { input: input.to_owned(), message: convert_error(input, e) }),
    }
}
