use crate::{
    error::{Error, Result},
    fol::ast::{
        is_constant_name, is_function_name, is_relation_name, is_variable_name, Connective,
        Formula, Quantifier, Term,
    },
    parse::{parse_all, wsl, IResult, In},
    text::Text,
};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alphanumeric0, char as nomchar, satisfy},
    combinator::{map as nommap, recognize, value, verify},
    multi::separated_list0,
    sequence::{delimited, pair, preceded, separated_pair, tuple},
};
use std::str::FromStr;

pub fn name(s: In) -> IResult<In, In> {
    wsl(recognize(pair(satisfy(|c| c.is_ascii_alphanumeric() || c == '_'), alphanumeric0)))(s)
}

fn name_of<'a>(kind: fn(&str) -> bool) -> impl FnMut(In<'a>) -> IResult<In<'a>, Text> {
    nommap(verify(name, move |n: &str| kind(n)), Text::from_str)
}

pub fn arguments(s: In) -> IResult<In, Vec<Term>> {
    delimited(wsl(nomchar('(')), separated_list0(wsl(nomchar(',')), term), wsl(nomchar(')')))(s)
}

pub fn term(s: In) -> IResult<In, Term> {
    let function = nommap(
        pair(name_of(is_function_name), verify(arguments, |args: &Vec<Term>| !args.is_empty())),
        |(f, args)| Term::Function(f, args),
    );
    let constant = nommap(name_of(is_constant_name), Term::Constant);
    let variable = nommap(name_of(is_variable_name), Term::Variable);
    alt((function, constant, variable))(s)
}

pub fn connective(s: In) -> IResult<In, Connective> {
    wsl(alt((
        value(Connective::Implies, tag("->")),
        value(Connective::And, tag("&")),
        value(Connective::Or, tag("|")),
    )))(s)
}

pub fn quantifier(s: In) -> IResult<In, Quantifier> {
    wsl(alt((value(Quantifier::Forall, nomchar('A')), value(Quantifier::Exists, nomchar('E')))))(s)
}

pub fn formula(s: In) -> IResult<In, Formula> {
    let neg = nommap(preceded(wsl(nomchar('~')), formula), Formula::not);
    let bin = nommap(
        delimited(wsl(nomchar('(')), tuple((formula, connective, formula)), wsl(nomchar(')'))),
        |(a, c, b)| Formula::binary(c, a, b),
    );
    let quant = nommap(
        tuple((
            quantifier,
            name_of(is_variable_name),
            delimited(wsl(nomchar('[')), formula, wsl(nomchar(']'))),
        )),
        |(q, v, f)| Formula::Quantified(q, v, Box::new(f)),
    );
    let rel = nommap(pair(name_of(is_relation_name), arguments), |(r, args)| {
        Formula::Relation(r, args)
    });
    let eq = nommap(separated_pair(term, wsl(nomchar('=')), term), |(a, b)| {
        Formula::Equality(a, b)
    });
    alt((neg, bin, quant, rel, eq))(s)
}

impl Term {
    pub fn parse(s: &str) -> Result<Self> {
        parse_all(s, term)
    }
}
impl FromStr for Term {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Formula {
    pub fn parse(s: &str) -> Result<Self> {
        parse_all(s, formula)
    }
}
impl FromStr for Formula {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
