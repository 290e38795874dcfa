use crate::{
    error::{Error, Result},
    parse::{parse_all, wsl, IResult, In},
    prop::{BinaryOp, Formula, InferenceRule, Variable},
};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char as nomchar, digit0, satisfy},
    combinator::{map as nommap, recognize, value},
    multi::separated_list0,
    sequence::{delimited, pair, preceded, separated_pair, tuple},
};
use std::str::FromStr;

pub fn variable(s: In) -> IResult<In, Variable> {
    let p = wsl(recognize(pair(satisfy(|c| ('p'..='z').contains(&c)), digit0)));
    nommap(p, Variable::known)(s)
}

pub fn binary_op(s: In) -> IResult<In, BinaryOp> {
    wsl(alt((
        value(BinaryOp::Iff, tag("<->")),
        value(BinaryOp::Implies, tag("->")),
        value(BinaryOp::Nand, tag("-&")),
        value(BinaryOp::Nor, tag("-|")),
        value(BinaryOp::And, tag("&")),
        value(BinaryOp::Or, tag("|")),
        value(BinaryOp::Xor, tag("+")),
    )))(s)
}

pub fn formula(s: In) -> IResult<In, Formula> {
    let tru = value(Formula::Constant(true), wsl(nomchar('T')));
    let fal = value(Formula::Constant(false), wsl(nomchar('F')));
    let var = nommap(variable, Formula::Variable);
    let neg = nommap(preceded(wsl(nomchar('~')), formula), Formula::not);
    let bin = nommap(
        delimited(wsl(nomchar('(')), tuple((formula, binary_op, formula)), wsl(nomchar(')'))),
        |(a, op, b)| Formula::binary(op, a, b),
    );
    alt((tru, fal, var, neg, bin))(s)
}

/// `[a1, a2, ...] ==> c`, the same shape rules are printed in.
pub fn inference_rule(s: In) -> IResult<In, InferenceRule> {
    let assumptions = delimited(
        wsl(nomchar('[')),
        separated_list0(wsl(nomchar(',')), formula),
        wsl(nomchar(']')),
    );
    nommap(separated_pair(assumptions, wsl(tag("==>")), formula), |(a, c)| {
        InferenceRule::new(a, c)
    })(s)
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

impl InferenceRule {
    pub fn parse(s: &str) -> Result<Self> {
        parse_all(s, inference_rule)
    }
}
impl FromStr for InferenceRule {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
