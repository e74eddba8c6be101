use chumsky::prelude::*;

use crate::{
    ast::{Expr, RcNode},
    lexer::Token,
    state::SimpleParserState,
};

mod atoms;
mod expressions;
mod screen;

pub use screen::{MAX_NESTING, MAX_TOKENS, screen};

pub type CalcExtra<'src> = extra::Full<Rich<'src, Token>, SimpleParserState<'src>, ()>;

pub fn parser<'src>() -> impl Parser<'src, &'src [Token], RcNode<Expr>, CalcExtra<'src>> + Clone {
    expressions::arithmetic().then_ignore(end())
}
