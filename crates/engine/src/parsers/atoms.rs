use chumsky::prelude::*;

use super::CalcExtra;
use crate::{
    ast::{Expr, RcNode, full_rc_node},
    lexer::Token,
};

pub fn term<'src>() -> impl Parser<'src, &'src [Token], RcNode<Expr>, CalcExtra<'src>> + Clone {
    number()
        .map_with(full_rc_node)
        .boxed()
        .labelled("Arithmetic Term")
}

pub fn number<'src>() -> impl Parser<'src, &'src [Token], Expr, CalcExtra<'src>> + Clone {
    let number = select! { Token::Number(value) => Expr::Num(value) };
    number.labelled("Numeric")
}

#[derive(Debug, Clone, Copy)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl From<Token> for Op {
    fn from(value: Token) -> Self {
        match value {
            Token::Plus => Op::Add,
            Token::Minus => Op::Sub,
            Token::Asterisk => Op::Mul,
            Token::Slash => Op::Div,
            Token::DoubleSlash => Op::FloorDiv,
            Token::Modulo => Op::Mod,
            Token::DoubleStar => Op::Pow,
            _ => unreachable!(),
        }
    }
}

pub fn op<'src>(token: Token) -> impl Parser<'src, &'src [Token], Op, CalcExtra<'src>> + Clone {
    just(token).map(Op::from).labelled("Arithmetic Operator")
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{state::ParserState, tests::stubbed_parser};

    #[test]
    fn parse_number() {
        let mut p_state = ParserState::from_source("9001".into());
        let tokens = p_state.tokens();
        let output = stubbed_parser(&mut p_state, &tokens, number());
        assert_eq!("9001", output);

        let mut p_state = ParserState::from_source("2.5".into());
        let tokens = p_state.tokens();
        let output = stubbed_parser(&mut p_state, &tokens, number());
        assert_eq!("2.5", output);

        let mut p_state = ParserState::from_source("(".into());
        let tokens = p_state.tokens();
        let output = stubbed_parser(&mut p_state, &tokens, number());
        assert!(output.starts_with("[found"), "{output}");
    }
}
