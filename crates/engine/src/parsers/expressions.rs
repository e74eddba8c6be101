use chumsky::{pratt::*, prelude::*};

use super::{CalcExtra, atoms};
use crate::{
    ast::{Expr, RcNode, full_rc_node},
    lexer::Token,
};

pub fn arithmetic<'src>() -> impl Parser<'src, &'src [Token], RcNode<Expr>, CalcExtra<'src>> + Clone
{
    recursive(|arith| {
        let term = atoms::term().or(arith.delimited_by(just(Token::LParens), just(Token::RParens)));
        term.pratt((
            // Exponentiation binds tightest, tighter than negation
            infix(right(4), atoms::op(Token::DoubleStar), fold_infix),
            // Identity and Negation
            prefix(3, atoms::op(Token::Plus), fold_prefix),
            prefix(3, atoms::op(Token::Minus), fold_prefix),
            // Multiplication, Division, Floor Division and Remainder
            infix(left(2), atoms::op(Token::Asterisk), fold_infix),
            infix(left(2), atoms::op(Token::Slash), fold_infix),
            infix(left(2), atoms::op(Token::DoubleSlash), fold_infix),
            infix(left(2), atoms::op(Token::Modulo), fold_infix),
            // Addition and Subtraction
            infix(left(1), atoms::op(Token::Plus), fold_infix),
            infix(left(1), atoms::op(Token::Minus), fold_infix),
        ))
    })
    .boxed()
    .labelled("Arithmetic Expression")
    .as_context()
}

fn fold_prefix<'src>(
    op: atoms::Op,
    rhs: RcNode<Expr>,
    extra: &mut chumsky::input::MapExtra<'src, '_, &'src [Token], CalcExtra<'src>>,
) -> RcNode<Expr> {
    match op {
        atoms::Op::Add => full_rc_node(Expr::Pos(rhs), extra),
        atoms::Op::Sub => full_rc_node(Expr::Neg(rhs), extra),
        _ => unreachable!(),
    }
}

fn fold_infix<'src>(
    lhs: RcNode<Expr>,
    op: atoms::Op,
    rhs: RcNode<Expr>,
    extra: &mut chumsky::input::MapExtra<'src, '_, &'src [Token], CalcExtra<'src>>,
) -> RcNode<Expr> {
    match op {
        atoms::Op::Add => full_rc_node(Expr::Add(lhs, rhs), extra),
        atoms::Op::Sub => full_rc_node(Expr::Sub(lhs, rhs), extra),
        atoms::Op::Mul => full_rc_node(Expr::Mul(lhs, rhs), extra),
        atoms::Op::Div => full_rc_node(Expr::Div(lhs, rhs), extra),
        atoms::Op::FloorDiv => full_rc_node(Expr::FloorDiv(lhs, rhs), extra),
        atoms::Op::Mod => full_rc_node(Expr::Mod(lhs, rhs), extra),
        atoms::Op::Pow => full_rc_node(Expr::Pow(lhs, rhs), extra),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{state::ParserState, tests::stubbed_parser};

    fn parsed(source: &str) -> String {
        let mut p_state = ParserState::from_source(source.into());
        let tokens = p_state.tokens();
        stubbed_parser(&mut p_state, &tokens, arithmetic())
    }

    #[test]
    fn parse_terms() {
        assert_eq!("1", parsed("1"));
        assert_eq!("2.5", parsed("2.5"));
        assert_eq!("1", parsed("(1)"));
        assert_eq!("1", parsed("((1))"));
    }

    #[test]
    fn parse_unary() {
        assert_eq!("-1", parsed("-1"));
        assert_eq!("---1", parsed("---1"));
        assert_eq!("+5", parsed("+5"));
        assert_eq!("+-5", parsed("+-5"));
        assert_eq!("(-1 - 2)", parsed("-1 - 2"));
        assert_eq!("-(1 - 2)", parsed("-(1 - 2)"));
    }

    #[test]
    fn parse_precedence() {
        assert_eq!("(2 * (3 + 4))", parsed("2*(3+4)"));
        assert_eq!("(2 + (3 * 4))", parsed("2 + 3 * 4"));
        assert_eq!("((10 - 4) - 3)", parsed("10 - 4 - 3"));
        assert_eq!(
            "(1 + (((2 * 3) / 4) % (5 ** 6)))",
            parsed("1+2*3/4%5**6")
        );
        assert_eq!("((7 // 2) // 2)", parsed("7 // 2 // 2"));
    }

    #[test]
    fn parse_exponentiation_binds_tighter_than_negation() {
        assert_eq!("-(5 ** 2)", parsed("-5**2"));
        assert_eq!("(-5 ** 2)", parsed("(-5)**2"));
        assert_eq!("(2 ** -1)", parsed("2**-1"));
        assert_eq!("(2 ** (3 ** 2))", parsed("2**3**2"));
    }

    #[test]
    fn parse_malformed() {
        assert!(parsed("2 +").starts_with("[found"), "{}", parsed("2 +"));
        assert!(parsed("(1+2").starts_with("[found"), "{}", parsed("(1+2"));
        assert!(parsed("1 1").starts_with("[found"), "{}", parsed("1 1"));
        assert!(parsed("* 3").starts_with("[found"), "{}", parsed("* 3"));
        assert!(parsed("").starts_with("[found"), "{}", parsed(""));
    }
}
