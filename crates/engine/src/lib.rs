mod ast;
mod lexer;
mod parsers;
mod state;

pub mod error;

use std::rc::Rc;

use chumsky::{Parser as _, extra::SimpleState};

use crate::{
    error::{CalcError, CalcResultVec},
    lexer::tokenize,
    parsers::{parser, screen},
    state::ParserState,
};

pub use ast::{Ast, Eval, Expr, Node, RcNode, rc_node};
pub use parsers::{MAX_NESTING, MAX_TOKENS};

/// Parses one arithmetic expression into its Expression Tree.
///
/// The text is lexed, screened against the arithmetic allow-list, then
/// parsed; every stage reports all of its errors rather than just the first.
pub fn parse(source: &str) -> CalcResultVec<Ast> {
    let lexicon = tokenize(source)?;
    screen(source, &lexicon)?;

    let tokens = lexicon
        .iter()
        .map(|(token, _, _)| token.clone())
        .collect::<Vec<_>>();
    let mut state_inner = ParserState::new(Rc::new(source.to_string()), lexicon);
    let the_output;
    let the_errs;
    {
        let mut parse_state = SimpleState::from(&mut state_inner);
        let parse_result = parser().parse_with_state(&tokens, &mut parse_state);
        let (output, errs) = parse_result.into_output_errors();
        the_output = output;
        the_errs = errs;
    }
    // This happens in two parts because the parser errors borrow the tokens
    if !the_errs.is_empty() {
        let mapped_errs = CalcError::from_parser_vec(the_errs);
        Err(CalcError::update_parser_vec_with_state(
            mapped_errs,
            &state_inner,
        ))
    } else if let Some(root) = the_output {
        Ok(Ast::new(root))
    } else {
        Err(CalcError::syntax(0..0, (0, 0), format!("No parse produced for: '{source}'")).into())
    }
}

/// Parses and evaluates one arithmetic expression.
///
/// Each call is stateless: the tree is built fresh from the text, reduced
/// bottom-up, and discarded. On failure every error carries its own kind,
/// source span and message.
pub fn evaluate(source: &str) -> CalcResultVec<f64> {
    parse(source)?.eval()
}

pub mod prelude {
    pub use crate::{
        Ast, Eval,
        error::{CalcError, CalcErrorKind, CalcResult, CalcResultVec, render_error_vec},
        evaluate, parse,
    };
}
