use std::{cmp::min, ops::Range, rc::Rc};

use chumsky::extra::SimpleState;

use crate::{
    ast::SourceInfo,
    lexer::{Lexicon, Position},
};

pub type SimpleParserState<'src> = SimpleState<&'src mut ParserState>;

/// Carries the source text and its lexicon through a parse so that node and
/// error spans can be translated from token indices back to source bytes.
#[derive(Debug, Clone)]
pub struct ParserState {
    source: Rc<String>,
    lexicon: Lexicon,
}

impl ParserState {
    pub fn new(source: Rc<String>, lexicon: Lexicon) -> Self {
        Self { source, lexicon }
    }

    pub fn get_source_span(&self, span: &Range<usize>) -> Range<usize> {
        if self.lexicon.is_empty() {
            0..0
        } else {
            let start = min(span.start, self.lexicon.len().saturating_sub(1)); // Avoid out of bounds
            let end = min(
                span.end.saturating_sub(1),
                self.lexicon.len().saturating_sub(1),
            );
            self.lexicon[start].1.start..self.lexicon[end].1.end
        }
    }

    pub fn get_source_position(&self, span: &Range<usize>) -> Position {
        if self.lexicon.is_empty() {
            (0, 0)
        } else {
            let start = min(span.start, self.lexicon.len().saturating_sub(1)); // Avoid out of bounds
            self.lexicon[start].2
        }
    }

    pub fn spanslate(&self, span: &Range<usize>) -> SourceInfo {
        if self.lexicon.is_empty() {
            (0..0, (0, 0))
        } else {
            (self.get_source_span(span), self.get_source_position(span))
        }
    }
}

#[cfg(test)]
impl ParserState {
    /// Lexes the given source directly, ignoring any lexical errors.
    /// Intended for wiring individual parsers straight to text in tests.
    pub fn from_source(source: String) -> Self {
        let lexicon = crate::lexer::tokenize(&source).unwrap_or_default();
        Self::new(Rc::new(source), lexicon)
    }

    pub fn tokens(&self) -> Vec<crate::lexer::Token> {
        self.lexicon
            .iter()
            .map(|(token, _, _)| token.clone())
            .collect()
    }

    pub fn get_source_slice(&self, span: &Range<usize>) -> String {
        let source_span = self.get_source_span(span);
        self.source[source_span].into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanslation() {
        let state = ParserState::from_source("10 / (2 + 3)".into());
        // Token spans are indices into the lexicon, not the source
        assert_eq!(0..4, state.get_source_span(&(0..2)));
        assert_eq!("10 /", state.get_source_slice(&(0..2)));
        assert_eq!("(2 + 3)", state.get_source_slice(&(2..7)));
        assert_eq!((1, 5), state.get_source_position(&(2..7)));
    }

    #[test]
    fn spanslation_clamps_out_of_bounds() {
        let state = ParserState::from_source("1 + 2".into());
        assert_eq!(4..5, state.get_source_span(&(3..3)));

        let empty = ParserState::from_source(String::new());
        assert_eq!(0..0, empty.get_source_span(&(0..0)));
        assert_eq!((0, 0), empty.get_source_position(&(0..0)));
    }
}
