use std::{fmt::Display, ops::Range};

use ariadne::{Color, Label, Report, ReportKind, Source};
use chumsky::error::Rich;

use crate::{
    lexer::{Position, Token},
    state::ParserState,
};

pub type CalcResult<T> = Result<T, CalcError>;

pub type CalcResultVec<T> = Result<T, Vec<CalcError>>;

#[derive(Debug, Clone, PartialEq)]
pub struct CalcError {
    kind: CalcErrorKind,
    span: Range<usize>,
    position: Position,
    msg: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcErrorKind {
    /// Malformed input text, from the lexer or the parser.
    Syntax,
    /// A construct outside the arithmetic allow-list.
    UnsupportedExpr,
    /// A literal that is not a plain integer or float.
    UnsupportedLiteral,
    /// Zero divisor for `/`, `%` or `//`.
    DivisionByZero,
    /// A result the numeric representation cannot hold.
    Numeric,
    /// Input exceeds the nesting or length bounds.
    Limit,
}

impl Display for CalcErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Syntax => "Syntax Error",
            Self::UnsupportedExpr => "Unsupported Expression",
            Self::UnsupportedLiteral => "Unsupported Literal",
            Self::DivisionByZero => "Division by Zero",
            Self::Numeric => "Numeric Error",
            Self::Limit => "Resource Limit",
        };
        write!(f, "{name}")
    }
}

impl CalcError {
    fn new(kind: CalcErrorKind, span: Range<usize>, position: Position, msg: String) -> Self {
        Self {
            kind,
            span,
            position,
            msg,
        }
    }

    pub fn syntax(span: Range<usize>, position: Position, msg: String) -> Self {
        Self::new(CalcErrorKind::Syntax, span, position, msg)
    }

    pub fn unsupported_expr(span: Range<usize>, position: Position, msg: String) -> Self {
        Self::new(CalcErrorKind::UnsupportedExpr, span, position, msg)
    }

    pub fn unsupported_literal(span: Range<usize>, position: Position, msg: String) -> Self {
        Self::new(CalcErrorKind::UnsupportedLiteral, span, position, msg)
    }

    pub fn division_by_zero(span: Range<usize>, position: Position, msg: String) -> Self {
        Self::new(CalcErrorKind::DivisionByZero, span, position, msg)
    }

    pub fn numeric(span: Range<usize>, position: Position, msg: String) -> Self {
        Self::new(CalcErrorKind::Numeric, span, position, msg)
    }

    pub fn limit(span: Range<usize>, position: Position, msg: String) -> Self {
        Self::new(CalcErrorKind::Limit, span, position, msg)
    }

    pub fn kind(&self) -> CalcErrorKind {
        self.kind
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// Converts parser errors into [`CalcError`]s carrying token spans.
    pub fn from_parser_vec(errs: Vec<Rich<'_, Token>>) -> Vec<Self> {
        errs.into_iter()
            .map(|err| Self::syntax(err.span().into_range(), (0, 0), err.to_string()))
            .collect()
    }

    /// Translates the token spans left by [`CalcError::from_parser_vec`] into
    /// source spans and line/character positions.
    pub fn update_parser_vec_with_state(mut errs: Vec<Self>, state: &ParserState) -> Vec<Self> {
        for err in &mut errs {
            let token_span = err.span.clone();
            err.span = state.get_source_span(&token_span);
            err.position = state.get_source_position(&token_span);
        }
        errs
    }
}

impl From<CalcError> for Vec<CalcError> {
    fn from(value: CalcError) -> Self {
        vec![value]
    }
}

/// Renders each error as a diagnostic report against its source text.
pub fn render_error_vec(errs: &[CalcError], name: &str, source: &str) {
    for err in errs {
        Report::build(ReportKind::Error, (name, err.span()))
            .with_message(err.msg())
            .with_label(
                Label::new((name, err.span()))
                    .with_message(err.kind().to_string())
                    .with_color(Color::Red),
            )
            .finish()
            .eprint((name, Source::from(source)))
            .ok();
    }
}
