use crate::{
    error::{CalcError, CalcResultVec},
    lexer::{Lexicon, Token},
};

/// Deepest parenthesis nesting accepted before giving up.
pub const MAX_NESTING: usize = 64;

/// Longest token stream accepted before giving up.
pub const MAX_TOKENS: usize = 4096;

/// The allow-list gate: every token outside the arithmetic grammar is
/// rejected here, with an error naming the construct it belongs to, before
/// the parser ever sees it. Also enforces the nesting and length bounds.
pub fn screen(source: &str, lexicon: &Lexicon) -> CalcResultVec<()> {
    if lexicon.len() > MAX_TOKENS {
        let (_, span, position) = &lexicon[MAX_TOKENS];
        return Err(CalcError::limit(
            span.clone(),
            *position,
            format!("Expression is longer than {MAX_TOKENS} tokens"),
        )
        .into());
    }

    let mut errs = Vec::new();
    let mut depth: usize = 0;
    for (index, (token, span, position)) in lexicon.iter().enumerate() {
        let slice = &source[span.clone()];
        match token {
            Token::Number(value) if !value.is_finite() => errs.push(CalcError::numeric(
                span.clone(),
                *position,
                format!("Numeric literal is too large: '{slice}'"),
            )),
            Token::Number(_)
            | Token::Plus
            | Token::Minus
            | Token::Asterisk
            | Token::Slash
            | Token::DoubleSlash
            | Token::Modulo
            | Token::DoubleStar => {}
            Token::LParens => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(CalcError::limit(
                        span.clone(),
                        *position,
                        format!("Parentheses nested deeper than {MAX_NESTING} levels"),
                    )
                    .into());
                }
            }
            Token::RParens => depth = depth.saturating_sub(1),
            Token::Word(name) => {
                if let Some((Token::LParens, ..)) = lexicon.get(index + 1) {
                    errs.push(CalcError::unsupported_expr(
                        span.clone(),
                        *position,
                        format!("Function calls are not supported: '{name}'"),
                    ));
                } else {
                    errs.push(CalcError::unsupported_literal(
                        span.clone(),
                        *position,
                        format!("Names are not supported: '{name}'"),
                    ));
                }
            }
            Token::String(_) => errs.push(CalcError::unsupported_literal(
                span.clone(),
                *position,
                format!("String literals are not supported: {slice}"),
            )),
            Token::True | Token::False => errs.push(CalcError::unsupported_literal(
                span.clone(),
                *position,
                format!("Boolean literals are not supported: '{slice}'"),
            )),
            Token::None => errs.push(CalcError::unsupported_literal(
                span.clone(),
                *position,
                "'None' is not a numeric literal".to_string(),
            )),
            Token::And | Token::Or | Token::Not => errs.push(CalcError::unsupported_expr(
                span.clone(),
                *position,
                format!("Boolean operators are not supported: '{slice}'"),
            )),
            Token::In
            | Token::Is
            | Token::EqEq
            | Token::NotEq
            | Token::LessEq
            | Token::GreaterEq
            | Token::LAngle
            | Token::RAngle => errs.push(CalcError::unsupported_expr(
                span.clone(),
                *position,
                format!("Comparison operators are not supported: '{slice}'"),
            )),
            Token::Equals => errs.push(CalcError::unsupported_expr(
                span.clone(),
                *position,
                "Assignment is not supported".to_string(),
            )),
            Token::Ampersand | Token::Bar | Token::Caret | Token::Tilde | Token::Shl
            | Token::Shr => errs.push(CalcError::unsupported_expr(
                span.clone(),
                *position,
                format!("Bitwise operators are not supported: '{slice}'"),
            )),
            Token::LBracket | Token::RBracket => errs.push(CalcError::unsupported_expr(
                span.clone(),
                *position,
                "List and subscript expressions are not supported".to_string(),
            )),
            Token::LCurly | Token::RCurly => errs.push(CalcError::unsupported_expr(
                span.clone(),
                *position,
                "Dict and set literals are not supported".to_string(),
            )),
            Token::Comma => errs.push(CalcError::unsupported_expr(
                span.clone(),
                *position,
                "Tuples and argument lists are not supported".to_string(),
            )),
            Token::Period => errs.push(CalcError::unsupported_expr(
                span.clone(),
                *position,
                "Attribute access is not supported".to_string(),
            )),
            Token::If | Token::Else => errs.push(CalcError::unsupported_expr(
                span.clone(),
                *position,
                "Conditional expressions are not supported".to_string(),
            )),
            Token::Lambda => errs.push(CalcError::unsupported_expr(
                span.clone(),
                *position,
                "Lambda expressions are not supported".to_string(),
            )),
            Token::Colon | Token::SemiColon | Token::At => errs.push(CalcError::unsupported_expr(
                span.clone(),
                *position,
                format!("Unsupported construct: '{slice}'"),
            )),
            // Newlines never reach the lexicon
            Token::NewLines => {}
        }
    }

    if errs.is_empty() { Ok(()) } else { Err(errs) }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{error::CalcErrorKind, lexer::tokenize};

    fn screened(source: &str) -> CalcResultVec<()> {
        let lexicon = tokenize(source).unwrap();
        screen(source, &lexicon)
    }

    fn kinds(source: &str) -> Vec<CalcErrorKind> {
        screened(source)
            .unwrap_err()
            .iter()
            .map(|err| err.kind())
            .collect()
    }

    #[test]
    fn screen_allows_arithmetic() {
        assert_eq!(Ok(()), screened("1 + 2 * (3 ** 4) // 5 % -6.5"));
        // Balance is the parser's job, not the screen's
        assert_eq!(Ok(()), screened(")("));
    }

    #[test]
    fn screen_names_calls_and_names() {
        let errs = screened("__import__('os')").unwrap_err();
        assert_eq!(2, errs.len());
        assert_eq!(CalcErrorKind::UnsupportedExpr, errs[0].kind());
        assert_eq!(
            "Function calls are not supported: '__import__'",
            errs[0].msg()
        );
        assert_eq!(CalcErrorKind::UnsupportedLiteral, errs[1].kind());
        assert_eq!("String literals are not supported: 'os'", errs[1].msg());

        let errs = screened("x + 1").unwrap_err();
        assert_eq!(CalcErrorKind::UnsupportedLiteral, errs[0].kind());
        assert_eq!("Names are not supported: 'x'", errs[0].msg());
    }

    #[test]
    fn screen_names_literals() {
        assert_eq!(vec![CalcErrorKind::UnsupportedLiteral], kinds("True"));
        assert_eq!(vec![CalcErrorKind::UnsupportedLiteral], kinds("None"));
        assert_eq!(
            vec![
                CalcErrorKind::UnsupportedLiteral,
                CalcErrorKind::UnsupportedLiteral
            ],
            kinds("'a'+'b'")
        );
    }

    #[test]
    fn screen_names_operators() {
        let errs = screened("1 < 2").unwrap_err();
        assert_eq!(
            "Comparison operators are not supported: '<'",
            errs[0].msg()
        );

        let errs = screened("1 and 2").unwrap_err();
        assert_eq!("Boolean operators are not supported: 'and'", errs[0].msg());

        let errs = screened("1 | 2").unwrap_err();
        assert_eq!("Bitwise operators are not supported: '|'", errs[0].msg());

        let errs = screened("x = 1").unwrap_err();
        assert_eq!("Assignment is not supported", errs[1].msg());
    }

    #[test]
    fn screen_names_structures() {
        assert_eq!(
            vec![
                CalcErrorKind::UnsupportedExpr,
                CalcErrorKind::UnsupportedExpr,
                CalcErrorKind::UnsupportedExpr,
                CalcErrorKind::UnsupportedExpr
            ],
            kinds("[1,2,3]")
        );

        let errs = screened("os.system").unwrap_err();
        assert_eq!("Attribute access is not supported", errs[1].msg());

        let errs = screened("lambda x: x").unwrap_err();
        assert_eq!("Lambda expressions are not supported", errs[0].msg());
    }

    #[test]
    fn screen_rejects_overflowing_literals() {
        let errs = screened("1e999").unwrap_err();
        assert_eq!(CalcErrorKind::Numeric, errs[0].kind());
        assert_eq!("Numeric literal is too large: '1e999'", errs[0].msg());
    }

    #[test]
    fn screen_nesting_limit() {
        let deep_ok = format!("{}1{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert_eq!(Ok(()), screened(&deep_ok));

        let too_deep = format!(
            "{}1{}",
            "(".repeat(MAX_NESTING + 1),
            ")".repeat(MAX_NESTING + 1)
        );
        let errs = screened(&too_deep).unwrap_err();
        assert_eq!(CalcErrorKind::Limit, errs[0].kind());
    }

    #[test]
    fn screen_length_limit() {
        let long = vec!["1"; MAX_TOKENS / 2 + 1].join("+");
        let errs = screened(&long).unwrap_err();
        assert_eq!(CalcErrorKind::Limit, errs[0].kind());
        assert_eq!(
            format!("Expression is longer than {MAX_TOKENS} tokens"),
            errs[0].msg()
        );
    }
}
