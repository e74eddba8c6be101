use std::{fmt::Display, sync::LazyLock};

use logos::{Lexer, Logos, Span};
use regex::Regex;

use crate::error::{CalcError, CalcResultVec};

fn number(lex: &mut Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

fn verbatim(lex: &mut Lexer<Token>) -> Option<String> {
    Some(lex.slice().to_string())
}

static NEWLINE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\r\n?)|(\n\r?)").unwrap());

fn newlines_callback(lex: &mut Lexer<Token>) {
    let found_newlines = NEWLINE_REGEX.find_iter(lex.slice());
    found_newlines
        .map(|m| {
            lex.extras.0 += 1;
            lex.extras
                .1
                .push((lex.extras.0, lex.span().start + m.end()));
        })
        .count();
}

fn string_content(lex: &mut Lexer<Token>) -> Option<String> {
    let raw = lex.slice();
    let mut chars = raw.chars();
    chars.next();
    chars.next_back();
    Some(chars.as_str().to_string())
}

/// All the Tokens the lexer can produce.
///
/// Only numeric literals, the arithmetic operators and parentheses are ever
/// accepted by the grammar; everything else exists so that rejection can name
/// the construct it found.
#[rustfmt::skip]
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = (usize, Vec<(usize, usize)>))]
#[logos(skip r"[ \t]+")]
pub enum Token {
    // Numeric literals
    #[regex(r"\d+\.\d*([eE][+-]?\d+)?", number)]
    #[regex(r"\.\d+([eE][+-]?\d+)?", number)]
    #[regex(r"\d+[eE][+-]?\d+", number)]
    #[regex(r"\d+", number, priority = 3)]
                                        Number(f64),

    // Wordlike: names and anything else an identifier could smuggle in
    #[regex(r"[A-Za-z_]\w*", verbatim)] Word(String),

    // Strings
    #[regex(r#""[^"]*""#, string_content)]
    #[regex(r"'[^']*'", string_content)]
                                        String(String),

    // Whitespace
    #[regex(r"(\r\n?)+", newlines_callback)]
    #[regex(r"(\n\r?)+", newlines_callback)]
                                        NewLines,

    // Arithmetic operators
    #[token("+")]                       Plus,
    #[token("-")]                       Minus,
    #[token("**")]                      DoubleStar,
    #[token("*")]                       Asterisk,
    #[token("//")]                      DoubleSlash,
    #[token("/")]                       Slash,
    #[token("%")]                       Modulo,

    // Grouping
    #[token("(")]                       LParens,
    #[token(")")]                       RParens,

    // Symbols recognized only so rejection can name them
    #[token("==")]                      EqEq,
    #[token("!=")]                      NotEq,
    #[token("<=")]                      LessEq,
    #[token(">=")]                      GreaterEq,
    #[token("<<")]                      Shl,
    #[token(">>")]                      Shr,
    #[token("<")]                       LAngle,
    #[token(">")]                       RAngle,
    #[token("=")]                       Equals,
    #[token("&")]                       Ampersand,
    #[token("|")]                       Bar,
    #[token("^")]                       Caret,
    #[token("~")]                       Tilde,
    #[token(",")]                       Comma,
    #[token(".")]                       Period,
    #[token(":")]                       Colon,
    #[token(";")]                       SemiColon,
    #[token("@")]                       At,

    // Brackets/Braces
    #[token("[")]                       LBracket,
    #[token("]")]                       RBracket,
    #[token("{")]                       LCurly,
    #[token("}")]                       RCurly,

    // Keywords recognized only so rejection can name them
    #[token("True")]                    True,
    #[token("False")]                   False,
    #[token("None")]                    None,
    #[token("and")]                     And,
    #[token("or")]                      Or,
    #[token("not")]                     Not,
    #[token("in")]                      In,
    #[token("is")]                      Is,
    #[token("if")]                      If,
    #[token("else")]                    Else,
    #[token("lambda")]                  Lambda,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub type Position = (usize, usize);

pub type Lexicon = Vec<(Token, Span, Position)>;

/// Lexes the source string into a vector of tokens, ignoring any lexical errors.
#[cfg(test)]
pub fn quick_tokens(source: &str) -> Vec<Token> {
    Token::lexer(source)
        .flatten()
        .filter(|token| !matches!(token, Token::NewLines))
        .collect()
}

/// Lexes the source string into a vector of tokens, their source spans,
/// and their line/character positions.
pub fn tokenize(source: &str) -> CalcResultVec<Lexicon> {
    let mut lex = Token::lexer(source);
    let mut tokens = Vec::new();
    let mut errs = Vec::new();

    while let Some(token) = lex.next() {
        let span = lex.span();
        let position = find_position(span.start, &lex.extras.1);
        match token {
            Ok(Token::NewLines) => {}
            Ok(token) => tokens.push((token, span, position)),
            Err(()) => errs.push(CalcError::syntax(
                span.clone(),
                position,
                format!("Unrecognized character: '{}'", &source[span]),
            )),
        }
    }

    if errs.is_empty() { Ok(tokens) } else { Err(errs) }
}

fn find_position(start: usize, lines: &[(usize, usize)]) -> Position {
    for (line, line_end) in lines.iter().rev() {
        if start >= *line_end {
            return (line + 1, start - line_end);
        }
    }
    (1, start)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::CalcErrorKind;

    #[test]
    fn tokenize_arithmetic() {
        let tokens = quick_tokens("1 + 2 ** 3 // 4 % (5 * -6.5)");
        assert_eq!(
            vec![
                Token::Number(1.0),
                Token::Plus,
                Token::Number(2.0),
                Token::DoubleStar,
                Token::Number(3.0),
                Token::DoubleSlash,
                Token::Number(4.0),
                Token::Modulo,
                Token::LParens,
                Token::Number(5.0),
                Token::Asterisk,
                Token::Minus,
                Token::Number(6.5),
                Token::RParens,
            ],
            tokens
        );
    }

    #[test]
    fn tokenize_number_forms() {
        let tokens = quick_tokens("42 2.5 .5 3. 1e3 1.2e-3");
        assert_eq!(
            vec![
                Token::Number(42.0),
                Token::Number(2.5),
                Token::Number(0.5),
                Token::Number(3.0),
                Token::Number(1000.0),
                Token::Number(0.0012),
            ],
            tokens
        );
    }

    #[test]
    fn tokenize_longest_operator_wins() {
        let tokens = quick_tokens("**/ / //");
        assert_eq!(
            vec![
                Token::DoubleStar,
                Token::Slash,
                Token::Slash,
                Token::DoubleSlash,
            ],
            tokens
        );
    }

    #[test]
    fn tokenize_wordlike_and_strings() {
        let tokens = quick_tokens(r#"__import__('os') or True"#);
        assert_eq!(
            vec![
                Token::Word("__import__".into()),
                Token::LParens,
                Token::String("os".into()),
                Token::RParens,
                Token::Or,
                Token::True,
            ],
            tokens
        );
    }

    #[test]
    fn tokenize_positions() {
        let lexicon = tokenize("1 +\n2").unwrap();
        let positions: Vec<_> = lexicon.iter().map(|(_, _, position)| *position).collect();
        assert_eq!(vec![(1, 0), (1, 2), (2, 0)], positions);

        let spans: Vec<_> = lexicon.iter().map(|(_, span, _)| span.clone()).collect();
        assert_eq!(vec![0..1, 2..3, 4..5], spans);
    }

    #[test]
    fn tokenize_unrecognized_characters() {
        let errs = tokenize("1 ? 2").unwrap_err();
        assert_eq!(1, errs.len());
        assert_eq!(CalcErrorKind::Syntax, errs[0].kind());
        assert_eq!("Unrecognized character: '?'", errs[0].msg());
        assert_eq!(2..3, errs[0].span());

        // A lone bang only exists as part of '!='
        assert!(tokenize("1 ! 2").is_err());
        assert!(tokenize("$1").is_err());
    }
}
