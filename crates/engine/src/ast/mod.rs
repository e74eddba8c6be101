use std::fmt::Display;
use std::{ops::Range, rc::Rc};

use chumsky::prelude::*;

use crate::lexer::{Position, Token};
use crate::state::SimpleParserState;

mod eval;

pub use eval::Eval;

/// A parsed Expression Tree, ready for evaluation.
#[derive(Debug, PartialEq, Clone)]
pub struct Ast {
    root: RcNode<Expr>,
}

impl Ast {
    pub fn new(root: RcNode<Expr>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &RcNode<Expr> {
        &self.root
    }
}

impl Display for Ast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root)
    }
}

/// Every node kind the evaluator accepts. Anything the parser cannot express
/// with these variants is rejected before evaluation ever starts.
#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    // Literal
    Num(f64),

    // Unary Ops
    Pos(RcNode<Self>),
    Neg(RcNode<Self>),

    // Binary Ops
    Add(RcNode<Self>, RcNode<Self>),
    Sub(RcNode<Self>, RcNode<Self>),
    Mul(RcNode<Self>, RcNode<Self>),
    Div(RcNode<Self>, RcNode<Self>),
    Mod(RcNode<Self>, RcNode<Self>),
    FloorDiv(RcNode<Self>, RcNode<Self>),
    Pow(RcNode<Self>, RcNode<Self>),
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Num(value) => write!(f, "{value}"),
            Expr::Pos(expr) => write!(f, "+{expr}"),
            Expr::Neg(expr) => write!(f, "-{expr}"),
            Expr::Add(lhs, rhs) => write!(f, "({lhs} + {rhs})"),
            Expr::Sub(lhs, rhs) => write!(f, "({lhs} - {rhs})"),
            Expr::Mul(lhs, rhs) => write!(f, "({lhs} * {rhs})"),
            Expr::Div(lhs, rhs) => write!(f, "({lhs} / {rhs})"),
            Expr::Mod(lhs, rhs) => write!(f, "({lhs} % {rhs})"),
            Expr::FloorDiv(lhs, rhs) => write!(f, "({lhs} // {rhs})"),
            Expr::Pow(lhs, rhs) => write!(f, "({lhs} ** {rhs})"),
        }
    }
}

pub type RcNode<T> = Rc<Node<T>>;

pub fn rc_node<T>(value: T) -> RcNode<T> {
    Rc::new(Node::from(value))
}

pub fn full_rc_node<'src, I, O>(
    value: I,
    extra: &mut chumsky::input::MapExtra<
        'src,
        '_,
        &'src [Token],
        extra::Full<Rich<'src, Token>, SimpleParserState<'src>, ()>,
    >,
) -> RcNode<O>
where
    O: From<I>,
{
    let span: Range<usize> = extra.span().into_range();
    let spanslation = extra.state().spanslate(&span);

    Rc::new(Node::from((value.into(), spanslation)))
}

pub type SourceInfo = (Range<usize>, Position);

/// An immutable value plus where in the source it came from.
#[derive(Debug, Clone)]
pub struct Node<T> {
    actual: T,
    source_span: Range<usize>,
    position: Position,
}

impl<T> Node<T> {
    pub fn inner_t(&self) -> &T {
        &self.actual
    }

    pub fn source_span(&self) -> Range<usize> {
        self.source_span.clone()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn merge_source_span<U>(&self, other: &Node<U>) -> Range<usize> {
        self.source_span.start..other.source_span.end
    }
}

impl<T> PartialEq for Node<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        // Compare the actual values inside the nodes
        self.actual == other.actual
    }
}

impl<T> Display for Node<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.actual)
    }
}

impl<T> From<T> for Node<T> {
    fn from(value: T) -> Self {
        Self {
            actual: value,
            source_span: 0..0,
            position: (0, 0),
        }
    }
}

impl<T> From<(T, SourceInfo)> for Node<T> {
    fn from(value: (T, SourceInfo)) -> Self {
        let (actual, (source_span, position)) = value;
        Self {
            actual,
            source_span,
            position,
        }
    }
}
