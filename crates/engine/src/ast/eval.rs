use crate::{
    ast::{Ast, Expr, Node, RcNode},
    error::{CalcError, CalcResultVec},
};

pub trait Eval {
    /// Reduces the expression to its numeric value.
    fn eval(&self) -> CalcResultVec<f64>;
}

impl<T> Eval for Node<T>
where
    T: Eval,
{
    fn eval(&self) -> CalcResultVec<f64> {
        self.inner_t().eval()
    }
}

impl Eval for Ast {
    fn eval(&self) -> CalcResultVec<f64> {
        self.root().eval()
    }
}

impl Eval for Expr {
    fn eval(&self) -> CalcResultVec<f64> {
        match self {
            Expr::Num(value) => Ok(*value),
            Expr::Pos(expr) => expr.eval(),
            Expr::Neg(expr) => expr.eval().map(|value| -value),
            Expr::Add(lhs, rhs) => both(lhs, rhs).map(|(l, r)| l + r),
            Expr::Sub(lhs, rhs) => both(lhs, rhs).map(|(l, r)| l - r),
            Expr::Mul(lhs, rhs) => both(lhs, rhs).map(|(l, r)| l * r),
            Expr::Div(lhs, rhs) => div_expr(lhs, rhs),
            Expr::Mod(lhs, rhs) => mod_expr(lhs, rhs),
            Expr::FloorDiv(lhs, rhs) => floor_div_expr(lhs, rhs),
            Expr::Pow(lhs, rhs) => pow_expr(lhs, rhs),
        }
    }
}

/// Evaluates both operands, left before right, merging any errors.
fn both(lhs: &RcNode<Expr>, rhs: &RcNode<Expr>) -> CalcResultVec<(f64, f64)> {
    let left_value = lhs.eval();
    let right_value = rhs.eval();

    match (left_value, right_value) {
        (Ok(l), Ok(r)) => Ok((l, r)),
        (Err(err), Ok(_)) | (Ok(_), Err(err)) => Err(err),
        (Err(mut l_err), Err(r_err)) => {
            l_err.extend(r_err);
            Err(l_err)
        }
    }
}

fn div_expr(lhs: &RcNode<Expr>, rhs: &RcNode<Expr>) -> CalcResultVec<f64> {
    let (l, r) = both(lhs, rhs)?;
    if r == 0.0 {
        Err(CalcError::division_by_zero(
            lhs.merge_source_span(rhs),
            lhs.position(),
            format!("Cannot divide '{lhs}' by zero"),
        )
        .into())
    } else {
        Ok(l / r)
    }
}

// Remainder takes the sign of the divisor, pairing with floor division
fn mod_expr(lhs: &RcNode<Expr>, rhs: &RcNode<Expr>) -> CalcResultVec<f64> {
    let (l, r) = both(lhs, rhs)?;
    if r == 0.0 {
        Err(CalcError::division_by_zero(
            lhs.merge_source_span(rhs),
            lhs.position(),
            format!("Cannot take '{lhs}' modulo zero"),
        )
        .into())
    } else {
        Ok(l - r * (l / r).floor())
    }
}

fn floor_div_expr(lhs: &RcNode<Expr>, rhs: &RcNode<Expr>) -> CalcResultVec<f64> {
    let (l, r) = both(lhs, rhs)?;
    if r == 0.0 {
        Err(CalcError::division_by_zero(
            lhs.merge_source_span(rhs),
            lhs.position(),
            format!("Cannot floor-divide '{lhs}' by zero"),
        )
        .into())
    } else {
        Ok((l / r).floor())
    }
}

fn pow_expr(lhs: &RcNode<Expr>, rhs: &RcNode<Expr>) -> CalcResultVec<f64> {
    let (l, r) = both(lhs, rhs)?;
    if l == 0.0 && r < 0.0 {
        return Err(CalcError::division_by_zero(
            lhs.merge_source_span(rhs),
            lhs.position(),
            "Cannot raise zero to a negative power".to_string(),
        )
        .into());
    }

    let value = l.powf(r);
    if value.is_nan() && !l.is_nan() && !r.is_nan() {
        Err(CalcError::numeric(
            lhs.merge_source_span(rhs),
            lhs.position(),
            format!("'{lhs} ** {rhs}' has no real result (fractional power of a negative base)"),
        )
        .into())
    } else if value.is_infinite() && l.is_finite() && r.is_finite() {
        Err(CalcError::numeric(
            lhs.merge_source_span(rhs),
            lhs.position(),
            format!("'{lhs} ** {rhs}' overflows the numeric range"),
        )
        .into())
    } else {
        Ok(value)
    }
}
