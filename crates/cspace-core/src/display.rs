//! Human-readable rendering of expressions.
//!
//! The printer inserts only the parentheses that precedence requires and
//! renders sums with negated terms as subtractions, so a normalised
//! antiderivative reads as `x^3/6 - x` rather than `x^3*1/6 + -x`.

use std::fmt;

use num_traits::One;

use crate::arena::ExprArena;
use crate::expr::{functions, ExprNode};
use crate::handle::ExprHandle;

const PREC_ADD: u8 = 1;
const PREC_NEG: u8 = 2;
const PREC_MUL: u8 = 3;
const PREC_POW: u8 = 4;
const PREC_ATOM: u8 = 5;

/// A borrowed view of an expression implementing [`fmt::Display`].
#[derive(Clone, Copy)]
pub struct ExprDisplay<'a> {
    arena: &'a ExprArena,
    handle: ExprHandle,
}

impl ExprArena {
    /// Returns a printable view of `handle`.
    #[must_use]
    pub fn display(&self, handle: ExprHandle) -> ExprDisplay<'_> {
        ExprDisplay {
            arena: self,
            handle,
        }
    }
}

impl fmt::Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(self.arena, self.handle, 0, f)
    }
}

fn precedence(arena: &ExprArena, handle: ExprHandle) -> u8 {
    match arena.get(handle) {
        ExprNode::Number(value) => {
            if value.is_negative() {
                PREC_NEG
            } else if value.is_integer() {
                PREC_ATOM
            } else {
                PREC_MUL
            }
        }
        ExprNode::Constant(_) | ExprNode::Symbol(_) | ExprNode::Function { .. } => PREC_ATOM,
        ExprNode::Add(_) => PREC_ADD,
        ExprNode::Neg(_) => PREC_NEG,
        ExprNode::Mul(_) | ExprNode::Div { .. } => PREC_MUL,
        ExprNode::Pow { .. } => PREC_POW,
    }
}

fn write_expr(
    arena: &ExprArena,
    handle: ExprHandle,
    min_prec: u8,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    if precedence(arena, handle) < min_prec {
        f.write_str("(")?;
        write_node(arena, handle, f)?;
        return f.write_str(")");
    }
    write_node(arena, handle, f)
}

fn write_node(arena: &ExprArena, handle: ExprHandle, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match arena.get(handle) {
        ExprNode::Number(value) => write!(f, "{value}"),
        ExprNode::Constant(constant) => f.write_str(constant.name()),
        ExprNode::Symbol(id) => match arena.symbol_name(*id) {
            Some(name) => f.write_str(name),
            None => write!(f, "s{id}"),
        },
        ExprNode::Add(args) => {
            for (i, &term) in args.iter().enumerate() {
                if i == 0 {
                    write_expr(arena, term, PREC_ADD, f)?;
                    continue;
                }
                match arena.get(term) {
                    ExprNode::Neg(inner) => {
                        f.write_str(" - ")?;
                        write_expr(arena, *inner, PREC_MUL, f)?;
                    }
                    ExprNode::Number(value) if value.is_negative() => {
                        write!(f, " - {}", value.abs())?;
                    }
                    _ => {
                        f.write_str(" + ")?;
                        write_expr(arena, term, PREC_NEG, f)?;
                    }
                }
            }
            Ok(())
        }
        ExprNode::Mul(args) => {
            // A leading positive fraction prints as a trailing division.
            if let Some(coefficient) = arena.get(args[0]).as_number() {
                if !coefficient.is_integer() && !coefficient.is_negative() {
                    let numerator = coefficient.numerator();
                    if !numerator.is_one() {
                        write!(f, "{numerator}*")?;
                    }
                    write_factors(arena, &args[1..], f)?;
                    return write!(f, "/{}", coefficient.denominator());
                }
            }
            write_factors(arena, args, f)
        }
        ExprNode::Pow { base, exp } => {
            write_expr(arena, *base, PREC_ATOM, f)?;
            f.write_str("^")?;
            write_expr(arena, *exp, PREC_ATOM, f)
        }
        ExprNode::Neg(inner) => {
            f.write_str("-")?;
            write_expr(arena, *inner, PREC_MUL, f)
        }
        ExprNode::Div { num, den } => {
            write_expr(arena, *num, PREC_MUL, f)?;
            f.write_str("/")?;
            write_expr(arena, *den, PREC_POW, f)
        }
        ExprNode::Function { id, args } => {
            match functions::name(*id) {
                Some(name) => f.write_str(name)?,
                None => write!(f, "f{id}")?,
            }
            f.write_str("(")?;
            for (i, &arg) in args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_expr(arena, arg, 0, f)?;
            }
            f.write_str(")")
        }
    }
}

fn write_factors(arena: &ExprArena, factors: &[ExprHandle], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, &factor) in factors.iter().enumerate() {
        if i > 0 {
            f.write_str("*")?;
        }
        write_expr(arena, factor, PREC_MUL + 1, f)?;
    }
    Ok(())
}
