//! Counted `for` loops
//!
//! Python has no three-clause `for`. A loop of the shape
//!
//! ```text
//! for (int v = start; v < bound; v = v + k)     // also v <= bound, k > 0
//! ```
//!
//! whose body never writes `v` or anything `bound` reads becomes
//! `for v in range(start, bound[, k]):`. Every other loop falls back to
//! its `while` equivalent: the initializer, then `while cond:` with the
//! increment appended to the body.

use rustc_hash::FxHashSet;

use super::render::{python_name, render_statements};
use super::Indent;
use crate::parser::ast::*;

/// Render a `for` statement at `indent`
pub(crate) fn render_for(
    init: &Stmt,
    condition: &Expr,
    increment: &Stmt,
    body: &Block,
    indent: Indent,
) -> String {
    if let Some(header) = range_header(init, condition, increment, body) {
        return format!("{}{}\n{}", indent, header, body.render(indent.deeper()));
    }

    let inner = indent.deeper();
    let mut lines = vec![
        init.render(indent),
        format!("{}while {}:", indent, condition.render()),
    ];
    lines.extend(render_statements(&body.statements, inner));
    lines.push(increment.render(inner));
    lines.join("\n")
}

/// `for v in range(...):` when the loop is a plain counted loop
fn range_header(init: &Stmt, condition: &Expr, increment: &Stmt, body: &Block) -> Option<String> {
    let Stmt::VarDecl {
        ty: VarType::Int,
        name,
        init: Some(start),
    } = init
    else {
        return None;
    };

    let Expr::Binary {
        op: op @ (BinOp::Lt | BinOp::Le),
        left,
        right: bound,
    } = condition
    else {
        return None;
    };
    if !is_var(left, name) {
        return None;
    }

    let step = counted_step(increment, name)?;

    if start.static_type() != Some(VarType::Int) || bound.static_type() != Some(VarType::Int) {
        return None;
    }

    let mut assigned = FxHashSet::default();
    collect_assigned(&body.statements, &mut assigned);
    if assigned.contains(name.as_str()) {
        return None;
    }
    // `range` evaluates its bound once
    assigned.insert(name.as_str());
    if mentions_any(bound, &assigned) {
        return None;
    }

    let end = if *op == BinOp::Le {
        Expr::binary(BinOp::Add, (**bound).clone(), Expr::Int(1)).render()
    } else {
        bound.render()
    };

    let mut header = format!(
        "for {} in range({}, {}",
        python_name(name),
        start.render(),
        end
    );
    if step != 1 {
        header.push_str(&format!(", {}", step));
    }
    header.push_str("):");
    Some(header)
}

fn is_var(expr: &Expr, name: &str) -> bool {
    matches!(expr, Expr::Var { name: v, .. } if v == name)
}

/// Positive constant step of `v = v + k`
fn counted_step(increment: &Stmt, name: &str) -> Option<i64> {
    match increment {
        Stmt::Assign {
            target,
            value:
                Expr::Binary {
                    op: BinOp::Add,
                    left,
                    right,
                },
        } if target == name && is_var(left, name) => match **right {
            Expr::Int(step) if step > 0 => Some(step),
            _ => None,
        },
        _ => None,
    }
}

/// Every name a statement list may write, at any depth
fn collect_assigned<'a>(statements: &'a [Stmt], out: &mut FxHashSet<&'a str>) {
    for stmt in statements {
        match stmt {
            Stmt::VarDecl { name, .. } => {
                out.insert(name);
            }
            Stmt::Assign { target, .. } | Stmt::Cin { target, .. } => {
                out.insert(target);
            }
            Stmt::If {
                then_block,
                else_block,
                ..
            } => {
                collect_assigned(&then_block.statements, out);
                if let Some(else_block) = else_block {
                    collect_assigned(&else_block.statements, out);
                }
            }
            Stmt::While { body, .. } => collect_assigned(&body.statements, out),
            Stmt::For {
                init,
                increment,
                body,
                ..
            } => {
                collect_assigned(std::slice::from_ref(&**init), out);
                collect_assigned(std::slice::from_ref(&**increment), out);
                collect_assigned(&body.statements, out);
            }
            Stmt::Block(block) => collect_assigned(&block.statements, out),
            Stmt::Cout { .. } | Stmt::Return { .. } | Stmt::Expr(_) => {}
        }
    }
}

fn mentions_any(expr: &Expr, names: &FxHashSet<&str>) -> bool {
    match expr {
        Expr::Var { name, .. } => names.contains(name.as_str()),
        Expr::Unary { operand, .. } => mentions_any(operand, names),
        Expr::Binary { left, right, .. } => {
            mentions_any(left, names) || mentions_any(right, names)
        }
        Expr::Int(_) | Expr::Float(_) | Expr::Str(_) | Expr::Char(_) | Expr::Bool(_) => false,
    }
}
