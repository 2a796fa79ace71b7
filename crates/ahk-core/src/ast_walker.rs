// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Shared AST walker for lint passes and statistics.
//!
//! **DDD Context:** Compilation
//!
//! Provides the traversals the lint rules and the statistics query share:
//!
//! - [`for_each_statement_list`]: every statement sequence in a program
//!   (the top level, function and class bodies, branch and loop bodies).
//! - [`walk_statements`]: pre-order walk of every statement at any depth.
//! - [`walk_expression`]: pre-order walk of one expression tree.
//! - [`walk_program`]: pre-order walk of every expression in a program.
//!
//! `elseif` branches are not statements of their own; they are reached
//! through [`if_chain`].

use crate::ast::{Alternate, Expression, IfStatement, Program, Statement};

// ── Statement-level iterators ─────────────────────────────────────────────────

/// Returns an `if` statement followed by each `elseif` link of its chain.
pub(crate) fn if_chain(stmt: &IfStatement) -> Vec<&IfStatement> {
    let mut chain = vec![stmt];
    let mut current = stmt;
    while let Some(Alternate::ElseIf(next)) = &current.alternate {
        chain.push(next);
        current = next;
    }
    chain
}

/// Returns the statement lists directly owned by `stmt`.
pub(crate) fn child_lists(stmt: &Statement) -> Vec<&[Statement]> {
    match stmt {
        Statement::If(if_stmt) => {
            let chain = if_chain(if_stmt);
            let mut lists: Vec<&[Statement]> =
                chain.iter().map(|link| link.consequent.as_slice()).collect();
            if let Some(Alternate::Else(body)) = chain.last().and_then(|l| l.alternate.as_ref()) {
                lists.push(body);
            }
            lists
        }
        Statement::While(s) => vec![s.body.as_slice()],
        Statement::For(s) => vec![s.body.as_slice()],
        Statement::Loop(s) => vec![s.body.as_slice()],
        Statement::Class(s) => vec![s.body.as_slice()],
        Statement::Function(s) => vec![s.body.as_slice()],
        Statement::Hotkey(s) => vec![s.body.as_slice()],
        Statement::Return(_)
        | Statement::Break(_)
        | Statement::Continue(_)
        | Statement::Directive(_)
        | Statement::Expression(_) => Vec::new(),
    }
}

/// Returns the expressions directly owned by `stmt` (not those of nested
/// statements). An `if` yields the test of every link in its chain.
pub(crate) fn statement_expressions(stmt: &Statement) -> Vec<&Expression> {
    match stmt {
        Statement::If(if_stmt) => if_chain(if_stmt).into_iter().map(|l| &l.test).collect(),
        Statement::While(s) => vec![&s.test],
        Statement::For(s) => vec![&s.test],
        Statement::Loop(s) => s.test.iter().collect(),
        Statement::Return(s) => s.value.iter().collect(),
        Statement::Expression(s) => vec![&s.expression],
        Statement::Class(_)
        | Statement::Function(_)
        | Statement::Break(_)
        | Statement::Continue(_)
        | Statement::Hotkey(_)
        | Statement::Directive(_) => Vec::new(),
    }
}

/// Calls `f` once for each statement sequence in the program, outermost
/// first.
pub(crate) fn for_each_statement_list<F>(program: &Program, mut f: F)
where
    F: FnMut(&[Statement]),
{
    fn visit<F: FnMut(&[Statement])>(list: &[Statement], f: &mut F) {
        f(list);
        for stmt in list {
            for child in child_lists(stmt) {
                visit(child, f);
            }
        }
    }
    visit(&program.body, &mut f);
}

/// Recursively walks statements in pre-order, calling `f` on every one.
pub(crate) fn walk_statements<F>(statements: &[Statement], f: &mut F)
where
    F: FnMut(&Statement),
{
    for stmt in statements {
        f(stmt);
        for child in child_lists(stmt) {
            walk_statements(child, f);
        }
    }
}

// ── Expression walker ─────────────────────────────────────────────────────────

/// Recursively walks an expression tree in pre-order, calling `f` on every node.
pub(crate) fn walk_expression<F>(expr: &Expression, f: &mut F)
where
    F: FnMut(&Expression),
{
    f(expr);
    match expr {
        Expression::Binary(e) => {
            walk_expression(&e.left, f);
            walk_expression(&e.right, f);
        }
        Expression::Unary(e) => walk_expression(&e.argument, f),
        Expression::Call(e) => {
            walk_expression(&e.callee, f);
            for arg in &e.arguments {
                walk_expression(arg, f);
            }
        }
        Expression::Member(e) => walk_expression(&e.object, f),
        Expression::Assignment(e) => {
            walk_expression(&e.left, f);
            walk_expression(&e.right, f);
        }
        // Leaf nodes.
        Expression::Identifier(_) | Expression::Literal(_) => {}
    }
}

/// Walks every expression of every statement in the program (pre-order).
pub(crate) fn walk_program<F>(program: &Program, f: &mut F)
where
    F: FnMut(&Expression),
{
    walk_statements(&program.body, &mut |stmt| {
        for expr in statement_expressions(stmt) {
            walk_expression(expr, f);
        }
    });
}
