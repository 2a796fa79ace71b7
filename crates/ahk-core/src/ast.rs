// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree (AST) definitions for AutoHotkey v2.
//!
//! The AST represents the structure of a script after parsing. Every node
//! carries a [`Location`]: the byte [`Span`] it covers and the 1-based
//! [`Position`] of its first token.
//!
//! # Design Philosophy
//!
//! - **One type per node kind** - statements and expressions are sum types
//!   whose variants hold only the fields that kind needs
//! - **Owned tree** - nodes own their children, there are no back-references
//! - **Stable JSON shape** - every node serializes with a `type` tag plus
//!   `line`, `column`, `start` and `end`
//!
//! # Example
//!
//! ```ignore
//! // Source: x := 3 + 4
//! Program {
//!     body: vec![
//!         Statement::Expression(ExpressionStatement {
//!             expression: Expression::Assignment(AssignmentExpression {
//!                 left: Box::new(Expression::Identifier(Identifier { name: "x".into(), .. })),
//!                 operator: AssignmentOperator::Assign,
//!                 right: Box::new(Expression::Binary(BinaryExpression {
//!                     operator: BinaryOperator::Add,
//!                     ..
//!                 })),
//!                 ..
//!             }),
//!             ..
//!         }),
//!     ],
//!     ..
//! }
//! ```

use ecow::EcoString;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::source_analysis::{Position, Span, Token};

// ============================================================================
// Locations
// ============================================================================

/// Where a node sits in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    /// Byte range covered by the node.
    pub span: Span,
    /// Position of the node's first token.
    pub position: Position,
}

impl Location {
    /// Creates a location.
    #[must_use]
    pub const fn new(span: Span, position: Position) -> Self {
        Self { span, position }
    }

    /// Returns the location of a single token.
    #[must_use]
    pub fn of(token: &Token) -> Self {
        Self::new(token.span(), token.position())
    }

    /// Returns this location stretched to end where `end` ends.
    #[must_use]
    pub fn through(self, end: Span) -> Self {
        Self::new(self.span.merge(end), self.position)
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Location", 4)?;
        state.serialize_field("line", &self.position.line)?;
        state.serialize_field("column", &self.position.column)?;
        state.serialize_field("start", &self.span.start())?;
        state.serialize_field("end", &self.span.end())?;
        state.end()
    }
}

// ============================================================================
// Program and statements
// ============================================================================

/// Root of a parsed script.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "type")]
pub struct Program {
    /// Top-level statements in source order.
    pub body: Vec<Statement>,
    /// Always starts at line 1, column 1 and ends at the last token.
    #[serde(flatten)]
    pub location: Location,
}

impl Program {
    /// Creates a program.
    #[must_use]
    pub fn new(body: Vec<Statement>, location: Location) -> Self {
        Self { body, location }
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "type")]
pub enum Statement {
    /// `if test ... [elseif ...] [else ...]`
    #[serde(rename = "IfStatement")]
    If(IfStatement),
    /// `while test ...`
    #[serde(rename = "WhileStatement")]
    While(WhileStatement),
    /// `for [k, v in] test ...`
    #[serde(rename = "ForStatement")]
    For(ForStatement),
    /// `loop [test] ...`
    #[serde(rename = "LoopStatement")]
    Loop(LoopStatement),
    /// `class Name [extends Base] { ... }`
    #[serde(rename = "ClassDeclaration")]
    Class(ClassDeclaration),
    /// `[static] Name(params) { ... }`
    #[serde(rename = "FunctionDeclaration")]
    Function(FunctionDeclaration),
    /// `return [value]`
    #[serde(rename = "ReturnStatement")]
    Return(ReturnStatement),
    /// `break`
    #[serde(rename = "BreakStatement")]
    Break(BreakStatement),
    /// `continue`
    #[serde(rename = "ContinueStatement")]
    Continue(ContinueStatement),
    /// `trigger:: ...`
    #[serde(rename = "HotkeyStatement")]
    Hotkey(HotkeyStatement),
    /// `#Name raw text`
    #[serde(rename = "DirectiveStatement")]
    Directive(DirectiveStatement),
    /// Any expression used as a statement.
    #[serde(rename = "ExpressionStatement")]
    Expression(ExpressionStatement),
}

impl Statement {
    /// Returns the location of this statement.
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Self::If(s) => s.location,
            Self::While(s) => s.location,
            Self::For(s) => s.location,
            Self::Loop(s) => s.location,
            Self::Class(s) => s.location,
            Self::Function(s) => s.location,
            Self::Return(s) => s.location,
            Self::Break(s) => s.location,
            Self::Continue(s) => s.location,
            Self::Hotkey(s) => s.location,
            Self::Directive(s) => s.location,
            Self::Expression(s) => s.location,
        }
    }

    /// Returns the byte span of this statement.
    #[must_use]
    pub fn span(&self) -> Span {
        self.location().span
    }

    /// Returns the position of this statement's first token.
    #[must_use]
    pub fn position(&self) -> Position {
        self.location().position
    }

    /// Returns the serialized node type name, e.g. `"IfStatement"`.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::If(_) => "IfStatement",
            Self::While(_) => "WhileStatement",
            Self::For(_) => "ForStatement",
            Self::Loop(_) => "LoopStatement",
            Self::Class(_) => "ClassDeclaration",
            Self::Function(_) => "FunctionDeclaration",
            Self::Return(_) => "ReturnStatement",
            Self::Break(_) => "BreakStatement",
            Self::Continue(_) => "ContinueStatement",
            Self::Hotkey(_) => "HotkeyStatement",
            Self::Directive(_) => "DirectiveStatement",
            Self::Expression(_) => "ExpressionStatement",
        }
    }
}

/// An `if` statement; `elseif` chains nest through [`Alternate::ElseIf`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct IfStatement {
    pub test: Expression,
    pub consequent: Vec<Statement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate: Option<Alternate>,
    #[serde(flatten)]
    pub location: Location,
}

/// The branch taken when an `if` test fails.
#[derive(Debug, Clone, PartialEq)]
pub enum Alternate {
    /// `elseif test ...`
    ElseIf(Box<IfStatement>),
    /// `else ...`
    Else(Vec<Statement>),
}

impl Serialize for Alternate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        #[serde(tag = "type")]
        enum Tagged<'a> {
            IfStatement(&'a IfStatement),
        }

        match self {
            Self::ElseIf(stmt) => Tagged::IfStatement(stmt).serialize(serializer),
            Self::Else(body) => body.serialize(serializer),
        }
    }
}

/// A `while` loop.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WhileStatement {
    pub test: Expression,
    pub body: Vec<Statement>,
    #[serde(flatten)]
    pub location: Location,
}

/// A `for` loop.
///
/// `for k, v in obj` keeps the loop variables and uses `obj` as the test;
/// any other header is kept whole as the test.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ForStatement {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<Identifier>,
    pub test: Expression,
    pub body: Vec<Statement>,
    #[serde(flatten)]
    pub location: Location,
}

/// A `loop`, with an optional count or condition.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LoopStatement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<Expression>,
    pub body: Vec<Statement>,
    #[serde(flatten)]
    pub location: Location,
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ClassDeclaration {
    pub name: EcoString,
    #[serde(rename = "superClass", skip_serializing_if = "Option::is_none")]
    pub superclass: Option<EcoString>,
    pub body: Vec<Statement>,
    #[serde(flatten)]
    pub location: Location,
}

/// A function or method declaration.
///
/// The location starts at the name token, not at a leading `static`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FunctionDeclaration {
    pub name: EcoString,
    pub params: Vec<EcoString>,
    pub body: Vec<Statement>,
    #[serde(rename = "isStatic")]
    pub is_static: bool,
    #[serde(flatten)]
    pub location: Location,
}

/// A `return` statement.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ReturnStatement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Expression>,
    #[serde(flatten)]
    pub location: Location,
}

/// A `break` statement.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BreakStatement {
    #[serde(flatten)]
    pub location: Location,
}

/// A `continue` statement.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ContinueStatement {
    #[serde(flatten)]
    pub location: Location,
}

/// A hotkey or hotstring with the statements it runs.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HotkeyStatement {
    /// Full trigger text including the closing `::`, e.g. `"^j::"`.
    pub trigger: EcoString,
    pub body: Vec<Statement>,
    #[serde(flatten)]
    pub location: Location,
}

impl HotkeyStatement {
    /// Returns the key combination without `::`.
    #[must_use]
    pub fn keys(&self) -> &str {
        self.trigger.strip_suffix("::").unwrap_or(&self.trigger).trim()
    }
}

/// A `#` directive. The value is the raw rest of the line.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DirectiveStatement {
    /// The directive token text, e.g. `"#Requires"`.
    pub directive: EcoString,
    /// Everything after the directive up to end of line, trimmed.
    pub value: EcoString,
    #[serde(flatten)]
    pub location: Location,
}

/// An expression evaluated for its effect.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
    #[serde(flatten)]
    pub location: Location,
}

// ============================================================================
// Expressions
// ============================================================================

/// An expression.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "type")]
pub enum Expression {
    /// `left op right`
    #[serde(rename = "BinaryExpression")]
    Binary(BinaryExpression),
    /// `op argument`
    #[serde(rename = "UnaryExpression")]
    Unary(UnaryExpression),
    /// `callee(arguments)`
    #[serde(rename = "CallExpression")]
    Call(CallExpression),
    /// `object.property`
    #[serde(rename = "MemberExpression")]
    Member(MemberExpression),
    /// A variable, function or built-in variable name.
    Identifier(Identifier),
    /// A string, number, boolean or null literal.
    Literal(Literal),
    /// `left := right`
    #[serde(rename = "AssignmentExpression")]
    Assignment(AssignmentExpression),
}

impl Expression {
    /// Returns the location of this expression.
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Self::Binary(e) => e.location,
            Self::Unary(e) => e.location,
            Self::Call(e) => e.location,
            Self::Member(e) => e.location,
            Self::Identifier(e) => e.location,
            Self::Literal(e) => e.location,
            Self::Assignment(e) => e.location,
        }
    }

    /// Returns the byte span of this expression.
    #[must_use]
    pub fn span(&self) -> Span {
        self.location().span
    }

    /// Returns the position of this expression's first token.
    #[must_use]
    pub fn position(&self) -> Position {
        self.location().position
    }

    /// Returns the identifier name if this is a plain identifier.
    #[must_use]
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(ident) => Some(&ident.name),
            _ => None,
        }
    }
}

/// A binary operation.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BinaryExpression {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
    #[serde(flatten)]
    pub location: Location,
}

/// A prefix operation.
///
/// The location starts at the operator token.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub argument: Box<Expression>,
    #[serde(flatten)]
    pub location: Location,
}

/// A call.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    #[serde(flatten)]
    pub location: Location,
}

/// A member access.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MemberExpression {
    pub object: Box<Expression>,
    #[serde(serialize_with = "serialize_property")]
    pub property: Identifier,
    #[serde(flatten)]
    pub location: Location,
}

fn serialize_property<S: Serializer>(property: &Identifier, serializer: S) -> Result<S::Ok, S::Error> {
    #[derive(serde::Serialize)]
    #[serde(tag = "type")]
    enum Tagged<'a> {
        Identifier(&'a Identifier),
    }
    Tagged::Identifier(property).serialize(serializer)
}

/// A name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Identifier {
    pub name: EcoString,
    #[serde(flatten)]
    pub location: Location,
}

impl Identifier {
    /// Creates an identifier from its token.
    #[must_use]
    pub fn from_token(token: &Token) -> Self {
        Self {
            name: token.text().into(),
            location: Location::of(token),
        }
    }
}

/// A literal with its evaluated value and raw source text.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Literal {
    pub value: LiteralValue,
    pub raw: EcoString,
    #[serde(flatten)]
    pub location: Location,
}

/// The value of a literal.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    /// String contents without the surrounding quotes.
    String(EcoString),
    Number(f64),
    Boolean(bool),
    Null,
}

/// An assignment.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AssignmentExpression {
    pub left: Box<Expression>,
    pub operator: AssignmentOperator,
    pub right: Box<Expression>,
    #[serde(flatten)]
    pub location: Location,
}

// ============================================================================
// Operators
// ============================================================================

/// Binary operators, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Or,
    And,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    RegexMatch,
    RegexNotMatch,
    Is,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl BinaryOperator {
    /// Returns the canonical source spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Or => "or",
            Self::And => "and",
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::RegexMatch => "~=",
            Self::RegexNotMatch => "!~",
            Self::Is => "is",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "mod",
            Self::Power => "**",
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `not x`
    Not,
    /// `-x`
    Negate,
}

impl UnaryOperator {
    /// Returns the canonical source spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Not => "not",
            Self::Negate => "-",
        }
    }
}

/// Assignment operators. Only `:=` exists in v2 expression syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentOperator {
    Assign,
}

impl AssignmentOperator {
    /// Returns the canonical source spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => ":=",
        }
    }
}

macro_rules! serialize_as_str {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.as_str())
                }
            }

            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

serialize_as_str!(BinaryOperator, UnaryOperator, AssignmentOperator);
