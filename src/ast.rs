// program    ::= top_level+
// top_level  ::= ['export'] 'type' ID ['(' param (',' param)* ')'] '=' expr [';']
//              | '#' '[' ID ']' block
//              | 'import' '{' ID (',' ID)* '}' 'from' STRING [';']
// param      ::= ID [':' expr]
// block      ::= ':' '{' statement+ '}'
// statement  ::= 'let' ID '=' expr [';']
//              | 'AssertEqual' '(' expr ',' expr ')' [';']
//              | expr [';']
// expr       ::= expr '=' expr
//              | expr binop expr
//              | ('-' | '+' | '!') expr
//              | expr '.' ID
//              | expr '[' expr ']'
//              | expr '(' [expr (',' expr)*] ')'
//              | lambda
//              | block
//              | 'if' expr 'then' expr 'else' expr
//              | 'match' expr '{' arm (',' arm)* '}'
//              | 'infer' ID ['extends' expr]
//              | '`' (text | '${' expr '}')* '`'
//              | '{' [property ((',' | ';') property)* [',' | ';']] '}'
//              | '{' '[' ID 'in' expr ['as' expr] ']' ['?'] ':' expr '}'
//              | '[' [expr (',' expr)*] ']'
//              | '(' expr ')'
//              | ID | NUMBER | STRING | 'number' | 'string'
// lambda     ::= (ID | '(' ')' | '(' param (',' param)* ')') '=>' expr
// arm        ::= expr '->' expr
// property   ::= (ID | '[' expr ']') ['?'] ':' expr

// Precedence
//
// . [] ()
// - + ! (prefix)
// * / % ** | &
// + -
// < <= > >=
// == !=
// &&
// ||
// =

use crate::token::Position;

#[derive(Debug, PartialEq)]
pub struct Program {
    pub body: Vec<TopLevel>,
}

#[derive(Debug, PartialEq)]
pub enum TopLevel {
    Definition(Definition),
    Section(Section),
    Import(ImportStatement),
}

/// `type name(params) = body`. A definition with parameters is a function.
#[derive(Debug, PartialEq)]
pub struct Definition {
    pub name: Box<str>,
    pub params: Vec<Param>,
    pub body: Expr,
    pub exported: bool,
    pub pos: Position,
}

#[derive(Debug, PartialEq)]
pub struct Param {
    pub name: Box<str>,
    /// Optional bound, as in `(a: number) => a`.
    pub bound: Option<Expr>,
    pub pos: Position,
}

/// A named group of statements, usually assertions: `#[name] :{ ... }`.
#[derive(Debug, PartialEq)]
pub struct Section {
    pub name: Box<str>,
    pub body: Vec<Statement>,
    pub pos: Position,
}

#[derive(Debug, PartialEq)]
pub struct ImportStatement {
    pub symbols: Vec<Box<str>>,
    pub source: Box<str>,
    pub pos: Position,
}

#[derive(Debug, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub pos: Position,
}

#[derive(Debug, PartialEq)]
pub enum StatementKind {
    VariableDeclaration { name: Box<str>, value: Expr },
    AssertEqual { left: Expr, right: Expr },
    Expression(Expr),
}

#[derive(Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Position,
}

#[derive(Debug, PartialEq)]
pub enum ExprKind {
    Assignment {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Binary {
        op: BinaryOperator,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Logical {
        op: LogicalOperator,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnaryOperator,
        expr: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Member {
        object: Box<Expr>,
        property: Property,
    },
    Lambda(Lambda),
    Block {
        body: Vec<Statement>,
    },
    Match {
        scrutinee: Box<Expr>,
        arms: Vec<MatchArm>,
    },
    TemplateString {
        parts: Vec<TemplatePart>,
    },
    Object {
        properties: Vec<ObjectProperty>,
    },
    MappedType {
        key: Box<str>,
        union: Box<Expr>,
        alias: Option<Box<Expr>>,
        optional: bool,
        value: Box<Expr>,
    },
    Tuple {
        elements: Vec<Expr>,
    },
    /// A pattern variable, `infer Name [extends Bound]`.
    InferredVariable {
        name: Box<str>,
        bound: Option<Box<Expr>>,
    },
    Identifier(Box<str>),
    /// Holds the digits as written; numeric literal types have no size limit.
    Number(Box<str>),
    /// Holds the string contents, without quotes.
    String(Box<str>),
    NumberKeyword,
    StringKeyword,
}

#[derive(Debug, PartialEq)]
pub struct Lambda {
    pub params: Vec<Param>,
    pub body: Box<Expr>,
}

#[derive(Debug, PartialEq)]
pub enum Property {
    /// `object.name`
    Named(Box<str>),
    /// `object[expr]`
    Computed(Box<Expr>),
}

#[derive(Debug, PartialEq)]
pub struct MatchArm {
    pub pattern: Expr,
    pub expression: Expr,
    pub pos: Position,
}

#[derive(Debug, PartialEq)]
pub enum TemplatePart {
    Text(Box<str>),
    Expr(Expr),
}

#[derive(Debug, PartialEq)]
pub struct ObjectProperty {
    pub key: PropertyKey,
    pub optional: bool,
    pub value: Expr,
    pub pos: Position,
}

#[derive(Debug, PartialEq)]
pub enum PropertyKey {
    Named(Box<str>),
    Computed(Expr),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Mod,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    NotEq,
    Union,
    Intersection,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    Plus,
    Not,
}

impl Definition {
    pub fn is_function(&self) -> bool {
        !self.params.is_empty()
    }
}
