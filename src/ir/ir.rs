use std::fmt::Display;

use crate::types::{
    entities::{EntityId, EntityTable},
    types::Type,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    /// Float and double literals, both held at runtime precision.
    Float(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Equals,
    NotEquals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementOp {
    Increment,
    Decrement,
}

impl NumericOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" | "+=" => Some(NumericOp::Add),
            "-" | "-=" => Some(NumericOp::Sub),
            "*" | "*=" => Some(NumericOp::Mul),
            "/" | "/=" => Some(NumericOp::Div),
            "%" => Some(NumericOp::Rem),
            "**" => Some(NumericOp::Pow),
            _ => None,
        }
    }
}

impl CmpOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "<" => Some(CmpOp::Less),
            "<=" => Some(CmpOp::LessEquals),
            ">" => Some(CmpOp::Greater),
            ">=" => Some(CmpOp::GreaterEquals),
            "==" => Some(CmpOp::Equals),
            "!=" => Some(CmpOp::NotEquals),
            _ => None,
        }
    }
}

impl Display for NumericOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            NumericOp::Add => "+",
            NumericOp::Sub => "-",
            NumericOp::Mul => "*",
            NumericOp::Div => "/",
            NumericOp::Rem => "%",
            NumericOp::Pow => "**",
        };
        write!(f, "{}", symbol)
    }
}

impl Display for LogicOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicOp::And => write!(f, "&&"),
            LogicOp::Or => write!(f, "||"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub ty: Type,
    pub kind: ExprKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Numeric {
        left: Box<Expr>,
        op: NumericOp,
        right: Box<Expr>,
    },
    NumericLiteral(Number),
    /// String concatenation.
    Str {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    StringLiteral(String),
    Boolean {
        left: Box<Expr>,
        op: LogicOp,
        right: Box<Expr>,
    },
    BooleanLiteral(bool),
    Comparison {
        left: Box<Expr>,
        op: CmpOp,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// A fresh array of `size` default elements.
    ArrayLiteral {
        size: Box<Expr>,
    },
    ArrayConcat {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Index {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    Identifier {
        entity: EntityId,
    },
    Call {
        callee: EntityId,
        args: Vec<Expr>,
    },
    /// Conversion to `ty`.
    Typecast {
        operand: Box<Expr>,
    },
    Increment {
        entity: EntityId,
        op: IncrementOp,
        prefix: bool,
    },
}

impl Expr {
    pub fn new(ty: Type, kind: ExprKind) -> Self {
        Expr { ty, kind }
    }

    pub fn int(value: i64) -> Self {
        Expr::new(Type::Int, ExprKind::NumericLiteral(Number::Int(value)))
    }

    pub fn string(value: &str) -> Self {
        Expr::new(Type::String, ExprKind::StringLiteral(String::from(value)))
    }

    pub fn boolean(value: bool) -> Self {
        Expr::new(Type::Bool, ExprKind::BooleanLiteral(value))
    }

    pub fn identifier(entity: EntityId, ty: Type) -> Self {
        Expr::new(ty, ExprKind::Identifier { entity })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseIf {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl {
        entity: EntityId,
        value: Expr,
    },
    Assign {
        target: EntityId,
        value: Expr,
    },
    CompoundAssign {
        target: EntityId,
        op: NumericOp,
        value: Expr,
    },
    ArrayElementAssign {
        array: Expr,
        index: Expr,
        value: Expr,
    },
    /// A call or increment evaluated for its effect.
    Expression(Expr),
    Print(Expr),
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    If {
        condition: Expr,
        body: Vec<Stmt>,
        else_ifs: Vec<ElseIf>,
        else_body: Option<Vec<Stmt>>,
    },
    For {
        init: Box<Stmt>,
        condition: Expr,
        step: Option<Box<Stmt>>,
        body: Vec<Stmt>,
    },
    ForEach {
        element: EntityId,
        collection: Expr,
        body: Vec<Stmt>,
    },
    FunctionDecl {
        function: EntityId,
        body: Vec<Stmt>,
    },
    Return(Expr),
    ReturnVoid,
    Break,
}

/// An analyzed program: its statements plus every entity they refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub entities: EntityTable,
}
