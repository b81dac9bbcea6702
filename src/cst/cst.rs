use std::fmt::Display;

use crate::Span;

/// Grammar rules a parse tree node can match.
///
/// The child layout of each rule is listed next to it; `?` marks an optional
/// child and `*` a repeated one.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Rule {
    // Statements
    Program,            // stmt*
    Block,              // stmt*
    VarDecl,            // Type Identifier expr
    Assign,             // Identifier expr
    CompoundAssign,     // Identifier Operator expr
    ArrayElementAssign, // Index expr
    ExpressionStmt,     // expr
    Print,              // expr
    While,              // expr Block
    If,                 // expr Block ElseIf* Else?
    ElseIf,             // expr Block
    Else,               // Block
    For,                // VarDecl expr stmt Block
    ForEach,            // Type Identifier expr Block
    FunctionDecl,       // Type Identifier Params Block
    Params,             // Param*
    Param,              // Type Identifier
    Return,             // expr
    ShortReturn,        //
    Break,              //

    // Types
    Type,      // leaf: int, float, double, bool, string, void, any
    ArrayType, // Type | ArrayType

    // Expressions
    Binary,        // expr Operator expr
    Unary,         // Operator expr
    PreIncrement,  // Operator Identifier
    PostIncrement, // Identifier Operator
    Call,          // expr Args
    Args,          // expr*
    Index,         // expr expr
    ArrayLiteral,  // (Type | ArrayType) expr
    Typecast,      // (Type | ArrayType) expr
    Identifier,    // leaf
    IntLiteral,    // leaf
    FloatLiteral,  // leaf
    DoubleLiteral, // leaf
    StringLiteral, // leaf, quotes and escapes included
    BoolLiteral,   // leaf
    Operator,      // leaf
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub rule: Rule,
    /// The exact source text matched by this node.
    pub text: String,
    pub span: Span,
    pub children: Vec<Node>,
}

impl Node {
    pub fn child(&self, index: usize) -> &Node {
        &self.children[index]
    }

    pub fn children_of(&self, rule: Rule) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(move |child| child.rule == rule)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Renders the tree as an indented outline, one node per line.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        if self.is_leaf() {
            out.push_str(&format!("{} `{}`\n", self.rule, self.text));
        } else {
            out.push_str(&format!("{}\n", self.rule));
        }

        for child in &self.children {
            child.write_outline(out, depth + 1);
        }
    }
}
