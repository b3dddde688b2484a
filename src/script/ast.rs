// AST definitions for the visualization script language

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x
    Not, // !x
}

/// Postfix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOp {
    Inc, // x++
    Dec, // x--
}

/// A parsed script: a flat statement list executed top to bottom.
#[derive(Debug, Clone)]
pub struct Script {
    pub statements: Vec<Node>,
}

/// AST nodes representing statements and expressions
#[derive(Debug, Clone)]
pub enum Node {
    // Statements
    Let {
        name: String,
        init: Box<Node>,
        location: SourceLocation,
    },
    Assignment {
        name: String,
        rhs: Box<Node>,
        location: SourceLocation,
    },
    CompoundAssignment {
        name: String,
        op: BinOp,
        rhs: Box<Node>,
        location: SourceLocation,
    },
    If {
        condition: Box<Node>,
        then_branch: Vec<Node>,
        else_branch: Option<Vec<Node>>,
        location: SourceLocation,
    },
    While {
        condition: Box<Node>,
        body: Vec<Node>,
        location: SourceLocation,
    },
    For {
        init: Option<Box<Node>>,
        condition: Option<Box<Node>>,
        step: Option<Box<Node>>,
        body: Vec<Node>,
        location: SourceLocation,
    },
    Break {
        location: SourceLocation,
    },
    Continue {
        location: SourceLocation,
    },
    Return {
        location: SourceLocation,
    },
    ExpressionStatement {
        expr: Box<Node>,
        location: SourceLocation,
    },

    // Expressions
    IntLiteral(i64, SourceLocation),
    StrLiteral(String, SourceLocation),
    BoolLiteral(bool, SourceLocation),
    Variable(String, SourceLocation),
    BinaryOp {
        op: BinOp,
        left: Box<Node>,
        right: Box<Node>,
        location: SourceLocation,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<Node>,
        location: SourceLocation,
    },
    Postfix {
        name: String,
        op: PostfixOp,
        location: SourceLocation,
    },
    Call {
        name: String,
        args: Vec<Node>,
        location: SourceLocation,
    },
    Index {
        name: String,
        index: Box<Node>,
        location: SourceLocation,
    },
}

impl Node {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Node::Let { location, .. }
            | Node::Assignment { location, .. }
            | Node::CompoundAssignment { location, .. }
            | Node::If { location, .. }
            | Node::While { location, .. }
            | Node::For { location, .. }
            | Node::Break { location }
            | Node::Continue { location }
            | Node::Return { location }
            | Node::ExpressionStatement { location, .. }
            | Node::BinaryOp { location, .. }
            | Node::UnaryOp { location, .. }
            | Node::Postfix { location, .. }
            | Node::Call { location, .. }
            | Node::Index { location, .. } => *location,
            Node::IntLiteral(_, location)
            | Node::StrLiteral(_, location)
            | Node::BoolLiteral(_, location)
            | Node::Variable(_, location) => *location,
        }
    }
}
