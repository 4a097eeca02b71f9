// AST (Abstract Syntax Tree) definitions for the C++ subset

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

/// Declared variable types.
///
/// Only used to pick a default value, a `cin` conversion and integer
/// division; there is no static type checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Int,
    Float,
    Double,
    Char,
    Bool,
    String,
}

impl VarType {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "int" => Some(VarType::Int),
            "float" => Some(VarType::Float),
            "double" => Some(VarType::Double),
            "char" => Some(VarType::Char),
            "bool" => Some(VarType::Bool),
            "string" => Some(VarType::String),
            _ => None,
        }
    }

    pub fn is_floating(self) -> bool {
        matches!(self, VarType::Float | VarType::Double)
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
    IntDiv, // `/` with two integer operands
    // Relational
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    // Logical
    And,
    Or,
}

impl BinOp {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge | BinOp::Eq | BinOp::Ne
        )
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x
    Not, // !x
}

/// Expressions.
///
/// String and char literals keep their source text between the quotes,
/// escapes included, since both languages share the same escape syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    Float(String),
    Str(String),
    Char(String),
    Bool(bool),
    Var {
        name: String,
        ty: Option<VarType>, // declared type at the point of use
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn var(name: impl Into<String>, ty: Option<VarType>) -> Self {
        Expr::Var {
            name: name.into(),
            ty,
        }
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Best-effort static type of this expression, `None` when an operand is
    /// an undeclared variable.
    pub fn static_type(&self) -> Option<VarType> {
        match self {
            Expr::Int(_) => Some(VarType::Int),
            Expr::Float(_) => Some(VarType::Double),
            Expr::Str(_) => Some(VarType::String),
            Expr::Char(_) => Some(VarType::Char),
            Expr::Bool(_) => Some(VarType::Bool),
            Expr::Var { ty, .. } => *ty,
            Expr::Unary { op: UnOp::Not, .. } => Some(VarType::Bool),
            Expr::Unary { op: UnOp::Neg, operand } => operand.static_type(),
            Expr::Binary { op, left, right } => {
                if op.is_comparison() || matches!(op, BinOp::And | BinOp::Or) {
                    return Some(VarType::Bool);
                }
                let (l, r) = (left.static_type()?, right.static_type()?);
                if l.is_floating() || r.is_floating() {
                    Some(VarType::Double)
                } else if l == VarType::String || r == VarType::String {
                    Some(VarType::String)
                } else if l == VarType::Int && r == VarType::Int {
                    Some(VarType::Int)
                } else {
                    None
                }
            }
        }
    }
}

/// One operand of a `cout << ...` chain
#[derive(Debug, Clone, PartialEq)]
pub enum CoutItem {
    Expr(Expr),
    Endl,
}

/// Ordered statement list owned by a control construct or nested braces
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

impl Block {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Block { statements }
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl {
        ty: VarType,
        name: String,
        init: Option<Expr>,
    },
    Assign {
        target: String,
        value: Expr,
    },
    If {
        condition: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },
    While {
        condition: Expr,
        body: Block,
    },
    For {
        init: Box<Stmt>,
        condition: Expr,
        increment: Box<Stmt>,
        body: Block,
    },
    Cout {
        items: Vec<CoutItem>,
    },
    Cin {
        target: String,
        ty: Option<VarType>,
    },
    Return {
        value: Option<Expr>,
        location: SourceLocation,
    },
    Block(Block),
    Expr(Expr),
}

/// Top-level program: global declarations and the flattened body of `main`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
