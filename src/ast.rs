use regex::Regex;

/// A complete pawk program: optional BEGIN, one body rule, optional END.
///
/// `rule` is `None` only when the program consists of BEGIN and/or END
/// blocks alone.
#[derive(Debug, Clone)]
pub struct Program {
    pub begin: Option<Action>,
    pub rule: Option<Rule>,
    pub end: Option<Action>,
}

impl Program {
    pub fn new() -> Self {
        Self {
            begin: None,
            rule: None,
            end: None,
        }
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

/// A pattern-action rule
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: Pattern,
    pub action: Action,
}

/// Predicate evaluated once per record
#[derive(Debug, Clone)]
pub enum Pattern {
    /// No pattern: every record matches
    Always,
    /// /regex/ - unanchored search against the whole record
    Regex(Regex),
    /// NR==n
    LineNumber(i64),
}

/// An ordered list of statements
#[derive(Debug, Clone, Default)]
pub struct Action {
    pub statements: Vec<Stmt>,
}

impl Action {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }

    /// The action a rule gets when its source omits `{ ... }`
    pub fn print_record() -> Self {
        Self::new(vec![Stmt::Print { fields: Vec::new() }])
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// Statement types
#[derive(Debug, Clone)]
pub enum Stmt {
    /// print [ref, ref, ...]; an empty list prints the whole record
    Print { fields: Vec<FieldRef> },

    /// var op= expr, stored as var = var op expr
    Assign { var: String, value: Expr },
}

/// An argument of a print statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRef {
    /// $n, with $0 meaning the whole record
    Field(usize),
    /// Bare variable name
    Var(String),
}

/// Expression types
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Field access: $n
    Field(usize),

    /// Variable reference
    Var(String),

    /// Binary operation
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
}

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// The compound-assignment spelling of this operator (`+=`, ...)
    pub fn assign_token(self) -> &'static str {
        match self {
            BinaryOp::Add => "+=",
            BinaryOp::Sub => "-=",
            BinaryOp::Mul => "*=",
            BinaryOp::Div => "/=",
        }
    }
}
