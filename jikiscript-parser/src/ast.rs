// JikiScript AST Definitions
// Abstract Syntax Tree nodes with source preservation

/// Source position information for AST nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Placeholder span for synthesised nodes (host-driven calls, defaults)
    pub fn empty() -> Self {
        Self::new(0, 0, 1, 1)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Top-level program containing all statements in document order
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    Set(SetStatement),
    Change(ChangeStatement),
    If(IfStatement),
    Repeat(RepeatStatement),
    FunctionDefinition(FunctionDefinition),
    Return(ReturnStatement),
    Expression(Expression),
}

impl StatementKind {
    /// Short statement-kind label used in interpreter metadata
    pub fn label(&self) -> &'static str {
        match self {
            StatementKind::Set(_) => "set",
            StatementKind::Change(_) => "change",
            StatementKind::If(_) => "if",
            StatementKind::Repeat(_) => "repeat",
            StatementKind::FunctionDefinition(_) => "function",
            StatementKind::Return(_) => "return",
            StatementKind::Expression(_) => "expression",
        }
    }
}

/// `set <name> to <expression>`
#[derive(Debug, Clone, PartialEq)]
pub struct SetStatement {
    pub name: Identifier,
    pub value: Expression,
    pub span: Span,
}

/// `change <name> to <expression>` — requires an existing binding
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeStatement {
    pub name: Identifier,
    pub value: Expression,
    pub span: Span,
}

/// `if <expression> do ... [else do ...] end`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_body: Vec<Statement>,
    pub else_body: Option<Vec<Statement>>,
    pub span: Span,
}

/// `repeat <expression> times do ... end`
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStatement {
    pub count: Expression,
    pub body: Vec<Statement>,
    pub span: Span,
}

/// `function <name> [with a, b] do ... end`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub name: Identifier,
    pub parameters: Vec<Identifier>,
    pub body: Vec<Statement>,
    pub span: Span,
}

impl FunctionDefinition {
    /// Number of parameters; hosts validate test-case argument counts
    /// against this before invoking tests.
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

/// `return [<expression>]` — a bare `return` exits with no value
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Number(f64),
    String(String),
    Boolean(bool),
    List(Vec<Expression>),
    Identifier(Identifier),
    Binary(BinaryOperation),
    Unary(UnaryOperation),
    Call(FunctionCall),
    MemberAccess(MemberAccess),
    MethodCall(MethodCall),
    Index(IndexOperation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    LogicalAnd,
    LogicalOr,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::LogicalAnd => "and",
            BinaryOperator::LogicalOr => "or",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Minus,
    Not,
}

impl UnaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "not",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperation {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperation {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
    pub span: Span,
}

/// `name(arguments)` — call to a context-registered or user-defined function
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: Identifier,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

/// `object.member` — native-bridge getter access
#[derive(Debug, Clone, PartialEq)]
pub struct MemberAccess {
    pub object: Box<Expression>,
    pub member: Identifier,
    pub span: Span,
}

/// `object.method(arguments)` — native-bridge method call
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub object: Box<Expression>,
    pub method: Identifier,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

/// `list[index]` — 1-based list indexing
#[derive(Debug, Clone, PartialEq)]
pub struct IndexOperation {
    pub object: Box<Expression>,
    pub index: Box<Expression>,
    pub span: Span,
}

/// Literal values produced by the literal-only grammar.
///
/// Test-case `args`/`expected` text is parsed into these, never evaluated
/// as code. The main grammar's literal expressions share the same shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
    Boolean(bool),
    List(Vec<Literal>),
}
