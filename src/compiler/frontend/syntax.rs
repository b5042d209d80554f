pub mod intern;
pub mod name;
pub mod operator;

use crate::compiler::utils::interner::Interned;
use crate::compiler::utils::mangle::Mangler;
use intern::{Keyword, Nil, Symbol};
use name::QualifiedName;
use operator::{ArithmeticOperator, BinaryOperator, UnaryOperator};
use std::fmt;

/// The analyzed program.
///
/// Every form the analyzer accepts turns into exactly one `Node`. Scalars that
/// are interned share their instance with every other occurrence of the same
/// value that went through the same session.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Nil(Interned<Nil>),
    Boolean(Interned<bool>),
    Integer(Interned<i64>),
    Rational(i64, i64),
    Decimal(f64),
    String(Interned<String>),
    Keyword(Interned<Keyword>),
    Symbol(Interned<Symbol>),
    Vector(Vec<Node>),
    Map(Vec<(Node, Node)>),
    Set(Vec<Node>),
    List(Vec<Node>),
    Variable(Variable),
    Definition(Definition),
    Conditional(Conditional),
    Lambda(Lambda),
    Block(Block),
    Loop(Loop),
    RecursionPoint(RecursionPoint),
    ExceptionHandler(ExceptionHandler),
    Exception(Exception),
    ClassInstantiation(ClassInstantiation),
    MethodResolution(MethodResolution),
    PropertyResolution(PropertyResolution),
    Assignment(Assignment),
    Application(Application),
    BinaryOperator(BinaryOperation),
    UnaryOperator(UnaryOperation),
    ArithmeticOperator(ArithmeticOperation),
    MacroDefinition(MacroDefinition),
    TypeDefinition(TypeDefinition),
    ProtocolDefinition(ProtocolDefinition),
}

/// Discriminant of `Node`, used to describe what a backend can or cannot emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Nil,
    Boolean,
    Integer,
    Rational,
    Decimal,
    String,
    Keyword,
    Symbol,
    Vector,
    Map,
    Set,
    List,
    Variable,
    Definition,
    Conditional,
    Lambda,
    Block,
    Loop,
    RecursionPoint,
    ExceptionHandler,
    Exception,
    ClassInstantiation,
    MethodResolution,
    PropertyResolution,
    Assignment,
    Application,
    BinaryOperator,
    UnaryOperator,
    ArithmeticOperator,
    MacroDefinition,
    TypeDefinition,
    TypeMethod,
    ProtocolDefinition,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nil => "nil",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Rational => "rational",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::Keyword => "keyword",
            Self::Symbol => "symbol",
            Self::Vector => "vector",
            Self::Map => "map",
            Self::Set => "set",
            Self::List => "list",
            Self::Variable => "variable",
            Self::Definition => "definition",
            Self::Conditional => "conditional",
            Self::Lambda => "lambda",
            Self::Block => "block",
            Self::Loop => "loop",
            Self::RecursionPoint => "recursion point",
            Self::ExceptionHandler => "exception handler",
            Self::Exception => "exception",
            Self::ClassInstantiation => "class instantiation",
            Self::MethodResolution => "method resolution",
            Self::PropertyResolution => "property resolution",
            Self::Assignment => "assignment",
            Self::Application => "application",
            Self::BinaryOperator => "binary operator",
            Self::UnaryOperator => "unary operator",
            Self::ArithmeticOperator => "arithmetic operator",
            Self::MacroDefinition => "macro definition",
            Self::TypeDefinition => "type definition",
            Self::TypeMethod => "type method",
            Self::ProtocolDefinition => "protocol definition",
        };
        f.write_str(name)
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Nil(_) => NodeKind::Nil,
            Self::Boolean(_) => NodeKind::Boolean,
            Self::Integer(_) => NodeKind::Integer,
            Self::Rational(_, _) => NodeKind::Rational,
            Self::Decimal(_) => NodeKind::Decimal,
            Self::String(_) => NodeKind::String,
            Self::Keyword(_) => NodeKind::Keyword,
            Self::Symbol(_) => NodeKind::Symbol,
            Self::Vector(_) => NodeKind::Vector,
            Self::Map(_) => NodeKind::Map,
            Self::Set(_) => NodeKind::Set,
            Self::List(_) => NodeKind::List,
            Self::Variable(_) => NodeKind::Variable,
            Self::Definition(_) => NodeKind::Definition,
            Self::Conditional(_) => NodeKind::Conditional,
            Self::Lambda(_) => NodeKind::Lambda,
            Self::Block(_) => NodeKind::Block,
            Self::Loop(_) => NodeKind::Loop,
            Self::RecursionPoint(_) => NodeKind::RecursionPoint,
            Self::ExceptionHandler(_) => NodeKind::ExceptionHandler,
            Self::Exception(_) => NodeKind::Exception,
            Self::ClassInstantiation(_) => NodeKind::ClassInstantiation,
            Self::MethodResolution(_) => NodeKind::MethodResolution,
            Self::PropertyResolution(_) => NodeKind::PropertyResolution,
            Self::Assignment(_) => NodeKind::Assignment,
            Self::Application(_) => NodeKind::Application,
            Self::BinaryOperator(_) => NodeKind::BinaryOperator,
            Self::UnaryOperator(_) => NodeKind::UnaryOperator,
            Self::ArithmeticOperator(_) => NodeKind::ArithmeticOperator,
            Self::MacroDefinition(_) => NodeKind::MacroDefinition,
            Self::TypeDefinition(_) => NodeKind::TypeDefinition,
            Self::ProtocolDefinition(_) => NodeKind::ProtocolDefinition,
        }
    }

    /// Whether the node produces a value. Throwing and re-entering a loop
    /// transfer control instead, so they can't follow a `return`.
    pub fn is_returnable(&self) -> bool {
        !matches!(self, Self::Exception(_) | Self::RecursionPoint(_))
    }

    /// Flag an application that appears in tail position.
    pub fn in_tail_position(self) -> Node {
        match self {
            Self::Application(mut app) => {
                app.tail = true;
                Self::Application(app)
            }
            other => other,
        }
    }

    pub fn is_tail_application(&self) -> bool {
        matches!(self, Self::Application(app) if app.tail)
    }

    /// Whether a `recur` in this node re-enters the enclosing recursion point.
    /// Loop bodies and nested functions are recursion points of their own.
    pub fn recurs(&self) -> bool {
        fn any(nodes: &[Node]) -> bool {
            nodes.iter().any(Node::recurs)
        }

        match self {
            Self::RecursionPoint(_) => true,
            Self::Vector(nodes) | Self::Set(nodes) | Self::List(nodes) => any(nodes),
            Self::Map(entries) => entries.iter().any(|(k, v)| k.recurs() || v.recurs()),
            Self::Definition(definition) => definition.value.recurs(),
            Self::Conditional(conditional) => {
                conditional
                    .branches
                    .iter()
                    .any(|(test, consequent)| test.recurs() || consequent.recurs())
                    || conditional.default.recurs()
            }
            Self::Block(block) => block.recurs(),
            Self::Loop(lp) => lp.bindings.iter().any(|(_, init)| init.recurs()),
            Self::ExceptionHandler(handler) => {
                handler.body.recurs()
                    || handler.catch.as_ref().map_or(false, |c| c.body.recurs())
                    || handler.finally.as_ref().map_or(false, Block::recurs)
            }
            Self::Exception(exception) => exception.expression.recurs(),
            Self::ClassInstantiation(new) => new.class.recurs() || any(&new.args),
            Self::MethodResolution(res) => res.object.recurs() || any(&res.args),
            Self::PropertyResolution(res) => res.object.recurs(),
            Self::Assignment(assignment) => {
                assignment.target.recurs() || assignment.value.recurs()
            }
            Self::Application(app) => app.invocable.recurs() || any(&app.args),
            Self::BinaryOperator(op) => op.left.recurs() || op.right.recurs(),
            Self::UnaryOperator(op) => op.operand.recurs(),
            Self::ArithmeticOperator(op) => any(&op.args),
            Self::Nil(_)
            | Self::Boolean(_)
            | Self::Integer(_)
            | Self::Rational(_, _)
            | Self::Decimal(_)
            | Self::String(_)
            | Self::Keyword(_)
            | Self::Symbol(_)
            | Self::Variable(_)
            | Self::Lambda(_)
            | Self::MacroDefinition(_)
            | Self::TypeDefinition(_)
            | Self::ProtocolDefinition(_) => false,
        }
    }
}

/// A reference to a binding. Namespace and name are already mangled for the
/// target the session compiles to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    pub namespace: Option<String>,
    pub name: String,
}

impl Variable {
    pub fn new<N: Into<String>>(namespace: Option<String>, name: N) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }

    pub fn mangled(name: &QualifiedName, mangler: &Mangler) -> Self {
        Self {
            namespace: name.namespace.as_deref().map(|ns| mangler.mangle(ns)),
            name: mangler.mangle(&name.name),
        }
    }

    /// Namespace segments, which are separated by `.`.
    pub fn namespace_segments(&self) -> Vec<&str> {
        self.namespace
            .as_deref()
            .map(|ns| ns.split('.').collect())
            .unwrap_or_default()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}", ns, self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: Variable,
    pub value: Box<Node>,
}

/// `cond` and `if` in one shape: ordered predicate/consequent pairs and a
/// default that is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub branches: Vec<(Node, Node)>,
    pub default: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Params {
    pub fixed: Vec<Variable>,
    pub rest: Option<Variable>,
}

impl Params {
    pub fn is_variadic(&self) -> bool {
        self.rest.is_some()
    }

    pub fn required(&self) -> usize {
        self.fixed.len()
    }

    pub fn accepts(&self, count: usize) -> bool {
        if self.is_variadic() {
            count >= self.required()
        } else {
            count == self.required()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaClause {
    pub params: Params,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lambda {
    Single(LambdaClause),
    Multi(Vec<LambdaClause>),
}

impl Lambda {
    pub fn clauses(&self) -> &[LambdaClause] {
        match self {
            Self::Single(clause) => std::slice::from_ref(clause),
            Self::Multi(clauses) => clauses,
        }
    }

    /// The clause that accepts `count` arguments. Fixed clauses win over a
    /// variadic one.
    pub fn clause_for(&self, count: usize) -> Option<&LambdaClause> {
        let clauses = self.clauses();
        clauses
            .iter()
            .find(|c| !c.params.is_variadic() && c.params.accepts(count))
            .or_else(|| clauses.iter().find(|c| c.params.accepts(count)))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub expressions: Vec<Node>,
}

impl Block {
    pub fn new(expressions: Vec<Node>) -> Self {
        Self { expressions }
    }

    /// Expressions evaluated for their effect only.
    pub fn effects(&self) -> &[Node] {
        match self.expressions.split_last() {
            Some((_, init)) => init,
            None => &[],
        }
    }

    /// The expression whose value the block evaluates to.
    pub fn result(&self) -> Option<&Node> {
        self.expressions.last()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    pub fn recurs(&self) -> bool {
        self.expressions.iter().any(Node::recurs)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    pub bindings: Vec<(Variable, Node)>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecursionPoint {
    pub args: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub binding: Variable,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExceptionHandler {
    pub body: Block,
    pub catch: Option<CatchClause>,
    pub finally: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exception {
    pub expression: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassInstantiation {
    pub class: Box<Node>,
    pub args: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodResolution {
    pub object: Box<Node>,
    pub method: Variable,
    pub args: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyResolution {
    pub object: Box<Node>,
    pub property: Variable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: Box<Node>,
    pub value: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub invocable: Box<Node>,
    pub args: Vec<Node>,
    pub tail: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperation {
    pub operator: BinaryOperator,
    pub left: Box<Node>,
    pub right: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperation {
    pub operator: UnaryOperator,
    pub operand: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticOperation {
    pub operator: ArithmeticOperator,
    pub args: Vec<Node>,
}

/// A macro as analyzed. The name stays unmangled since macros are looked up
/// by the raw head symbol of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroDefinition {
    pub name: QualifiedName,
    pub function: Lambda,
}

/// A method body. The receiver is implicit and not part of `params`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMethod {
    pub name: Variable,
    pub params: Params,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    pub name: Variable,
    pub attributes: Vec<Variable>,
    pub protocols: Vec<Variable>,
    pub methods: Vec<TypeMethod>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolDefinition {
    pub name: Variable,
    pub protocols: Vec<Variable>,
    pub methods: Vec<TypeMethod>,
}
