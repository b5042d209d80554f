/// Generate ruby from the analyzed program.
///
/// Ruby is expression oriented, so most nodes map directly. Namespaces become
/// nested modules and namespaced definitions become module attributes.
/// Loops, recursion points, exception handlers and type definitions have no
/// lowering and fail with `Unsupported`.
use super::{
    arithmetic_token, binary_method, binary_token, constant_name, primitive, quote_string,
    unary_token,
};
use crate::compiler::backend::{self, CodeGenerator as Generator, Result, Target};
use crate::compiler::frontend::syntax::name::QualifiedName;
use crate::compiler::frontend::syntax::{
    Application, Block, Conditional, Definition, Lambda, LambdaClause, Node, Variable,
};

const ARGUMENTS: &str = "__arguments__";

#[derive(Debug, Default)]
pub struct CodeGenerator;

impl Generator for CodeGenerator {
    fn target(&self) -> Target {
        Target::Ruby
    }

    fn generate(&self, node: &Node) -> Result<String> {
        self.emit(node)
    }

    fn generate_lambda(&self, lambda: &Lambda) -> Result<String> {
        self.emit_lambda(lambda)
    }
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self
    }

    fn emit(&self, node: &Node) -> Result<String> {
        self.ensure_supported(node.kind())?;

        let text = match node {
            Node::Nil(_) => "nil".to_string(),
            Node::Boolean(b) => b.to_string(),
            Node::Integer(i) => emit_integer(**i),
            Node::Rational(n, d) => format!("Rational({}, {})", n, d),
            Node::Decimal(d) => emit_decimal(*d),
            Node::String(s) => quote_string(s),
            Node::Keyword(k) => emit_keyword(k.name()),
            Node::Symbol(s) => emit_symbol(s.name()),
            Node::Vector(elements) => format!("WS::Vector[{}]", self.emit_all(elements)?.join(", ")),
            Node::List(elements) => format!("WS::List[{}]", self.emit_all(elements)?.join(", ")),
            Node::Set(elements) => format!("WS::Set[{}]", self.emit_all(elements)?.join(", ")),
            Node::Map(entries) => {
                let mut pairs = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    pairs.push(format!("{} => {}", self.emit(key)?, self.emit(value)?));
                }
                format!("WS::Map[{}]", pairs.join(", "))
            }
            Node::Variable(variable) => emit_variable(variable),
            Node::Definition(definition) => self.emit_definition(definition)?,
            Node::Conditional(conditional) => self.emit_conditional(conditional)?,
            Node::Lambda(lambda) => self.emit_lambda(lambda)?,
            Node::Block(block) => format!("({})", self.emit_body(block)?),
            Node::Exception(exception) => format!("raise({})", self.emit(&exception.expression)?),
            Node::ClassInstantiation(new) => format!(
                "{}.new({})",
                self.emit(&new.class)?,
                self.emit_all(&new.args)?.join(", ")
            ),
            Node::MethodResolution(res) => format!(
                "{}.{}({})",
                self.emit(&res.object)?,
                res.method.name,
                self.emit_all(&res.args)?.join(", ")
            ),
            Node::PropertyResolution(res) => {
                format!("{}.{}", self.emit(&res.object)?, res.property.name)
            }
            Node::Assignment(assignment) => format!(
                "({} = {})",
                self.emit(&assignment.target)?,
                self.emit(&assignment.value)?
            ),
            Node::Application(application) => self.emit_application(application)?,
            Node::BinaryOperator(op) => {
                let left = self.emit(&op.left)?;
                let right = self.emit(&op.right)?;
                match (binary_token(op.operator), binary_method(op.operator)) {
                    (Some(token), _) => format!("({}{}{})", left, token, right),
                    (None, Some(method)) => format!("({}.{}({}))", left, method, right),
                    (None, None) => {
                        return Err(backend::error::Error::unsupported(node.kind(), Target::Ruby))
                    }
                }
            }
            Node::UnaryOperator(op) => {
                format!("({}{})", unary_token(op.operator), self.emit(&op.operand)?)
            }
            Node::ArithmeticOperator(op) => backend::arithmetic(
                op.operator,
                arithmetic_token(op.operator),
                self.emit_all(&op.args)?,
            ),
            Node::MacroDefinition(_) => String::new(),
            Node::Loop(_)
            | Node::RecursionPoint(_)
            | Node::ExceptionHandler(_)
            | Node::TypeDefinition(_)
            | Node::ProtocolDefinition(_) => {
                return Err(backend::error::Error::unsupported(node.kind(), Target::Ruby))
            }
        };

        Ok(text)
    }

    fn emit_all(&self, nodes: &[Node]) -> Result<Vec<String>> {
        nodes.iter().map(|n| self.emit(n)).collect()
    }

    fn emit_body(&self, block: &Block) -> Result<String> {
        let expressions: Vec<String> = self
            .emit_all(&block.expressions)?
            .into_iter()
            .filter(|e| !e.is_empty())
            .collect();

        if expressions.is_empty() {
            Ok("nil".to_string())
        } else {
            Ok(expressions.join("; "))
        }
    }

    /// Namespaced definitions open every module of the namespace, declare an
    /// accessor on the innermost one and assign through it.
    fn emit_definition(&self, definition: &Definition) -> Result<String> {
        let value = self.emit(&definition.value)?;
        let name = &definition.name;
        let segments = name.namespace_segments();

        if segments.is_empty() {
            return Ok(format!("{} = {}", name.name, value));
        }

        let mut statements = vec![];
        for depth in 1..=segments.len() {
            statements.push(format!("module {}; end", module_path(&segments[..depth])));
        }

        let module = module_path(&segments);
        statements.push(format!(
            "{}.singleton_class.attr_accessor(:{})",
            module, name.name
        ));
        statements.push(format!("{}.{} = {}", module, name.name, value));

        Ok(statements.join("; "))
    }

    fn emit_conditional(&self, conditional: &Conditional) -> Result<String> {
        let default = self.emit(&conditional.default)?;

        if conditional.branches.is_empty() {
            return Ok(format!("({})", default));
        }

        let mut branches = Vec::with_capacity(conditional.branches.len());
        for (test, consequent) in &conditional.branches {
            branches.push(format!("{} then {}", self.emit(test)?, self.emit(consequent)?));
        }

        Ok(format!(
            "(if {} else {} end)",
            branches.join(" elsif "),
            default
        ))
    }

    fn emit_lambda(&self, lambda: &Lambda) -> Result<String> {
        match lambda {
            Lambda::Single(clause) => self.emit_clause(clause),
            Lambda::Multi(clauses) => self.emit_dispatch(clauses),
        }
    }

    fn emit_clause(&self, clause: &LambdaClause) -> Result<String> {
        let mut params: Vec<String> = clause.params.fixed.iter().map(|p| p.name.clone()).collect();
        if let Some(rest) = &clause.params.rest {
            params.push(format!("*{}", rest.name));
        }

        let body = self.emit_body(&clause.body)?;

        if params.is_empty() {
            Ok(format!("lambda {{ {} }}", body))
        } else {
            Ok(format!("lambda {{ |{}| {} }}", params.join(", "), body))
        }
    }

    fn emit_dispatch(&self, clauses: &[LambdaClause]) -> Result<String> {
        let ordered = clauses
            .iter()
            .filter(|c| !c.params.is_variadic())
            .chain(clauses.iter().filter(|c| c.params.is_variadic()));

        let mut cases = vec![];
        for clause in ordered {
            let test = if clause.params.is_variadic() {
                format!("{}.length >= {}", ARGUMENTS, clause.params.required())
            } else {
                format!("{}.length == {}", ARGUMENTS, clause.params.required())
            };
            cases.push(format!(
                "{} then {}[*{}]",
                test,
                self.emit_clause(clause)?,
                ARGUMENTS
            ));
        }

        Ok(format!(
            "lambda {{ |*{0}| if {1} else raise(ArgumentError, \"wrong number of arguments, got: #{{{0}.length}}\") end }}",
            ARGUMENTS,
            cases.join(" elsif ")
        ))
    }

    fn emit_application(&self, application: &Application) -> Result<String> {
        let args = self.emit_all(&application.args)?;

        if let Node::Variable(Variable {
            namespace: None,
            name,
        }) = &*application.invocable
        {
            if let Some(inlined) = primitive(name, &args) {
                return Ok(inlined);
            }
        }

        Ok(format!(
            "{}[{}]",
            self.emit(&application.invocable)?,
            args.join(", ")
        ))
    }
}

fn emit_integer(value: i64) -> String {
    if value < 0 {
        format!("({})", value)
    } else {
        value.to_string()
    }
}

fn emit_decimal(value: f64) -> String {
    if value < 0.0 {
        format!("({:?})", value)
    } else {
        format!("{:?}", value)
    }
}

fn is_plain_symbol(name: &str) -> bool {
    let body = name
        .strip_suffix('?')
        .or_else(|| name.strip_suffix('!'))
        .unwrap_or(name);
    let mut chars = body.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn emit_keyword(name: &QualifiedName) -> String {
    if name.namespace.is_none() && is_plain_symbol(&name.name) {
        format!(":{}", name.name)
    } else {
        format!(":{}", quote_string(&name.to_string()))
    }
}

fn emit_symbol(name: &QualifiedName) -> String {
    match &name.namespace {
        Some(ns) => format!(
            "WS::Symbol.new({}, {})",
            quote_string(ns),
            quote_string(&name.name)
        ),
        None => format!("WS::Symbol.new(nil, {})", quote_string(&name.name)),
    }
}

fn module_path(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|s| constant_name(s))
        .collect::<Vec<_>>()
        .join("::")
}

pub fn emit_variable(variable: &Variable) -> String {
    let segments = variable.namespace_segments();

    if segments.is_empty() {
        variable.name.clone()
    } else {
        format!("{}.{}", module_path(&segments), variable.name)
    }
}
