/// Generate javascript from the analyzed program.
///
/// Expression-oriented constructs that have no expression form in javascript
/// (multi-way conditionals, loops, exception handlers, blocks) are compiled
/// into immediately invoked functions that are called with the current `this`.
///
/// Loops are trampolines: the body runs inside `while (true)` and `recur`
/// throws a recursion point carrying the new binding values. The loop catches
/// it, rebinds and runs the body again. Any other exception is rethrown.
/// Function bodies that `recur` are trampolines over their parameters, and a
/// user `catch` rethrows recursion points before running.
use super::{arithmetic_token, binary_token, primitive, quote_string, unary_token, RECURSION_POINT};
use crate::compiler::backend::{self, CodeGenerator as Generator, Result, Target};
use crate::compiler::frontend::syntax::name::QualifiedName;
use crate::compiler::frontend::syntax::{
    Application, Block, Conditional, Definition, ExceptionHandler, Lambda, LambdaClause, Loop,
    Node, NodeKind, Params, ProtocolDefinition, TypeDefinition, TypeMethod, Variable,
};

/// Where the generated text ends up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Context {
    /// A top level form. Like an expression, but statements may appear as is.
    TopLevel,
    Expression,
    Statement,
    /// The value of a function body.
    Return,
}

impl Context {
    fn wrap(&self, expression: String) -> String {
        match self {
            Self::TopLevel | Self::Expression => expression,
            Self::Statement => format!("{};", expression),
            Self::Return => format!("return {};", expression),
        }
    }
}

const CATCH_BINDING: &str = "__recursion_point__";
/// The arguments of a multi-arity function that recurs.
const ARGUMENTS: &str = "__arguments__";

#[derive(Debug, Default)]
pub struct CodeGenerator;

impl Generator for CodeGenerator {
    fn target(&self) -> Target {
        Target::JavaScript
    }

    fn generate(&self, node: &Node) -> Result<String> {
        self.emit(node, Context::TopLevel)
    }

    fn generate_lambda(&self, lambda: &Lambda) -> Result<String> {
        self.emit_lambda(lambda)
    }
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self
    }

    fn emit(&self, node: &Node, context: Context) -> Result<String> {
        self.ensure_supported(node.kind())?;

        match node {
            Node::Exception(exception) => {
                let value = self.emit(&exception.expression, Context::Expression)?;
                Ok(self.emit_throw(&value, context))
            }
            Node::RecursionPoint(point) => {
                let args = self.emit_all(&point.args)?;
                let value = format!("new {}([{}])", RECURSION_POINT, args.join(", "));
                Ok(self.emit_throw(&value, context))
            }
            Node::Definition(definition) => self.emit_definition(definition, context),
            Node::ProtocolDefinition(protocol) => {
                let value = self.emit_protocol(protocol)?;
                self.emit_binding_in(&protocol.name, value, context)
            }
            Node::MacroDefinition(_) => Ok(match context {
                Context::TopLevel | Context::Statement => String::new(),
                other => other.wrap("null".to_string()),
            }),
            other => Ok(context.wrap(self.emit_expression(other)?)),
        }
    }

    fn emit_expression(&self, node: &Node) -> Result<String> {
        let text = match node {
            Node::Nil(_) => "null".to_string(),
            Node::Boolean(b) => b.to_string(),
            Node::Integer(i) => emit_integer(**i),
            Node::Rational(n, d) => format!("({}/{})", emit_integer(*n), d),
            Node::Decimal(d) => emit_decimal(*d),
            Node::String(s) => quote_string(s),
            Node::Keyword(k) => format!("mori.keyword({})", emit_name(k.name())),
            Node::Symbol(s) => format!("mori.symbol({})", emit_name(s.name())),
            Node::Vector(elements) => format!("mori.vector({})", self.emit_all(elements)?.join(", ")),
            Node::List(elements) => format!("mori.list({})", self.emit_all(elements)?.join(", ")),
            Node::Set(elements) => format!("mori.set([{}])", self.emit_all(elements)?.join(", ")),
            Node::Map(entries) => {
                let mut flat = Vec::with_capacity(entries.len() * 2);
                for (key, value) in entries {
                    flat.push(self.emit(key, Context::Expression)?);
                    flat.push(self.emit(value, Context::Expression)?);
                }
                format!("mori.hashMap({})", flat.join(", "))
            }
            Node::Variable(variable) => emit_variable(variable),
            Node::Conditional(conditional) => self.emit_conditional(conditional)?,
            Node::Lambda(lambda) => self.emit_lambda(lambda)?,
            Node::Block(block) => iife(&self.emit_body(block)?),
            Node::Loop(lp) => self.emit_loop(lp)?,
            Node::ExceptionHandler(handler) => self.emit_exception_handler(handler)?,
            Node::ClassInstantiation(new) => format!(
                "(new {}({}))",
                self.emit(&new.class, Context::Expression)?,
                self.emit_all(&new.args)?.join(", ")
            ),
            Node::MethodResolution(res) => format!(
                "{}.{}({})",
                self.emit(&res.object, Context::Expression)?,
                res.method.name,
                self.emit_all(&res.args)?.join(", ")
            ),
            Node::PropertyResolution(res) => format!(
                "{}.{}",
                self.emit(&res.object, Context::Expression)?,
                res.property.name
            ),
            Node::Assignment(assignment) => format!(
                "({}={})",
                self.emit(&assignment.target, Context::Expression)?,
                self.emit(&assignment.value, Context::Expression)?
            ),
            Node::Application(application) => self.emit_application(application)?,
            Node::BinaryOperator(op) => format!(
                "({}{}{})",
                self.emit(&op.left, Context::Expression)?,
                binary_token(op.operator),
                self.emit(&op.right, Context::Expression)?
            ),
            Node::UnaryOperator(op) => format!(
                "({}{})",
                unary_token(op.operator),
                self.emit(&op.operand, Context::Expression)?
            ),
            Node::ArithmeticOperator(op) => backend::arithmetic(
                op.operator,
                arithmetic_token(op.operator),
                self.emit_all(&op.args)?,
            ),
            Node::TypeDefinition(definition) => self.emit_type(definition)?,
            Node::Exception(_)
            | Node::RecursionPoint(_)
            | Node::Definition(_)
            | Node::ProtocolDefinition(_)
            | Node::MacroDefinition(_) => self.emit(node, Context::Expression)?,
        };

        Ok(text)
    }

    fn emit_all(&self, nodes: &[Node]) -> Result<Vec<String>> {
        nodes
            .iter()
            .map(|n| self.emit(n, Context::Expression))
            .collect()
    }

    fn emit_throw(&self, value: &str, context: Context) -> String {
        match context {
            Context::Expression => iife(&format!("throw {};", value)),
            Context::TopLevel => format!("throw {}", value),
            Context::Statement | Context::Return => format!("throw {};", value),
        }
    }

    /// Statements for the effects of a block followed by the return of its
    /// value.
    fn emit_body(&self, block: &Block) -> Result<String> {
        let mut statements = Vec::with_capacity(block.expressions.len());

        for effect in block.effects() {
            let statement = self.emit(effect, Context::Statement)?;
            if !statement.is_empty() {
                statements.push(statement);
            }
        }

        match block.result() {
            Some(result) => statements.push(self.emit(result, Context::Return)?),
            None => statements.push("return null;".to_string()),
        }

        Ok(statements.join(" "))
    }

    fn emit_definition(&self, definition: &Definition, context: Context) -> Result<String> {
        let value = self.emit(&definition.value, Context::Expression)?;
        self.emit_binding_in(&definition.name, value, context)
    }

    fn emit_binding_in(&self, name: &Variable, value: String, context: Context) -> Result<String> {
        let binding = emit_binding(name, &value);

        Ok(match context {
            Context::TopLevel => binding,
            Context::Expression => format!("({})", assignments(name, &value).join(", ")),
            Context::Statement => format!("{};", binding),
            Context::Return => format!("{}; return {};", binding, emit_variable(name)),
        })
    }

    fn emit_conditional(&self, conditional: &Conditional) -> Result<String> {
        let default = self.emit(&conditional.default, Context::Return)?;

        if conditional.branches.is_empty() {
            return Ok(iife(&default));
        }

        let mut branches = Vec::with_capacity(conditional.branches.len());
        for (test, consequent) in &conditional.branches {
            branches.push(format!(
                "if ({}) {{ {} }}",
                self.emit(test, Context::Expression)?,
                self.emit(consequent, Context::Return)?
            ));
        }

        Ok(iife(&format!(
            "{} else {{ {} }}",
            branches.join(" else "),
            default
        )))
    }

    fn emit_lambda(&self, lambda: &Lambda) -> Result<String> {
        match lambda {
            Lambda::Single(clause) => self.emit_clause(clause, true),
            Lambda::Multi(clauses) => self.emit_dispatch(clauses),
        }
    }

    /// A clause of a multi-arity function is neither guarded nor a recursion
    /// point. The dispatcher does both.
    fn emit_clause(&self, clause: &LambdaClause, standalone: bool) -> Result<String> {
        let params: Vec<&str> = clause.params.fixed.iter().map(|p| p.name.as_str()).collect();
        let mut body = String::new();

        if standalone {
            body.push_str(&arity_guard(&clause.params));
        }

        if let Some(rest) = &clause.params.rest {
            body.push_str(&format!(
                "var {}=Array.prototype.slice.call(arguments, {}); ",
                rest.name,
                clause.params.required()
            ));
        }

        if standalone && clause.body.recurs() {
            let mut rebindings: Vec<String> = params
                .iter()
                .enumerate()
                .map(|(i, name)| format!("{}={}.args[{}];", name, CATCH_BINDING, i))
                .collect();
            if let Some(rest) = &clause.params.rest {
                rebindings.push(format!(
                    "{}={}.args.slice({});",
                    rest.name,
                    CATCH_BINDING,
                    params.len()
                ));
            }
            body.push_str(&trampoline(&self.emit_body(&clause.body)?, &rebindings));
        } else {
            body.push_str(&self.emit_body(&clause.body)?);
        }

        Ok(format!("(function({}){{ {} }})", params.join(", "), body))
    }

    /// Multiple arities dispatch on the number of arguments. Fixed arities are
    /// tried before the variadic one. A `recur` in any clause dispatches again
    /// on its arguments.
    fn emit_dispatch(&self, clauses: &[LambdaClause]) -> Result<String> {
        let recurs = clauses.iter().any(|c| c.body.recurs());
        let args = if recurs { ARGUMENTS } else { "arguments" };

        let ordered = clauses
            .iter()
            .filter(|c| !c.params.is_variadic())
            .chain(clauses.iter().filter(|c| c.params.is_variadic()));

        let mut cases = vec![];
        for clause in ordered {
            let test = if clause.params.is_variadic() {
                format!("{}.length >= {}", args, clause.params.required())
            } else {
                format!("{}.length === {}", args, clause.params.required())
            };

            cases.push(format!(
                "if ({}) {{ return {}.apply(this, {}); }}",
                test,
                self.emit_clause(clause, false)?,
                args
            ));
        }
        let body = format!("{} {});", cases.join(" "), arity_error(args));

        if !recurs {
            return Ok(format!("(function(){{ {} }})", body));
        }

        let rebinding = format!("{}={}.args;", ARGUMENTS, CATCH_BINDING);
        Ok(format!(
            "(function(){{ var {}=arguments; {} }})",
            ARGUMENTS,
            trampoline(&body, &[rebinding])
        ))
    }

    fn emit_loop(&self, lp: &Loop) -> Result<String> {
        let mut bindings = vec![];
        let mut rebindings = vec![];

        for (i, (name, init)) in lp.bindings.iter().enumerate() {
            bindings.push(format!(
                "var {}={};",
                name.name,
                self.emit(init, Context::Expression)?
            ));
            rebindings.push(format!("{}={}.args[{}];", name.name, CATCH_BINDING, i));
        }

        Ok(iife(&format!(
            "{} {}",
            bindings.join(" "),
            trampoline(&self.emit_body(&lp.body)?, &rebindings)
        )))
    }

    fn emit_exception_handler(&self, handler: &ExceptionHandler) -> Result<String> {
        let mut text = format!("try {{ {} }}", self.emit_body(&handler.body)?);

        if let Some(catch) = &handler.catch {
            text.push_str(&format!(
                " catch ({0}) {{ if ({0} instanceof {1}) {{ throw {0}; }} {2} }}",
                catch.binding.name,
                RECURSION_POINT,
                self.emit_body(&catch.body)?
            ));
        }

        if let Some(finally) = &handler.finally {
            let statements = finally
                .expressions
                .iter()
                .map(|e| self.emit(e, Context::Statement))
                .collect::<Result<Vec<_>>>()?;
            text.push_str(&format!(" finally {{ {} }}", statements.join(" ")));
        }

        Ok(iife(&text))
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
            "{}({})",
            self.emit(&application.invocable, Context::Expression)?,
            args.join(", ")
        ))
    }

    /// A constructor assigning the attributes, extended by its protocols and
    /// methods. Methods see the attributes as local variables.
    fn emit_type(&self, definition: &TypeDefinition) -> Result<String> {
        let name = &definition.name.name;
        let attributes: Vec<&str> = definition
            .attributes
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        let assignments: Vec<String> = attributes
            .iter()
            .map(|a| format!("this.{0}={0};", a))
            .collect();

        let mut parts = vec![format!(
            "function {}({}){{ {} }}",
            name,
            attributes.join(", "),
            assignments.join(" ")
        )];

        for protocol in &definition.protocols {
            parts.push(format!(
                "Object.assign({}.prototype, {});",
                name,
                emit_variable(protocol)
            ));
        }

        for method in &definition.methods {
            parts.push(format!(
                "{}.prototype.{}={};",
                name,
                method.name.name,
                self.emit_method(method, &attributes)?
            ));
        }

        parts.push(format!("return {};", name));
        Ok(iife(&parts.join(" ")))
    }

    fn emit_protocol(&self, protocol: &ProtocolDefinition) -> Result<String> {
        let mut sources = vec!["{}".to_string()];
        sources.extend(protocol.protocols.iter().map(emit_variable));

        let mut methods = vec![];
        for method in &protocol.methods {
            methods.push(format!(
                "{}: {}",
                method.name.name,
                self.emit_method(method, &[])?
            ));
        }
        sources.push(format!("{{{}}}", methods.join(", ")));

        Ok(format!("Object.assign({})", sources.join(", ")))
    }

    fn emit_method(&self, method: &TypeMethod, attributes: &[&str]) -> Result<String> {
        self.ensure_supported(NodeKind::TypeMethod)?;

        let params: Vec<&str> = method.params.fixed.iter().map(|p| p.name.as_str()).collect();
        let mut body = String::new();

        for attribute in attributes {
            body.push_str(&format!("var {0}=this.{0}; ", attribute));
        }

        if let Some(rest) = &method.params.rest {
            body.push_str(&format!(
                "var {}=Array.prototype.slice.call(arguments, {}); ",
                rest.name,
                method.params.required()
            ));
        }

        body.push_str(&self.emit_body(&method.body)?);
        Ok(format!("function({}){{ {} }}", params.join(", "), body))
    }
}

fn iife(body: &str) -> String {
    format!("(function(){{ {} }}).call(this)", body)
}

fn arity_error(args: &str) -> String {
    format!(
        "throw new Error('wrong number of arguments, got: ' + {}.length",
        args
    )
}

/// Run `body` until it returns. A recursion point rebinds and goes again.
fn trampoline(body: &str, rebindings: &[String]) -> String {
    format!(
        "while (true) {{ try {{ {1} }} catch ({0}) {{ if ({0} instanceof {2}) {{ {3} }} else {{ throw {0}; }} }} }}",
        CATCH_BINDING,
        body,
        RECURSION_POINT,
        rebindings.join(" ")
    )
}

fn arity_guard(params: &Params) -> String {
    let required = params.required();

    if params.is_variadic() {
        if required == 0 {
            return String::new();
        }
        format!(
            "if (arguments.length < {0}) {{ {1} + ', expected at least: {0}'); }} ",
            required,
            arity_error("arguments")
        )
    } else {
        format!(
            "if (arguments.length !== {0}) {{ {1} + ', expected: {0}'); }} ",
            required,
            arity_error("arguments")
        )
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

fn emit_name(name: &QualifiedName) -> String {
    match &name.namespace {
        Some(ns) => format!("{}, {}", quote_string(ns), quote_string(&name.name)),
        None => quote_string(&name.name),
    }
}

pub fn emit_variable(variable: &Variable) -> String {
    match &variable.namespace {
        Some(ns) => format!("{}.{}", ns, variable.name),
        None => variable.name.clone(),
    }
}

/// Bind `value` to `name`. Namespaced names assume the root namespace object
/// exists and create the nested ones on demand.
fn emit_binding(name: &Variable, value: &str) -> String {
    if name.namespace.is_none() {
        return format!("var {}={}", name.name, value);
    }

    assignments(name, value).join(";")
}

/// The assignments that create the nested namespaces of `name` and bind it.
fn assignments(name: &Variable, value: &str) -> Vec<String> {
    let segments = name.namespace_segments();

    let mut steps: Vec<String> = (2..=segments.len())
        .map(|depth| format!("{0}={0}||{{}}", segments[..depth].join(".")))
        .collect();
    steps.push(format!("{}={}", emit_variable(name), value));
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::frontend::reader::tests::read_one;
    use crate::compiler::frontend::Frontend;
    use crate::compiler::session::Session;

    fn compile(input: &str) -> String {
        let mut session = Session::new(Target::JavaScript);
        let node = Frontend::new()
            .analyze(&mut session, &read_one(input))
            .unwrap();
        CodeGenerator::new().generate(&node).unwrap()
    }

    #[test]
    fn test_literals() {
        assert_eq!(compile("nil"), "null");
        assert_eq!(compile("true"), "true");
        assert_eq!(compile("-5"), "(-5)");
        assert_eq!(compile("1.5"), "1.5");
        assert_eq!(compile("1/3"), "(1/3)");
        assert_eq!(compile("\"it's\""), "'it\\'s'");
        assert_eq!(compile(":a"), "mori.keyword('a')");
        assert_eq!(compile(":ns/a"), "mori.keyword('ns', 'a')");
        assert_eq!(compile("'a"), "mori.symbol('a')");
    }

    #[test]
    fn test_collections() {
        assert_eq!(compile("[1 2]"), "mori.vector(1, 2)");
        assert_eq!(compile("'(1 a)"), "mori.list(1, mori.symbol('a'))");
        assert_eq!(compile("#{1}"), "mori.set([1])");
        assert_eq!(compile("{:a 1}"), "mori.hashMap(mori.keyword('a'), 1)");
    }

    #[test]
    fn test_variables() {
        assert_eq!(compile("empty?"), "empty__QEST__");
        assert_eq!(compile("ws.core/list"), "ws.core.list");
    }

    #[test]
    fn test_definitions() {
        assert_eq!(compile("(def x (+ 1 2))"), "var x=(1+2)");
        assert_eq!(compile("(def app/x 1)"), "app.x=1");
        assert_eq!(
            compile("(def app.core.util/x 1)"),
            "app.core=app.core||{};app.core.util=app.core.util||{};app.core.util.x=1"
        );
    }

    #[test]
    fn test_definitions_as_arguments() {
        assert_eq!(compile("(f (def x 1))"), "f((x=1))");
        assert_eq!(
            compile("(f (def app.core.util/x 1) 2)"),
            "f((app.core=app.core||{}, app.core.util=app.core.util||{}, app.core.util.x=1), 2)"
        );
    }

    #[test]
    fn test_conditional() {
        assert_eq!(
            compile("(cond (< a 1) :small (< a 10) :medium :else :large)"),
            "(function(){ if ((a<1)) { return mori.keyword('small'); } else if ((a<10)) { return mori.keyword('medium'); } else { return mori.keyword('large'); } }).call(this)"
        );
        assert_eq!(
            compile("(if a 1)"),
            "(function(){ if (a) { return 1; } else { return null; } }).call(this)"
        );
    }

    #[test]
    fn test_throwing_default_has_no_return() {
        let text = compile("(cond a 1 :else (throw (new Error \"no\")))");

        assert!(text.contains("else { throw (new Error('no')); }"));
        assert!(!text.contains("return throw"));
    }

    #[test]
    fn test_fixed_arity_lambda() {
        assert_eq!(
            compile("(fn [a b] (+ a b))"),
            "(function(a, b){ if (arguments.length !== 2) { throw new Error('wrong number of arguments, got: ' + arguments.length + ', expected: 2'); } return (a+b); })"
        );
    }

    #[test]
    fn test_recur_in_function_body() {
        assert_eq!(
            compile("(fn [n] (if (= n 0) 0 (recur (- n 1))))"),
            "(function(n){ if (arguments.length !== 1) { throw new Error('wrong number of arguments, got: ' + arguments.length + ', expected: 1'); } while (true) { try { return (function(){ if ((n===0)) { return 0; } else { throw new ws.core.RecursionPoint([(n-1)]); } }).call(this); } catch (__recursion_point__) { if (__recursion_point__ instanceof ws.core.RecursionPoint) { n=__recursion_point__.args[0]; } else { throw __recursion_point__; } } } })"
        );

        let variadic = compile("(fn [acc & xs] (if (empty? xs) acc (recur (+ acc 1) (rest xs))))");
        assert!(variadic.contains("acc=__recursion_point__.args[0]; xs=__recursion_point__.args.slice(1);"));
    }

    #[test]
    fn test_recur_in_multi_arity_function_dispatches_again() {
        assert_eq!(
            compile("(fn ([n] (recur n 0)) ([n acc] acc))"),
            "(function(){ var __arguments__=arguments; while (true) { try { if (__arguments__.length === 1) { return (function(n){ throw new ws.core.RecursionPoint([n, 0]); }).apply(this, __arguments__); } if (__arguments__.length === 2) { return (function(n, acc){ return acc; }).apply(this, __arguments__); } throw new Error('wrong number of arguments, got: ' + __arguments__.length); } catch (__recursion_point__) { if (__recursion_point__ instanceof ws.core.RecursionPoint) { __arguments__=__recursion_point__.args; } else { throw __recursion_point__; } } } })"
        );
    }

    #[test]
    fn test_nested_recursion_points_are_separate() {
        let outer = compile("(fn [n] (loop [i n] (if (< i 3) (recur (+ i 1)) i)))");
        assert_eq!(outer.matches("while (true)").count(), 1);
        assert!(!outer.contains("n=__recursion_point__"));

        let inner = compile("(fn [n] (fn [m] (recur m)))");
        assert_eq!(inner.matches("while (true)").count(), 1);
        assert!(inner.contains("m=__recursion_point__.args[0];"));
    }

    #[test]
    fn test_variadic_lambda() {
        assert_eq!(
            compile("(fn [a & more] more)"),
            "(function(a){ if (arguments.length < 1) { throw new Error('wrong number of arguments, got: ' + arguments.length + ', expected at least: 1'); } var more=Array.prototype.slice.call(arguments, 1); return more; })"
        );
        assert_eq!(
            compile("(fn [& xs] xs)"),
            "(function(){ var xs=Array.prototype.slice.call(arguments, 0); return xs; })"
        );
    }

    #[test]
    fn test_empty_lambda_returns_null() {
        assert_eq!(
            compile("(fn [])"),
            "(function(){ if (arguments.length !== 0) { throw new Error('wrong number of arguments, got: ' + arguments.length + ', expected: 0'); } return null; })"
        );
    }

    #[test]
    fn test_multi_arity_lambda() {
        let text = compile("(fn ([a & more] more) ([] 0))");

        assert!(text.starts_with("(function(){ if (arguments.length === 0) { return (function(){ return 0; }).apply(this, arguments); }"));
        assert!(text.contains("if (arguments.length >= 1) { return (function(a){ var more"));
        assert!(text.ends_with("throw new Error('wrong number of arguments, got: ' + arguments.length); })"));
    }

    #[test]
    fn test_loop_trampoline() {
        assert_eq!(
            compile("(loop [i 0] (if (< i 10) (recur (+ i 1)) i))"),
            "(function(){ var i=0; while (true) { try { return (function(){ if ((i<10)) { throw new ws.core.RecursionPoint([(i+1)]); } else { return i; } }).call(this); } catch (__recursion_point__) { if (__recursion_point__ instanceof ws.core.RecursionPoint) { i=__recursion_point__.args[0]; } else { throw __recursion_point__; } } } }).call(this)"
        );
    }

    #[test]
    fn test_throw() {
        assert_eq!(compile("(throw e)"), "throw e");
        assert_eq!(
            compile("(f (throw e))"),
            "f((function(){ throw e; }).call(this))"
        );
    }

    #[test]
    fn test_exception_handler() {
        assert_eq!(
            compile("(try (f) (catch e (g e)) (finally (h)))"),
            "(function(){ try { return f(); } catch (e) { if (e instanceof ws.core.RecursionPoint) { throw e; } return g(e); } finally { h(); } }).call(this)"
        );
    }

    #[test]
    fn test_recur_passes_through_handler() {
        let text = compile("(loop [i 0] (try (if (< i 3) (recur (+ i 1)) i) (catch e 0)))");

        assert!(text.contains("throw new ws.core.RecursionPoint([(i+1)]);"));
        assert!(text.contains(
            "catch (e) { if (e instanceof ws.core.RecursionPoint) { throw e; } return 0; }"
        ));
        assert!(text.ends_with("catch (__recursion_point__) { if (__recursion_point__ instanceof ws.core.RecursionPoint) { i=__recursion_point__.args[0]; } else { throw __recursion_point__; } } } }).call(this)"));
    }

    #[test]
    fn test_interop() {
        assert_eq!(compile("(new Date 1)"), "(new Date(1))");
        assert_eq!(compile("(. xs (push 1 2))"), "xs.push(1, 2)");
        assert_eq!(compile("(. xs pop)"), "xs.pop()");
        assert_eq!(compile("(.- xs length)"), "xs.length");
        assert_eq!(compile("(set! x 1)"), "(x=1)");
    }

    #[test]
    fn test_operators() {
        assert_eq!(compile("(= a b)"), "(a===b)");
        assert_eq!(compile("(not= a b)"), "(a!==b)");
        assert_eq!(compile("(instance? a Date)"), "(a instanceof Date)");
        assert_eq!(compile("(not a)"), "(!a)");
        assert_eq!(compile("(+)"), "0");
        assert_eq!(compile("(+ 5)"), "+5");
        assert_eq!(compile("(- -5)"), "-(-5)");
        assert_eq!(compile("(* 2)"), "2");
        assert_eq!(compile("(- 1 2 3)"), "(1-2-3)");
    }

    #[test]
    fn test_primitives() {
        assert_eq!(compile("(aget xs 0)"), "xs[0]");
        assert_eq!(compile("(str \"a\" b)"), "['a', b].join('')");
        assert_eq!(compile("(typeof x)"), "(typeof x)");
    }

    #[test]
    fn test_definition_as_last_body_expression() {
        assert_eq!(
            compile("(fn [] (def y 1))"),
            "(function(){ if (arguments.length !== 0) { throw new Error('wrong number of arguments, got: ' + arguments.length + ', expected: 0'); } var y=1; return y; })"
        );
    }

    #[test]
    fn test_deftype() {
        assert_eq!(
            compile("(deftype Point [x y] Show (sum [] (+ x y)))"),
            "var Point=(function(){ function Point(x, y){ this.x=x; this.y=y; } Object.assign(Point.prototype, Show); Point.prototype.sum=function(){ var x=this.x; var y=this.y; return (x+y); }; return Point; }).call(this)"
        );
    }

    #[test]
    fn test_defprotocol() {
        assert_eq!(
            compile("(defprotocol Show (show [] nil))"),
            "var Show=Object.assign({}, {show: function(){ return null; }})"
        );
    }

    #[test]
    fn test_macro_definitions_emit_nothing() {
        assert_eq!(compile("(defmacro m [x] x)"), "");
    }
}
