use std::{collections::HashMap, fmt::Write, format_args as f, marker::PhantomData, mem};

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use crate::{
    ast::*,
    codegen::{
        lowering::{self, Application, BinaryLowering, Combinator, Library, UnaryLowering},
        scope::{Resolution, Scope},
        target_env::TargetEnv,
        CompileError, Error, MAX_PATTERN_VARIABLES,
    },
    token::Position,
};

type Result<T> = std::result::Result<T, CompileError>;

/// Which pass over a match pattern is running.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PatternPosition {
    /// The pattern handed to `Match.With`, where `infer X extends B` only
    /// constrains the shape (`B`, or `any` without a bound).
    Constraint,
    /// The pattern inside the lifted arm, where `infer` binds names for the
    /// arm's expression.
    Binder,
}

/// Compiles one program. A generator is used once and owns all of the
/// bookkeeping (fresh ids, imports and lifted declarations), so independent
/// programs can be compiled in parallel.
pub struct Generator<'ast, E> {
    next_id: u32,
    imports: [IndexSet<&'static str>; 3],
    /// Lifted lambdas and match arms, keyed by name, in discovery order.
    lifted: IndexMap<String, String>,
    /// Arity of every top-level definition known to be a function.
    arities: HashMap<&'ast str, usize>,
    pattern_vars: Vec<&'ast str>,
    pattern: Option<PatternPosition>,
    _env: PhantomData<E>,
}

impl<'ast, E> Generator<'ast, E>
where
    E: TargetEnv,
{
    pub fn new() -> Generator<'ast, E> {
        Generator {
            next_id: 1,
            imports: Default::default(),
            lifted: IndexMap::new(),
            arities: HashMap::new(),
            pattern_vars: Vec::new(),
            pattern: None,
            _env: PhantomData,
        }
    }

    pub fn generate(mut self, program: &'ast Program) -> Result<String> {
        debug!(target_env = E::NAME, items = program.body.len(), "generating program");
        self.collect_arities(program);

        let items = program
            .body
            .iter()
            .map(|item| self.g_top_level(item))
            .collect::<Result<Vec<_>>>()?;

        let mut blocks = Vec::with_capacity(1 + self.lifted.len() + items.len());
        let imports = self.g_imports();
        if !imports.is_empty() {
            blocks.push(imports);
        }
        let lifted = self.lifted.len();
        blocks.extend(self.lifted.into_values());
        blocks.extend(items);

        let mut code = blocks.join("\n\n");
        code.push('\n');
        debug!(lifted, bytes = code.len(), "generated program");
        Ok(code)
    }

    /// Records the declared arity of top-level functions, so calls to them
    /// can pick between full and partial application statically.
    fn collect_arities(&mut self, program: &'ast Program) {
        for item in &program.body {
            let TopLevel::Definition(def) = item else {
                continue;
            };
            let arity = match &def.body.kind {
                _ if def.is_function() => def.params.len(),
                ExprKind::Lambda(lambda) => lambda.params.len(),
                _ => continue,
            };
            self.arities.insert(&def.name, arity);
        }
    }

    fn g_imports(&self) -> String {
        let mut lines = Vec::with_capacity(3);
        for (library, symbols) in Library::ALL.into_iter().zip(&self.imports) {
            if symbols.is_empty() {
                continue;
            }
            let symbols = symbols
                .iter()
                .map(|symbol| format!("type {symbol}"))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!(
                "import {{ {symbols} }} from \"{}\";",
                library.module::<E>()
            ));
        }
        lines.join("\n")
    }
}

impl<E> Default for Generator<'_, E>
where
    E: TargetEnv,
{
    fn default() -> Self {
        Generator::new()
    }
}

/// Top-level items and statements.
impl<'ast, E> Generator<'ast, E>
where
    E: TargetEnv,
{
    fn g_top_level(&mut self, item: &'ast TopLevel) -> Result<String> {
        let global = Scope::default();
        match item {
            TopLevel::Definition(def) => {
                let body = if def.is_function() {
                    self.g_lambda(&def.params, &def.body, &global)?
                } else {
                    self.g_expr(&def.body, &global)?
                };
                let export = if def.exported { "export " } else { "" };
                Ok(format!("{export}type {} = {body};", def.name))
            }
            TopLevel::Section(section) => {
                let mut code = String::new();
                emit(&mut code, f!("// {0}\nnamespace {0} {{\n", section.name));
                for statement in &section.body {
                    let decl = self.g_section_statement(statement, &global)?;
                    emit(&mut code, f!("  {decl};\n"));
                }
                code.push('}');
                Ok(code)
            }
            TopLevel::Import(import) => Ok(format!(
                "import {{ {} }} from {};",
                import.symbols.join(", "),
                string_literal(&import.source)
            )),
        }
    }

    fn g_section_statement(
        &mut self,
        statement: &'ast Statement,
        scope: &Scope<'ast>,
    ) -> Result<String> {
        match &statement.kind {
            StatementKind::VariableDeclaration { name, value } => {
                let value = self.g_expr(value, scope)?;
                Ok(format!("type {name} = {value}"))
            }
            StatementKind::AssertEqual { left, right } => {
                self.import(Library::Hot, "Booleans");
                self.import(Library::Hot, "Call");
                self.import(Library::Prelude, "Expect");
                let left = self.g_expr(left, scope)?;
                let right = self.g_expr(right, scope)?;
                let id = self.fresh_id();
                Ok(format!(
                    "type {id} = Expect<Call<Booleans.Equals<{left}, {right}>>>"
                ))
            }
            StatementKind::Expression(expr) => {
                let expr = self.g_expr(expr, scope)?;
                let id = self.fresh_id();
                Ok(format!("type {id} = {expr}"))
            }
        }
    }
}

/// Expressions.
impl<'ast, E> Generator<'ast, E>
where
    E: TargetEnv,
{
    fn g_expr(&mut self, expr: &'ast Expr, scope: &Scope<'ast>) -> Result<String> {
        let code = match &expr.kind {
            ExprKind::Assignment { .. } => {
                return Err(expr.pos.wrap(Error::AssignmentUnsupported));
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.g_expr(lhs, scope)?;
                let rhs = self.g_expr(rhs, scope)?;
                match lowering::binary(*op) {
                    BinaryLowering::Native(op) => format!("({lhs} {op} {rhs})"),
                    BinaryLowering::Combinator(combinator) => {
                        self.g_combinator(combinator, &[lhs, rhs])
                    }
                }
            }
            ExprKind::Logical { op, lhs, rhs } => {
                let lhs = self.g_expr(lhs, scope)?;
                let rhs = self.g_expr(rhs, scope)?;
                self.g_combinator(lowering::logical(*op), &[lhs, rhs])
            }
            ExprKind::Unary { op, expr } => {
                let operand = self.g_expr(expr, scope)?;
                match lowering::unary(*op) {
                    UnaryLowering::NumericIdentity => {
                        let id = self.fresh_id();
                        bind_once(&[operand], &[id.clone()], Some("number"), &id)
                    }
                    UnaryLowering::Combinator(combinator) => {
                        self.g_combinator(combinator, &[operand])
                    }
                }
            }
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            } => {
                let test = self.g_expr(test, scope)?;
                let consequent = self.g_expr(consequent, scope)?;
                let alternate = self.g_expr(alternate, scope)?;
                format!("(({test}) extends true ? {consequent} : {alternate})")
            }
            ExprKind::Call { callee, args } => self.g_call(expr.pos, callee, args, scope)?,
            ExprKind::Member { object, property } => {
                let object = self.g_expr(object, scope)?;
                match property {
                    Property::Named(name) => format!("({object})[{}]", string_literal(name)),
                    Property::Computed(property) => {
                        let property = self.g_expr(property, scope)?;
                        format!("({object})[{property}]")
                    }
                }
            }
            ExprKind::Lambda(Lambda { params, body }) => self.g_lambda(params, body, scope)?,
            ExprKind::Block { body } => self.g_block(expr.pos, body, scope)?,
            ExprKind::Match { scrutinee, arms } => {
                self.import(Library::Hot, "Match");
                self.import(Library::Hot, "Call");
                let scrutinee = self.g_expr(scrutinee, scope)?;
                let arms = arms
                    .iter()
                    .map(|arm| self.g_match_arm(arm, scope))
                    .collect::<Result<Vec<_>>>()?;
                format!("Call<Match<[{}]>, {scrutinee}>", arms.join(", "))
            }
            ExprKind::TemplateString { parts } => {
                let mut code = String::from("`");
                for part in parts {
                    match part {
                        TemplatePart::Text(text) => code.push_str(text),
                        TemplatePart::Expr(expr) => {
                            let expr = self.g_expr(expr, scope)?;
                            emit(&mut code, f!("${{{expr}}}"));
                        }
                    }
                }
                code.push('`');
                code
            }
            ExprKind::Object { properties } => {
                let mut fields = Vec::with_capacity(properties.len());
                for property in properties {
                    let key = match &property.key {
                        PropertyKey::Named(name) => string_literal(name),
                        PropertyKey::Computed(key) => format!("[{}]", self.g_expr(key, scope)?),
                    };
                    let optional = if property.optional { "?" } else { "" };
                    let value = self.g_expr(&property.value, scope)?;
                    fields.push(format!("{key}{optional}: {value}"));
                }
                format!("{{{}}}", fields.join(", "))
            }
            ExprKind::MappedType {
                key,
                union,
                alias,
                optional,
                value,
            } => {
                let union = self.g_expr(union, scope)?;
                let mut inner = scope.clone();
                inner.bind_local(key);
                let alias = match alias {
                    Some(alias) => format!(" as {}", self.g_expr(alias, &inner)?),
                    None => String::new(),
                };
                let optional = if *optional { "?" } else { "" };
                let value = self.g_expr(value, &inner)?;
                format!("{{[{key} in {union}{alias}]{optional}: {value}}}")
            }
            ExprKind::Tuple { elements } => {
                let elements = elements
                    .iter()
                    .map(|element| self.g_expr(element, scope))
                    .collect::<Result<Vec<_>>>()?;
                format!("[{}]", elements.join(", "))
            }
            ExprKind::InferredVariable { name, bound } => {
                self.g_inferred_variable(expr.pos, name, bound.as_deref(), scope)?
            }
            ExprKind::Identifier(name) => self.g_ident(name, scope),
            ExprKind::Number(digits) => digits.to_string(),
            ExprKind::String(s) => string_literal(s),
            ExprKind::NumberKeyword => "number".to_owned(),
            ExprKind::StringKeyword => "string".to_owned(),
        };
        Ok(code)
    }

    fn g_ident(&self, name: &str, scope: &Scope<'ast>) -> String {
        if self.is_pattern_var(name) {
            return name.to_owned();
        }
        match scope.resolve(name) {
            Resolution::Outer(i) => format!("this[\"arg0\"][{i}] /** {name} */"),
            Resolution::Param(i) => format!("this[\"arg{}\"] /** {name} */", i + 1),
            Resolution::Local | Resolution::Global => name.to_owned(),
        }
    }

    /// Evaluates the operands once each, binding them to fresh names, and
    /// applies the combinator to those names.
    fn g_combinator(&mut self, combinator: Combinator, operands: &[String]) -> String {
        self.import(combinator.library, combinator.import);
        let ids: Vec<String> = operands.iter().map(|_| self.fresh_id()).collect();
        let args = ids.join(", ");
        let path = combinator.path;
        let mut call = match combinator.application {
            Application::Direct => format!("{path}<{args}>"),
            Application::Deferred => format!("Call<{path}, {args}>"),
            Application::Curried => format!("Call<{path}<{args}>>"),
        };
        if combinator.application != Application::Direct {
            self.import(Library::Hot, "Call");
        }
        if combinator.yields_bit {
            call.push_str(" extends 1 ? true : false");
        }
        bind_once(operands, &ids, combinator.operand, &call)
    }

    fn g_call(
        &mut self,
        pos: Position,
        callee: &'ast Expr,
        args: &'ast [Expr],
        scope: &Scope<'ast>,
    ) -> Result<String> {
        if let ExprKind::Member {
            object,
            property: Property::Named(method),
        } = &callee.kind
        {
            return self.g_method_call(pos, object, method, args, scope);
        }

        let mut bound = Vec::with_capacity(args.len());
        for arg in args {
            let id = self.fresh_id();
            let code = self.g_expr(arg, scope)?;
            bound.push((id, code));
        }
        let arity = self.static_arity(callee, scope);
        let callee = self.g_expr(callee, scope)?;

        let ids = bound
            .iter()
            .map(|(id, _)| id.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let mut code = match arity {
            _ if bound.is_empty() => callee,
            Some(arity) if bound.len() >= arity => {
                self.import(Library::Hot, "Apply");
                format!("Apply<{callee}, [{ids}]>")
            }
            Some(_) => {
                self.import(Library::Hot, "PartialApply");
                format!("PartialApply<{callee}, [{ids}]>")
            }
            None => {
                self.import(Library::Hot, "Apply");
                self.import(Library::Hot, "PartialApply");
                format!(
                    "(Apply<{callee}, [{ids}]>) extends never \
                     ? (PartialApply<{callee}, [{ids}]>) \
                     : (Apply<{callee}, [{ids}]>)"
                )
            }
        };
        for (id, arg) in bound.iter().rev() {
            code = format!("({arg}) extends infer {id} extends ({arg}) ? ({code}) : never");
        }
        Ok(format!("({code})"))
    }

    /// The declared arity of the callee, when it can be known without
    /// evaluating anything.
    fn static_arity(&self, callee: &Expr, scope: &Scope<'ast>) -> Option<usize> {
        match &callee.kind {
            ExprKind::Identifier(name)
                if !self.is_pattern_var(name) && scope.resolve(name) == Resolution::Global =>
            {
                self.arities.get(&**name).copied()
            }
            ExprKind::Lambda(lambda) => Some(lambda.params.len()),
            _ => None,
        }
    }

    fn g_method_call(
        &mut self,
        pos: Position,
        object: &'ast Expr,
        method: &str,
        args: &'ast [Expr],
        scope: &Scope<'ast>,
    ) -> Result<String> {
        let Some(&symbol) = lowering::METHODS.get(method) else {
            return Err(pos.wrap(Error::UnsupportedMethod(method.into())));
        };
        self.import(Library::Prelude, symbol);

        let mut code = format!("({symbol}<{}", self.g_expr(object, scope)?);
        for arg in args {
            let arg = self.g_expr(arg, scope)?;
            emit(&mut code, f!(", {arg}"));
        }
        code.push_str(">)");
        Ok(code)
    }

    /// Lifts a lambda into an interface extending `Fn`, partially applied to
    /// the tuple of values it captures.
    fn g_lambda(
        &mut self,
        params: &'ast [Param],
        body: &'ast Expr,
        scope: &Scope<'ast>,
    ) -> Result<String> {
        self.import(Library::Hot, "Fn");
        self.import(Library::Hot, "PartialApply");

        let own: Vec<&'ast str> = params.iter().map(|param| &*param.name).collect();
        let captures = scope.captures(&self.pattern_vars, &own);
        let captured = self.capture_tuple(&captures, scope);
        let body_scope = Scope::closure(captures, own);

        let body = self.isolated(Vec::new(), None, |this| {
            this.g_lambda_body(params, body, &body_scope)
        })?;
        let name = format!("lambda_{}", self.fresh_id());
        self.lift(&name, &body);
        Ok(format!("PartialApply<{name}, [[{captured}]]>"))
    }

    /// Bounded parameters guard the body, which is `never` for arguments
    /// outside of the bounds.
    fn g_lambda_body(
        &mut self,
        params: &'ast [Param],
        body: &'ast Expr,
        scope: &Scope<'ast>,
    ) -> Result<String> {
        if params.iter().all(|param| param.bound.is_none()) {
            return self.g_expr(body, scope);
        }
        let mut args = Vec::with_capacity(params.len());
        let mut bounds = Vec::with_capacity(params.len());
        for (i, param) in params.iter().enumerate() {
            args.push(format!("this[\"arg{}\"]", i + 1));
            bounds.push(match &param.bound {
                Some(bound) => self.g_expr(bound, scope)?,
                None => "unknown".to_owned(),
            });
        }
        let body = self.g_expr(body, scope)?;
        Ok(format!(
            "[{}] extends [{}] ? {body} : never",
            args.join(", "),
            bounds.join(", ")
        ))
    }

    /// A match arm is lifted like a lambda: its first argument is the capture
    /// tuple and its second one is the matched value.
    fn g_match_arm(&mut self, arm: &'ast MatchArm, scope: &Scope<'ast>) -> Result<String> {
        self.import(Library::Hot, "Fn");
        self.import(Library::Hot, "PartialApply");

        let enclosing = self.pattern_vars.clone();
        let site = self.isolated(enclosing, Some(PatternPosition::Constraint), |this| {
            this.g_expr(&arm.pattern, scope)
        })?;

        let captures = scope.captures(&self.pattern_vars, &[]);
        let captured = self.capture_tuple(&captures, scope);
        let arm_scope = Scope::closure(captures, Vec::new());

        let (binder, body) =
            self.isolated(Vec::new(), Some(PatternPosition::Binder), |this| {
                let binder = this.g_expr(&arm.pattern, &arm_scope)?;
                this.pattern = None;
                let body = this.g_expr(&arm.expression, &arm_scope)?;
                Ok((binder, body))
            })?;
        let name = format!("arm_{}", self.fresh_id());
        self.lift(
            &name,
            &format!("this[\"arg1\"] extends {binder} ? {body} : never"),
        );
        Ok(format!(
            "Match.With<{site}, PartialApply<{name}, [[{captured}]]>>"
        ))
    }

    fn g_inferred_variable(
        &mut self,
        pos: Position,
        name: &'ast str,
        bound: Option<&'ast Expr>,
        scope: &Scope<'ast>,
    ) -> Result<String> {
        let Some(position) = self.pattern else {
            return Err(pos.wrap(Error::InferOutsidePattern));
        };
        let bound = bound.map(|bound| self.g_expr(bound, scope)).transpose()?;
        match position {
            PatternPosition::Constraint => Ok(bound.unwrap_or_else(|| "any".to_owned())),
            PatternPosition::Binder => {
                if self.pattern_vars.len() >= MAX_PATTERN_VARIABLES {
                    return Err(pos.wrap(Error::TooManyPatternVariables));
                }
                self.pattern_vars.push(name);
                Ok(match bound {
                    Some(bound) => format!("infer {name} extends {bound}"),
                    None => format!("infer {name}"),
                })
            }
        }
    }

    /// Compiles `let`s into nested single-evaluation bindings around the
    /// block's final expression.
    fn g_block(
        &mut self,
        pos: Position,
        body: &'ast [Statement],
        scope: &Scope<'ast>,
    ) -> Result<String> {
        let Some((last, decls)) = body.split_last() else {
            return Err(pos.wrap(Error::BlockWithoutResult));
        };

        let mut scope = scope.clone();
        let mut bindings = Vec::with_capacity(decls.len());
        for statement in decls {
            match &statement.kind {
                StatementKind::VariableDeclaration { name, value } => {
                    let value = self.g_expr(value, &scope)?;
                    scope.bind_local(name);
                    bindings.push((&**name, value));
                }
                StatementKind::AssertEqual { .. } => {
                    return Err(statement.pos.wrap(Error::AssertionOutsideSection));
                }
                StatementKind::Expression(_) => {
                    return Err(statement.pos.wrap(Error::StatementBeforeBlockEnd));
                }
            }
        }
        let mut code = match &last.kind {
            StatementKind::Expression(expr) => self.g_expr(expr, &scope)?,
            StatementKind::AssertEqual { .. } => {
                return Err(last.pos.wrap(Error::AssertionOutsideSection));
            }
            StatementKind::VariableDeclaration { .. } => {
                return Err(last.pos.wrap(Error::BlockWithoutResult));
            }
        };
        for (name, value) in bindings.iter().rev() {
            code = format!("(({value}) extends infer {name} extends ({value}) ? ({code}) : never)");
        }
        Ok(code)
    }
}

/// Utility functions.
impl<'ast, E> Generator<'ast, E>
where
    E: TargetEnv,
{
    fn fresh_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        format!("temp_{id}")
    }

    fn import(&mut self, library: Library, symbol: &'static str) {
        self.imports[library as usize].insert(symbol);
    }

    fn lift(&mut self, name: &str, body: &str) {
        trace!(name, "lifting declaration");
        let decl = format!("interface {name} extends Fn {{\n  return: {body};\n}}");
        self.lifted.insert(name.to_owned(), decl);
    }

    fn is_pattern_var(&self, name: &str) -> bool {
        self.pattern_vars.iter().any(|var| *var == name)
    }

    /// Resolves the captured names in the scope creating the closure.
    fn capture_tuple(&self, captures: &[&'ast str], scope: &Scope<'ast>) -> String {
        captures
            .iter()
            .map(|name| self.g_ident(name, scope))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Runs `f` with the given pattern state, restoring the current one
    /// afterwards.
    fn isolated<T>(
        &mut self,
        pattern_vars: Vec<&'ast str>,
        pattern: Option<PatternPosition>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved_vars = mem::replace(&mut self.pattern_vars, pattern_vars);
        let saved_pattern = mem::replace(&mut self.pattern, pattern);
        let res = f(self);
        self.pattern_vars = saved_vars;
        self.pattern = saved_pattern;
        res
    }
}

/// Binds each operand to its id once, as in
/// `(a extends infer temp_1 ? b extends infer temp_2 ? (body) : never : never)`.
fn bind_once(operands: &[String], ids: &[String], operand: Option<&str>, body: &str) -> String {
    let mut code = String::from("(");
    for (value, id) in operands.iter().zip(ids) {
        emit(&mut code, f!("{value} extends infer {id}"));
        if let Some(ty) = operand {
            emit(&mut code, f!(" extends {ty}"));
        }
        code.push_str(" ? ");
    }
    emit(&mut code, f!("({body})"));
    for _ in ids {
        code.push_str(" : never");
    }
    code.push(')');
    code
}

/// Quotes a string for the target, escaping backslashes, quotes and line
/// breaks.
fn string_literal(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Appends formatted text.
fn emit(code: &mut String, args: std::fmt::Arguments<'_>) {
    code.write_fmt(args).expect("Failed to write to string");
}
