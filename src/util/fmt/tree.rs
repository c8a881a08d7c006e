use std::io::Write;

use crate::ast::*;

const INDENT_WIDTH: usize = 2;

pub fn print_program_string(program: &Program) -> String {
    let mut buf = Vec::with_capacity(1024);
    print_program(&mut buf, program).unwrap();
    String::from_utf8(buf).unwrap()
}

pub fn print_expr_string(expr: &Expr) -> String {
    let mut buf = Vec::with_capacity(512);
    print_expr(&mut buf, 0, expr).unwrap();
    String::from_utf8(buf).unwrap()
}

pub fn print_program(w: &mut impl Write, program: &Program) -> std::io::Result<()> {
    for item in &program.body {
        print_top_level(w, 0, item)?;
    }
    Ok(())
}

fn print_top_level(w: &mut impl Write, i: usize, item: &TopLevel) -> std::io::Result<()> {
    sp(w, i)?;
    match item {
        TopLevel::Definition(Definition {
            name,
            params,
            body,
            exported,
            pos: _,
        }) => {
            let exported = if *exported { " (exported)" } else { "" };
            writeln!(w, "definition {name}{exported}")?;
            print_params(w, i + 1, params)?;
            print_expr(w, i + 1, body)?;
        }
        TopLevel::Section(Section { name, body, pos: _ }) => {
            writeln!(w, "section {name}")?;
            for statement in body {
                print_statement(w, i + 1, statement)?;
            }
        }
        TopLevel::Import(ImportStatement {
            symbols,
            source,
            pos: _,
        }) => {
            writeln!(w, "import {{{}}} from {source:?}", symbols.join(", "))?;
        }
    }
    Ok(())
}

fn print_params(w: &mut impl Write, i: usize, params: &[Param]) -> std::io::Result<()> {
    for param in params {
        sp(w, i)?;
        writeln!(w, "param {}", param.name)?;
        if let Some(bound) = &param.bound {
            print_expr(w, i + 1, bound)?;
        }
    }
    Ok(())
}

fn print_statement(w: &mut impl Write, i: usize, statement: &Statement) -> std::io::Result<()> {
    match &statement.kind {
        StatementKind::VariableDeclaration { name, value } => {
            sp(w, i)?;
            writeln!(w, "let {name}")?;
            print_expr(w, i + 1, value)
        }
        StatementKind::AssertEqual { left, right } => {
            sp(w, i)?;
            writeln!(w, "assert-equal")?;
            print_expr(w, i + 1, left)?;
            print_expr(w, i + 1, right)
        }
        StatementKind::Expression(expr) => print_expr(w, i, expr),
    }
}

pub fn print_expr(w: &mut impl Write, i: usize, expr: &Expr) -> std::io::Result<()> {
    sp(w, i)?;
    match &expr.kind {
        ExprKind::Assignment { target, value } => {
            writeln!(w, "assignment")?;
            print_expr(w, i + 1, target)?;
            print_expr(w, i + 1, value)?;
        }
        ExprKind::Binary { op, lhs, rhs } => {
            writeln!(w, "binary {op:?}")?;
            print_expr(w, i + 1, lhs)?;
            print_expr(w, i + 1, rhs)?;
        }
        ExprKind::Logical { op, lhs, rhs } => {
            writeln!(w, "logical {op:?}")?;
            print_expr(w, i + 1, lhs)?;
            print_expr(w, i + 1, rhs)?;
        }
        ExprKind::Unary { op, expr: inner } => {
            writeln!(w, "unary {op:?}")?;
            print_expr(w, i + 1, inner)?;
        }
        ExprKind::Conditional {
            test,
            consequent,
            alternate,
        } => {
            writeln!(w, "conditional")?;
            print_expr(w, i + 1, test)?;
            print_expr(w, i + 1, consequent)?;
            print_expr(w, i + 1, alternate)?;
        }
        ExprKind::Call { callee, args } => {
            writeln!(w, "call")?;
            print_expr(w, i + 1, callee)?;
            if !args.is_empty() {
                sp(w, i + 1)?;
                writeln!(w, "arguments")?;
                for arg in args {
                    print_expr(w, i + 2, arg)?;
                }
            }
        }
        ExprKind::Member { object, property } => match property {
            Property::Named(name) => {
                writeln!(w, "member .{name}")?;
                print_expr(w, i + 1, object)?;
            }
            Property::Computed(property) => {
                writeln!(w, "member [..]")?;
                print_expr(w, i + 1, object)?;
                print_expr(w, i + 1, property)?;
            }
        },
        ExprKind::Lambda(Lambda { params, body }) => {
            writeln!(w, "lambda")?;
            print_params(w, i + 1, params)?;
            print_expr(w, i + 1, body)?;
        }
        ExprKind::Block { body } => {
            writeln!(w, "block")?;
            for statement in body {
                print_statement(w, i + 1, statement)?;
            }
        }
        ExprKind::Match { scrutinee, arms } => {
            writeln!(w, "match")?;
            print_expr(w, i + 1, scrutinee)?;
            for arm in arms {
                sp(w, i + 1)?;
                writeln!(w, "arm")?;
                print_expr(w, i + 2, &arm.pattern)?;
                print_expr(w, i + 2, &arm.expression)?;
            }
        }
        ExprKind::TemplateString { parts } => {
            writeln!(w, "template")?;
            for part in parts {
                match part {
                    TemplatePart::Text(text) => {
                        sp(w, i + 1)?;
                        writeln!(w, "text {text:?}")?;
                    }
                    TemplatePart::Expr(expr) => print_expr(w, i + 1, expr)?,
                }
            }
        }
        ExprKind::Object { properties } => {
            writeln!(w, "object")?;
            for property in properties {
                sp(w, i + 1)?;
                let optional = if property.optional { "?" } else { "" };
                match &property.key {
                    PropertyKey::Named(name) => writeln!(w, "property {name}{optional}")?,
                    PropertyKey::Computed(key) => {
                        writeln!(w, "property [..]{optional}")?;
                        print_expr(w, i + 2, key)?;
                    }
                }
                print_expr(w, i + 2, &property.value)?;
            }
        }
        ExprKind::MappedType {
            key,
            union,
            alias,
            optional,
            value,
        } => {
            let optional = if *optional { "?" } else { "" };
            writeln!(w, "mapped {key}{optional}")?;
            print_expr(w, i + 1, union)?;
            if let Some(alias) = alias {
                sp(w, i + 1)?;
                writeln!(w, "as")?;
                print_expr(w, i + 2, alias)?;
            }
            print_expr(w, i + 1, value)?;
        }
        ExprKind::Tuple { elements } => {
            writeln!(w, "tuple")?;
            for element in elements {
                print_expr(w, i + 1, element)?;
            }
        }
        ExprKind::InferredVariable { name, bound } => {
            writeln!(w, "infer {name}")?;
            if let Some(bound) = bound {
                print_expr(w, i + 1, bound)?;
            }
        }
        ExprKind::Identifier(name) => writeln!(w, "ident {name}")?,
        ExprKind::Number(n) => writeln!(w, "number {n}")?,
        ExprKind::String(s) => writeln!(w, "string {s:?}")?,
        ExprKind::NumberKeyword => writeln!(w, "keyword number")?,
        ExprKind::StringKeyword => writeln!(w, "keyword string")?,
    }
    Ok(())
}

fn sp(w: &mut impl Write, i: usize) -> std::io::Result<()> {
    write!(w, "{:width$}", "", width = i * INDENT_WIDTH)
}
