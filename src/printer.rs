use crate::ast::{Constant, Expression, LValue, Program, Statement};

const INDENT: usize = 2;

/// Renders a whole program as an indented statement/expression tree.
///
/// The dump is a read-only view of the AST meant for debugging the parser;
/// nothing in the interpreter depends on it.
///
/// # Example
/// ```
/// use strukta::printer::dump;
///
/// let program = strukta::parse("int x = 1 + 2;").unwrap();
/// let tree = dump(&program);
///
/// assert!(tree.contains("Binary Add"));
/// ```
#[must_use]
pub fn dump(program: &Program) -> String {
    let statements: Vec<String> = program.statements
                                         .iter()
                                         .map(|statement| print_statement(statement, 0))
                                         .collect();
    statements.join("\n")
}

fn print_statement(statement: &Statement, indent: usize) -> String {
    let pad = prefix(indent);
    match statement {
        Statement::If { condition, body, .. } => {
            format!("{pad}If\n{}", print_body(condition, body, indent))
        },
        Statement::While { condition, body, .. } => {
            format!("{pad}While\n{}", print_body(condition, body, indent))
        },
        Statement::Return { value, .. } => print_optional(&pad, "Return", value.as_ref(), indent),
        Statement::Print { value, .. } => print_optional(&pad, "Print", value.as_ref(), indent),
        Statement::FunctionDef(def) => {
            let parameters: Vec<String> =
                def.parameters
                   .iter()
                   .map(|p| {
                       let marker = if p.by_ref { "ref " } else { "" };
                       format!("{marker}{} {}", p.declared_type, p.name)
                   })
                   .collect();
            let mut output = format!("{pad}FunctionDef {} ({}) -> {} {{",
                                     def.name,
                                     parameters.join(", "),
                                     def.return_type);
            for statement in &def.body {
                output.push('\n');
                output.push_str(&print_statement(statement, indent + INDENT));
            }
            format!("{output}\n{pad}}}")
        },
        Statement::Assignment { target, value, .. } => {
            format!("{pad}Assignment\n{pad}target:\n{}\n{pad}value:\n{}",
                    print_lvalue(target, indent + INDENT),
                    print_expression(value, indent + INDENT))
        },
        Statement::VarDef { is_const,
                            declared_type,
                            name,
                            value,
                            .. } => {
            format!("{pad}VarDef\n{pad}const: {is_const}\n{pad}type: {declared_type}\n\
                     {pad}name: {name}\n{pad}value:\n{}",
                    print_expression(value, indent + INDENT))
        },
        Statement::FunctionCall { name, arguments, .. } => {
            let mut output = format!("{pad}FunctionCall {name}\n{pad}arguments:");
            for argument in arguments {
                let marker = if argument.by_ref { " ref" } else { "" };
                output.push_str(&format!("\n{pad}Argument{marker}\n{}",
                                         print_expression(&argument.value, indent + INDENT)));
            }
            output
        },
        Statement::StructDef(def) => {
            let mut output = format!("{pad}StructDef {}\n{pad}fields:", def.name);
            for field in &def.fields {
                output.push_str(&format!("\n{pad}  {} {}", field.declared_type, field.name));
            }
            output
        },
        Statement::VariantDef(def) => {
            let mut output = format!("{pad}VariantDef {}\n{pad}types:", def.name);
            for declared_type in &def.types {
                output.push_str(&format!("\n{pad}  {declared_type}"));
            }
            output
        },
    }
}

fn print_body(condition: &Expression, body: &[Statement], indent: usize) -> String {
    let pad = prefix(indent);
    let mut output = format!("{pad}condition:\n{}\n{pad}statements {{",
                             print_expression(condition, indent + INDENT));
    for statement in body {
        output.push('\n');
        output.push_str(&print_statement(statement, indent + INDENT));
    }
    format!("{output}\n{pad}}}")
}

fn print_optional(pad: &str, label: &str, value: Option<&Expression>, indent: usize) -> String {
    match value {
        Some(expr) => format!("{pad}{label}\n{}", print_expression(expr, indent + INDENT)),
        None => format!("{pad}{label}"),
    }
}

fn print_expression(expr: &Expression, indent: usize) -> String {
    let pad = prefix(indent);
    match expr {
        Expression::Constant { value, .. } => {
            format!("{pad}Constant: {}", constant_text(value))
        },
        Expression::Variable { name, .. } => format!("{pad}Variable {name}"),
        Expression::StructInit { values, .. } => {
            let mut output = format!("{pad}StructInit");
            for value in values {
                output.push('\n');
                output.push_str(&print_expression(value, indent + INDENT));
            }
            output
        },
        Expression::Binary { left, op, right, .. } => {
            format!("{pad}Binary {op:?}\n{}\n{}",
                    print_expression(left, indent + INDENT),
                    print_expression(right, indent + INDENT))
        },
        Expression::Unary { op, expr, .. } => {
            format!("{pad}Unary {op:?}\n{}", print_expression(expr, indent + INDENT))
        },
        Expression::Conversion { expr, target, .. } => {
            format!("{pad}Conversion {target}\n{}", print_expression(expr, indent + INDENT))
        },
        Expression::TypeCheck { expr, target, .. } => {
            format!("{pad}TypeCheck {target}\n{}", print_expression(expr, indent + INDENT))
        },
        Expression::FieldAccess { base, field, .. } => {
            format!("{pad}FieldAccess\n{}\n{pad}  field: {field}",
                    print_expression(base, indent + INDENT))
        },
        Expression::FunctionCall { name, arguments, .. } => {
            let mut output = format!("{pad}FunctionCall {name}");
            for argument in arguments {
                let marker = if argument.by_ref { " ref" } else { "" };
                output.push_str(&format!("\n{pad}Argument{marker}\n{}",
                                         print_expression(&argument.value, indent + INDENT)));
            }
            output
        },
    }
}

fn print_lvalue(lvalue: &LValue, indent: usize) -> String {
    let pad = prefix(indent);
    match lvalue {
        LValue::Variable(name) => format!("{pad}variable: {name}"),
        LValue::Field { base, field } => {
            format!("{pad}FieldAccess\n{}\n{pad}  field: {field}",
                    print_lvalue(base, indent + INDENT))
        },
    }
}

fn constant_text(value: &Constant) -> String {
    match value {
        Constant::Int(v) => v.to_string(),
        Constant::Float(v) => v.to_string(),
        Constant::Bool(v) => v.to_string(),
        Constant::Str(v) => format!("{v:?}"),
    }
}

fn prefix(indent: usize) -> String {
    " ".repeat(indent)
}
