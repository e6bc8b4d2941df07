use strukta::{ast::{BinaryOperator, Constant, Expression, LValue, Parameter, Position,
                    ReturnType, Statement, Type},
              parse};

fn parse_error(src: &str) -> String {
    parse(src).expect_err("source was expected to fail parsing").to_string()
}

#[test]
fn variable_definition_shape() {
    let program = parse("int x = 5;").expect("parse failed");

    assert_eq!(program.statements,
               vec![Statement::VarDef { is_const: false,
                                        declared_type: Type::Int,
                                        name: "x".to_string(),
                                        value: Expression::Constant { value:    Constant::Int(5),
                                                                      position: Position::new(1,
                                                                                              9), },
                                        position: Position::new(1, 1) }]);
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let program = parse("int r = 1 + 2 * 3;").expect("parse failed");

    let Statement::VarDef { value, .. } = &program.statements[0] else {
        panic!("expected a variable definition")
    };
    let Expression::Binary { op: BinaryOperator::Add, right, .. } = value else {
        panic!("expected an addition at the top: {value:?}")
    };
    assert!(matches!(**right, Expression::Binary { op: BinaryOperator::Multiply, .. }));
}

#[test]
fn parentheses_override_precedence() {
    let program = parse("int r = (1 + 2) * 3;").expect("parse failed");

    let Statement::VarDef { value, .. } = &program.statements[0] else {
        panic!("expected a variable definition")
    };
    let Expression::Binary { op: BinaryOperator::Multiply, left, .. } = value else {
        panic!("expected a multiplication at the top: {value:?}")
    };
    assert!(matches!(**left, Expression::Binary { op: BinaryOperator::Add, .. }));
}

#[test]
fn relation_binds_tighter_than_equality() {
    let program = parse("bool r = 1 < 2 == true;").expect("parse failed");

    let Statement::VarDef { value, .. } = &program.statements[0] else {
        panic!("expected a variable definition")
    };
    let Expression::Binary { op: BinaryOperator::Equal, left, .. } = value else {
        panic!("expected an equality at the top: {value:?}")
    };
    assert!(matches!(**left, Expression::Binary { op: BinaryOperator::Less, .. }));
}

#[test]
fn comparisons_do_not_chain() {
    let message = parse_error("int r = 1 < 2 < 3;");
    assert!(message.contains("Missing semicolon"), "{message}");

    let message = parse_error("bool r = 1 == 2 == 3;");
    assert!(message.contains("Missing semicolon"), "{message}");
}

#[test]
fn unary_operators_do_not_stack() {
    let message = parse_error("int r = --5;");
    assert!(message.contains("Expected expression after unary operator"), "{message}");
}

#[test]
fn empty_parentheses_hold_no_expression() {
    let message = parse_error("int x = ();");
    assert!(message.contains("Expected expression after assignment"), "{message}");
}

#[test]
fn nested_parentheses_parse() {
    assert!(parse("int x = ((1));").is_ok());
    assert!(parse("int x = -((1 + 2) * 3);").is_ok());

    let message = parse_error("int x = (1;");
    assert!(message.contains("Expected right parenthesis after nested expression"),
            "{message}");
}

#[test]
fn trailing_tokens_are_unknown_statements() {
    let message = parse_error("int x = 1; }");
    assert!(message.contains("Unknown statement"), "{message}");
}

#[test]
fn block_braces_are_required() {
    let message = parse_error("if true print 1;");
    assert!(message.contains("Missing left curly brace"), "{message}");

    let message = parse_error("while true { print 1;");
    assert!(message.contains("Missing right curly brace"), "{message}");
}

#[test]
fn conditions_are_required() {
    let message = parse_error("if { print 1; }");
    assert!(message.contains("Expected if-statement condition"), "{message}");

    let message = parse_error("while { print 1; }");
    assert!(message.contains("Expected while-statement condition"), "{message}");
}

#[test]
fn struct_initializers_do_not_compose() {
    let message = parse_error("int x = {1, 2} + 1;");
    assert!(message.contains("Missing semicolon"), "{message}");

    let message = parse_error("int x = 1 + {2};");
    assert!(message.contains("Expected expression after additive operator"), "{message}");
}

#[test]
fn struct_initializers_nest() {
    let program = parse("P p = {{1}, 2};").expect("parse failed");

    let Statement::VarDef { declared_type, value, .. } = &program.statements[0] else {
        panic!("expected a variable definition")
    };
    assert_eq!(*declared_type, Type::Named("P".to_string()));

    let Expression::StructInit { values, .. } = value else {
        panic!("expected a struct initializer: {value:?}")
    };
    assert_eq!(values.len(), 2);
    assert!(matches!(values[0], Expression::StructInit { .. }));
}

#[test]
fn function_definition_shape() {
    let program = parse("int add(int a, ref int b) { return a; }").expect("parse failed");

    let Statement::FunctionDef(def) = &program.statements[0] else {
        panic!("expected a function definition")
    };
    assert_eq!(def.return_type, ReturnType::Value(Type::Int));
    assert_eq!(def.name, "add");
    assert_eq!(def.parameters,
               vec![Parameter { declared_type: Type::Int,
                                name:          "a".to_string(),
                                by_ref:        false, },
                    Parameter { declared_type: Type::Int,
                                name:          "b".to_string(),
                                by_ref:        true, }]);
    assert_eq!(def.body.len(), 1);
}

#[test]
fn void_functions_parse() {
    let program = parse("void f() { }").expect("parse failed");

    let Statement::FunctionDef(def) = &program.statements[0] else {
        panic!("expected a function definition")
    };
    assert_eq!(def.return_type, ReturnType::Void);
    assert!(def.parameters.is_empty());
    assert!(def.body.is_empty());
}

#[test]
fn parameter_lists_are_checked() {
    let message = parse_error("void f(ref) { }");
    assert!(message.contains("Expected parameter type after ref keyword"), "{message}");

    let message = parse_error("void f(int) { }");
    assert!(message.contains("Expected parameter name"), "{message}");

    let message = parse_error("void f(int a,) { }");
    assert!(message.contains("Expected parameter after comma"), "{message}");

    let message = parse_error("void f() { print 1;");
    assert!(message.contains("Missing right curly brace after function body"), "{message}");
}

#[test]
fn call_statements_require_semicolons() {
    let message = parse_error("f()");
    assert!(message.contains("Missing semicolon after function call"), "{message}");

    let message = parse_error("f(1;");
    assert!(message.contains("Missing right parenthesis after function call arguments"),
            "{message}");
}

#[test]
fn call_arguments_mark_ref_sites() {
    let program = parse("use(ref x, 5);").expect("parse failed");

    let Statement::FunctionCall { name, arguments, .. } = &program.statements[0] else {
        panic!("expected a call statement")
    };
    assert_eq!(name, "use");
    assert_eq!(arguments.len(), 2);
    assert!(arguments[0].by_ref);
    assert!(!arguments[1].by_ref);
}

#[test]
fn field_assignment_targets_nest() {
    let program = parse("p.x.y = 5;").expect("parse failed");

    let Statement::Assignment { target, .. } = &program.statements[0] else {
        panic!("expected an assignment")
    };
    let root = LValue::Variable("p".to_string());
    let x = LValue::Field { base:  Box::new(root),
                            field: "x".to_string(), };
    let expected = LValue::Field { base:  Box::new(x),
                                   field: "y".to_string(), };
    assert_eq!(*target, expected);
}

#[test]
fn assignment_operator_is_required() {
    let message = parse_error("x 5;");
    assert!(message.contains("Expected assignment operator"), "{message}");
}

#[test]
fn conversion_targets_follow_the_keyword() {
    let program = parse("float x = 5 as float;").expect("parse failed");
    let Statement::VarDef { value, .. } = &program.statements[0] else {
        panic!("expected a variable definition")
    };
    assert!(matches!(value, Expression::Conversion { target: Type::Float, .. }));

    let message = parse_error("int x = 5 as;");
    assert!(message.contains("Expected type after is/as keyword"), "{message}");
}

#[test]
fn type_checks_accept_user_type_names() {
    let program = parse("bool b = v is P;").expect("parse failed");

    let Statement::VarDef { value, .. } = &program.statements[0] else {
        panic!("expected a variable definition")
    };
    let Expression::TypeCheck { target, .. } = value else {
        panic!("expected a type check: {value:?}")
    };
    assert_eq!(*target, Type::Named("P".to_string()));
}

#[test]
fn struct_fields_are_comma_separated() {
    assert!(parse("struct P { int x, int y }").is_ok());

    let message = parse_error("struct P { int x int y }");
    assert!(message.contains("Missing right curly brace in struct definition"), "{message}");

    let message = parse_error("struct P { int x, }");
    assert!(message.contains("Expected field after comma"), "{message}");
}

#[test]
fn variant_members_are_comma_separated() {
    assert!(parse("variant V { int, str }").is_ok());

    let message = parse_error("variant V { int str }");
    assert!(message.contains("Missing right curly brace in variant definition"), "{message}");

    let message = parse_error("variant V { }");
    assert!(message.contains("Expected at least one type in variant definition"), "{message}");
}

#[test]
fn const_definitions_require_type_and_name() {
    let message = parse_error("const = 5;");
    assert!(message.contains("Expected variable type"), "{message}");

    let message = parse_error("const x = 5;");
    assert!(message.contains("Expected variable name"), "{message}");
}

#[test]
fn return_value_is_optional() {
    let program = parse("return;").expect("parse failed");
    assert_eq!(program.statements,
               vec![Statement::Return { value:    None,
                                        position: Position::new(1, 1), }]);

    let program = parse("return 5;").expect("parse failed");
    assert!(matches!(&program.statements[0], Statement::Return { value: Some(_), .. }));
}

#[test]
fn errors_point_at_the_offending_token() {
    let message = parse_error("int x = ;");
    assert!(message.starts_with(" at 1:9\n"), "{message}");

    let message = parse_error("int a = 1;\nint b = ;");
    assert!(message.starts_with(" at 2:9\n"), "{message}");
}

#[test]
fn comments_take_the_rest_of_the_line() {
    let program = parse("int x = 5; # x = 6;\nprint x;").expect("parse failed");
    assert_eq!(program.statements.len(), 2);
}

#[test]
fn dump_renders_an_indented_tree() {
    let program = parse("int x = 1 + 2 * 3;").expect("parse failed");
    let tree = strukta::printer::dump(&program);

    assert!(tree.contains("VarDef"), "{tree}");
    assert!(tree.contains("name: x"), "{tree}");
    assert!(tree.contains("Binary Add"), "{tree}");
    assert!(tree.contains("Binary Multiply"), "{tree}");

    let program = parse("void f(ref int n) { n = n + 1; }").expect("parse failed");
    let tree = strukta::printer::dump(&program);

    assert!(tree.contains("FunctionDef f (ref INT n) -> VOID {"), "{tree}");
    assert!(tree.contains("Assignment"), "{tree}");
}
