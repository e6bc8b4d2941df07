use std::{error::Error, fs};

use strukta::interpret;
use walkdir::WalkDir;

#[test]
fn demo_scripts_run_clean() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "skt"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = run(&source) {
            panic!("Demo script {path:?} failed:{e}");
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}

#[test]
fn fibonacci_demo_prints_the_sequence() {
    let script = fs::read_to_string("demos/fibonacci.skt").expect("missing file");
    assert_output(&script, "0\n1\n1\n2\n3\n5\n8\n13\n21\n34\n");
}

fn run(src: &str) -> Result<String, Box<dyn Error>> {
    let mut sink = Vec::new();
    interpret(src, &mut sink)?;
    Ok(String::from_utf8(sink).expect("program output is valid UTF-8"))
}

fn assert_output(src: &str, expected: &str) {
    match run(src) {
        Ok(output) => assert_eq!(output, expected, "script:\n{src}"),
        Err(e) => panic!("Script failed:{e}\nscript:\n{src}"),
    }
}

fn assert_failure(src: &str, needle: &str) {
    match run(src) {
        Ok(output) => panic!("Script produced {output:?} but was expected to fail:\n{src}"),
        Err(e) => {
            let message = e.to_string();
            assert!(message.contains(needle), "error {message:?} does not mention {needle:?}");
        },
    }
}

#[test]
fn arithmetic_and_precedence() {
    assert_output("print 1 + 2 * 3;", "7\n");
    assert_output("print (1 + 2) * 3;", "9\n");
    assert_output("print 10 / 2 - 3;", "2\n");
    assert_output("print 10 - 2 - 3;", "5\n");
    assert_output("print 7 / 2;", "3\n");
    assert_output("print 2.5 + 0.25;", "2.75\n");
}

#[test]
fn unary_operators() {
    assert_output("print -5 + 8;", "3\n");
    assert_output("print -(2 * 3);", "-6\n");
    assert_output("print not false;", "true\n");
    assert_failure("print not 1 < 2;", "Expected: BOOL\nActual: INT");
    assert_failure("print -\"s\";", "Expected: INT\nActual: STR");
}

#[test]
fn comparisons_and_equality() {
    assert_output("print 1 < 2;", "true\n");
    assert_output("print 2 <= 1;", "false\n");
    assert_output("print 1.5 > 0.5;", "true\n");
    assert_output("print 1 < 2 == true;", "true\n");
    assert_output("print \"a\" == \"a\";", "true\n");
    assert_output("print true != false;", "true\n");
}

#[test]
fn equality_requires_matching_types() {
    assert_failure("print 1 == 1.0;", "Expected: INT\nActual: FLOAT");
    assert_failure("print 1 < 2.0;", "Expected: INT\nActual: FLOAT");
}

#[test]
fn logical_operators_short_circuit() {
    let src = r#"
bool side() {
    print "called";
    return true;
}
print false and side();
print true or side();
"#;
    assert_output(src, "false\ntrue\n");

    let src = r#"
bool side() {
    print "called";
    return true;
}
print true and side();
"#;
    assert_output(src, "called\ntrue\n");
}

#[test]
fn type_conversions() {
    assert_output("print 2.9 as int;", "2\n");
    assert_output("print -2.9 as int;", "-2\n");
    assert_output("print 7 as float + 0.5;", "7.5\n");
    assert_output("print 130 as str;", "130\n");
    assert_output("print true as str;", "true\n");
    assert_output("print 1.5 as str;", "1.5\n");
    assert_output("print 5 as int;", "5\n");
}

#[test]
fn invalid_conversion_is_error() {
    assert_failure("print \"5\" as int;", "Cannot convert from STR to INT");
    assert_failure("print true as float;", "Cannot convert from BOOL to FLOAT");
}

#[test]
fn is_checks_runtime_types() {
    assert_output("print 5 is int;", "true\n");
    assert_output("print 5 is float;", "false\n");
    assert_output("print \"s\" is str;", "true\n");

    let src = "
struct P { int x }
P p = {1};
print p is P;
";
    assert_output(src, "true\n");
}

#[test]
fn print_statement() {
    assert_output("print;", "\n");
    assert_output("print \"\";", "\n");
    assert_output("print 2.50;", "2.5\n");
    assert_output("print \"say \\\"hi\\\"\";", "say \"hi\"\n");
    assert_output(r#"print "tab\there";"#, "tab\there\n");
    assert_output(r#"print "line\nbreak";"#, "line\nbreak\n");
}

#[test]
fn while_loops() {
    let src = "
int i = 0;
int total = 0;
while i < 5 {
    total = total + i;
    i = i + 1;
}
print total;
";
    assert_output(src, "10\n");
}

#[test]
fn while_bodies_get_a_fresh_scope_each_iteration() {
    let src = "
int i = 0;
while i < 3 {
    int doubled = i * 2;
    print doubled;
    i = i + 1;
}
";
    assert_output(src, "0\n2\n4\n");
}

#[test]
fn condition_must_be_bool() {
    assert_failure("while 1 { }", "Expected: BOOL\nActual: INT");
    assert_failure("if \"yes\" { }", "Expected: BOOL\nActual: STR");
}

#[test]
fn variable_definition_and_assignment() {
    assert_output("int x = 5; print x;", "5\n");
    assert_output("int x = 1; x = x + 1; print x;", "2\n");
    assert_output("const float half = 0.5; print half * 4.0;", "2\n");
}

#[test]
fn assignment_revalidates_declared_type() {
    assert_failure("int x = 1; x = \"s\";", "Expected: INT\nActual: STR");
    assert_failure("int x = 1.5;", "Expected: INT\nActual: FLOAT");
}

#[test]
fn block_scoping() {
    let src = "
int x = 1;
if true {
    int x = 2;
    print x;
}
print x;
";
    assert_output(src, "2\n1\n");

    let src = "
if true {
    int y = 2;
}
print y;
";
    assert_failure(src, "Variable y not found");
}

#[test]
fn same_scope_redefinition_is_error() {
    assert_failure("int x = 1; int x = 2;", "Redefinition of x variable");
}

#[test]
fn unknown_symbols_are_errors() {
    assert_failure("print x;", "Variable x not found");
    assert_failure("x = 5;", "Variable x not found");
    assert_failure("f();", "Function f not found");
    assert_failure("P p = {1};", "Type P not found");
}

#[test]
fn struct_definition_and_access() {
    let src = "
struct P { int x, int y }
P p = {1, 2};
print p.x;
print p.y;
p.x = 10;
print p.x + p.y;
";
    assert_output(src, "1\n2\n12\n");
}

#[test]
fn struct_values_print_their_fields() {
    let src = "
struct P { int x, int y }
P p = {1, 2};
print p;
";
    assert_output(src, "P {x: 1, y: 2}\n");
}

#[test]
fn struct_values_copy_on_assignment() {
    let src = "
struct P { int x, int y }
P a = {1, 2};
P b = a;
b.x = 9;
print a.x;
print b.x;
";
    assert_output(src, "1\n9\n");
}

#[test]
fn nested_struct_fields() {
    let src = "
struct Point { int x, int y }
struct Line { Point a, Point b }
Line line = {{0, 1}, {2, 3}};
print line.b.x;
line.a.y = 9;
print line.a.y;
";
    assert_output(src, "2\n9\n");
}

#[test]
fn struct_field_count_must_match() {
    let src = "
struct P { int x, int y }
P p = {1, 2, 3};
";
    assert_failure(src, "Expected 2 fields but 3 were given");
}

#[test]
fn struct_field_types_are_checked() {
    let src = "
struct P { int x, int y }
P p = {1, \"two\"};
";
    assert_failure(src, "Expected: INT\nActual: STR");
}

#[test]
fn field_assignment_revalidates_type() {
    let src = "
struct P { int x, int y }
P p = {1, 2};
p.x = \"s\";
";
    assert_failure(src, "Expected: INT\nActual: STR");
}

#[test]
fn unknown_field_is_error() {
    let src = "
struct P { int x, int y }
P p = {1, 2};
print p.z;
";
    assert_failure(src, "Invalid struct's field name z");

    let src = "
struct P { int x, int y }
P p = {1, 2};
p.z = 3;
";
    assert_failure(src, "Invalid struct's field name z");
}

#[test]
fn field_access_requires_struct_value() {
    assert_failure("int x = 5; print x.y;", "Expected: Struct\nActual: INT");
}

#[test]
fn named_structs_do_not_cross_assign() {
    let src = "
struct P { int x, int y }
struct Q { int x, int y }
P p = {1, 2};
Q q = p;
";
    assert_failure(src, "Expected: Q\nActual: Struct P");
}

#[test]
fn struct_equality_is_not_defined() {
    let src = "
struct P { int x, int y }
P a = {1, 2};
P b = {1, 2};
print a == b;
";
    assert_failure(src, "Expected: Struct P\nActual: Struct P");
}

#[test]
fn variant_holds_one_member() {
    let src = "
variant V { int, str }
V v = 5;
print v;
print v is int;
print v is str;
v = \"text\";
print v is str;
print v;
";
    assert_output(src, "5\ntrue\nfalse\ntrue\ntext\n");
}

#[test]
fn variant_rejects_foreign_types() {
    let src = "
variant V { int, str }
V v = true;
";
    assert_failure(src, "Expected: V\nActual: BOOL");
}

#[test]
fn variant_value_extracts_to_member_type() {
    let src = "
variant V { int, str }
V v = 5;
int n = v;
print n + 1;
";
    assert_output(src, "6\n");

    let src = "
variant V { int, str }
V v = \"text\";
int n = v;
";
    assert_failure(src, "Expected: INT\nActual: STR");
}

#[test]
fn variant_value_rebinds_to_other_variant() {
    let src = "
variant A { int, str }
variant B { int, bool }
A a = 5;
B b = a;
print b is int;
";
    assert_output(src, "true\n");
}

#[test]
fn variant_unwraps_before_conversion() {
    let src = "
variant V { int, str }
V v = 5;
print v as float + 0.5;
";
    assert_output(src, "5.5\n");
}

#[test]
fn variant_extracts_struct_member_by_conversion() {
    let src = "
struct P { int x, int y }
variant V { P, int }
P p = {3, 4};
V v = p;
P q = v as P;
print q.y;
";
    assert_output(src, "4\n");

    let src = "
struct P { int x, int y }
variant V { P, int }
V v = 7;
P q = v as P;
";
    assert_failure(src, "Cannot convert from INT to P");
}

#[test]
fn named_struct_binds_to_variant_member() {
    let src = "
struct P { int x }
variant V { P, int }
P p = {1};
V v = p;
print v is P;
";
    assert_output(src, "true\n");
}

#[test]
fn anonymous_struct_never_binds_to_variant() {
    let src = "
struct P { int x }
variant V { P, int }
V v = {1};
";
    assert_failure(src, "Expected: V\nActual: Anonymous struct");
}

#[test]
fn ambiguous_variant_member_never_binds() {
    let src = "
variant V { int, int }
V v = 5;
";
    assert_failure(src, "Expected: V\nActual: INT");
}

#[test]
fn function_definition_and_call() {
    let src = "
int add(int a, int b) {
    return a + b;
}
print add(2, 3);
";
    assert_output(src, "5\n");
}

#[test]
fn recursion_works() {
    let src = "
int fib(int n) {
    if n < 2 {
        return n;
    }
    return fib(n - 1) + fib(n - 2);
}
print fib(10);
";
    assert_output(src, "55\n");
}

#[test]
fn mutual_recursion_after_definitions() {
    let src = "
bool is_even(int n) {
    if n == 0 {
        return true;
    }
    return is_odd(n - 1);
}
bool is_odd(int n) {
    if n == 0 {
        return false;
    }
    return is_even(n - 1);
}
print is_even(10);
print is_odd(10);
";
    assert_output(src, "true\nfalse\n");
}

#[test]
fn call_arguments_bind_by_value() {
    let src = "
void bump(int n) {
    n = n + 1;
    print n;
}
int x = 1;
bump(x);
print x;
";
    assert_output(src, "2\n1\n");
}

#[test]
fn ref_parameters_alias_the_caller() {
    let src = "
void inc(ref int n) {
    n = n + 1;
}
int x = 41;
inc(x);
print x;
";
    assert_output(src, "42\n");
}

#[test]
fn ref_argument_must_be_a_variable() {
    let src = "
void inc(ref int n) {
    n = n + 1;
}
inc(5);
";
    assert_failure(src, "Argument for ref parameter n must be a variable");
}

#[test]
fn ref_argument_type_must_match_exactly() {
    let src = "
void inc(ref int n) {
    n = n + 1;
}
float x = 1.5;
inc(x);
";
    assert_failure(src, "Expected: INT\nActual: FLOAT");
}

#[test]
fn calls_use_a_fresh_scope() {
    let src = "
int x = 5;
int peek() {
    return x;
}
print peek();
";
    assert_failure(src, "Variable x not found");
}

#[test]
fn call_before_definition_is_error() {
    let src = "
f();
void f() {
    print 1;
}
";
    assert_failure(src, "Function f not found");
}

#[test]
fn argument_count_must_match() {
    let src = "
int add(int a, int b) {
    return a + b;
}
print add(1);
";
    assert_failure(src, "Expected 2 arguments but 1 were given");
}

#[test]
fn parameter_shadowing_is_redefinition() {
    let src = "
void f(int a) {
    int a = 2;
}
f(1);
";
    assert_failure(src, "Redefinition of a variable");
}

#[test]
fn return_exits_nested_control_flow() {
    let src = "
int find(int limit) {
    int i = 0;
    while true {
        if i == limit {
            return i * 10;
        }
        i = i + 1;
    }
}
print find(3);
";
    assert_output(src, "30\n");
}

#[test]
fn void_function_may_return_early() {
    let src = "
void classify(int n) {
    if n > 0 {
        return;
    }
    print \"non-positive\";
}
classify(1);
classify(0);
";
    assert_output(src, "non-positive\n");
}

#[test]
fn void_function_must_not_return_a_value() {
    let src = "
void f() {
    return 5;
}
f();
";
    assert_failure(src, "Expected: VOID\nActual: INT");
}

#[test]
fn value_function_must_produce_a_value() {
    let src = "
int f() {
    print \"ran\";
}
int x = f();
";
    assert_failure(src, "Expected: INT\nActual: VOID");
}

#[test]
fn returned_value_must_match_return_type() {
    let src = "
int f() {
    return \"s\";
}
print f();
";
    assert_failure(src, "Expected: INT\nActual: STR");
}

#[test]
fn void_call_produces_no_value() {
    let src = "
void f() { }
int x = f();
";
    assert_failure(src, "Expression produced no value");

    let src = "
void f() { }
print f();
";
    assert_failure(src, "Expression produced no value");
}

#[test]
fn anonymous_struct_binds_to_struct_return_type() {
    let src = "
struct P { int x, int y }
P make(int x, int y) {
    return {x, y};
}
P p = make(3, 4);
print p.x + p.y;
";
    assert_output(src, "7\n");
}

#[test]
fn top_level_return_stops_the_script() {
    let src = "
print 1;
return;
print 2;
";
    assert_output(src, "1\n");
}

#[test]
fn duplicate_definitions_are_errors() {
    assert_failure("void f() { } void f() { }", "Redefinition of f function");
    assert_failure("struct T { int x } struct T { int y }", "Redefinition of T struct");
    assert_failure("variant T { int, str } variant T { int, bool }", "Redefinition of T variant");
    assert_failure("struct T { int x } variant T { int, str }", "Redefinition of T variant");
    assert_failure("variant T { int, str } struct T { int x }", "Redefinition of T struct");
}

#[test]
fn division_by_zero_is_error() {
    assert_failure("print 1 / 0;", "Division by zero");
    assert_failure("int x = 0; print 10 / x;", "Division by zero");
}

#[test]
fn float_division_follows_ieee() {
    assert_output("print 1.0 / 0.0;", "inf\n");
    assert_output("print -1.0 / 0.0;", "-inf\n");
    assert_output("print 0.0 / 0.0 < 1.0;", "false\n");
}

#[test]
fn integer_overflow_is_error() {
    assert_failure("print 9223372036854775807 + 1;",
                   "Integer overflow while evaluating expression");
    assert_failure("print -9223372036854775807 - 2;", "Integer overflow");
}

#[test]
fn numeric_operators_reject_other_types() {
    assert_failure("print \"a\" + \"b\";", "Expected: INT\nActual: STR");
    assert_failure("print 1 + 1.0;", "Expected: INT\nActual: FLOAT");
    assert_failure("print true * false;", "Expected: INT\nActual: BOOL");
}

#[test]
fn lexical_errors_are_reported_first() {
    let src = "
int x = 5 @ 3;
if {
";
    assert_failure(src, "Unknown token starting with '@'");
}

#[test]
fn malformed_literals_are_errors() {
    assert_failure("int x = 9223372036854775808;",
                   "Detected overflow while constructing numeric literal");
    assert_failure("float f = 1.;", "Expected digit after '.' in float literal");
    assert_failure("print \"abc", "Encountered end of file while processing str literal");
    assert_failure(r#"print "a\qb";"#, r"'q' cannot be escaped with '\'");
}

#[test]
fn runtime_errors_carry_positions() {
    let src = "int a = 1;\na = \"s\";";
    match run(src) {
        Ok(_) => panic!("Script succeeded but was expected to fail"),
        Err(e) => assert_eq!(e.to_string(), " at 2:1\nExpected: INT\nActual: STR"),
    }
}

#[test]
fn execution_stops_at_the_first_error() {
    let src = "
print 1;
print x;
print 2;
";
    let mut sink = Vec::new();
    assert!(interpret(src, &mut sink).is_err());
    assert_eq!(String::from_utf8(sink).expect("output is valid UTF-8"), "1\n");
}

#[test]
fn comments_are_ignored() {
    let src = "
# leading comment
int x = 1; # trailing comment
print x;
";
    assert_output(src, "1\n");
}
