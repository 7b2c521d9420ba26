use std::fs::{self};

use checklang::{
    error::{Error, ErrorKind},
    interpret,
    interpreter::{evaluator::core::Context, value::core::Value},
    run,
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_check_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = interpret(&code) {
                panic!("Check example {} in {:?} failed:\n{}\nError: {}", i + 1, path, code, e);
            }
        }
    }

    assert!(count > 0, "No Check examples found in book/src");
}

fn extract_check_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```check") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn assert_output(src: &str, expected: &[&str]) {
    match interpret(src) {
        Ok(output) => assert_eq!(output.lines, expected, "unexpected output for:\n{src}"),
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

fn assert_failure_kind(src: &str, kind: ErrorKind) -> Error {
    match interpret(src) {
        Ok(output) => panic!("Script succeeded but was expected to fail: {:?}", output.lines),
        Err(e) => {
            assert_eq!(e.kind(), kind, "unexpected error for:\n{src}\n{e}");
            e
        },
    }
}

#[test]
fn multiplication_before_addition() {
    assert_output("var x = 2; var y = 3; printLn(x + y * 2);", &["8"]);
    assert_output("printLn((2 + 3) * 2);", &["10"]);
    assert_output("printLn(10 - 4 - 3, \" \", 7 % 4, \" \", 1 / 4);", &["3 3 0.25"]);
}

#[test]
fn user_function_call() {
    assert_output("function add(number a, number b) { return a + b; } printLn(add(2,3));",
                  &["5"]);
}

#[test]
fn length_and_pop() {
    let mut context = Context::new();
    run("var arr = [1,2,3]; printLn(length(arr)); printLn(pop(arr));", &mut context).unwrap();

    assert_eq!(context.output(), ["3", "3"]);
    assert_eq!(context.get_variable("arr").map(ToString::to_string),
               Some("[1, 2]".to_string()));
}

#[test]
fn if_else() {
    assert_output("if(1 == 2) { printLn(\"a\"); } else { printLn(\"b\"); }", &["b"]);
    assert_output(r#"
        var n = 5;
        if (n < 0) { printLn("negative"); }
        else if (n == 0) { printLn("zero"); }
        else { printLn("positive"); }
    "#,
                  &["positive"]);
}

#[test]
fn unreachable_statement_after_return() {
    let err = assert_failure_kind("function f() { return 1; printLn(\"never\"); }",
                                  ErrorKind::Parse);
    assert!(err.to_string().contains("Unreachable"), "{err}");

    assert_failure_kind("return 1; printLn(2);", ErrorKind::Parse);
}

#[test]
fn statements_before_a_parse_error_have_run() {
    let mut context = Context::new();
    let result = run("printLn(1); printLn(2) printLn(3);", &mut context);

    assert!(matches!(result, Err(Error::Parse(_))));
    assert_eq!(context.output(), ["1"]);
}

#[test]
fn division_and_modulo_by_zero() {
    assert_failure_kind("printLn(1 / 0);", ErrorKind::Division);
    assert_failure_kind("var z = 0; printLn(5 % z);", ErrorKind::Division);
    assert_output("printLn(0 / 5);", &["0"]);
}

#[test]
fn arithmetic_requires_numbers() {
    let err = assert_failure_kind("var s = \"a\"; printLn(s + 1);", ErrorKind::Type);
    assert!(err.to_string().contains("'s'"), "{err}");
    assert_failure_kind("printLn(true * 2);", ErrorKind::Type);
}

#[test]
fn assignment_keeps_type() {
    assert_failure_kind("var x = 1; x = \"one\";", ErrorKind::Type);
    assert_failure_kind("var b = true; b = [true];", ErrorKind::Type);
    assert_output("var x = 1; x = x + 41; printLn(x);", &["42"]);
}

#[test]
fn assignment_is_visible_in_and_from_nested_scopes() {
    assert_output(r#"
        var total = 0;
        var i = 0;
        while (i < 4) {
            total = total + i;
            i = i + 1;
        }
        printLn(total);
    "#,
                  &["6"]);
}

#[test]
fn names_must_be_declared_once() {
    assert_failure_kind("printLn(missing);", ErrorKind::Name);
    assert_failure_kind("missing = 1;", ErrorKind::Name);
    assert_failure_kind("nothing(1);", ErrorKind::Name);
    assert_failure_kind("var x = 1; var x = 2;", ErrorKind::Name);
    assert_failure_kind("function f() { } function f() { }", ErrorKind::Name);
    assert_failure_kind("function push(number a) { }", ErrorKind::Name);
}

#[test]
fn block_scopes_do_not_leak() {
    assert_failure_kind("if (true) { var inner = 1; } printLn(inner);", ErrorKind::Name);
    assert_failure_kind("for (var i = 0; i < 2; i = i + 1) { } printLn(i);",
                        ErrorKind::Name);
    assert_output("var x = 1; if (true) { var y = x + 1; printLn(y); }", &["2"]);
}

#[test]
fn indexing() {
    assert_output("var a = [10, 20, 30]; printLn(a[1], \",\", index(2, a));", &["20,30"]);
    assert_output("var m = [[1, 2], [3, 4]]; printLn(m[1][0]); printLn(m[1]);",
                  &["3", "[3, 4]"]);
    assert_output("printLn([5, 6, 7][2]);", &["7"]);
}

#[test]
fn bad_indexes() {
    assert_failure_kind("var a = [1, 2, 3]; printLn(a[3]);", ErrorKind::Index);
    assert_failure_kind("var a = [1, 2, 3]; printLn(a[\"0\"]);", ErrorKind::Index);
    assert_failure_kind("var a = [1, 2, 3]; printLn(a[1.5]);", ErrorKind::Index);
    assert_failure_kind("var a = [1]; a[1] = 2;", ErrorKind::Index);
    assert_failure_kind("printLn(index(4, [1]));", ErrorKind::Index);
}

#[test]
fn index_assignment() {
    assert_output(r#"
        var m = [[1, 2], [3, 4]];
        var row = m[0];
        m[0][1] = 9;
        printLn(m);
        printLn(row);
    "#,
                  &["[[1, 9], [3, 4]]", "[1, 2]"]);
    assert_failure_kind("var a = [1, 2]; a[0] = \"x\";", ErrorKind::Type);
    assert_failure_kind("var a = [1, 2]; a[0][0] = 1;", ErrorKind::Type);
}

#[test]
fn wrong_arity_fails() {
    assert_failure_kind("function f(number a) { } f(1, 2);", ErrorKind::Arity);
    assert_failure_kind("printLn(length([1], [2]));", ErrorKind::Arity);
    assert_failure_kind("printLn();", ErrorKind::Arity);
}

#[test]
fn call_checks_happen_before_the_body_runs() {
    let mut context = Context::new();
    let result = run(r#"
        function shout(string s, number n) { printLn("body ran"); }
        shout("x", "y");
    "#,
                     &mut context);

    assert_eq!(result.map_err(|e| e.kind()), Err(ErrorKind::Type));
    assert!(context.output().is_empty());

    let result = run("shout(\"x\");", &mut context);
    assert_eq!(result.map_err(|e| e.kind()), Err(ErrorKind::Arity));
    assert!(context.output().is_empty());
}

#[test]
fn push_then_pop_round_trip() {
    assert_output(r#"
        var a = [1, 2];
        push(3, a);
        printLn(length(a));
        printLn(pop(a));
        printLn(a);
    "#,
                  &["3", "3", "[1, 2]"]);
}

#[test]
fn array_builtins_on_literals_do_not_rebind() {
    assert_output("printLn(push(4, [1, 2, 3])); printLn(setIndex(0, 9, [1, 2]));",
                  &["[1, 2, 3, 4]", "[9, 2]"]);
    assert_output("var a = [1]; setIndex(0, 5, a); printLn(a);", &["[5]"]);
    assert_output("var e = []; printLn(pop(e)); printLn(length(e));", &["null", "0"]);
}

#[test]
fn concat_and_rendering() {
    assert_output(r#"
        var name = "Check";
        var greeting = concat("Hello, ", name, "!");
        printLn(greeting);
        printLn(concat(1, true, [1, "a"]));
        printLn(0 - 0, " ", 0.1 + 0.2);
    "#,
                  &["Hello, Check!", "1true[1, a]", "0 0.30000000000000004"]);
}

#[test]
fn recursion() {
    assert_output(r#"
        function fib(number n) {
            if (n < 2) {
                return n;
            }
            return fib(n - 1) + fib(n - 2);
        }
        printLn(fib(15));
    "#,
                  &["610"]);
}

#[test]
fn return_exits_loops_and_nested_blocks() {
    assert_output(r#"
        function first_over(number limit) {
            for (var i = 0; i < 100; i = i + 1) {
                if (i * i > limit) {
                    return i;
                }
            }
            return 0 - 1;
        }
        printLn(first_over(50));
    "#,
                  &["8"]);
}

#[test]
fn functions_without_return_yield_null() {
    assert_output("function f() { var x = 1; } printLn(f()); function g() { return; } printLn(g());",
                  &["null", "null"]);
}

#[test]
fn comparisons() {
    assert_output(r#"
        printLn(1 < 2, 2 < 2, 2 <= 2, 3 > 2, 2 > 2, 2 >= 2);
        printLn("a" == "a", "a" != "b", true == false);
        printLn(1 == 1 && 2 == 3, 1 == 1 || 2 == 3);
    "#,
                  &["truefalsetruetruefalsetrue", "truetruefalse", "falsetrue"]);
}

#[test]
fn comparisons_need_matching_types() {
    assert_failure_kind("printLn(1 == \"1\");", ErrorKind::Type);
    assert_failure_kind("printLn(\"a\" < \"b\");", ErrorKind::Type);
    assert_failure_kind("printLn(true && 1);", ErrorKind::Type);
    assert_failure_kind("if (1) { }", ErrorKind::Type);
}

#[test]
fn logical_operators_evaluate_both_sides() {
    assert_failure_kind("printLn(false && missing == 1);", ErrorKind::Name);
}

#[test]
fn lexical_errors_carry_position() {
    let err = assert_failure_kind("var x = 1;\nvar y = @;", ErrorKind::Lex);
    assert_eq!((err.position().line, err.position().column), (2, 9));
    assert!(err.to_string().starts_with("Error on line 2, column 9"), "{err}");

    assert_failure_kind("printLn(\"open);", ErrorKind::Lex);
}

#[test]
fn comments_are_ignored() {
    assert_output("/* block\n comment */ printLn(1); // trailing\nprintLn(2);", &["1", "2"]);
}

#[test]
fn block_comments_in_any_position() {
    assert_output("/**/ printLn(1);", &["1"]);
    assert_output("printLn(/* a */ 2 /* b */ * 3); /* one\ntwo */", &["6"]);
    assert_output("var x = 6 /* * 2 */ / 2; printLn(x);", &["3"]);

    let err = assert_failure_kind("printLn(1);\n/* open", ErrorKind::Lex);
    assert_eq!((err.position().line, err.position().column), (2, 1));
}

#[test]
fn final_value_of_the_program() {
    assert_eq!(interpret("var x = 4; x * 2;").unwrap().value, Value::Number(8.0));
    assert_eq!(interpret("return 7;").unwrap().value, Value::Number(7.0));
    assert_eq!(interpret("").unwrap().value, Value::Null);
}

#[test]
fn index_assignment_sees_changes_made_by_its_value() {
    assert_output("var a = [1, 2]; a[0] = pop(a); printLn(a);", &["[2]"]);
    assert_output("var a = [1]; a[0] = length(push(5, a)); printLn(a);", &["[2, 5]"]);
    assert_output("var a = [[0], [0]]; a[1][0] = length(setIndex(0, [7, 8], a)); printLn(a);",
                  &["[[7, 8], [2]]"]);
}

#[test]
fn return_outside_functions_ends_the_program() {
    let output = interpret("while (true) { printLn(1); return 3; } printLn(2);").unwrap();
    assert_eq!(output.lines, ["1"]);
    assert_eq!(output.value, Value::Number(3.0));

    let output = interpret("if (1 < 2) { return \"done\"; } printLn(2);").unwrap();
    assert!(output.lines.is_empty());
    assert_eq!(output.value, Value::from("done"));
}
