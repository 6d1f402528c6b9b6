use std::{
    cell::RefCell,
    fs::{self},
    rc::Rc,
};

use embedscript::{
    Environment, Error, ErrorKind, HostTable, NativeFunction, ParseError, RuntimeError, Value,
    evaluate, interpreter::parser::core::MAX_NESTING, parse, run,
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

        for (i, code) in extract_dsl_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = eval_script(&code) {
                panic!("DSL example {} in {:?} failed:\n{}\nError: {:?}",
                       i + 1,
                       path,
                       code,
                       e);
            }
        }
    }

    assert!(count > 0, "No DSL examples found in book/src");
}

fn extract_dsl_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```embedscript") {
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

/// A root scope holding an `assert` host function, so scripts can check
/// their own results.
fn test_env() -> Environment {
    let env = Environment::new();
    let assert = NativeFunction::new("assert", |_, args| match args {
        [value] if value.is_false() => Err(RuntimeError::host("Assertion failed")),
        [_] => Ok(Value::Undefined),
        _ => Err(RuntimeError::host("assert expects one argument")),
    });
    env.define("assert", assert, true);
    env
}

fn eval_script(src: &str) -> Result<Value, Error> {
    let program = parse(src)?;
    Ok(evaluate(&program, &test_env())?)
}

fn assert_success(src: &str) -> Value {
    match eval_script(src) {
        Ok(value) => value,
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

fn assert_failure(src: &str) -> Error {
    match eval_script(src) {
        Ok(value) => panic!("Script succeeded with {value} but was expected to fail\n{src}"),
        Err(e) => e,
    }
}

fn assert_runtime_failure(src: &str, kind: ErrorKind) {
    match assert_failure(src) {
        Error::Runtime(e) => assert_eq!(e.kind(), kind, "{e}"),
        Error::Parse(e) => panic!("Expected a runtime failure, got a parse error: {e}"),
    }
}

#[test]
fn arithmetic_and_precedence() {
    assert_eq!(run("1 + 1").unwrap(), Value::Number(2.0));
    assert_eq!(run("3 / 4").unwrap(), Value::Number(0.75));
    assert_eq!(run("3 % 4").unwrap(), Value::Number(3.0));
    assert_success("assert(2 + 3 * 4 == 14)");
    assert_success("assert((2 + 3) * 4 == 20)");
    assert_success("assert(10 - 4 - 3 == 3)");
    assert_success("assert(12 / 2 / 3 == 2)");
}

#[test]
fn arithmetic_failures() {
    assert_runtime_failure("5 / 0", ErrorKind::Arithmetic);
    assert_runtime_failure("5 % 0", ErrorKind::Arithmetic);
    assert_runtime_failure("1 + false", ErrorKind::Type);
    assert_runtime_failure("\"a\" + \"b\"", ErrorKind::Type);
    assert_runtime_failure("1 < \"2\"", ErrorKind::Type);
}

#[test]
fn parser_and_evaluator_agree_on_depth() {
    let at_limit = vec!["1"; MAX_NESTING].join(" + ");
    assert_eq!(run(&at_limit).unwrap(), Value::Number(MAX_NESTING as f64));

    let over_limit = vec!["1"; MAX_NESTING + 1].join(" + ");
    assert!(matches!(run(&over_limit), Err(Error::Parse(ParseError::NestingTooDeep { .. }))));

    let huge_target = format!("{} = 2", vec!["1"; 100_000].join(" + "));
    assert!(matches!(run(&huge_target), Err(Error::Parse(ParseError::NestingTooDeep { .. }))));
}

#[test]
fn compound_assignments() {
    assert_eq!(run("a = 1; a += 1;").unwrap(), Value::Number(2.0));
    assert_eq!(run("a = 1; a -= 1;").unwrap(), Value::Number(0.0));
    assert_success("a = 5; a += 2 * 3; assert(a == 11)");
    assert_runtime_failure("final a = 1; a += 1", ErrorKind::Constancy);
    assert_runtime_failure("b += 1", ErrorKind::Binding);
}

#[test]
fn assignment_has_no_hidden_state() {
    assert_eq!(run("a = 1; a;").unwrap(), Value::Number(1.0));
    assert_eq!(run("a = 1; a;").unwrap(), Value::Number(1.0));
    assert_runtime_failure("a", ErrorKind::Binding);
}

#[test]
fn constants() {
    assert_runtime_failure("final a = 1; a = \"a\";", ErrorKind::Constancy);
    assert_eq!(run("a = 1; a = \"a\"; a").unwrap(), Value::from("a"));
    assert_runtime_failure("assert = 1", ErrorKind::Constancy);
    assert_success("final a = 1; final a = 2; assert(a == 2)");
}

#[test]
fn functions() {
    assert_eq!(run("add = function(a,b): a + b; add(1,2);").unwrap(), Value::Number(3.0));
    assert_eq!(run("function add(a, b): a + b;\nadd(1, 2);").unwrap(), Value::Number(3.0));
    assert_eq!(run("function add(a, b): {\n  a + b;\n}\nadd(4, 1);").unwrap(),
               Value::Number(5.0));
    assert_eq!(run("function add(a, b): {\n  return a + b;\n}\nadd(8, 4);").unwrap(),
               Value::Number(12.0));
    assert_eq!(run("function(a, b): {\n  return a + b;\n}(8, 4);").unwrap(),
               Value::Number(12.0));
    assert_eq!(run("add = function a(a, b): a + b;\nadd(8, 4);").unwrap(),
               Value::Number(12.0));
    assert!(matches!(run("function(a, b): a + b;(8, 4);"), Err(Error::Parse(_))));
}

#[test]
fn early_return() {
    let result = run("function f(a,b,c): { return a + c; a + b; } f(8,4,1);");
    assert_eq!(result.unwrap(), Value::Number(9.0));
}

#[test]
fn functions_do_not_capture_scope() {
    assert_runtime_failure("outer = 1; f = function(): outer + 1; f()", ErrorKind::Binding);
    assert_runtime_failure("function f(): assert(true); f()", ErrorKind::Binding);
    assert_success("function twice(f, x): f(f(x)); inc = function(n): n + 1; assert(twice(inc, 1) == 3)");
}

#[test]
fn control_flow() {
    assert_eq!(run("if false: 1; else if false: 2; else: 3;").unwrap(), Value::Number(3.0));
    assert_eq!(run("if false: 1;").unwrap(), Value::Bool(false));
    assert_success("x = if 0: \"zero is truthy\"; else: \"no\"; assert(x == \"zero is truthy\")");
    assert_success(
                   "grade = function(score): if score >= 90: \"A\"; else if score >= 80: \"B\"; \
                    else: \"C\";\n\
                    assert(grade(95) == \"A\"); assert(grade(85) == \"B\"); assert(grade(10) == \"C\")",
    );
}

#[test]
fn logical_operators() {
    assert_eq!(run("true && false").unwrap(), Value::Bool(false));
    assert_eq!(run("false && true").unwrap(), Value::Bool(false));
    assert_eq!(run("true || false").unwrap(), Value::Bool(true));
    assert_eq!(run("false || true").unwrap(), Value::Bool(true));
    assert_eq!(run("0 && \"x\"").unwrap(), Value::from("x"));
    assert_success("assert(1 < 2 && 2 <= 2 && 3 > 2 && 3 >= 3 && 1 != 2)");
}

#[test]
fn strings_and_comments() {
    assert_eq!(run(r#"s = "say \"hi\""; s"#).unwrap(), Value::from("say \"hi\""));
    assert_eq!(run("// leading\n1 // trailing\n// last").unwrap(), Value::Number(1.0));
    assert_success("assert(\"a\" == \"a\"); assert(\"a\" != \"b\")");
}

#[test]
fn syntax_errors_are_located() {
    let err = parse("a = ;").unwrap_err();
    assert_eq!(err.to_string(), "Unexpected token: punctuation \";\" (1:5)");

    let err = parse("a = 1 # 2").unwrap_err();
    assert_eq!(err.to_string(), "Can't handle character: # (1:6)");

    let err = parse("if a 1").unwrap_err();
    assert_eq!(err.to_string(), "Expecting punctuation: \":\" (1:6)");

    assert!(parse("2 ** 3").is_err());
    assert!(parse("{ return 1; }").is_err());
}

#[test]
fn host_methods_run_in_order_with_their_receiver() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let set_log = Rc::clone(&calls);
    let addln_log = Rc::clone(&calls);
    let content =
        HostTable::new("content").with_method("set", move |receiver, args| {
                                     set_log.borrow_mut()
                                            .push(format!("{receiver}.set({})", args[0]));
                                     Ok(Value::Undefined)
                                 })
                                 .with_method("addln", move |receiver, args| {
                                     addln_log.borrow_mut()
                                              .push(format!("{receiver}.addln({})", args[0]));
                                     Ok(Value::Undefined)
                                 });

    let env = Environment::new();
    env.define("content", content, true);
    let result = evaluate(&parse("content.set(\"x\"); content.addln(\"y\");").unwrap(), &env);

    assert_eq!(result.unwrap(), Value::Undefined);
    assert_eq!(*calls.borrow(),
               vec!["[object content].set(x)".to_string(),
                    "[object content].addln(y)".to_string()]);
}

#[test]
fn host_failures_abort_evaluation() {
    let env = test_env();
    env.define("fail",
               NativeFunction::new("fail", |_, _| Err(RuntimeError::host("host refused"))),
               true);
    let err = evaluate(&parse("a = 1; fail(); a = 2").unwrap(), &env).unwrap_err();
    assert_eq!(err, RuntimeError::Host("host refused".to_string()));
    assert_eq!(err.kind(), ErrorKind::Host);
    assert_eq!(env.get("a").unwrap(), Value::Number(1.0));
}

const EMBED_SCRIPT: &str = r#"
content.set("under this message an embed is being displayed");
embed();
embed.description("description");
embed.title("title");
embed.footer("footer");
embed.color("RED");
embed.footer.icon("https://example.com/i.png");
if getuservar("second", "131313131313131313"):
	content.addln("second message");
else if getuservar("third", "131313131313131313"):
	content.addln("third message");
else:
	content.addln("fallback message");
if message == "hi":
	setuservar("second", true, "131313131313131313");
else if message == "bye":
	setuservar("third", true, "131313131313131313");
else: {
	setuservar("second", false, "131313131313131313");
	setuservar("third", false, "131313131313131313");
}
// comment
"#;

#[test]
fn embed_script() {
    let log = Rc::new(RefCell::new(Vec::<String>::new()));

    let record = |prefix: &'static str| {
        let log = Rc::clone(&log);
        move |_: &Value, args: &[Value]| -> Result<Value, RuntimeError> {
            let args = args.iter().map(ToString::to_string).collect::<Vec<_>>();
            log.borrow_mut().push(format!("{prefix}({})", args.join(", ")));
            Ok(Value::Undefined)
        }
    };

    let footer = HostTable::new("footer").with_call(record("footer"))
                                         .with_method("icon", record("footer.icon"));
    let embed = HostTable::new("embed").with_call(record("embed"))
                                       .with_method("description", record("description"))
                                       .with_method("title", record("title"))
                                       .with_method("color", record("color"))
                                       .with_value("footer", footer);
    let content = HostTable::new("content").with_method("set", record("content.set"))
                                           .with_method("addln", record("content.addln"));
    let uservars = Rc::new(RefCell::new(vec!["third".to_string()]));
    let lookup = Rc::clone(&uservars);

    let env = Environment::new();
    env.define("embed", embed, true);
    env.define("content", content, true);
    env.define("message", "h", false);
    env.define("getuservar",
               NativeFunction::new("getuservar", move |_, args| {
                   let name = args[0].to_string();
                   Ok(Value::Bool(lookup.borrow().contains(&name)))
               }),
               true);
    env.define("setuservar", NativeFunction::new("setuservar", record("setuservar")), true);

    let result = evaluate(&parse(EMBED_SCRIPT).unwrap(), &env).unwrap();

    assert_eq!(result, Value::Undefined);
    assert_eq!(*log.borrow(),
               vec!["content.set(under this message an embed is being displayed)",
                    "embed()",
                    "description(description)",
                    "title(title)",
                    "footer(footer)",
                    "color(RED)",
                    "footer.icon(https://example.com/i.png)",
                    "content.addln(third message)",
                    "setuservar(second, false, 131313131313131313)",
                    "setuservar(third, false, 131313131313131313)"]);
}

#[test]
fn evaluation_stops_at_the_first_failure() {
    let env = test_env();
    let program = parse("a = 1; b = a + missing; c = 3").unwrap();
    let err = evaluate(&program, &env).unwrap_err();
    assert_eq!(err.to_string(), "Undefined variable missing");
    assert_eq!(env.get("a").unwrap(), Value::Number(1.0));
    assert!(env.get("c").is_err());
}
