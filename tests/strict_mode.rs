//! Strict RFC 9535 mode: every JSONPath Plus construct must fail at compile
//! time, while plain RFC expressions keep working unchanged.

use serde_json::json;
use treepath::{ErrorKind, Path, QueryOptions};

fn strict() -> QueryOptions {
    QueryOptions::new().with_strict_rfc9535(true)
}

#[test]
fn extension_tokens_fail_with_extension_disabled() {
    let cases = vec![
        "$.a^",
        "$.a~",
        "$.items[*]~",
        "$[?(@property == 'get')]",
        "$[?(@index > 0)]",
        "$[?(@path == \"$['a']\")]",
        "$[?(length(@parent) > 2)]",
        "$[?(@parentProperty == 'items')]",
        "$[?(@.type == @root.defaultType)]",
        "$[?(@.role === 'admin')]",
        "$[?(@.role !== 'admin')]",
    ];
    for expr in cases {
        let err = Path::compile_with(expr, strict())
            .expect_err(&format!("expected {expr} to fail in strict mode"));
        assert_eq!(
            err.kind,
            ErrorKind::ExtensionDisabled,
            "wrong error kind for {expr}: {err}"
        );
    }
}

#[test]
fn extension_expressions_compile_outside_strict_mode() {
    let cases = vec![
        "$.a^",
        "$.items[*]~",
        "$[?(@property == 'get')]",
        "$[?(@.type == @root.defaultType)]",
        "$[?(@.role === 'admin')]",
    ];
    for expr in cases {
        assert!(
            Path::compile(expr).is_ok(),
            "expected {expr} to compile in default mode"
        );
    }
}

#[test]
fn type_test_functions_are_unknown_in_strict_mode() {
    for expr in ["$[?isString(@.a)]", "$[?isInteger(@.a)]", "$[?isObject(@)]"] {
        let err = Path::compile_with(expr, strict())
            .expect_err(&format!("expected {expr} to fail in strict mode"));
        assert_eq!(err.kind, ErrorKind::Type, "wrong error kind for {expr}");
    }
}

#[test]
fn non_singular_comparison_operands_fail_in_strict_mode() {
    let err = Path::compile_with("$[?(@.a[*] == 1)]", strict()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Type);
    let err = Path::compile_with("$[?(@..b == 1)]", strict()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Type);
    // Singular queries remain fine.
    assert!(Path::compile_with("$[?(@.a.b[0] == 1)]", strict()).is_ok());
}

#[test]
fn rfc_semantics_are_unchanged_in_strict_mode() {
    let doc = json!({
        "books": [
            {"title": "A", "price": 5},
            {"title": "B", "price": 15}
        ]
    });
    let cases = vec![
        ("$.books[*].title", 2),
        ("$.books[?(@.price > 10)]", 1),
        ("$.books[0:1]", 1),
        ("$..price", 2),
        ("$.books[?length(@.title) == 1]", 2),
        ("$.books[?match(@.title, '[AB]')]", 2),
        ("$.books[?count(@.*) == 2]", 2),
    ];
    for (expr, expected) in cases {
        let path = Path::compile_with(expr, strict())
            .unwrap_or_else(|e| panic!("failed to compile {expr} strictly: {e}"));
        assert_eq!(
            path.query(&doc).expect("query").len(),
            expected,
            "query {expr}"
        );
    }
}

#[test]
fn options_are_recorded_on_the_compiled_path() {
    let path = Path::compile_with("$.a", strict()).expect("compile");
    assert!(path.options().strict_rfc9535);
    assert_eq!(path.expression(), "$.a");
}
