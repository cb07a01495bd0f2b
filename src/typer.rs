//! Well-typedness checks for filter expressions
//!
//! RFC 9535 separates value-producing, logical, and nodes-producing
//! subexpressions. Comparison operands must produce values (with embedded
//! paths acting as singular-value projections), tests must be logical or
//! existence checks, and function parameters are typed by a signature table.
//! All violations are compile-time errors.

use crate::ast::{FilterExpr, Literal, PathExpr, Selector};
use crate::config::QueryOptions;
use crate::error::{PathError, PathResult};

/// Result type classification for filter subexpressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExprType {
    /// A scalar value (or "nothing")
    Value,
    /// A boolean test result
    Logical,
}

/// Declared parameter types for filter functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParamType {
    /// Scalar value; embedded paths are projected (singular-only in strict mode)
    Value,
    /// A nodelist; only embedded paths qualify
    Nodes,
    /// Either form, resolved at evaluation time
    ValueOrNodes,
}

/// Type signature of a filter function
#[derive(Debug)]
pub(crate) struct FunctionSig {
    pub(crate) name: &'static str,
    pub(crate) params: &'static [ParamType],
    pub(crate) ret: ExprType,
    /// Part of the JSONPath Plus extension set rather than RFC 9535
    pub(crate) extension: bool,
}

static SIGNATURES: &[FunctionSig] = &[
    FunctionSig {
        name: "length",
        params: &[ParamType::ValueOrNodes],
        ret: ExprType::Value,
        extension: false,
    },
    FunctionSig {
        name: "count",
        params: &[ParamType::Nodes],
        ret: ExprType::Value,
        extension: false,
    },
    FunctionSig {
        name: "match",
        params: &[ParamType::Value, ParamType::Value],
        ret: ExprType::Logical,
        extension: false,
    },
    FunctionSig {
        name: "search",
        params: &[ParamType::Value, ParamType::Value],
        ret: ExprType::Logical,
        extension: false,
    },
    FunctionSig {
        name: "value",
        params: &[ParamType::Nodes],
        ret: ExprType::Value,
        extension: false,
    },
    FunctionSig {
        name: "isNull",
        params: &[ParamType::ValueOrNodes],
        ret: ExprType::Logical,
        extension: true,
    },
    FunctionSig {
        name: "isBoolean",
        params: &[ParamType::ValueOrNodes],
        ret: ExprType::Logical,
        extension: true,
    },
    FunctionSig {
        name: "isNumber",
        params: &[ParamType::ValueOrNodes],
        ret: ExprType::Logical,
        extension: true,
    },
    FunctionSig {
        name: "isInteger",
        params: &[ParamType::ValueOrNodes],
        ret: ExprType::Logical,
        extension: true,
    },
    FunctionSig {
        name: "isString",
        params: &[ParamType::ValueOrNodes],
        ret: ExprType::Logical,
        extension: true,
    },
    FunctionSig {
        name: "isArray",
        params: &[ParamType::ValueOrNodes],
        ret: ExprType::Logical,
        extension: true,
    },
    FunctionSig {
        name: "isObject",
        params: &[ParamType::ValueOrNodes],
        ret: ExprType::Logical,
        extension: true,
    },
];

/// Look up a function signature by name
pub(crate) fn signature(name: &str) -> Option<&'static FunctionSig> {
    SIGNATURES.iter().find(|sig| sig.name == name)
}

/// A string-literal regex argument found during type checking
///
/// These are compiled once at path compile time; an invalid literal pattern
/// is a compile-time type error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LiteralPattern {
    pub(crate) pattern: String,
    /// `match()` anchors the pattern; `search()` does not
    pub(crate) anchored: bool,
}

/// Check a complete compiled path, collecting literal regex patterns
pub(crate) fn check_path(
    path: &PathExpr,
    options: &QueryOptions,
) -> PathResult<Vec<LiteralPattern>> {
    let mut patterns = Vec::new();
    check_segments(path, options, &mut patterns)?;
    Ok(patterns)
}

fn check_segments(
    path: &PathExpr,
    options: &QueryOptions,
    patterns: &mut Vec<LiteralPattern>,
) -> PathResult<()> {
    for segment in &path.segments {
        for selector in &segment.selectors {
            if let Selector::Filter(expr) = selector {
                check_test(expr, options, patterns)?;
            }
        }
    }
    Ok(())
}

/// Check an expression used in logical (test) position
fn check_test(
    expr: &FilterExpr,
    options: &QueryOptions,
    patterns: &mut Vec<LiteralPattern>,
) -> PathResult<()> {
    match expr {
        FilterExpr::Or(left, right) | FilterExpr::And(left, right) => {
            check_test(left, options, patterns)?;
            check_test(right, options, patterns)
        }
        FilterExpr::Not(inner) => check_test(inner, options, patterns),
        FilterExpr::Compare { left, right, .. } => {
            check_comparable(left, options, patterns)?;
            check_comparable(right, options, patterns)
        }
        // Existence test: true iff the nodelist is non-empty.
        FilterExpr::Path(path) => check_segments(path, options, patterns),
        FilterExpr::ContextVar(_) => Ok(()),
        FilterExpr::Call { name, args } => {
            let sig = check_call(name, args, options, patterns)?;
            if sig.ret != ExprType::Logical {
                return Err(PathError::type_error(
                    format!("function '{name}' produces a value and cannot be used as a test"),
                    None,
                ));
            }
            Ok(())
        }
        FilterExpr::Literal(_) => Err(PathError::type_error(
            "literal cannot be used as a test; compare it to something",
            None,
        )),
    }
}

/// Check an expression used as a comparison operand
fn check_comparable(
    expr: &FilterExpr,
    options: &QueryOptions,
    patterns: &mut Vec<LiteralPattern>,
) -> PathResult<()> {
    match expr {
        FilterExpr::Literal(_) | FilterExpr::ContextVar(_) => Ok(()),
        FilterExpr::Path(path) => {
            if options.strict_rfc9535 && !path.is_singular() {
                return Err(PathError::type_error(
                    "comparison operand must be a singular query",
                    None,
                ));
            }
            check_segments(path, options, patterns)
        }
        FilterExpr::Call { name, args } => {
            let sig = check_call(name, args, options, patterns)?;
            if sig.ret != ExprType::Value {
                return Err(PathError::type_error(
                    format!("function '{name}' produces a test result, not a comparable value"),
                    None,
                ));
            }
            Ok(())
        }
        FilterExpr::Or(..) | FilterExpr::And(..) | FilterExpr::Not(_) | FilterExpr::Compare { .. } => {
            Err(PathError::type_error(
                "logical expression cannot be used as a comparison operand",
                None,
            ))
        }
    }
}

/// Check a function call's name, arity, and argument types
fn check_call(
    name: &str,
    args: &[FilterExpr],
    options: &QueryOptions,
    patterns: &mut Vec<LiteralPattern>,
) -> PathResult<&'static FunctionSig> {
    let Some(sig) = signature(name) else {
        return Err(PathError::type_error(
            format!("unknown function '{name}'"),
            None,
        ));
    };
    if sig.extension && options.strict_rfc9535 {
        // Extension functions simply do not exist under strict RFC 9535.
        return Err(PathError::type_error(
            format!("unknown function '{name}'"),
            None,
        ));
    }
    if args.len() != sig.params.len() {
        return Err(PathError::type_error(
            format!(
                "function '{}' expects {} argument(s), got {}",
                sig.name,
                sig.params.len(),
                args.len()
            ),
            None,
        ));
    }
    for (param, arg) in sig.params.iter().zip(args) {
        match param {
            ParamType::Value | ParamType::ValueOrNodes => {
                check_comparable(arg, options, patterns)?;
            }
            ParamType::Nodes => match arg {
                FilterExpr::Path(path) => check_segments(path, options, patterns)?,
                _ => {
                    return Err(PathError::type_error(
                        format!("function '{name}' requires a path argument"),
                        None,
                    ));
                }
            },
        }
    }
    if matches!(name, "match" | "search") {
        if let FilterExpr::Literal(Literal::String(pattern)) = &args[1] {
            patterns.push(LiteralPattern {
                pattern: pattern.clone(),
                anchored: name == "match",
            });
        }
    }
    Ok(sig)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QueryOptions;
    use crate::error::ErrorKind;
    use crate::parser;

    fn check(input: &str) -> PathResult<Vec<LiteralPattern>> {
        let options = QueryOptions::default();
        let path = parser::parse(input, &options)?;
        check_path(&path, &options)
    }

    fn check_strict(input: &str) -> PathResult<Vec<LiteralPattern>> {
        let options = QueryOptions::new().with_strict_rfc9535(true);
        let path = parser::parse(input, &options)?;
        check_path(&path, &options)
    }

    #[test]
    fn well_typed_filters_pass() {
        for expr in [
            "$[?(@.a == 1)]",
            "$[?(@.a && !@.b)]",
            "$[?(count(@.items[*]) == 2)]",
            "$[?match(@.name, 'a.*')]",
            "$[?(length(@.tags) >= 1)]",
            "$[?isString(@.name)]",
            "$[?(value(@.a[*]) == 3)]",
        ] {
            assert!(check(expr).is_ok(), "expected {expr} to type check");
        }
    }

    #[test]
    fn literal_test_is_rejected() {
        let err = check("$[?(42)]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn value_function_as_test_is_rejected() {
        let err = check("$[?value(@.a)]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn logical_function_as_operand_is_rejected() {
        let err = check("$[?(match(@.a, 'x') == true)]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn logical_expression_as_operand_is_rejected() {
        let err = check("$[?((@.a == 1) == true)]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn unknown_function_is_rejected() {
        let err = check("$[?frobnicate(@.a)]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn arity_mismatch_is_rejected() {
        let err = check("$[?(length(@.a, @.b) == 1)]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn count_requires_a_path_argument() {
        let err = check("$[?(count(3) == 1)]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn non_singular_comparison_operand_rejected_in_strict_mode() {
        assert!(check("$[?(@.a[*] == 1)]").is_ok());
        let err = check_strict("$[?(@.a[*] == 1)]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn extension_functions_are_unknown_in_strict_mode() {
        assert!(check("$[?isInteger(@.a)]").is_ok());
        let err = check_strict("$[?isInteger(@.a)]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn literal_patterns_are_collected() {
        let patterns = check("$[?match(@.a, 'ab+') && search(@.b, 'c?d')]").expect("check");
        assert_eq!(
            patterns,
            vec![
                LiteralPattern {
                    pattern: "ab+".into(),
                    anchored: true
                },
                LiteralPattern {
                    pattern: "c?d".into(),
                    anchored: false
                },
            ]
        );
    }

    #[test]
    fn nested_filters_are_checked() {
        let err = check("$[?(@.items[?(17)])]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }
}
