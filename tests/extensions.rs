//! JSONPath Plus extension semantics: context variables, the `^` parent and
//! `~` key-name selectors, JavaScript operator synonyms, and the type-test
//! function family.

use serde_json::{json, Value};
use treepath::{Match, Path};

fn query<'a>(expr: &str, doc: &'a Value) -> Vec<Match<'a, Value>> {
    Path::compile(expr)
        .unwrap_or_else(|e| panic!("failed to compile {expr}: {e}"))
        .query(doc)
        .unwrap_or_else(|e| panic!("failed to query {expr}: {e}"))
}

fn count(expr: &str, doc: &Value) -> usize {
    query(expr, doc).len()
}

fn store_doc() -> Value {
    json!({
        "store": {
            "book": [
                {"title": "Book 1", "price": 10},
                {"title": "Book 2", "price": 20}
            ],
            "bicycle": {"color": "red", "price": 100}
        }
    })
}

#[test]
fn property_filters_mapping_children_by_key() {
    let doc = json!({
        "paths": {
            "get": {"summary": "GET operation"},
            "post": {"summary": "POST operation"},
            "delete": {"summary": "DELETE operation"}
        }
    });
    let cases = vec![
        ("$.paths[?(@property == 'get')]", 1),
        ("$.paths[?(@property != 'delete')]", 2),
        ("$.paths[?(@property == 'get' || @property == 'post')]", 2),
    ];
    for (expr, expected) in cases {
        assert_eq!(count(expr, &doc), expected, "filter {expr}");
    }
}

#[test]
fn property_on_sequences_is_the_index_as_string() {
    let doc = json!({
        "items": [
            {"name": "first"},
            {"name": "second"},
            {"name": "third"}
        ]
    });
    assert_eq!(count("$.items[?(@property == '0')]", &doc), 1);
    assert_eq!(
        count("$.items[?(@property == '0' || @property == '2')]", &doc),
        2
    );
    let found = query("$.items[?(@property == '1')]", &doc);
    assert_eq!(found[0].node().and_then(|n| n.get("name")), Some(&json!("second")));
}

#[test]
fn property_combined_with_value_checks() {
    let doc = json!({
        "methods": {
            "get": {"enabled": true},
            "post": {"enabled": false},
            "put": {"enabled": true}
        }
    });
    assert_eq!(
        count("$.methods[?(@property == 'get' && @.enabled == true)]", &doc),
        1
    );
    assert_eq!(
        count("$.methods[?(@property == 'post' || @.enabled == true)]", &doc),
        3
    );
}

#[test]
fn spectral_style_http_method_query() {
    let doc = json!({
        "paths": {
            "/users": {
                "get": {"operationId": "getUsers"},
                "post": {"operationId": "createUser"},
                "delete": {"operationId": "deleteUsers"}
            },
            "/items": {
                "get": {"operationId": "getItems"},
                "put": {"operationId": "updateItems"}
            }
        }
    });
    assert_eq!(
        count(
            "$.paths[*][?(@property === 'get' || @property === 'put' || @property === 'post')]",
            &doc
        ),
        4
    );
    assert_eq!(
        count(
            "$.paths['/users'][?(@property == 'get' || @property == 'put' || @property == 'post')]",
            &doc
        ),
        2
    );
}

#[test]
fn index_context_variable() {
    let doc = json!({"items": [{"v": 1}, {"v": 2}, {"v": 3}]});
    let cases = vec![
        ("$.items[?(@index == 0)]", 1),
        ("$.items[?(@index > 0)]", 2),
        ("$.items[?(@index < 2)]", 2),
    ];
    for (expr, expected) in cases {
        assert_eq!(count(expr, &doc), expected, "filter {expr}");
    }
    // Mapping children have no index.
    let mapping = json!({"m": {"a": 1, "b": 2}});
    assert_eq!(count("$.m[?(@index == -1)]", &mapping), 2);
}

#[test]
fn root_context_variable() {
    let doc = json!({
        "defaultType": "admin",
        "users": [
            {"name": "Alice", "type": "admin"},
            {"name": "Bob", "type": "user"},
            {"name": "Charlie", "type": "admin"}
        ]
    });
    let matches = query("$.users[?(@.type == @root.defaultType)]", &doc);
    assert_eq!(matches.len(), 2);
    let names: Vec<_> = matches
        .iter()
        .map(|m| m.node().and_then(|n| n.get("name")).cloned().expect("name"))
        .collect();
    assert_eq!(names, vec![json!("Alice"), json!("Charlie")]);
}

#[test]
fn root_with_nested_and_indexed_access() {
    let doc = json!({
        "config": {"minValue": 10},
        "validTypes": ["A", "B"],
        "items": [
            {"value": 5, "type": "A"},
            {"value": 15, "type": "C"},
            {"value": 20, "type": "A"}
        ]
    });
    assert_eq!(count("$.items[?(@.value >= @root.config.minValue)]", &doc), 2);
    assert_eq!(count("$.items[?(@.type == @root.validTypes[0])]", &doc), 2);
}

#[test]
fn path_context_variable() {
    let doc = store_doc();
    assert_eq!(
        count("$.store.book[?(@path == \"$['store']['book'][0]\")]", &doc),
        1
    );
    assert_eq!(count("$.store.book[?(@path == \"$['store']['book']\")]", &doc), 0);
}

#[test]
fn path_propagates_through_wildcards_and_slices() {
    let doc = json!({
        "data": [
            [{"name": "a"}, {"name": "b"}],
            [{"name": "c"}, {"name": "d"}]
        ]
    });
    assert_eq!(count("$.data[*][?(@path == \"$['data'][0][0]\")]", &doc), 1);
    assert_eq!(count("$.data[0:2][?(@path == \"$['data'][1][0]\")]", &doc), 1);
}

#[test]
fn path_propagates_through_intermediate_segments() {
    let doc = json!({
        "store": {
            "book": {"details": [{"price": 10}, {"price": 20}]},
            "bicycle": {"details": [{"price": 30}]}
        }
    });
    assert_eq!(
        count(
            "$.store.*.details[*][?(@path == \"$['store']['book']['details'][0]['price']\")]",
            &doc
        ),
        1
    );
    assert_eq!(
        count(
            "$.store.*.details[*][?(@path == \"$['store']['bicycle']['details'][0]['price']\")]",
            &doc
        ),
        1
    );
}

#[test]
fn parent_property_reflects_traversal_key() {
    let doc = json!({"items": [{"v": 1}, {"v": 2}]});
    assert_eq!(count("$.items[?(@parentProperty == 'items')]", &doc), 2);

    let doc = json!({
        "store": {
            "book": {"details": {}},
            "bicycle": {"details": {}}
        }
    });
    assert_eq!(count("$.store.*[?(@parentProperty == 'book')]", &doc), 1);
    assert_eq!(count("$.store.*[?(@parentProperty == 'bicycle')]", &doc), 1);
}

#[test]
fn parent_property_in_chained_filters() {
    let doc = json!({
        "paths": {
            "/users": {
                "get": {"operationId": "getUsers"},
                "post": {"operationId": "createUser"}
            }
        }
    });
    assert_eq!(
        count(
            "$.paths[?(@property == '/users')][?(@parentProperty == '/users')]",
            &doc
        ),
        2
    );
}

#[test]
fn parent_context_variable_in_functions() {
    let doc = json!({
        "users": [
            {"name": "Alice"},
            {"name": "Bob"},
            {"name": "Charlie"}
        ]
    });
    // The parent of each user is the 3-element users array.
    assert_eq!(count("$.users[?(length(@parent) > 2)]", &doc), 3);
    assert_eq!(count("$.users[?(length(@parent) > 3)]", &doc), 0);
}

#[test]
fn parent_anchor_with_segments() {
    let doc = json!({
        "groups": {
            "limit": 2,
            "rows": [{"v": 1}, {"v": 5}]
        }
    });
    // @parent of each row is the rows array; @parent of rows is groups.
    assert_eq!(count("$.groups.rows[?(@.v < @parent[1].v)]", &doc), 1);
}

#[test]
fn parent_selector_basics() {
    let doc = store_doc();
    // Parent of book[0] is the book sequence.
    let matches = query("$.store.book[0]^", &doc);
    assert_eq!(matches.len(), 1);
    assert!(matches[0].node().expect("node").is_array());
    assert_eq!(matches[0].path(), "$['store']['book']");

    // Grandparent via chained carets.
    let matches = query("$.store.book[0]^^", &doc);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].path(), "$['store']");

    // The root has no parent.
    assert_eq!(count("$^", &doc), 0);
    assert_eq!(count("$.store^", &doc), 1);
}

#[test]
fn parent_selector_collapses_consecutive_duplicates() {
    let doc = json!({"items": [{"id": 1}, {"id": 2}, {"id": 3}]});
    let matches = query("$.items[*]^", &doc);
    assert_eq!(matches.len(), 1, "one parent for all three elements");
    assert_eq!(matches[0].path(), "$['items']");
}

#[test]
fn parent_selector_after_filter() {
    let doc = json!({
        "departments": {
            "engineering": {
                "employees": [
                    {"name": "Alice", "level": 5},
                    {"name": "Bob", "level": 3}
                ]
            },
            "sales": {
                "employees": [
                    {"name": "Charlie", "level": 4}
                ]
            }
        }
    });
    let matches = query("$.departments.*.employees[?(@.level >= 4)]^", &doc);
    assert_eq!(matches.len(), 2, "one employees array per matching branch");
    assert!(matches.iter().all(|m| m.node().expect("node").is_array()));
}

#[test]
fn descendant_filter_then_parent() {
    let doc = store_doc();
    // The filter emits the bicycle mapping (the child of store whose price
    // exceeds 50); its parent is the store mapping.
    let matches = query("$..[?(@.price > 50)]", &doc);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].path(), "$['store']['bicycle']");

    let matches = query("$..[?(@.price > 50)]^", &doc);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].path(), "$['store']");
}

#[test]
fn wildcard_then_property_filter_selects_bicycle_price() {
    let doc = store_doc();
    let matches = query("$.store.*[?(@property == 'price')]", &doc);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].node().and_then(Value::as_i64), Some(100));
    assert_eq!(matches[0].path(), "$['store']['bicycle']['price']");
}

#[test]
fn key_name_selector_on_sequences() {
    let doc = json!({"items": [{"v": 1}, {"v": 2}, {"v": 3}]});
    let matches = query("$.items[*]~", &doc);
    let keys: Vec<_> = matches.iter().map(|m| m.key_name().expect("key")).collect();
    assert_eq!(keys, vec!["0", "1", "2"]);
    assert!(matches.iter().all(|m| m.node().is_none()));
}

#[test]
fn key_name_selector_on_mappings() {
    let doc = json!({"paths": {"get": 1, "post": 2}});
    let matches = query("$.paths[*]~", &doc);
    let keys: Vec<_> = matches.iter().map(|m| m.key_name().expect("key")).collect();
    assert_eq!(keys, vec!["get", "post"]);

    let matches = query("$.paths~", &doc);
    let keys: Vec<_> = matches.iter().map(|m| m.key_name().expect("key")).collect();
    assert_eq!(keys, vec!["paths"]);
}

#[test]
fn javascript_operator_synonyms() {
    let doc = json!({
        "items": [
            {"name": "Alice", "role": "admin"},
            {"name": "Bob", "role": "user"}
        ]
    });
    assert_eq!(count("$.items[?(@.role === 'admin')]", &doc), 1);
    assert_eq!(count("$.items[?(@.role !== 'admin')]", &doc), 1);
    assert_eq!(count("$.items[?(@.role == 'admin')]", &doc), 1);
    assert_eq!(count("$.items[?(@.role != 'admin')]", &doc), 1);
}

#[test]
fn type_test_functions_on_paths() {
    let doc = json!({
        "items": [
            {"name": "Alice", "age": 30, "active": true, "score": 95.5},
            {"name": null, "age": 25, "active": false, "score": 88},
            {"tags": ["tag1", "tag2"], "count": 2},
            {"details": {"key": "value"}, "active": true},
            {"value": 3.14},
            {"value": 42}
        ]
    });
    let cases = vec![
        ("$.items[?isString(@.name)]", 1),
        ("$.items[?isString(@.age)]", 0),
        ("$.items[?isNull(@.name)]", 1),
        ("$.items[?isNull(@.age)]", 0),
        ("$.items[?isBoolean(@.active)]", 3),
        ("$.items[?isNumber(@.age)]", 2),
        ("$.items[?isNumber(@.score)]", 2),
        ("$.items[?isNumber(@.name)]", 0),
        ("$.items[?isInteger(@.age)]", 2),
        // 88 is an integer, 95.5 is not.
        ("$.items[?isInteger(@.score)]", 1),
        ("$.items[?isArray(@.tags)]", 1),
        ("$.items[?isObject(@.details)]", 1),
    ];
    for (expr, expected) in cases {
        assert_eq!(count(expr, &doc), expected, "filter {expr}");
    }
}

#[test]
fn type_test_functions_on_literals() {
    let doc = json!({"items": [{"value": 1}]});
    let cases = vec![
        ("$.items[?isString('hello')]", 1),
        ("$.items[?isNumber(42)]", 1),
        ("$.items[?isInteger(42)]", 1),
        ("$.items[?isInteger(42.5)]", 0),
        ("$.items[?isBoolean(true)]", 1),
        ("$.items[?isNull(null)]", 1),
        ("$.items[?isString(42)]", 0),
        ("$.items[?isNumber('hello')]", 0),
    ];
    for (expr, expected) in cases {
        assert_eq!(count(expr, &doc), expected, "filter {expr}");
    }
}

#[test]
fn integer_float_distinction_follows_representation() {
    let doc = json!({"values": [{"n": 42}, {"n": 88.0}]});
    // 88.0 is represented as a float: isNumber yes, isInteger no.
    assert_eq!(count("$.values[?isNumber(@.n)]", &doc), 2);
    assert_eq!(count("$.values[?isInteger(@.n)]", &doc), 1);
    // Numerically the two kinds still compare by real value.
    assert_eq!(count("$.values[?(@.n == 88)]", &doc), 1);
}

#[test]
fn type_tests_partition_every_node() {
    let doc = json!({
        "data": [
            null, true, 42, 88.5, "text", [1], {"k": 1}
        ]
    });
    let families = [
        "isNull", "isBoolean", "isNumber", "isString", "isArray", "isObject",
    ];
    let total: usize = families
        .iter()
        .map(|f| count(&format!("$.data[?{f}(@)]"), &doc))
        .sum();
    // isNumber covers both 42 and 88.5, so the families cover all 7 exactly once.
    assert_eq!(total, 7);
    assert_eq!(count("$.data[?isInteger(@)]", &doc), 1);
    assert_eq!(count("$.data[?isNumber(@)]", &doc), 2);
}

#[test]
fn type_tests_with_edge_values() {
    let doc = json!({
        "data": [
            {"empty": null},
            {"zero": 0},
            {"emptyString": ""},
            {"emptyArray": []},
            {"emptyObject": {}}
        ]
    });
    let cases = vec![
        ("$.data[?isNull(@.empty)]", 1),
        ("$.data[?isNumber(@.zero)]", 1),
        ("$.data[?isString(@.emptyString)]", 1),
        ("$.data[?isArray(@.emptyArray)]", 1),
        ("$.data[?isObject(@.emptyObject)]", 1),
    ];
    for (expr, expected) in cases {
        assert_eq!(count(expr, &doc), expected, "filter {expr}");
    }
}

#[test]
fn type_tests_combine_with_other_filters() {
    let doc = json!({
        "users": [
            {"name": "Alice", "role": "admin"},
            {"name": null, "role": "user"},
            {"name": "Bob", "role": "user"}
        ]
    });
    assert_eq!(
        count("$.users[?isString(@.name) && @.role == 'admin']", &doc),
        1
    );
    assert_eq!(
        count("$.users[?isString(@.name) || isNull(@.name)]", &doc),
        3
    );
}
