use std::thread;

use cordon_lang::{
    CompiledCondition, Context, CordonError, FieldOperator, RejectReason, Value, compile,
    evaluate_field_condition,
};
use serde_json::json;

fn context(json: serde_json::Value) -> Context {
    Context::from_json(json).unwrap()
}

// ============================================================================
// Compiled Conditions
// ============================================================================

#[test]
fn test_compiled_condition() {
    let condition = compile(r#"age >= 18 && status === "active""#).unwrap();

    assert!(!condition.evaluate(&context(json!({"age": 17, "status": "active"}))));
    assert!(condition.evaluate(&context(json!({"age": 18, "status": "active"}))));
    assert!(!condition.evaluate(&context(json!({"age": 30, "status": "banned"}))));
    assert!(!condition.evaluate(&Context::new()));
}

#[test]
fn test_result_coerced_to_bool() {
    let condition = compile("items.length").unwrap();
    assert!(!condition.evaluate(&context(json!({"items": []}))));
    assert!(condition.evaluate(&context(json!({"items": [1]}))));
    assert_eq!(
        condition.evaluate_value(&context(json!({"items": [1, 2]}))),
        Value::Number(2.0)
    );
}

#[test]
fn test_rejected_at_compile_time() {
    let err = compile("this.constructor").unwrap_err();
    assert!(err.is_rejected());

    let err = compile("a ===").unwrap_err();
    assert!(err.to_string().contains("a ==="));
}

#[test]
fn test_deterministic() {
    let condition = compile("score * 2 > limit ? tag === 'a' : false").unwrap();
    let ctx = context(json!({"score": 7, "limit": 10, "tag": "a"}));
    let first = condition.evaluate_value(&ctx);
    let second = condition.evaluate_value(&ctx);
    assert_eq!(first, second);
    assert_eq!(first, Value::Boolean(true));
}

#[test]
fn test_source_kept() {
    let condition = compile("a > 1").unwrap();
    assert_eq!(condition.source(), "a > 1");
    assert_eq!(condition.to_string(), "a > 1");
}

#[test]
fn test_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CompiledCondition>();

    let condition = compile("item.count > threshold").unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let condition = condition.clone();
            thread::spawn(move || {
                let ctx = context(json!({"item": {"count": i}, "threshold": 3}));
                (0..100).all(|_| condition.evaluate(&ctx) == (i > 3))
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

// ============================================================================
// Field Conditions
// ============================================================================

#[test]
fn test_field_condition() {
    let ctx = context(json!({"item": {"count": 10, "status": "paid", "tags": ["a"]}}));
    assert!(evaluate_field_condition("item.count", FieldOperator::GreaterThan, &Value::Number(5.0), &ctx).unwrap());
    assert!(!evaluate_field_condition("item.count", FieldOperator::LessEqual, &Value::Number(5.0), &ctx).unwrap());
    assert!(evaluate_field_condition("item.status", FieldOperator::StrictEqual, &Value::from("paid"), &ctx).unwrap());
    assert!(evaluate_field_condition("item.count", FieldOperator::LooseEqual, &Value::from("10"), &ctx).unwrap());
    assert!(!evaluate_field_condition("item.count", FieldOperator::StrictEqual, &Value::from("10"), &ctx).unwrap());
    assert!(evaluate_field_condition("item.tags[0]", FieldOperator::StrictNotEqual, &Value::from("b"), &ctx).unwrap());
}

#[test]
fn test_field_condition_missing_field() {
    let ctx = Context::new();
    assert!(!evaluate_field_condition("item.count", FieldOperator::GreaterThan, &Value::Number(0.0), &ctx).unwrap());
    assert!(evaluate_field_condition("item.count", FieldOperator::StrictEqual, &Value::Undefined, &ctx).unwrap());
}

#[test]
fn test_field_condition_operator_strings() {
    let ctx = context(json!({"n": 3}));
    for (symbol, expected) in [("===", true), ("!==", false), ("==", true), ("!=", false), (">", false), (">=", true), ("<", false), ("<=", true)] {
        let op: FieldOperator = symbol.parse().unwrap();
        assert_eq!(
            evaluate_field_condition("n", op, &Value::Number(3.0), &ctx).unwrap(),
            expected,
            "Failed for operator {}",
            symbol
        );
    }
}

#[test]
fn test_field_path_must_be_a_path() {
    let ctx = context(json!({"a": 1, "b": 2}));
    for path in ["a + b", "a ? b : 1", "a[b]", "'a'", "!a"] {
        let err = evaluate_field_condition(path, FieldOperator::StrictEqual, &Value::Number(1.0), &ctx).unwrap_err();
        assert_eq!(
            err,
            CordonError::Rejected {
                expression: path.to_string(),
                reason: RejectReason::NotAFieldPath,
            },
            "Failed for path {}",
            path
        );
    }
}

#[test]
fn test_field_path_screened() {
    let err = evaluate_field_condition("obj.__proto__", FieldOperator::StrictEqual, &Value::Null, &Context::new()).unwrap_err();
    assert!(err.is_rejected());
}
