use crate::PyScorer;
use fogsim::error::FogError;
use fogsim::scorer::ExternalScorer;

#[test]
fn evaluates_a_python_function() {
    let scorer = PyScorer::new();
    let value = scorer.evaluate("math", "hypot", &[3., 4.]).unwrap();
    assert!((value - 5.).abs() < 1e-12);
}

#[test]
fn missing_module_is_a_foreign_call_error() {
    let scorer = PyScorer::new();
    assert!(matches!(
        scorer.evaluate("no_such_module", "f", &[]),
        Err(FogError::ForeignCall(_))
    ));
}

#[test]
fn missing_function_is_a_foreign_call_error() {
    let scorer = PyScorer::new();
    assert!(matches!(
        scorer.evaluate("math", "no_such_function", &[]),
        Err(FogError::ForeignCall(_))
    ));
}

#[test]
fn non_callable_target_is_a_foreign_call_error() {
    let scorer = PyScorer::new();
    assert!(matches!(
        scorer.evaluate("math", "pi", &[]),
        Err(FogError::ForeignCall(_))
    ));
}

#[test]
fn non_numeric_result_is_a_foreign_call_error() {
    let scorer = PyScorer::new();
    assert!(matches!(
        scorer.evaluate("json", "dumps", &[1.]),
        Err(FogError::ForeignCall(_))
    ));
}
