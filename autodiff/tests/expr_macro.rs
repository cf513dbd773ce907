use approx::assert_abs_diff_eq;
use autodiff::{evaluate, expr, BinOp, Dual, EvalError, Evaluator, Exponent, Expr};

fn x() -> Expr {
    Expr::variable()
}

fn c(v: f64) -> Expr {
    Expr::constant(v)
}

#[test]
fn macro_builds_the_mixed_expression() {
    let built = expr!(|x| exp(x).powi(3) + cos(x) * x + pow(10, 2));
    let by_hand = Expr::add(
        Expr::add(Expr::pow(Expr::exp(x()), c(3.0)), Expr::mul(Expr::cos(x()), x())),
        Expr::pow(c(10.0), c(2.0)),
    );
    assert_eq!(built, by_hand);
    assert_eq!(built.to_string(), "exp(x)^3 + cos(x) * x + 10^2");
}

#[test]
fn macro_tree_evaluates() {
    let f = expr!(|x| exp(x).powi(3) + cos(x) * x + pow(10, 2));
    let y = evaluate(&f, Dual::new(2.0, 1.0)).unwrap();

    assert_abs_diff_eq!(y.value, 502.5965, epsilon = 1e-3);
    assert_abs_diff_eq!(y.derivative, 1208.0516, epsilon = 1e-3);
}

#[test]
fn square_at_two() {
    let y = evaluate(&expr!(|x| x.pow(2)), Dual::new(2.0, 1.0)).unwrap();
    assert_eq!(y, Dual::new(4.0, 4.0));
}

#[test]
fn parameter_name_is_free() {
    assert_eq!(expr!(|t| t * t), Expr::mul(x(), x()));
    assert_eq!(expr!(|t: f64| t), x());
}

#[test]
fn subtraction_and_negation_lower_to_add_and_mul() {
    assert_eq!(
        expr!(|x| x - 1),
        Expr::add(x(), Expr::mul(c(-1.0), c(1.0)))
    );
    assert_eq!(expr!(|x| -x), Expr::mul(c(-1.0), x()));
    assert_eq!(expr!(|x| -2.5 * x), Expr::mul(c(-2.5), x()));
}

#[test]
fn method_calls_become_function_calls() {
    assert_eq!(expr!(|x| x.sin()), Expr::call("sin", x()));
    assert_eq!(expr!(|x| (x * x).exp()), Expr::exp(Expr::mul(x(), x())));
}

#[test]
fn parentheses_and_blocks_are_transparent() {
    assert_eq!(expr!(|x| ((x + 1.0)) * x), Expr::mul(Expr::add(x(), c(1.0)), x()));
    assert_eq!(expr!(|x| { cos(x) }), Expr::cos(x()));
}

#[test]
fn zero_parameters_build_a_constant_tree() {
    let f = expr!(|| pow(10, 2) + 1);
    assert!(!f.has_variable());

    let y = evaluate(&f, Dual::variable(3.0)).unwrap();
    assert_eq!(y, Dual::new(101.0, 0.0));
}

#[test]
fn variable_exponent_fails_at_evaluation() {
    let f = expr!(|x| pow(x, x));
    assert_eq!(f, Expr::binary(BinOp::Pow, x(), x()));
    assert_eq!(
        evaluate(&f, Dual::variable(2.0)).unwrap_err(),
        EvalError::UnsupportedExponent {
            exponent: Exponent::NonConstant
        }
    );
}

#[test]
fn unknown_function_fails_at_evaluation() {
    let f = expr!(|x| lgamma(x) + 1);
    assert_eq!(
        Evaluator::standard().derivative_at(&f, 1.0).unwrap_err(),
        EvalError::UnknownFunction {
            name: "lgamma".to_string()
        }
    );
}

#[test]
fn rejected_closures_fail_to_compile() {
    // A second parameter, a foreign identifier and `/` are compile errors.
    let cases = trybuild::TestCases::new();
    cases.compile_fail("tests/ui/*.rs");
}
