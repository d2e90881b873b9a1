use crate::equation::Equation;
use crate::expression::scan::{innermost_call, split_arguments};
use crate::expression::{EvalError, Evaluator};
use crate::operator::{OperatorKind, OperatorRegistry, OperatorSpec};
use crate::test_support::{infix_value, registry};
use crate::utils::{Value, integer, parse_number};

fn everything() -> OperatorRegistry {
    registry(&OperatorKind::ALL, 2)
}

fn value(text: &str) -> Value {
    match parse_number(text) {
        Ok(v) => v,
        Err(e) => panic!("bad test number {}: {}", text, e),
    }
}

#[test]
fn test_split_arguments_respects_nesting() {
    assert_eq!(split_arguments("1,2"), vec!["1", "2"]);
    assert_eq!(split_arguments("#0,(3,4)"), vec!["#0", "(3,4)"]);
    assert_eq!(split_arguments("-7"), vec!["-7"]);
}

#[test]
fn test_innermost_call_is_rightmost_opening() {
    let site = innermost_call("mul(add(1,2),sub(3,4))");
    assert!(matches!(site, Ok(Some(_))));
    if let Ok(Some(site)) = site {
        assert_eq!(site.name, "sub");
        assert_eq!(site.start, 13);
        assert_eq!(site.end, 21);
        assert_eq!(site.args, vec!["3", "4"]);
    }

    assert_eq!(innermost_call("42"), Ok(None));
    assert!(innermost_call("add(1,2").is_err());
}

#[test]
fn test_evaluate_basic_arithmetic() {
    let registry = everything();
    let evaluator = Evaluator::new(&registry);

    assert_eq!(evaluator.evaluate_str("add(1,2)"), Ok(integer(3)));
    assert_eq!(evaluator.evaluate_str("mul(add(1,2),3)"), Ok(integer(9)));
    assert_eq!(evaluator.evaluate_str("sub(2,7)"), Ok(integer(-5)));
    assert_eq!(evaluator.evaluate_str("div(1,3)"), Ok(value("1/3")));
    assert_eq!(evaluator.evaluate_str("add(div(1,3),div(2,3))"), Ok(integer(1)));
    assert_eq!(evaluator.evaluate_str("neg(3)"), Ok(integer(-3)));
    assert_eq!(evaluator.evaluate_str("sub(5,-3)"), Ok(integer(8)));
    assert_eq!(evaluator.evaluate_str("7"), Ok(integer(7)));
}

#[test]
fn test_evaluate_partial_operators() {
    let registry = everything();
    let evaluator = Evaluator::new(&registry);

    assert_eq!(evaluator.evaluate_str("sqrt(16)"), Ok(integer(4)));
    assert_eq!(evaluator.evaluate_str("sqrt(div(9,4))"), Ok(value("3/2")));
    assert_eq!(evaluator.evaluate_str("fact(5)"), Ok(integer(120)));
    assert_eq!(evaluator.evaluate_str("fact(0)"), Ok(integer(1)));
    assert_eq!(evaluator.evaluate_str("pow(2,10)"), Ok(integer(1024)));
    assert_eq!(evaluator.evaluate_str("pow(2,-2)"), Ok(value("1/4")));
    assert_eq!(evaluator.evaluate_str("pow(div(2,3),2)"), Ok(value("4/9")));
}

#[test]
fn test_evaluate_failures() {
    let registry = everything();
    let evaluator = Evaluator::new(&registry);

    assert_eq!(
        evaluator.evaluate_str("div(1,0)"),
        Err(EvalError::DivisionByZero)
    );
    assert_eq!(
        evaluator.evaluate_str("div(3,sub(2,2))"),
        Err(EvalError::DivisionByZero)
    );
    assert_eq!(
        evaluator.evaluate_str("pow(0,-1)"),
        Err(EvalError::DivisionByZero)
    );
    assert!(matches!(
        evaluator.evaluate_str("sqrt(sub(1,5))"),
        Err(EvalError::DomainError(_))
    ));
    assert!(matches!(
        evaluator.evaluate_str("sqrt(2)"),
        Err(EvalError::DomainError(_))
    ));
    assert!(matches!(
        evaluator.evaluate_str("fact(div(1,2))"),
        Err(EvalError::DomainError(_))
    ));
    assert!(matches!(
        evaluator.evaluate_str("fact(-1)"),
        Err(EvalError::DomainError(_))
    ));
    assert!(matches!(
        evaluator.evaluate_str("fact(21)"),
        Err(EvalError::Overflow(_))
    ));
    assert!(matches!(
        evaluator.evaluate_str("pow(2,65)"),
        Err(EvalError::Overflow(_))
    ));
    assert!(matches!(
        evaluator.evaluate_str("pow(4,div(1,2))"),
        Err(EvalError::DomainError(_))
    ));
}

#[test]
fn test_recoverable_classification() {
    assert!(EvalError::DivisionByZero.is_recoverable());
    assert!(EvalError::Overflow("x".to_string()).is_recoverable());
    assert!(!EvalError::malformed("add(", "unbalanced").is_recoverable());
}

#[test]
fn test_malformed_equations() {
    let registry = everything();
    let evaluator = Evaluator::new(&registry);

    for text in ["add(1,2", "foo(1,2)", "add(1)", "add(1,x)", "neg(1,2)", ""] {
        let result = evaluator.evaluate_str(text);
        assert!(
            matches!(result, Err(EvalError::MalformedEquation { .. })),
            "expected malformed for {:?}, got {:?}",
            text,
            result
        );
        assert!(evaluator.render_str(text).is_err() || text.is_empty());
    }
}

#[test]
fn test_custom_operator_names() {
    let registry = OperatorRegistry::configure(
        vec![OperatorSpec::new("root", OperatorKind::Sqrt)],
        vec![OperatorSpec::new("plus", OperatorKind::Add)],
        1,
    );
    assert!(registry.is_ok());
    if let Ok(registry) = registry {
        let evaluator = Evaluator::new(&registry);
        assert_eq!(evaluator.evaluate_str("plus(root(9),1)"), Ok(integer(4)));
        assert_eq!(
            evaluator.render_str("plus(root(9),1)"),
            Ok("(sqrt(9)+1)".to_string())
        );
        assert!(evaluator.evaluate_str("add(1,2)").is_err());
    }
}

#[test]
fn test_render_parenthesizes_only_where_needed() {
    let registry = everything();
    let evaluator = Evaluator::new(&registry);

    let cases = [
        ("add(3,3)", "(3+3)"),
        ("mul(3,3)", "(3*3)"),
        ("add(add(add(1,2),3),4)", "(1+2+3+4)"),
        ("add(1,add(2,3))", "(1+2+3)"),
        ("sub(sub(1,2),3)", "(1-2-3)"),
        ("sub(1,sub(2,3))", "(1-(2-3))"),
        ("mul(add(1,2),3)", "((1+2)*3)"),
        ("div(6,mul(2,3))", "(6/(2*3))"),
        ("div(mul(6,2),3)", "(6*2/3)"),
        ("pow(pow(2,3),2)", "((2^3)^2)"),
        ("pow(2,pow(3,2))", "(2^3^2)"),
        ("neg(add(1,2))", "(-(1+2))"),
        ("neg(mul(1,2))", "(-1*2)"),
        ("sqrt(add(7,2))", "sqrt(7+2)"),
        ("sqrt(sqrt(16))", "sqrt(sqrt(16))"),
        ("fact(add(1,2))", "((1+2)!)"),
        ("fact(3)", "(3!)"),
        ("add(-3,1/2)", "((-3)+(1/2))"),
        ("7", "7"),
        ("-7", "(-7)"),
    ];

    for (equation, expected) in cases {
        assert_eq!(
            evaluator.render_str(equation),
            Ok(expected.to_string()),
            "rendering {}",
            equation
        );
    }
}

#[test]
fn test_render_does_not_evaluate() {
    let registry = everything();
    let evaluator = Evaluator::new(&registry);
    assert_eq!(
        evaluator.render(&Equation::new("div(1,0)")),
        Ok("(1/0)".to_string())
    );
}

#[test]
fn test_evaluate_is_pure() {
    let registry = everything();
    let evaluator = Evaluator::new(&registry);
    let equation = Equation::new("div(fact(4),sub(sqrt(49),pow(2,2)))");
    let first = evaluator.evaluate(&equation);
    assert_eq!(first, Ok(integer(8)));
    assert_eq!(evaluator.evaluate(&equation), first);
}

#[test]
fn test_render_round_trips_through_infix() {
    let registry = everything();
    let evaluator = Evaluator::new(&registry);

    let equations = [
        "sub(1,sub(2,sub(3,4)))",
        "div(1,div(2,div(3,4)))",
        "div(div(1,2),mul(3,4))",
        "mul(sub(5,8),div(-2,7))",
        "pow(neg(2),3)",
        "pow(-2,2)",
        "neg(pow(2,2))",
        "pow(div(1,2),neg(3))",
        "fact(sub(7,4))",
        "sub(fact(3),neg(neg(5)))",
        "add(sqrt(div(1,4)),1/3)",
        "pow(2,pow(1,3))",
        "mul(neg(3),neg(4))",
    ];

    for text in equations {
        let evaluated = evaluator.evaluate_str(text);
        assert!(evaluated.is_ok(), "{} should evaluate", text);
        let rendered = evaluator.render_str(text);
        assert!(rendered.is_ok(), "{} should render", text);
        if let (Ok(v), Ok(r)) = (evaluated, rendered) {
            assert_eq!(infix_value(&r), Some(v), "{} rendered as {}", text, r);
        }
    }
}
