use std::fs::{self};

use dashu::float::DBig;
use exprtree::{Error, Expression, Number, ParseError, Parser, error::EvaluationError};
use walkdir::WalkDir;

#[test]
fn context_files_evaluate() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/contexts").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let context = ContextFile::read(&content);

        let outcome = match context.number.as_str() {
            "integer" => render(exprtree::evaluate::<i64>(&context.body)),
            "real" => render(exprtree::evaluate::<f64>(&context.body)),
            "decimal" => render(exprtree::evaluate::<DBig>(&context.body)),
            other => panic!("Unknown number type '{other}' in {path:?}"),
        };

        count += 1;
        assert_eq!(outcome, context.expect, "Context {path:?} produced an unexpected outcome:\n{}", context.body);
    }

    assert!(count > 0, "No contexts found in tests/contexts");
}

/// A context file: `# key: value` header lines followed by the statements.
struct ContextFile {
    number: String,
    expect: String,
    body:   String,
}

impl ContextFile {
    fn read(content: &str) -> Self {
        let mut number = String::from("integer");
        let mut expect = String::new();
        let mut body = String::new();

        for line in content.lines() {
            if let Some(header) = line.strip_prefix('#') {
                if let Some((key, value)) = header.split_once(':') {
                    match key.trim() {
                        "number" => value.trim().clone_into(&mut number),
                        "expect" => value.trim().clone_into(&mut expect),
                        _ => {},
                    }
                }
                continue;
            }
            body.push_str(line);
            body.push('\n');
        }

        Self { number, expect, body }
    }
}

fn render<N: Number>(outcome: Result<Option<N>, Error>) -> String {
    match outcome {
        Ok(Some(value)) => value.to_string(),
        Ok(None) => "none".to_string(),
        Err(e) => format!("error: {e}"),
    }
}

fn parse_ok(src: &str) -> Vec<Expression<i64>> {
    Parser::new().parse(src)
                 .unwrap_or_else(|e| panic!("Context failed: {src}\n{e}"))
}

fn parse_err(src: &str) -> ParseError {
    match Parser::<i64>::new().parse(src) {
        Ok(trees) => panic!("Context succeeded but was expected to fail: {src} -> {trees:?}"),
        Err(e) => e,
    }
}

fn value_of(src: &str) -> i64 {
    let trees = parse_ok(src);
    let last = trees.last().unwrap_or_else(|| panic!("No statements in {src}"));
    last.value().unwrap_or_else(|e| panic!("Evaluation of {src} failed: {e}"))
}

fn c(value: i64) -> Expression<i64> {
    Expression::constant(value)
}

#[test]
fn unary_minus_becomes_subtraction_from_zero() {
    let trees = parse_ok("-2 + 3 * 4");
    assert_eq!(trees.len(), 1);

    let expected = Expression::addition(Expression::subtraction(c(0), c(2)).unwrap(),
                                        Expression::multiplication(c(3), c(4)).unwrap()).unwrap();
    assert_eq!(trees[0], expected);
    assert_eq!(format!("{:?}", trees[0]),
               "Addition(Some(Subtraction(Some(Constant(0)), Some(Constant(2)))), \
                Some(Multiplication(Some(Constant(3)), Some(Constant(4)))))");
    assert_eq!(trees[0].value().unwrap(), 10);
}

#[test]
fn variables_are_shared_across_statements() {
    let trees = parse_ok("r = 2; pi = 3; c = 4/3; c * pi * r ^3");
    assert_eq!(trees.len(), 4);

    let last = &trees[3];
    let product = last.left().unwrap();
    let power = last.right().unwrap();

    let c_ref = product.left().unwrap();
    let pi_ref = product.right().unwrap();
    let r_ref = power.left().unwrap();

    assert_eq!(c_ref.as_variable().unwrap().value(), Some(1));
    assert_eq!(pi_ref.as_variable().unwrap().value(), Some(3));
    assert_eq!(r_ref.as_variable().unwrap().value(), Some(2));

    let r_target = trees[0].left().unwrap();
    assert!(r_target.as_variable().unwrap().is_same(r_ref.as_variable().unwrap()));
    assert!(!r_target.is_same(&r_ref));

    assert_eq!(last.value().unwrap(), 24);
}

#[test]
fn reassigning_overwrites_the_shared_value() {
    let trees = parse_ok("x = 1; y = x + 1; x = 10; y");
    assert_eq!(trees[1].left().unwrap().as_variable().unwrap().value(), Some(2));
    assert_eq!(trees[3].value().unwrap(), 2);

    assert_eq!(trees[1].value().unwrap(), 11);
    assert_eq!(trees[3].value().unwrap(), 11);
}

#[test]
fn operator_priorities() {
    assert_eq!(value_of("2 + 3 * 4"), 14);
    assert_eq!(value_of("(2 + 3) * 4"), 20);
    assert_eq!(value_of("2 * 3 ^ 2"), 18);
    assert_eq!(value_of("10 - 4 - 3"), 3);
    assert_eq!(value_of("100 / 10 / 5"), 2);
    assert_eq!(value_of("2 ^ 3 ^ 2"), 512);
    assert_eq!(value_of("-2 ^ 2"), -4);
    assert_eq!(value_of("2 * -3"), -6);
    assert_eq!(value_of("-(2 + 3)"), -5);
    assert_eq!(value_of("--4"), 4);
}

#[test]
fn empty_statements_are_skipped() {
    assert!(parse_ok("").is_empty());
    assert!(parse_ok(" ;; ; ").is_empty());
    assert_eq!(parse_ok(";1 + 2;;3;").len(), 2);
}

#[test]
fn assignment_with_unknown_value_is_left_unevaluated() {
    let trees = parse_ok("a = b + 1");
    let target = trees[0].left().unwrap();
    assert!(!target.as_variable().unwrap().has_value());
    assert!(!trees[0].has_value());
}

#[test]
fn real_parser_reads_decimal_literals() {
    let trees = Parser::from_specimen(&0.0f64).parse("a = 2.35; a * 2").unwrap();
    assert_eq!(trees[1].value().unwrap(), 4.7);
    assert_eq!(exprtree::evaluate::<f64>("1 / 4").unwrap(), Some(0.25));
}

#[test]
fn illegal_assignment_target() {
    let err = parse_err("a + b = 2");
    assert!(matches!(err, ParseError::IllegalAssignment { position: 6, .. }), "{err:?}");
    assert_eq!(err.to_string(),
               "Error at position 6: Illegal assignment: 'a + b' is not a variable.");

    assert!(matches!(parse_err("2 = 3"), ParseError::IllegalAssignment { .. }));
    assert!(matches!(parse_err("= 3"), ParseError::IllegalAssignment { position: 0, .. }));
    assert!(matches!(parse_err("(a = 2)"), ParseError::IllegalAssignment { position: 3, .. }));
}

#[test]
fn self_referencing_assignment() {
    assert!(matches!(parse_err("a = a + 1"), ParseError::IllegalAssignment { position: 2, .. }));
    assert!(matches!(parse_err("a = 2 * (1 - a)"), ParseError::IllegalAssignment { .. }));
}

#[test]
fn multiple_assignments() {
    assert!(matches!(parse_err("a = b = c"), ParseError::MultipleAssignments { position: 6 }));
    assert!(matches!(parse_err("a = = 1"), ParseError::MultipleAssignments { position: 4 }));
}

#[test]
fn unfinished_sub_context() {
    assert!(matches!(parse_err("a+((b-c)*d"), ParseError::UnfinishedSubContext { position: 2 }));
    assert!(matches!(parse_err("(1 + 2; 3"), ParseError::UnfinishedSubContext { position: 0 }));
}

#[test]
fn unknown_tokens() {
    let err = parse_err("a = 2.35");
    assert!(matches!(&err, ParseError::UnknownToken { token, position: 4 } if token == "2.35"));
    assert_eq!(err.to_string(), "Error at position 4: Unknown token: 2.35.");

    assert!(matches!(parse_err("x $ 2"), ParseError::UnknownToken { position: 2, .. }));
    assert!(matches!(parse_err("x + #"), ParseError::UnknownToken { position: 4, .. }));
}

#[test]
fn unsupported_unary_operators() {
    assert!(matches!(parse_err("a ** b"),
                     ParseError::UnsupportedUnaryOperator { ref operator, position: 3 } if operator == "*"));
    assert!(matches!(parse_err("+1"), ParseError::UnsupportedUnaryOperator { position: 0, .. }));
    assert!(matches!(parse_err("2 * ^ 3"), ParseError::UnsupportedUnaryOperator { .. }));
}

#[test]
fn missing_right_operands() {
    assert!(matches!(parse_err("2 - -"),
                     ParseError::MissingRightOperand { ref operator, position: 5 } if operator == "-"));
    assert!(matches!(parse_err("1 +"), ParseError::MissingRightOperand { position: 3, .. }));
    assert!(matches!(parse_err("1 + ;2"), ParseError::MissingRightOperand { position: 4, .. }));
    assert!(matches!(parse_err("()"),
                     ParseError::MissingRightOperand { ref operator, position: 1 } if operator == "("));
    assert!(matches!(parse_err("x ="), ParseError::MissingRightOperand { .. }));
}

#[test]
fn illegal_post_parsing_state() {
    assert!(matches!(parse_err("2 3"),
                     ParseError::IllegalPostParsingState { ref token, position: 2 } if token == "3"));
    assert!(matches!(parse_err("(1) (2)"), ParseError::IllegalPostParsingState { .. }));
    assert!(matches!(parse_err(") + 1"), ParseError::IllegalPostParsingState { position: 0, .. }));
    assert!(matches!(parse_err("1 + 2)"), ParseError::IllegalPostParsingState { position: 5, .. }));
}

#[test]
fn failures_are_atomic() {
    assert!(matches!(parse_err("a = 1; b = 2; 2 3"), ParseError::IllegalPostParsingState { .. }));
}

#[test]
fn assignment_evaluation_failures_name_the_statement() {
    let err = parse_err("a = 1; b = a / 0");
    assert!(matches!(err,
                     ParseError::Evaluation { statement: 1,
                                              source:    EvaluationError::DivisionByZero, }));

    assert!(matches!(parse_err("x = 2 ^ 70"),
                     ParseError::Evaluation { statement: 0,
                                              source:    EvaluationError::Overflow { .. }, }));
}

#[test]
fn evaluate_reports_the_last_value() {
    assert_eq!(exprtree::evaluate::<i64>("x = 4; x * x").unwrap(), Some(16));
    assert_eq!(exprtree::evaluate::<i64>("x * x").unwrap(), None);
    assert!(matches!(exprtree::evaluate::<i64>("2 ^ -1"),
                     Err(Error::Evaluation(EvaluationError::UnsupportedOperation { .. }))));
    assert!(matches!(exprtree::evaluate::<i64>("2 +"), Err(Error::Parse(_))));
}

#[test]
fn parsers_are_independent() {
    let parser = Parser::<i64>::new();
    parser.parse("x = 5").unwrap();
    let trees = parser.parse("x + 1").unwrap();
    assert!(!trees[0].has_value());
}

#[test]
fn long_sums_parse_and_evaluate() {
    let terms = 20_000;
    let source = vec!["1"; terms].join(" + ");

    let trees = parse_ok(&source);
    assert_eq!(trees.len(), 1);
    assert!(trees[0].has_value());
    assert_eq!(trees[0].value().unwrap(), 20_000);

    assert_eq!(exprtree::evaluate::<i64>(&format!("x = 2; {source} - x")).unwrap(), Some(19_998));
}

#[test]
fn parsed_statements_evaluate_without_reparsing() {
    let trees = parse_ok("r = 2; pi = 3; y * 2; pi * r ^ 2");
    assert_eq!(exprtree::evaluate_statements(&trees).unwrap(), Some(12));

    let trees = parse_ok("a = 5; b = a / 1");
    trees[1].right().unwrap().set_right(Some(c(0))).unwrap();
    assert!(matches!(exprtree::evaluate_statements(&trees), Err(EvaluationError::DivisionByZero)));
}
