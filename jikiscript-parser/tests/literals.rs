use jikiscript_parser::*;

#[test]
fn test_parse_number_literal() {
    assert_eq!(parse_literal("42").unwrap(), Literal::Number(42.0));
    assert_eq!(parse_literal("3.14").unwrap(), Literal::Number(3.14));
    assert_eq!(parse_literal("-7").unwrap(), Literal::Number(-7.0));
    assert_eq!(parse_literal("-0.5").unwrap(), Literal::Number(-0.5));
}

#[test]
fn test_parse_string_literal() {
    assert_eq!(
        parse_literal("\"hello\"").unwrap(),
        Literal::String("hello".to_string())
    );
    assert_eq!(
        parse_literal("\"line\\nbreak\"").unwrap(),
        Literal::String("line\nbreak".to_string())
    );
    assert_eq!(
        parse_literal("\"quoted \\\"word\\\"\"").unwrap(),
        Literal::String("quoted \"word\"".to_string())
    );
}

#[test]
fn test_parse_boolean_literal() {
    assert_eq!(parse_literal("true").unwrap(), Literal::Boolean(true));
    assert_eq!(parse_literal("false").unwrap(), Literal::Boolean(false));
}

#[test]
fn test_parse_list_literal() {
    assert_eq!(
        parse_literal("[1, 2, 3]").unwrap(),
        Literal::List(vec![
            Literal::Number(1.0),
            Literal::Number(2.0),
            Literal::Number(3.0),
        ])
    );
    assert_eq!(parse_literal("[]").unwrap(), Literal::List(vec![]));
}

#[test]
fn test_parse_nested_list_literal() {
    assert_eq!(
        parse_literal("[[1], [\"a\", true]]").unwrap(),
        Literal::List(vec![
            Literal::List(vec![Literal::Number(1.0)]),
            Literal::List(vec![
                Literal::String("a".to_string()),
                Literal::Boolean(true),
            ]),
        ])
    );
}

#[test]
fn test_parse_literal_list() {
    let values = parse_literal_list("1, \"two\", [3]").unwrap();

    assert_eq!(values.len(), 3);
    assert_eq!(values[0], Literal::Number(1.0));
    assert_eq!(values[1], Literal::String("two".to_string()));
    assert_eq!(values[2], Literal::List(vec![Literal::Number(3.0)]));
}

#[test]
fn test_parse_empty_literal_list() {
    assert_eq!(parse_literal_list("").unwrap(), vec![]);
}

#[test]
fn test_literal_grammar_rejects_code() {
    // Expressions, calls, and identifiers are not literals; test-case
    // text must never reach the statement grammar
    assert!(parse_literal("1 + 2").is_err());
    assert!(parse_literal("delete_everything()").is_err());
    assert!(parse_literal("some_variable").is_err());
    assert!(parse_literal("[1, x]").is_err());
}

#[test]
fn test_literal_grammar_rejects_trailing_garbage() {
    assert!(parse_literal("42 extra").is_err());
    assert!(parse_literal_list("1, 2,").is_err());
}
