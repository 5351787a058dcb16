use jikiscript_parser::*;

#[test]
fn test_unclosed_if_is_a_syntax_error() {
    let result = parse_program("if x == 1 do\nset y to 2");

    assert!(matches!(result, Err(ParseError::Syntax { .. })));
}

#[test]
fn test_set_without_value_is_a_syntax_error() {
    assert!(parse_program("set x to").is_err());
    assert!(parse_program("set to 5").is_err());
}

#[test]
fn test_error_carries_source_offsets() {
    let source = "set x to 5\nset y to";
    let error = parse_program(source).unwrap_err();

    let (start, _end) = error.source_offsets();
    assert!(start > 0, "error should not point at the program start");
    assert!(start <= source.len());
}

#[test]
fn test_keywords_cannot_be_identifiers() {
    assert!(parse_program("set end to 5").is_err());
    assert!(parse_program("set repeat to 5").is_err());
}

#[test]
fn test_unterminated_string_is_a_syntax_error() {
    assert!(parse_program("set x to \"oops").is_err());
}
