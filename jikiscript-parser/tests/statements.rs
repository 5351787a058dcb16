use jikiscript_parser::*;

#[test]
fn test_parse_set_statement() {
    let result = parse_program("set counter to 5").unwrap();

    assert_eq!(result.statements.len(), 1);
    match &result.statements[0].kind {
        StatementKind::Set(set) => {
            assert_eq!(set.name.name, "counter");
            assert_eq!(set.value.kind, ExpressionKind::Number(5.0));
        }
        other => panic!("Expected set statement, got {other:?}"),
    }
}

#[test]
fn test_parse_change_statement() {
    let result = parse_program("set x to 1\nchange x to 2").unwrap();

    assert_eq!(result.statements.len(), 2);
    match &result.statements[1].kind {
        StatementKind::Change(change) => {
            assert_eq!(change.name.name, "x");
            assert_eq!(change.value.kind, ExpressionKind::Number(2.0));
        }
        other => panic!("Expected change statement, got {other:?}"),
    }
}

#[test]
fn test_parse_if_statement_without_else() {
    let source = "if x == 5 do\n  set y to 1\nend";
    let result = parse_program(source).unwrap();

    match &result.statements[0].kind {
        StatementKind::If(if_statement) => {
            assert_eq!(if_statement.then_body.len(), 1);
            assert!(if_statement.else_body.is_none());
        }
        other => panic!("Expected if statement, got {other:?}"),
    }
}

#[test]
fn test_parse_if_statement_with_else() {
    let source = "if ready do\n  set y to 1\nelse do\n  set y to 2\n  set z to 3\nend";
    let result = parse_program(source).unwrap();

    match &result.statements[0].kind {
        StatementKind::If(if_statement) => {
            assert_eq!(if_statement.then_body.len(), 1);
            let else_body = if_statement.else_body.as_ref().unwrap();
            assert_eq!(else_body.len(), 2);
        }
        other => panic!("Expected if statement, got {other:?}"),
    }
}

#[test]
fn test_parse_repeat_statement() {
    let source = "repeat 3 times do\n  set x to 1\n  set y to 2\nend";
    let result = parse_program(source).unwrap();

    match &result.statements[0].kind {
        StatementKind::Repeat(repeat) => {
            assert_eq!(repeat.count.kind, ExpressionKind::Number(3.0));
            assert_eq!(repeat.body.len(), 2);
        }
        other => panic!("Expected repeat statement, got {other:?}"),
    }
}

#[test]
fn test_parse_function_definition() {
    let source = "function add with a, b do\n  return a + b\nend";
    let result = parse_program(source).unwrap();

    match &result.statements[0].kind {
        StatementKind::FunctionDefinition(function) => {
            assert_eq!(function.name.name, "add");
            assert_eq!(function.arity(), 2);
            assert_eq!(function.parameters[0].name, "a");
            assert_eq!(function.parameters[1].name, "b");
            assert_eq!(function.body.len(), 1);
            assert!(matches!(function.body[0].kind, StatementKind::Return(_)));
        }
        other => panic!("Expected function definition, got {other:?}"),
    }
}

#[test]
fn test_parse_function_definition_without_parameters() {
    let source = "function greet do\n  return \"hello\"\nend";
    let result = parse_program(source).unwrap();

    match &result.statements[0].kind {
        StatementKind::FunctionDefinition(function) => {
            assert_eq!(function.arity(), 0);
        }
        other => panic!("Expected function definition, got {other:?}"),
    }
}

#[test]
fn test_parse_bare_return() {
    let source = "function stop do\n  return\nend";
    let result = parse_program(source).unwrap();

    match &result.statements[0].kind {
        StatementKind::FunctionDefinition(function) => match &function.body[0].kind {
            StatementKind::Return(ret) => assert!(ret.value.is_none()),
            other => panic!("Expected return statement, got {other:?}"),
        },
        other => panic!("Expected function definition, got {other:?}"),
    }
}

#[test]
fn test_parse_return_with_value() {
    let source = "function identity with n do\n  return n\nend";
    let result = parse_program(source).unwrap();

    match &result.statements[0].kind {
        StatementKind::FunctionDefinition(function) => match &function.body[0].kind {
            StatementKind::Return(ret) => assert!(ret.value.is_some()),
            other => panic!("Expected return statement, got {other:?}"),
        },
        other => panic!("Expected function definition, got {other:?}"),
    }
}

#[test]
fn test_parse_expression_statement() {
    let result = parse_program("move()").unwrap();

    match &result.statements[0].kind {
        StatementKind::Expression(expression) => match &expression.kind {
            ExpressionKind::Call(call) => {
                assert_eq!(call.name.name, "move");
                assert!(call.arguments.is_empty());
            }
            other => panic!("Expected call expression, got {other:?}"),
        },
        other => panic!("Expected expression statement, got {other:?}"),
    }
}

#[test]
fn test_parse_comments_are_skipped() {
    let source = "// leading comment\nset x to 1 // trailing comment\n// another";
    let result = parse_program(source).unwrap();

    assert_eq!(result.statements.len(), 1);
}

#[test]
fn test_statement_spans_track_lines() {
    let source = "set x to 1\nset y to 2";
    let result = parse_program(source).unwrap();

    assert_eq!(result.statements[0].span.line, 1);
    assert_eq!(result.statements[1].span.line, 2);
}

#[test]
fn test_identifiers_can_start_with_keyword_prefix() {
    // "settings" starts with "set" but is a plain identifier
    let result = parse_program("set settings to 1\nchange settings to settings + 1").unwrap();

    assert_eq!(result.statements.len(), 2);
    match &result.statements[0].kind {
        StatementKind::Set(set) => assert_eq!(set.name.name, "settings"),
        other => panic!("Expected set statement, got {other:?}"),
    }
}
