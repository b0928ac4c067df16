#[cfg(test)]
mod parser_tests {
    use rox as lox;

    use lox::ast::{Expr, Stmt};
    use lox::ast_printer::AstPrinter;
    use lox::error::{Diagnostics, LoxError};
    use lox::parser::Parser;
    use lox::scanner::scan_tokens;

    fn parse(source: &str) -> (Vec<Stmt>, Vec<LoxError>) {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan_tokens(source, &mut diagnostics);
        let statements = Parser::new(tokens, &mut diagnostics).parse();

        (statements, diagnostics.take())
    }

    /// Parses `source` as one expression statement and prints it.
    fn print_expr(source: &str) -> String {
        let (statements, errors) = parse(&format!("{};", source));
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        assert_eq!(statements.len(), 1);

        match &statements[0] {
            Stmt::Expression(expr) => AstPrinter::print(expr),
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    fn error_messages(source: &str) -> Vec<String> {
        parse(source).1.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_precedence_and_grouping() {
        assert_eq!(print_expr("1 + 2 * 3"), "(+ 1.0 (* 2.0 3.0))");
        assert_eq!(print_expr("(1 + 2) * 3"), "(* (group (+ 1.0 2.0)) 3.0)");
        assert_eq!(print_expr("-a - -b"), "(- (- a) (- b))");
        assert_eq!(print_expr("1 < 2 == !false"), "(== (< 1.0 2.0) (! false))");
        assert_eq!(print_expr("a or b and c"), "(or a (and b c))");
        assert_eq!(print_expr("\"hi\" + 2.5"), "(+ hi 2.5)");
    }

    #[test]
    fn test_comma_is_lowest_and_left_associative() {
        assert_eq!(print_expr("a = 1, b = 2, c"), "(, (, (= a 1.0) (= b 2.0)) c)");
    }

    #[test]
    fn test_call_arguments_are_not_comma_expressions() {
        assert_eq!(print_expr("f(1, 2)(3)"), "(call (call f 1.0 2.0) 3.0)");
        assert_eq!(print_expr("f((1, 2))"), "(call f (group (, 1.0 2.0)))");
    }

    #[test]
    fn test_ternary_is_right_associative() {
        assert_eq!(print_expr("a ? b : c"), "(?: a b c)");
        assert_eq!(print_expr("a ? b : c ? d : e"), "(?: a b (?: c d e))");
        assert_eq!(print_expr("x = a or b ? 1 : 2"), "(= x (?: (or a b) 1.0 2.0))");
    }

    #[test]
    fn test_property_access_and_assignment() {
        assert_eq!(print_expr("a.b.c = 3"), "(= (. (. a b) c) 3.0)");
        assert_eq!(print_expr("this.x"), "(. this x)");
    }

    #[test]
    fn test_lambda_expression() {
        assert_eq!(
            print_expr("fun (a, b) { return a + b; }"),
            "(fun (a b) (return (+ a b)))"
        );
    }

    #[test]
    fn test_for_loop_is_desugared() {
        let (statements, errors) = parse("for (var i = 0; i < 3; i = i + 1) print i;");
        assert!(errors.is_empty());

        let printed: Vec<String> = statements.iter().map(AstPrinter::print_stmt).collect();
        assert_eq!(
            printed,
            vec![
                "(block (var i 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"
            ]
        );

        let (statements, _) = parse("for (;;) {}");
        assert_eq!(
            AstPrinter::print_stmt(&statements[0]),
            "(while true (block))"
        );
    }

    #[test]
    fn test_class_declaration() {
        let (statements, errors) =
            parse("class B < A { init(x) { this.x = x; } get() { return super.get(); } }");
        assert!(errors.is_empty(), "{:?}", errors);

        match &statements[0] {
            Stmt::Class {
                name,
                superclass,
                methods,
            } => {
                assert_eq!(name.lexeme, "B");
                assert!(matches!(superclass, Some(Expr::Variable { name, .. }) if name.lexeme == "A"));
                assert_eq!(methods.len(), 2);
                assert_eq!(methods[0].name.lexeme, "init");
                assert_eq!(methods[0].function.params.len(), 1);
            }
            other => panic!("expected class, got {:?}", other),
        }

        assert_eq!(
            AstPrinter::print_stmt(&statements[0]),
            "(class B < A (init (x) (; (= (. this x) x))) (get () (return (call (super get)))))"
        );
    }

    #[test]
    fn test_invalid_assignment_target() {
        assert_eq!(
            error_messages("1 + 2 = 3;"),
            vec!["[line 1] Error at '=': Invalid assignment target."]
        );
    }

    #[test]
    fn test_error_locations() {
        assert_eq!(
            error_messages("print 1"),
            vec!["[line 1] Error at end: Expected ';' after value."]
        );
        assert_eq!(
            error_messages("var = 2;"),
            vec!["[line 1] Error at '=': Expected variable name."]
        );
        assert_eq!(
            error_messages("(1 ? 2);"),
            vec!["[line 1] Error at ')': Expected ':' after then branch of conditional expression."]
        );
    }

    #[test]
    fn test_recovery_reports_every_statement_error() {
        let (statements, errors) = parse("var a = ;\nprint a;\nvar b = );\nprint b;");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].line(), 1);
        assert_eq!(errors[1].line(), 3);
        assert_eq!(errors[1].message(), "Expected expression.");

        // The well‑formed statements survive.
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_too_many_parameters_is_reported_but_parsed() {
        let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
        let (statements, errors) = parse(&format!("fun f({}) {{}}", params.join(", ")));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "Can't have more than 255 parameters.");
        assert_eq!(errors[0].to_string(), "[line 1] Error at 'p255': Can't have more than 255 parameters.");

        match &statements[..] {
            [Stmt::Function(function)] => {
                assert_eq!(function.name.lexeme, "f");
                assert_eq!(function.function.params.len(), 256);
            }
            other => panic!("expected one function declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_too_many_arguments_is_reported_but_parsed() {
        let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
        let (statements, errors) = parse(&format!("f({});", args.join(", ")));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "Can't have more than 255 arguments.");
        assert_eq!(statements.len(), 1);
    }
}
