#[cfg(test)]
mod resolver_tests {
    use rox as lox;

    use lox::error::Diagnostics;
    use lox::interpreter::Interpreter;
    use lox::lox::{Lox, RunError};
    use lox::parser::Parser;
    use lox::resolver::Resolver;
    use lox::scanner::scan_tokens;

    /// Static error lines produced by running `source`; empty on success.
    fn static_errors(source: &str) -> Vec<String> {
        let mut lox = Lox::with_output(Box::new(std::io::sink()));

        match lox.run(source) {
            Err(RunError::Static(errors)) => errors.iter().map(|e| e.to_string()).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_redeclaration_in_same_local_scope() {
        assert_eq!(
            static_errors("{ var a = 1; var a = 2; }"),
            vec!["[line 1] Error at 'a': Already a variable with this name in this scope."]
        );

        // Globals may be redeclared, and shadowing across blocks is fine.
        assert!(static_errors("var a = 1; var a = 2; { var a = 3; { var a = 4; } }").is_empty());
    }

    #[test]
    fn test_parameters_share_the_body_scope() {
        assert_eq!(
            static_errors("fun f(a) { var a = 1; }"),
            vec!["[line 1] Error at 'a': Already a variable with this name in this scope."]
        );
        assert_eq!(
            static_errors("fun f(a, a) {}").len(),
            1
        );
    }

    #[test]
    fn test_read_in_own_initializer() {
        assert_eq!(
            static_errors("var a = 1; { var a = a; }"),
            vec!["[line 1] Error at 'a': Can't read local variable in its own initializer."]
        );

        // At global scope the initializer sees the previous global.
        assert!(static_errors("var a = 1; var a = a + 1;").is_empty());
    }

    #[test]
    fn test_top_level_return() {
        assert_eq!(
            static_errors("return 1;"),
            vec!["[line 1] Error at 'return': Can't return from top-level code."]
        );
        assert!(static_errors("fun f() { return 1; }").is_empty());
        assert!(static_errors("var f = fun () { return 1; };").is_empty());
    }

    #[test]
    fn test_initializer_may_return() {
        assert!(static_errors("class A { init() { return; } }").is_empty());
        assert!(static_errors("class A { init() { return 1; } }").is_empty());
    }

    #[test]
    fn test_this_outside_class() {
        assert_eq!(
            static_errors("print this;"),
            vec!["[line 1] Error at 'this': Can't use 'this' outside of a class."]
        );
        assert_eq!(
            static_errors("fun f() { return this; }"),
            vec!["[line 1] Error at 'this': Can't use 'this' outside of a class."]
        );

        // A lambda inside a method still sees `this`.
        assert!(static_errors("class A { m() { return fun () { return this; }; } }").is_empty());
    }

    #[test]
    fn test_super_misuse() {
        assert_eq!(
            static_errors("super.x;"),
            vec!["[line 1] Error at 'super': Can't use 'super' outside of a class."]
        );
        assert_eq!(
            static_errors("class A { m() { super.m(); } }"),
            vec!["[line 1] Error at 'super': Can't use 'super' in a class with no superclass."]
        );
        assert!(static_errors("class A {} class B < A { m() { super.m(); } }").is_empty());
    }

    #[test]
    fn test_class_inheriting_from_itself() {
        assert_eq!(
            static_errors("class A < A {}"),
            vec!["[line 1] Error at 'A': A class can't inherit from itself."]
        );
    }

    #[test]
    fn test_all_resolve_errors_are_collected() {
        let errors = static_errors("return;\n{ var x; var x; }\nprint this;");

        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("[line 1]"));
        assert!(errors[1].starts_with("[line 2]"));
        assert!(errors[2].starts_with("[line 3]"));
    }

    #[test]
    fn test_parse_errors_skip_resolution() {
        // The resolve error on line 1 is never reached.
        assert_eq!(
            static_errors("return 1;\nprint ;"),
            vec!["[line 2] Error at ';': Expected expression."]
        );
    }

    #[test]
    fn test_resolver_reports_into_shared_diagnostics() {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan_tokens("{ var a; var a; }", &mut diagnostics);
        let statements = Parser::new(tokens, &mut diagnostics).parse();
        assert!(!diagnostics.has_errors());

        let mut interpreter = Interpreter::with_output(Box::new(std::io::sink()));
        Resolver::new(&mut interpreter, &mut diagnostics).resolve(&statements);

        assert_eq!(diagnostics.errors().len(), 1);
        assert_eq!(
            diagnostics.errors()[0].message(),
            "Already a variable with this name in this scope."
        );
    }
}
