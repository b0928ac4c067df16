#[cfg(test)]
mod scanner_tests {
    use rox as lox;

    use lox::error::{Diagnostics, LoxError};
    use lox::scanner::*;
    use lox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_operators_and_ternary() {
        assert_token_sequence(
            "a != b == c <= d >= e ? f : !g",
            &[
                (TokenType::IDENTIFIER, "a"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::IDENTIFIER, "b"),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::IDENTIFIER, "c"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::IDENTIFIER, "d"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::IDENTIFIER, "e"),
                (TokenType::QUESTION, "?"),
                (TokenType::IDENTIFIER, "f"),
                (TokenType::COLON, ":"),
                (TokenType::BANG, "!"),
                (TokenType::IDENTIFIER, "g"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_keywords_and_identifiers() {
        assert_token_sequence(
            "class fun var_ classy super this orchid or",
            &[
                (TokenType::CLASS, "class"),
                (TokenType::FUN, "fun"),
                (TokenType::IDENTIFIER, "var_"),
                (TokenType::IDENTIFIER, "classy"),
                (TokenType::SUPER, "super"),
                (TokenType::THIS, "this"),
                (TokenType::IDENTIFIER, "orchid"),
                (TokenType::OR, "or"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_literals() {
        let tokens: Vec<Token> = Scanner::new("12 3.5 \"hi there\" 7.")
            .filter_map(Result::ok)
            .collect();

        assert_eq!(tokens[0].literal(), Some(Literal::Number(12.0)));
        assert_eq!(tokens[1].literal(), Some(Literal::Number(3.5)));
        assert_eq!(tokens[2].literal(), Some(Literal::Str("hi there".into())));
        assert_eq!(tokens[2].lexeme, "\"hi there\"");

        // A trailing dot is not part of the number.
        assert_eq!(tokens[3].literal(), Some(Literal::Number(7.0)));
        assert_eq!(tokens[4].token_type, TokenType::DOT);

        assert_eq!(tokens[0].to_string(), "NUMBER 12 12.0");
        assert_eq!(tokens[1].to_string(), "NUMBER 3.5 3.5");
        assert_eq!(tokens[2].to_string(), "STRING \"hi there\" hi there");
        assert_eq!(tokens[4].to_string(), "DOT . null");
    }

    #[test]
    fn test_scanner_05_comments_and_lines() {
        let source = "// line comment\na /* block\nspanning\nlines */ b\n/* x /* y */ c";
        let tokens: Vec<Token> = Scanner::new(source).filter_map(Result::ok).collect();

        let summary: Vec<(&str, usize)> = tokens
            .iter()
            .map(|t| (t.lexeme.as_str(), t.line))
            .collect();

        // Block comments do not nest: the first `*/` closes.
        assert_eq!(
            summary,
            vec![("a", 2), ("b", 4), ("c", 5), ("", 5)]
        );
    }

    #[test]
    fn test_scanner_06_multiline_string_counts_lines() {
        let tokens: Vec<Token> = Scanner::new("\"one\ntwo\" x")
            .filter_map(Result::ok)
            .collect();

        assert_eq!(tokens[0].literal(), Some(Literal::Str("one\ntwo".into())));
        assert_eq!(tokens[1].lexeme, "x");
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let scanner = Scanner::new(source);

        // Collect all results (both tokens and errors)
        let results: Vec<_> = scanner.collect();

        // 0: COMMA ','
        // 1: DOT '.'
        // 2: Error for '$'
        // 3: LEFT_PAREN '('
        // 4: Error for '#'
        // 5: EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(|e| e.to_string())
            .collect();

        assert_eq!(
            errors,
            vec![
                "[line 1] Error: Unexpected character: $",
                "[line 1] Error: Unexpected character: #",
            ]
        );

        fn assert_token_matches(
            result: &Result<Token, LoxError>,
            expected_type: TokenType,
            expected_lexeme: &str,
        ) {
            match result {
                Ok(token) => {
                    assert_eq!(
                        token.token_type, expected_type,
                        "Expected token type {:?}, got {:?}",
                        expected_type, token.token_type
                    );
                    assert_eq!(
                        token.lexeme, expected_lexeme,
                        "Expected lexeme '{}', got '{}'",
                        expected_lexeme, token.lexeme
                    );
                }
                Err(e) => panic!("Expected token but got error: {}", e),
            }
        }
    }

    #[test]
    fn test_unterminated_input_is_reported() {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan_tokens("print \"open\n/* never closed", &mut diagnostics);

        assert_eq!(tokens.last().map(|t| &t.token_type), Some(&TokenType::EOF));

        let messages: Vec<&str> = diagnostics.errors().iter().map(|e| e.message()).collect();
        assert_eq!(messages, vec!["Unterminated string."]);

        let mut diagnostics = Diagnostics::new();
        scan_tokens("1 /* never closed\n", &mut diagnostics);

        assert_eq!(diagnostics.errors().len(), 1);
        assert_eq!(diagnostics.errors()[0].message(), "Unterminated block comment.");
        assert_eq!(diagnostics.errors()[0].line(), 2);
    }

    #[test]
    fn test_tokens_serialize_to_json() {
        let tokens: Vec<Token> = Scanner::new("x").filter_map(Result::ok).collect();
        let json = serde_json::to_value(&tokens[0]).unwrap();

        assert_eq!(json["lexeme"], "x");
        assert_eq!(json["line"], 1);
    }
}
