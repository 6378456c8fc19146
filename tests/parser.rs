#[cfg(test)]
mod parser_tests {
    use hyd::ast::{Expr, Stmt};
    use hyd::ast_printer::AstPrinter;
    use hyd::error::{Diagnostics, HydError};
    use hyd::parser::Parser;
    use hyd::scanner::scan_tokens;

    fn parse(source: &str) -> (Vec<Stmt>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan_tokens(source, &mut diagnostics);
        let statements = Parser::new(tokens).parse(&mut diagnostics);
        (statements, diagnostics)
    }

    /// Parse without errors and render each statement.
    fn render(source: &str) -> Vec<String> {
        let (statements, diagnostics) = parse(source);
        assert!(
            !diagnostics.has_errors(),
            "unexpected errors: {}",
            diagnostics
        );
        statements.iter().map(AstPrinter::print_stmt).collect()
    }

    fn error_messages(source: &str) -> Vec<String> {
        parse(source)
            .1
            .errors()
            .iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(
            render("1 + 2 * 3 - 4 / 2;"),
            ["(; (- (+ 1.0 (* 2.0 3.0)) (/ 4.0 2.0)))"]
        );
        assert_eq!(
            render("a = b = 1;"),
            ["(; (= a (= b 1.0)))"]
        );
        assert_eq!(
            render("!-x == y or z and w;"),
            ["(; (or (== (! (- x)) y) (and z w)))"]
        );
        assert_eq!(
            render("1 < 2 != 3 >= 4;"),
            ["(; (!= (< 1.0 2.0) (>= 3.0 4.0)))"]
        );
    }

    #[test]
    fn literals_grouping_and_calls() {
        assert_eq!(
            render("print (\"s\");"),
            ["(print (group \"s\"))"]
        );
        assert_eq!(render("true; false; nil;"), ["(; true)", "(; false)", "(; nil)"]);
        assert_eq!(
            render("f(1)(2, g());"),
            ["(; (call (call f 1.0) 2.0 (call g)))"]
        );
    }

    #[test]
    fn declarations_and_statements() {
        assert_eq!(
            render(
                "var a; var b = 1; fun f(x, y) { return x; } if (a) print 1; else { print 2; } while (b) b = nil; return;"
            ),
            [
                "(var a)",
                "(var b 1.0)",
                "(fun f (x y) (return x))",
                "(if a (print 1.0) (block (print 2.0)))",
                "(while b (; (= b nil)))",
                "(return)",
            ]
        );
    }

    #[test]
    fn for_loop_is_desugared_into_while() {
        assert_eq!(
            render("for (var i = 0; i < 3; i = i + 1) print i;"),
            ["(block (var i 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"]
        );

        // Every clause omitted: a bare `while (true)` with no wrapping blocks.
        assert_eq!(render("for (;;) print 1;"), ["(while true (print 1.0))"]);

        assert_eq!(
            render("for (x = 0; ; ) print x;"),
            ["(block (; (= x 0.0)) (while true (print x)))"]
        );
    }

    #[test]
    fn variable_nodes_get_distinct_ids() {
        let (statements, _) = parse("a; a;");

        let ids: Vec<_> = statements
            .iter()
            .map(|s| match s {
                Stmt::Expression(Expr::Variable { id, .. }) => *id,
                other => panic!("unexpected statement {:?}", other),
            })
            .collect();

        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn missing_semicolon_reports_location() {
        assert_eq!(
            error_messages("print 1"),
            ["Line: 1 | Error at end: Expected ';' after value."]
        );
        assert_eq!(
            error_messages("var = 1;"),
            ["Line: 1 | Error at '=': Expected variable name."]
        );
    }

    #[test]
    fn recovers_and_reports_independent_errors() {
        let source = "var a = ;\nprint 1;\nvar b = (2;\nprint b;\n";
        let (statements, diagnostics) = parse(source);

        let messages: Vec<String> = diagnostics.errors().iter().map(|e| e.to_string()).collect();
        assert_eq!(
            messages,
            [
                "Line: 1 | Error at ';': Expected expression.",
                "Line: 3 | Error at ';': Expected ')' after expression.",
            ]
        );

        let rendered: Vec<String> = statements.iter().map(AstPrinter::print_stmt).collect();
        assert_eq!(rendered, ["(print 1.0)", "(print b)"]);
    }

    #[test]
    fn errors_inside_blocks_do_not_lose_the_block() {
        let (statements, diagnostics) = parse("{ print ; print 2; }");

        assert_eq!(diagnostics.len(), 1);
        let rendered: Vec<String> = statements.iter().map(AstPrinter::print_stmt).collect();
        assert_eq!(rendered, ["(block (print 2.0))"]);
    }

    #[test]
    fn invalid_assignment_target_is_not_fatal() {
        let (statements, diagnostics) = parse("1 + 2 = 3; print 4;");

        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            &diagnostics.errors()[0],
            HydError::Parse { message, .. } if message == "Invalid assignment target."
        ));
        // Both statements still parse.
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn too_many_arguments_is_reported_but_parsed() {
        let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
        let source = format!("f({});", args.join(", "));
        let (statements, diagnostics) = parse(&source);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.errors()[0]
            .to_string()
            .contains("Can't have more than 255 arguments."));

        match &statements[..] {
            [Stmt::Expression(Expr::Call { arguments, .. })] => assert_eq!(arguments.len(), 256),
            other => panic!("unexpected parse {:?}", other),
        }
    }

    #[test]
    fn too_many_parameters_is_reported_but_parsed() {
        let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
        let source = format!("fun f({}) {{}}", params.join(", "));
        let (statements, diagnostics) = parse(&source);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.errors()[0]
            .to_string()
            .contains("Can't have more than 255 parameters."));

        match &statements[..] {
            [Stmt::Function(decl)] => assert_eq!(decl.params.len(), 256),
            other => panic!("unexpected parse {:?}", other),
        }
    }

    #[test]
    fn empty_token_stream_gets_an_eof() {
        let mut diagnostics = Diagnostics::new();
        let statements = Parser::new(Vec::new()).parse(&mut diagnostics);

        assert!(statements.is_empty());
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn class_keyword_is_not_part_of_the_grammar() {
        let (_, diagnostics) = parse("class A {}");
        assert!(diagnostics.has_errors());
    }
}
