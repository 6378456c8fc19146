#[cfg(test)]
mod resolver_tests {
    use hyd::ast::{Expr, ExprId, Stmt};
    use hyd::error::Diagnostics;
    use hyd::parser::Parser;
    use hyd::resolver::{Bindings, Resolver};
    use hyd::scanner::scan_tokens;

    fn resolve(source: &str) -> (Vec<Stmt>, Bindings, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan_tokens(source, &mut diagnostics);
        let statements = Parser::new(tokens).parse(&mut diagnostics);
        assert!(!diagnostics.has_errors(), "syntax errors: {}", diagnostics);

        let bindings = Resolver::new().resolve(&statements, &mut diagnostics);
        (statements, bindings, diagnostics)
    }

    /// Every (name, id) of Variable / Assign nodes, in source order.
    fn references(statements: &[Stmt]) -> Vec<(String, ExprId)> {
        fn expr(e: &Expr, out: &mut Vec<(String, ExprId)>) {
            match e {
                Expr::Variable { id, name } => out.push((name.lexeme.clone(), *id)),
                Expr::Assign { id, name, value } => {
                    expr(value, out);
                    out.push((name.lexeme.clone(), *id));
                }
                Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                    expr(left, out);
                    expr(right, out);
                }
                Expr::Call {
                    callee, arguments, ..
                } => {
                    expr(callee, out);
                    arguments.iter().for_each(|a| expr(a, out));
                }
                Expr::Grouping(inner) | Expr::Unary { right: inner, .. } => expr(inner, out),
                Expr::Literal(_) => {}
            }
        }

        fn stmt(s: &Stmt, out: &mut Vec<(String, ExprId)>) {
            match s {
                Stmt::Block(body) => body.iter().for_each(|s| stmt(s, out)),
                Stmt::Expression(e) | Stmt::Print(e) => expr(e, out),
                Stmt::Function(decl) => decl.body.iter().for_each(|s| stmt(s, out)),
                Stmt::If {
                    condition,
                    then_branch,
                    else_branch,
                } => {
                    expr(condition, out);
                    stmt(then_branch, out);
                    if let Some(e) = else_branch {
                        stmt(e, out);
                    }
                }
                Stmt::Return { value, .. } => {
                    if let Some(v) = value {
                        expr(v, out);
                    }
                }
                Stmt::Var { initializer, .. } => {
                    if let Some(i) = initializer {
                        expr(i, out);
                    }
                }
                Stmt::While { condition, body } => {
                    expr(condition, out);
                    stmt(body, out);
                }
            }
        }

        let mut out = Vec::new();
        statements.iter().for_each(|s| stmt(s, &mut out));
        out
    }

    fn depths(source: &str) -> Vec<(String, Option<usize>)> {
        let (statements, bindings, diagnostics) = resolve(source);
        assert!(!diagnostics.has_errors(), "errors: {}", diagnostics);

        references(&statements)
            .into_iter()
            .map(|(name, id)| (name, bindings.depth(id)))
            .collect()
    }

    fn pairs(expected: &[(&str, Option<usize>)]) -> Vec<(String, Option<usize>)> {
        expected.iter().map(|(n, d)| (n.to_string(), *d)).collect()
    }

    #[test]
    fn globals_are_left_unresolved() {
        assert_eq!(
            depths("var a = 1; print a; a = 2; print later;"),
            pairs(&[("a", None), ("a", None), ("later", None)])
        );
    }

    #[test]
    fn globals_only_program_has_an_empty_table() {
        let (_, bindings, diagnostics) = resolve("var a = 1; fun f() {} print a; f();");

        assert!(diagnostics.is_empty());
        assert!(bindings.is_empty());
        assert_eq!(bindings.len(), 0);

        let (_, bindings, _) = resolve("{ var a = 1; print a; }");
        assert!(!bindings.is_empty());
    }

    #[test]
    fn block_locals_resolve_by_distance() {
        assert_eq!(
            depths("{ var a = 1; { var b = a; print b; a = b; } }"),
            pairs(&[("a", Some(1)), ("b", Some(0)), ("b", Some(0)), ("a", Some(1))])
        );
    }

    #[test]
    fn parameters_and_body_share_one_scope() {
        assert_eq!(
            depths("fun f(x) { var y = x; { print x + y; } return f; }"),
            pairs(&[("x", Some(0)), ("x", Some(1)), ("y", Some(1)), ("f", None)])
        );
    }

    #[test]
    fn closures_reach_through_function_scopes() {
        assert_eq!(
            depths("{ var n = 0; fun inc() { n = n + 1; return n; } }"),
            pairs(&[("n", Some(1)), ("n", Some(1)), ("n", Some(1))])
        );
    }

    #[test]
    fn shadowing_picks_the_innermost() {
        assert_eq!(
            depths("{ var a = 1; { var a = 2; print a; } print a; }"),
            pairs(&[("a", Some(0)), ("a", Some(0))])
        );
    }

    #[test]
    fn own_initializer_read_is_an_error() {
        let (_, _, diagnostics) = resolve("{ var a = 1; { var a = a; } }");

        let messages: Vec<String> = diagnostics.errors().iter().map(|e| e.to_string()).collect();
        assert_eq!(
            messages,
            ["Line: 1 | Error at 'a': Can't read local variable in its own initializer."]
        );
    }

    #[test]
    fn global_self_reference_is_allowed() {
        let (_, _, diagnostics) = resolve("var a = a;");
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn local_redeclaration_is_allowed() {
        let (_, _, diagnostics) = resolve("{ var a = 1; var a = 2; }");
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn top_level_return_is_an_error() {
        let (_, _, diagnostics) = resolve("return 1;\nfun f() { return 2; }");

        let messages: Vec<String> = diagnostics.errors().iter().map(|e| e.to_string()).collect();
        assert_eq!(
            messages,
            ["Line: 1 | Error at 'return': Can't return from top-level code."]
        );
    }

    #[test]
    fn keeps_resolving_after_an_error() {
        let (_, _, diagnostics) = resolve("return;\n{ var b = b; }\nreturn;");
        assert_eq!(diagnostics.len(), 3);
    }
}
