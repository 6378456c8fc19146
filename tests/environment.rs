#[cfg(test)]
mod environment_tests {
    use std::rc::Rc;

    use hyd::environment::{Environment, SharedEnv};
    use hyd::token::{Token, TokenType};
    use hyd::value::Value;

    fn name(lexeme: &str) -> Token {
        Token::new(TokenType::IDENTIFIER, lexeme, 1)
    }

    /// globals ← middle ← inner
    fn chain() -> (SharedEnv, SharedEnv, SharedEnv) {
        let globals = Environment::new().shared();
        let middle = Environment::with_enclosing(Rc::clone(&globals)).shared();
        let inner = Environment::with_enclosing(Rc::clone(&middle)).shared();
        (globals, middle, inner)
    }

    #[test]
    fn define_overwrites_without_error() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        env.define("a", Value::Number(2.0));

        assert_eq!(env.get(&name("a")), Ok(Value::Number(2.0)));
    }

    #[test]
    fn get_searches_outward() {
        let (globals, _middle, inner) = chain();
        globals.borrow_mut().define("g", Value::Bool(true));

        assert_eq!(inner.borrow().get(&name("g")), Ok(Value::Bool(true)));
    }

    #[test]
    fn get_of_missing_name_is_undefined_variable() {
        let (_, _, inner) = chain();

        let err = inner.borrow().get(&name("nope")).unwrap_err();
        assert_eq!(err.message, "Undefined variable 'nope'.");
        assert_eq!(err.to_string(), "Undefined variable 'nope'.\n[Line: 1]");
    }

    #[test]
    fn assign_never_declares() {
        let (globals, middle, inner) = chain();
        middle.borrow_mut().define("m", Value::Nil);

        inner
            .borrow_mut()
            .assign(&name("m"), Value::String("set".into()))
            .expect("m exists");
        assert_eq!(
            middle.borrow().get(&name("m")),
            Ok(Value::String("set".into()))
        );

        assert!(inner.borrow_mut().assign(&name("fresh"), Value::Nil).is_err());
        assert!(globals.borrow().get(&name("fresh")).is_err());
    }

    #[test]
    fn distance_access_matches_outward_search() {
        let (globals, middle, inner) = chain();
        globals.borrow_mut().define("a", Value::Number(0.0));
        middle.borrow_mut().define("b", Value::Number(1.0));
        inner.borrow_mut().define("c", Value::Number(2.0));

        for (lexeme, distance) in [("c", 0), ("b", 1), ("a", 2)] {
            let searched = inner.borrow().get(&name(lexeme));
            let indexed = Environment::get_at(&inner, distance, &name(lexeme));
            assert_eq!(searched, indexed, "name {}", lexeme);
        }
    }

    #[test]
    fn get_at_does_not_search() {
        let (globals, _middle, inner) = chain();
        globals.borrow_mut().define("a", Value::Nil);

        // `a` lives two hops out; looking exactly one hop out must fail.
        assert!(Environment::get_at(&inner, 1, &name("a")).is_err());
        // Past the end of the chain is an error, not a panic.
        assert!(Environment::get_at(&inner, 5, &name("a")).is_err());
    }

    #[test]
    fn assign_at_targets_exactly_one_frame() {
        let (_globals, middle, inner) = chain();
        middle.borrow_mut().define("x", Value::Number(1.0));
        inner.borrow_mut().define("x", Value::Number(2.0));

        Environment::assign_at(&inner, 1, &name("x"), Value::Number(10.0)).expect("x exists");

        assert_eq!(inner.borrow().get(&name("x")), Ok(Value::Number(2.0)));
        assert_eq!(middle.borrow().get(&name("x")), Ok(Value::Number(10.0)));
        assert!(Environment::assign_at(&inner, 0, &name("y"), Value::Nil).is_err());
    }

    #[test]
    fn frame_outlives_its_creator_while_referenced() {
        let kept: SharedEnv = {
            let (_globals, middle, _inner) = chain();
            middle.borrow_mut().define("kept", Value::Number(7.0));
            Environment::with_enclosing(middle).shared()
        };

        assert_eq!(
            Environment::get_at(&kept, 1, &name("kept")),
            Ok(Value::Number(7.0))
        );
    }
}
