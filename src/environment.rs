use crate::error::RuntimeError;
use crate::token::Token;
use crate::value::Value;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One scope frame.  A slot holding `None` is declared but not yet
/// assigned, which is different from holding `Value::Nil`.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Option<Value>>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    pub fn define(&mut self, name: &str, value: Option<Value>) {
        debug!("define '{}' (initialized: {})", name, value.is_some());

        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        match self.values.get(&name.lexeme) {
            Some(Some(value)) => Ok(value.clone()),
            Some(None) => Err(uninitialized(name)),
            None => match &self.enclosing {
                Some(enclosing) => enclosing.borrow().get(name),
                None => Err(undefined(name)),
            },
        }
    }

    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = Some(value);
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }

    /// Read `name` from the frame exactly `distance` links up, without
    /// searching any other frame.
    pub fn get_at(
        env: &Rc<RefCell<Environment>>,
        distance: usize,
        name: &Token,
    ) -> Result<Value, RuntimeError> {
        let frame = Self::ancestor(env, distance, name)?;
        let frame = frame.borrow();

        match frame.values.get(&name.lexeme) {
            Some(Some(value)) => Ok(value.clone()),
            Some(None) => Err(uninitialized(name)),
            None => Err(undefined(name)),
        }
    }

    /// Write `name` into the frame exactly `distance` links up.
    pub fn assign_at(
        env: &Rc<RefCell<Environment>>,
        distance: usize,
        name: &Token,
        value: Value,
    ) -> Result<(), RuntimeError> {
        let frame = Self::ancestor(env, distance, name)?;
        frame
            .borrow_mut()
            .values
            .insert(name.lexeme.clone(), Some(value));

        Ok(())
    }

    fn ancestor(
        env: &Rc<RefCell<Environment>>,
        distance: usize,
        name: &Token,
    ) -> Result<Rc<RefCell<Environment>>, RuntimeError> {
        let mut frame = Rc::clone(env);

        for _ in 0..distance {
            let next = frame.borrow().enclosing.clone();

            frame = next.ok_or_else(|| {
                RuntimeError::new(
                    name,
                    format!("Scope chain too short to resolve '{}'.", name.lexeme),
                )
            })?;
        }

        Ok(frame)
    }
}

fn undefined(name: &Token) -> RuntimeError {
    RuntimeError::new(name, format!("Undefined variable '{}'.", name.lexeme))
}

fn uninitialized(name: &Token) -> RuntimeError {
    RuntimeError::new(name, format!("Uninitialized variable '{}'.", name.lexeme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenType;

    fn ident(name: &str) -> Token {
        Token::new(TokenType::IDENTIFIER, name, 1)
    }

    fn shared(env: Environment) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(env))
    }

    #[test]
    fn get_walks_the_chain() {
        let global = shared(Environment::new());
        global.borrow_mut().define("a", Some(Value::Number(1.0)));

        let inner = Environment::with_enclosing(Rc::clone(&global));

        assert_eq!(inner.get(&ident("a")), Ok(Value::Number(1.0)));
    }

    #[test]
    fn declared_but_unassigned_is_an_error() {
        let mut env = Environment::new();
        env.define("a", None);

        let err = env.get(&ident("a")).unwrap_err();
        assert!(err.message.contains("'a'"), "{}", err.message);

        env.assign(&ident("a"), Value::Nil).unwrap();
        assert_eq!(env.get(&ident("a")), Ok(Value::Nil));
    }

    #[test]
    fn assign_to_undeclared_fails() {
        let mut env = Environment::new();

        let err = env.assign(&ident("ghost"), Value::Bool(true)).unwrap_err();
        assert_eq!(err.message, "Undefined variable 'ghost'.");
    }

    #[test]
    fn get_at_uses_exact_frame() {
        let global = shared(Environment::new());
        global.borrow_mut().define("x", Some(Value::Number(1.0)));

        let middle = shared(Environment::with_enclosing(Rc::clone(&global)));
        middle.borrow_mut().define("x", Some(Value::Number(2.0)));

        let inner = shared(Environment::with_enclosing(Rc::clone(&middle)));

        assert_eq!(
            Environment::get_at(&inner, 1, &ident("x")),
            Ok(Value::Number(2.0))
        );
        assert_eq!(
            Environment::get_at(&inner, 2, &ident("x")),
            Ok(Value::Number(1.0))
        );
        // Distance 0 does not search upwards.
        assert!(Environment::get_at(&inner, 0, &ident("x")).is_err());

        Environment::assign_at(&inner, 2, &ident("x"), Value::Number(9.0)).unwrap();
        assert_eq!(
            global.borrow().get(&ident("x")),
            Ok(Value::Number(9.0))
        );
        assert_eq!(
            middle.borrow().get(&ident("x")),
            Ok(Value::Number(2.0))
        );
    }
}
