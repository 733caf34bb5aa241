use crate::object::Object;
use std::collections::HashMap;
use std::fmt::Display;
use std::rc::Rc;

/// Global name to value bindings of one evaluation session.
///
/// There is no nesting: the calculator has a single scope. Each session owns
/// its own environment, so independent sessions never share bindings.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Environment {
    store: HashMap<Rc<str>, Rc<Object>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            store: HashMap::new(),
        }
    }

    /// A fresh environment holding the native function library and the
    /// math constants.
    pub fn with_builtins() -> Self {
        let mut environment = Environment::new();
        crate::builtins::register_builtins(&mut environment);
        environment
    }

    pub fn get(&self, key: &str) -> Option<Rc<Object>> {
        self.store.get(key).cloned()
    }

    pub fn set(&mut self, key: Rc<str>, value: Rc<Object>) {
        self.store.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

/// One `name = value` line per binding, sorted by name.
impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut bindings: Vec<_> = self.store.iter().collect();
        bindings.sort_by(|(left, _), (right, _)| left.cmp(right));

        for (i, (name, value)) in bindings.into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} = {}", name, value)?;
        }
        Ok(())
    }
}
