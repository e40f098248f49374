use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::prelude::Value;

/// Frames are shared between the call that created them and every closure
/// capturing them.
pub type Scope = Rc<RefCell<Environment>>;

/// Where `set` stored its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Existing,
    Created,
}

#[derive(Default, Debug)]
pub struct Environment {
    pub store: HashMap<String, Value>,
    pub parent: Option<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
            parent: None,
        }
    }

    pub fn root() -> Scope {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn child(parent: &Scope) -> Scope {
        Rc::new(RefCell::new(Self {
            store: HashMap::new(),
            parent: Some(parent.clone()),
        }))
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether this frame, ignoring its parents, binds `name`.
    pub fn defines(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    pub fn init(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self.parent
                .as_ref()
                .and_then(|parent| parent.borrow().get(name)),
        }
    }

    /// Overwrites the nearest binding of `name`, or creates it in this frame.
    pub fn set(&mut self, name: &str, value: Value) -> Binding {
        if let Some(slot) = self.store.get_mut(name) {
            *slot = value;
            return Binding::Existing;
        }

        let mut scope = self.parent.clone();
        while let Some(frame) = scope {
            let mut env = frame.borrow_mut();

            if let Some(slot) = env.store.get_mut(name) {
                *slot = value;
                return Binding::Existing;
            }

            scope = env.parent.clone();
        }

        self.store.insert(name.to_string(), value);

        Binding::Created
    }
}
