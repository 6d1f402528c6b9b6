use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use log::trace;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

#[derive(Debug, Clone)]
struct Binding {
    value:    Value,
    is_final: bool,
}

#[derive(Default)]
struct Scope {
    variables: RefCell<HashMap<String, Binding>>,
    parent:    Option<Environment>,
}

/// A handle to one scope in a parent-linked chain of scopes.
///
/// Cloning the handle does not copy the scope; both handles refer to the same
/// variables. Name resolution walks from this scope towards the root and stops
/// at the first scope that owns the name.
///
/// ## Example
/// ```
/// use embedscript::{Environment, interpreter::value::core::Value};
///
/// let root = Environment::new();
/// root.define("greeting", "hi", false);
///
/// let child = root.extend();
/// assert_eq!(child.get("greeting").unwrap(), Value::from("hi"));
/// assert!(child.set("missing", Value::Number(1.0)).is_err());
/// ```
#[derive(Clone, Default)]
pub struct Environment {
    scope: Rc<Scope>,
}

impl Environment {
    /// Creates a root scope with no parent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a child scope whose parent is `self`.
    #[must_use]
    pub fn extend(&self) -> Self {
        Self { scope: Rc::new(Scope { variables: RefCell::default(),
                                      parent:    Some(self.clone()), }), }
    }

    /// Returns `true` if this scope has no parent.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.scope.parent.is_none()
    }

    /// Returns `true` if both handles refer to the same scope.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.scope, &other.scope)
    }

    fn owns(&self, name: &str) -> bool {
        self.scope.variables.borrow().contains_key(name)
    }

    /// Finds the nearest scope, starting with `self`, that owns `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Self> {
        let mut current = Some(self);
        while let Some(env) = current {
            if env.owns(name) {
                return Some(env.clone());
            }
            current = env.scope.parent.as_ref();
        }
        None
    }

    /// Reads `name` from the nearest scope that owns it.
    ///
    /// # Errors
    /// Returns `UndefinedVariable` if no scope in the chain owns `name`.
    pub fn get(&self, name: &str) -> EvalResult<Value> {
        let undefined = || RuntimeError::UndefinedVariable { name: name.to_string() };
        let owner = self.lookup(name).ok_or_else(undefined)?;
        let variables = owner.scope.variables.borrow();
        variables.get(name).map(|b| b.value.clone()).ok_or_else(undefined)
    }

    /// Overwrites `name` in the nearest scope that owns it.
    ///
    /// When no scope owns the name, the variable is created in `self` only if
    /// `self` is a root scope.
    ///
    /// # Errors
    /// - `ConstantAssignment` if the owning binding was defined as final.
    /// - `UndefinedVariable` if no scope owns `name` and `self` has a parent.
    pub fn set(&self, name: &str, value: Value) -> EvalResult<Value> {
        let owner = match self.lookup(name) {
            Some(owner) => owner,
            None if self.is_root() => self.clone(),
            None => return Err(RuntimeError::UndefinedVariable { name: name.to_string() }),
        };

        let mut variables = owner.scope.variables.borrow_mut();
        match variables.get_mut(name) {
            Some(binding) if binding.is_final => {
                Err(RuntimeError::ConstantAssignment { name: name.to_string() })
            },
            Some(binding) => {
                trace!("set {name} = {value}");
                binding.value = value.clone();
                Ok(value)
            },
            None => {
                trace!("set {name} = {value} (new root binding)");
                variables.insert(name.to_string(),
                                 Binding { value:    value.clone(),
                                           is_final: false, });
                Ok(value)
            },
        }
    }

    /// Installs `value` under `name` in this scope, replacing any binding of
    /// the same name in this scope, constant or not.
    pub fn define(&self, name: &str, value: impl Into<Value>, is_final: bool) -> Value {
        let value = value.into();
        trace!("define {name} = {value} (final: {is_final})");
        self.scope
            .variables
            .borrow_mut()
            .insert(name.to_string(),
                    Binding { value: value.clone(),
                              is_final });
        value
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variables = self.scope.variables.borrow();
        let mut names = variables.keys().collect::<Vec<_>>();
        names.sort();
        f.debug_struct("Environment")
         .field("variables", &names)
         .field("parent", &self.scope.parent)
         .finish()
    }
}
