use std::{collections::HashMap, fmt, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Signature of a host callable.
///
/// The first argument is the receiver: the value a method was read from, or
/// `Value::Undefined` for a plain call.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> EvalResult<Value>;

/// A callable supplied by the host application.
#[derive(Clone)]
pub struct NativeFunction {
    name: Rc<str>,
    func: Rc<NativeFn>,
}

impl NativeFunction {
    /// Wraps a closure as a script-callable value.
    ///
    /// ## Example
    /// ```
    /// use embedscript::interpreter::value::{core::Value, host::NativeFunction};
    ///
    /// let double = NativeFunction::new("double", |_, args| {
    ///     Ok(Value::Number(args[0].as_number()? * 2.0))
    /// });
    /// let result = double.call(&Value::Undefined, &[Value::Number(4.0)]).unwrap();
    /// assert_eq!(result, Value::Number(8.0));
    /// ```
    pub fn new(name: &str, func: impl Fn(&Value, &[Value]) -> EvalResult<Value> + 'static) -> Self {
        Self { name: Rc::from(name),
               func: Rc::new(func), }
    }

    /// The name the function was registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the function.
    pub fn call(&self, receiver: &Value, arguments: &[Value]) -> EvalResult<Value> {
        (self.func)(receiver, arguments)
    }

    /// Returns `true` if both handles refer to the same function.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction").field("name", &self.name).finish_non_exhaustive()
    }
}

/// An opaque object exposed to scripts by the host.
///
/// Scripts can only read members by name and invoke the object itself. A
/// method call such as `content.set("x")` reads the member `set` and invokes
/// it with `content` as the receiver.
pub trait HostObject {
    /// A short name used when the object is displayed.
    fn type_name(&self) -> &str;

    /// Returns the member `name`, or `None` if the object has no such member.
    fn member(&self, name: &str) -> Option<Value>;

    /// Invokes the object as a function.
    ///
    /// Objects are not callable unless they override this.
    fn call(&self, receiver: &Value, arguments: &[Value]) -> EvalResult<Value> {
        let _ = (receiver, arguments);
        Err(RuntimeError::NotCallable { value: format!("[object {}]", self.type_name()) })
    }
}

/// A host object backed by a table of registered members.
///
/// Tables can optionally be callable themselves, which lets a host expose a
/// value that is both a function and a namespace (`embed()` as well as
/// `embed.title("...")`).
///
/// ## Example
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use embedscript::{
///     Environment, evaluate,
///     interpreter::value::{core::Value, host::HostTable},
///     parse,
/// };
///
/// let lines = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&lines);
/// let content = HostTable::new("content").with_method("addln", move |_, args| {
///                                            sink.borrow_mut().push(args[0].to_string());
///                                            Ok(Value::Undefined)
///                                        });
///
/// let env = Environment::new();
/// env.define("content", content, true);
/// evaluate(&parse(r#"content.addln("hello")"#).unwrap(), &env).unwrap();
/// assert_eq!(*lines.borrow(), vec!["hello".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct HostTable {
    name:    String,
    members: HashMap<String, Value>,
    call:    Option<NativeFunction>,
}

impl HostTable {
    /// Creates an empty, non-callable table.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self { name:    name.to_string(),
               members: HashMap::new(),
               call:    None, }
    }

    /// Registers a method under `name`.
    #[must_use]
    pub fn with_method(mut self,
                       name: &str,
                       func: impl Fn(&Value, &[Value]) -> EvalResult<Value> + 'static)
                       -> Self {
        self.members
            .insert(name.to_string(), Value::Native(NativeFunction::new(name, func)));
        self
    }

    /// Registers an arbitrary value under `name`, e.g. a nested table.
    #[must_use]
    pub fn with_value(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.members.insert(name.to_string(), value.into());
        self
    }

    /// Makes the table itself callable.
    #[must_use]
    pub fn with_call(mut self,
                     func: impl Fn(&Value, &[Value]) -> EvalResult<Value> + 'static)
                     -> Self {
        self.call = Some(NativeFunction::new(&self.name, func));
        self
    }
}

impl HostObject for HostTable {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn member(&self, name: &str) -> Option<Value> {
        self.members.get(name).cloned()
    }

    fn call(&self, receiver: &Value, arguments: &[Value]) -> EvalResult<Value> {
        match &self.call {
            Some(func) => func.call(receiver, arguments),
            None => Err(RuntimeError::NotCallable { value: format!("[object {}]", self.name) }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_expose_registered_members() {
        let table = HostTable::new("embed").with_value("color", "RED")
                                           .with_method("title", |_, _| Ok(Value::Bool(true)));
        assert_eq!(table.member("color"), Some(Value::from("RED")));
        assert!(matches!(table.member("title"), Some(Value::Native(_))));
        assert_eq!(table.member("missing"), None);
    }

    #[test]
    fn tables_are_not_callable_by_default() {
        let table = HostTable::new("content");
        let err = table.call(&Value::Undefined, &[]).unwrap_err();
        assert_eq!(err.to_string(), "[object content] is not a function");
    }

    #[test]
    fn callable_tables_receive_arguments() {
        let table = HostTable::new("embed").with_call(|_, args| Ok(Value::Number(args.len() as f64)));
        let result = table.call(&Value::Undefined, &[Value::Bool(true), Value::Undefined]);
        assert_eq!(result.unwrap(), Value::Number(2.0));
    }
}
