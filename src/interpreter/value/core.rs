use std::{fmt, rc::Rc};

use crate::{
    ast::{FunctionDef, LiteralValue},
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::host::{HostObject, HostTable, NativeFunction},
    },
    util::num::format_number,
};

/// A script function value.
///
/// Script functions do not capture the scope they were defined in. Invoking
/// one evaluates its body in a fresh root scope holding only its parameters.
#[derive(Debug)]
pub struct Closure {
    /// The definition the closure was created from.
    pub definition: Rc<FunctionDef>,
}

impl Closure {
    /// The declared name, or `anonymous`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.definition.name.as_deref().unwrap_or("anonymous")
    }
}

/// Represents a runtime value in the interpreter.
#[derive(Clone)]
pub enum Value {
    /// A double precision number.
    Number(f64),
    /// An immutable string.
    String(Rc<str>),
    /// `true` or `false`. Only `false` is falsy.
    Bool(bool),
    /// The absence of a value, e.g. the result of a host call that returns
    /// nothing.
    Undefined,
    /// A script function.
    Function(Rc<Closure>),
    /// A host-supplied callable.
    Native(NativeFunction),
    /// A host-supplied object.
    Object(Rc<dyn HostObject>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(Rc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(Rc::from(v))
    }
}

impl From<NativeFunction> for Value {
    fn from(v: NativeFunction) -> Self {
        Self::Native(v)
    }
}

impl From<HostTable> for Value {
    fn from(v: HostTable) -> Self {
        Self::Object(Rc::new(v))
    }
}

impl From<&LiteralValue> for Value {
    fn from(v: &LiteralValue) -> Self {
        match v {
            LiteralValue::Number(n) => Self::Number(*n),
            LiteralValue::String(s) => Self::from(s.as_str()),
            LiteralValue::Bool(b) => Self::Bool(*b),
        }
    }
}

impl Value {
    /// Returns the number, or a type error for any other value.
    ///
    /// ## Example
    /// ```
    /// use embedscript::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(2.0).as_number().unwrap(), 2.0);
    /// assert!(Value::Bool(true).as_number().is_err());
    /// ```
    pub fn as_number(&self) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(RuntimeError::ExpectedNumber { found: self.to_string() }),
        }
    }

    /// Returns `true` only for the boolean `false`.
    ///
    /// `false` is the single falsy value of the language: `0`, `""` and
    /// `undefined` are all truthy.
    #[must_use]
    pub const fn is_false(&self) -> bool {
        matches!(self, Self::Bool(false))
    }

    /// Exact equality without coercion.
    ///
    /// Primitives compare by value; functions and objects compare by
    /// identity.
    #[must_use]
    pub fn strict_equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Undefined, Self::Undefined) => true,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Native(a), Self::Native(b)) => a.ptr_eq(b),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Reads the member `name` of this value.
    ///
    /// Only host objects have members.
    pub fn member(&self, name: &str) -> EvalResult<Self> {
        let unknown = || RuntimeError::UnknownProperty { property: name.to_string(),
                                                         value:    self.to_string(), };
        match self {
            Self::Object(object) => object.member(name).ok_or_else(unknown),
            _ => Err(unknown()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::String(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Undefined => write!(f, "undefined"),
            Self::Function(closure) => write!(f, "[function {}]", closure.name()),
            Self::Native(native) => write!(f, "[native function {}]", native.name()),
            Self::Object(object) => write!(f, "[object {}]", object.type_name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "String({s:?})"),
            Self::Number(n) => write!(f, "Number({n})"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            _ => write!(f, "{self}"),
        }
    }
}
