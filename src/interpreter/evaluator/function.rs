use std::rc::Rc;

use log::debug;

use crate::{
    ast::{Expr, FunctionDef},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Evaluator, Mode},
        value::core::{Closure, Value},
    },
};

impl Evaluator {
    /// Creates a closure from a function definition.
    ///
    /// In definition mode a named function binds itself in `env` (not as
    /// final) and yields `undefined`. Otherwise, and for anonymous functions,
    /// the closure itself is the result, so `f = function(x): x;` binds the
    /// value through the assignment instead.
    pub(in crate::interpreter::evaluator) fn eval_function(def: &Rc<FunctionDef>,
                                                           env: &Environment,
                                                           mode: Mode)
                                                           -> Value {
        let closure = Value::Function(Rc::new(Closure { definition: Rc::clone(def) }));
        match (&def.name, mode) {
            (Some(name), Mode::Definition) => {
                debug!("defining function {name}");
                env.define(name, closure, false);
                Value::Undefined
            },
            _ => closure,
        }
    }

    /// Evaluates `callee(arguments...)`.
    ///
    /// The callee is evaluated first, then each argument from left to right.
    /// Plain calls pass `undefined` as the receiver.
    pub(in crate::interpreter::evaluator) fn eval_call(&mut self,
                                                       callee: &Expr,
                                                       arguments: &[Expr],
                                                       env: &Environment)
                                                       -> EvalResult<Value> {
        let callee = self.eval_value(callee, env)?;
        let arguments = self.eval_arguments(arguments, env)?;
        self.invoke(&callee, &Value::Undefined, arguments)
    }

    /// Evaluates argument expressions from left to right.
    pub(in crate::interpreter::evaluator) fn eval_arguments(&mut self,
                                                            arguments: &[Expr],
                                                            env: &Environment)
                                                            -> EvalResult<Vec<Value>> {
        arguments.iter().map(|argument| self.eval_value(argument, env)).collect()
    }

    /// Invokes any callable value.
    ///
    /// Script functions ignore the receiver. Host functions and callable host
    /// objects receive it as their first argument.
    ///
    /// # Parameters
    /// - `callee`: The value being called.
    /// - `receiver`: The value a method was read from, or `undefined`.
    /// - `arguments`: Evaluated arguments.
    ///
    /// # Errors
    /// - `NotCallable` if `callee` is a number, string, boolean or
    ///   `undefined`, or a host object that does not accept calls.
    /// - Any error raised while running the callee.
    pub fn invoke(&mut self,
                  callee: &Value,
                  receiver: &Value,
                  arguments: Vec<Value>)
                  -> EvalResult<Value> {
        match callee {
            Value::Function(closure) => self.call_closure(closure, arguments),
            Value::Native(native) => {
                debug!("calling host function {} with {} arguments", native.name(), arguments.len());
                native.call(receiver, &arguments)
            },
            Value::Object(object) => {
                debug!("calling host object {} with {} arguments",
                       object.type_name(),
                       arguments.len());
                object.call(receiver, &arguments)
            },
            Value::Number(_) | Value::String(_) | Value::Bool(_) | Value::Undefined => {
                Err(RuntimeError::NotCallable { value: callee.to_string() })
            },
        }
    }

    /// Runs a script function.
    ///
    /// The body is evaluated in a new root scope that holds only the
    /// parameters, bound positionally. Nothing from the caller's scope is
    /// visible.
    ///
    /// # Errors
    /// Returns `ArgumentCountMismatch` if the number of arguments differs
    /// from the number of declared parameters.
    fn call_closure(&mut self, closure: &Closure, arguments: Vec<Value>) -> EvalResult<Value> {
        let def = &closure.definition;
        if arguments.len() != def.parameters.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name:     closure.name().to_string(),
                                                             expected: def.parameters.len(),
                                                             found:    arguments.len(), });
        }
        debug!("invoking function {} with {} arguments", closure.name(), arguments.len());

        let scope = Environment::new();
        for (parameter, argument) in def.parameters.iter().zip(arguments) {
            scope.define(parameter, argument, false);
        }
        self.eval_value(&def.body, &scope)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Environment, evaluate,
        error::{ErrorKind, RuntimeError},
        interpreter::value::core::Value,
        parse,
    };

    fn eval(source: &str) -> Result<Value, RuntimeError> {
        evaluate(&parse(source).unwrap(), &Environment::new())
    }

    #[test]
    fn named_functions_define_themselves() {
        assert_eq!(eval("function double(x): x * 2; double(4)").unwrap(), Value::Number(8.0));
        assert_eq!(eval("function f(): 1;").unwrap(), Value::Undefined);
    }

    #[test]
    fn assigned_functions_are_values() {
        assert_eq!(eval("add = function(a, b): a + b; add(1, 2);").unwrap(), Value::Number(3.0));
        assert_eq!(eval("g = function named(): 1; g()").unwrap(), Value::Number(1.0));
        let err = eval("g = function named(): 1; named()").unwrap_err();
        assert_eq!(err, RuntimeError::UndefinedVariable { name: "named".to_string() });
    }

    #[test]
    fn function_bodies_do_not_see_the_caller_scope() {
        let err = eval("outer = 1; f = function(): outer; f()").unwrap_err();
        assert_eq!(err, RuntimeError::UndefinedVariable { name: "outer".to_string() });
    }

    #[test]
    fn function_bodies_do_not_leak_bindings() {
        let env = Environment::new();
        evaluate(&parse("f = function(a): { b = a; b }; f(1)").unwrap(), &env).unwrap();
        assert!(env.get("b").is_err());
    }

    #[test]
    fn early_return_skips_the_rest_of_the_body() {
        let result = eval("function f(a,b,c): { return a + c; a + b; } f(8,4,1);");
        assert_eq!(result.unwrap(), Value::Number(9.0));
    }

    #[test]
    fn arity_is_checked() {
        let err = eval("function f(a): a; f(1, 2)").unwrap_err();
        assert_eq!(err,
                   RuntimeError::ArgumentCountMismatch { name:     "f".to_string(),
                                                         expected: 1,
                                                         found:    2, });
    }

    #[test]
    fn calling_a_non_function_fails() {
        let err = eval("a = 1; a()").unwrap_err();
        assert_eq!(err.to_string(), "1 is not a function");
        assert_eq!(err.kind(), ErrorKind::Dispatch);
    }

    #[test]
    fn runaway_recursion_hits_the_depth_limit() {
        let err = eval("function f(n): f(n + 1); f(0)").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resource);
    }
}
