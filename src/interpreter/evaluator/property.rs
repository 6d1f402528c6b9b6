use crate::{
    ast::Property,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator {
    /// Resolves a variable and walks its property chain.
    ///
    /// Each hop reads a member of the running value. A hop with arguments
    /// then invokes that member, passing the value the member was read from
    /// as the receiver, and the call's result becomes the running value. So
    /// in `embed.footer.icon("x")` the receiver of `icon` is `embed.footer`.
    ///
    /// # Parameters
    /// - `name`: The base variable.
    /// - `properties`: The hops, applied left to right.
    /// - `env`: Scope for the base lookup and for argument evaluation.
    pub(in crate::interpreter::evaluator) fn eval_variable(&mut self,
                                                           name: &str,
                                                           properties: &[Property],
                                                           env: &Environment)
                                                           -> EvalResult<Value> {
        let mut current = env.get(name)?;
        for property in properties {
            let member = current.member(&property.name)?;
            current = match &property.arguments {
                None => member,
                Some(arguments) => {
                    let arguments = self.eval_arguments(arguments, env)?;
                    self.invoke(&member, &current, arguments)?
                },
            };
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crate::{
        Environment, evaluate,
        error::RuntimeError,
        interpreter::value::{core::Value, host::HostTable},
        parse,
    };

    #[test]
    fn method_hops_receive_the_pre_hop_value() {
        let receivers = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&receivers);
        let footer = HostTable::new("footer").with_method("icon", move |receiver, args| {
                                                 sink.borrow_mut()
                                                     .push(format!("{receiver} {}", args[0]));
                                                 Ok(Value::Number(1.0))
                                             });
        let embed = HostTable::new("embed").with_value("footer", footer);

        let env = Environment::new();
        env.define("embed", embed, true);
        let result = evaluate(&parse("embed.footer.icon(\"x\")").unwrap(), &env).unwrap();

        assert_eq!(result, Value::Number(1.0));
        assert_eq!(*receivers.borrow(), vec!["[object footer] x".to_string()]);
    }

    #[test]
    fn missing_members_fail() {
        let env = Environment::new();
        env.define("embed", HostTable::new("embed"), true);
        let err = evaluate(&parse("embed.nope").unwrap(), &env).unwrap_err();
        assert_eq!(err,
                   RuntimeError::UnknownProperty { property: "nope".to_string(),
                                                   value:    "[object embed]".to_string(), });

        let err = evaluate(&parse("n = 1; n.x").unwrap(), &env).unwrap_err();
        assert_eq!(err.to_string(), "Cannot read property x of 1");
    }

    #[test]
    fn method_results_continue_the_chain() {
        let inner = HostTable::new("inner").with_value("value", 7.0);
        let outer = HostTable::new("outer").with_method("get", move |_, _| {
                                               Ok(Value::from(inner.clone()))
                                           });
        let env = Environment::new();
        env.define("outer", outer, true);
        let result = evaluate(&parse("outer.get().value").unwrap(), &env).unwrap();
        assert_eq!(result, Value::Number(7.0));
    }
}
