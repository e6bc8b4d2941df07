use std::{collections::HashMap, io::Write, rc::Rc};

use crate::{
    ast::{Argument, Expression, FuncDef, Parameter, Position, ReturnType},
    error::RuntimeError,
    interpreter::{evaluator::core::{Context, EvalResult, Flow, Variable},
                  value::Value},
};

impl<W: Write> Context<W> {
    /// Evaluates a function call.
    ///
    /// Arguments bind to parameters left to right: a by-value parameter
    /// receives a copy validated against its declared type, a by-reference
    /// parameter aliases the caller's variable. The body then runs on a
    /// fresh scope stack, so the callee sees its parameters and the global
    /// definition registries but never the caller's variables.
    ///
    /// # Returns
    /// The value produced by the function, or `None` for a `void` function.
    pub(crate) fn call_function(&mut self,
                                name: &str,
                                arguments: &[Argument],
                                position: Position)
                                -> EvalResult<Option<Value>> {
        let Some(def) = self.functions.get(name).cloned() else {
            return Err(RuntimeError::SymbolNotFound { kind: "Function",
                                                      name: name.to_string(),
                                                      position });
        };

        if arguments.len() != def.parameters.len() {
            return Err(RuntimeError::ArgumentCountMismatch { expected: def.parameters.len(),
                                                             actual:   arguments.len(),
                                                             position, });
        }

        let mut scope = HashMap::new();
        for (parameter, argument) in def.parameters.iter().zip(arguments) {
            let variable = self.bind_argument(parameter, argument)?;
            scope.insert(parameter.name.clone(), variable);
        }

        let saved = std::mem::replace(&mut self.scope_stack, vec![scope]);
        let flow = self.exec_statements(&def.body);
        self.scope_stack = saved;

        self.resolve_return(&def, flow?, position)
    }

    /// Binds one argument to a parameter and produces the callee's variable.
    fn bind_argument(&mut self,
                     parameter: &Parameter,
                     argument: &Argument)
                     -> EvalResult<Variable> {
        if parameter.by_ref {
            return self.bind_ref_argument(parameter, argument);
        }

        let value = self.eval_value(&argument.value)?;
        let bound = self.bind_value(value, &parameter.declared_type, argument.value.position())?;
        Ok(Variable::new(parameter.declared_type.clone(), bound))
    }

    /// A by-reference parameter requires a plain variable argument declared
    /// with the parameter's exact type; the callee shares its storage slot,
    /// so writes through the parameter land in the caller's variable.
    fn bind_ref_argument(&self,
                         parameter: &Parameter,
                         argument: &Argument)
                         -> EvalResult<Variable> {
        let Expression::Variable { name, position } = &argument.value else {
            return Err(RuntimeError::InvalidRefArgument { param:    parameter.name.clone(),
                                                          position: argument.value.position(), });
        };

        let variable =
            self.get_variable(name)
                .ok_or_else(|| RuntimeError::SymbolNotFound { kind: "Variable",
                                                              name: name.clone(),
                                                              position: *position })?;

        if variable.declared != parameter.declared_type {
            return Err(RuntimeError::TypeMismatch { expected: parameter.declared_type
                                                                       .to_string(),
                                                    actual:   variable.declared.to_string(),
                                                    position: *position, });
        }

        Ok(Variable { declared: parameter.declared_type.clone(),
                      slot:     Rc::clone(&variable.slot), })
    }

    /// Resolves the call's flow into the call's result.
    ///
    /// The produced value must match the declared return type; an anonymous
    /// struct returned from a struct-typed function binds to that struct.
    /// Falling off the end of the body and a bare `return` both count as
    /// VOID.
    fn resolve_return(&self,
                      def: &FuncDef,
                      flow: Flow,
                      position: Position)
                      -> EvalResult<Option<Value>> {
        let value = match flow {
            Flow::Return(value) => value,
            Flow::Normal => None,
        };

        match (&def.return_type, value) {
            (ReturnType::Void, None) => Ok(None),
            (ReturnType::Void, Some(value)) => {
                Err(RuntimeError::ReturnTypeMismatch { expected: ReturnType::Void.to_string(),
                                                       actual:   value.describe(),
                                                       position, })
            },
            (ReturnType::Value(declared), Some(value)) => {
                match self.bind_value(value.clone(), declared, position) {
                    Ok(bound) => Ok(Some(bound)),
                    Err(_) => {
                        Err(RuntimeError::ReturnTypeMismatch { expected: declared.to_string(),
                                                               actual:   value.describe(),
                                                               position, })
                    },
                }
            },
            (ReturnType::Value(declared), None) => {
                Err(RuntimeError::ReturnTypeMismatch { expected: declared.to_string(),
                                                       actual:   ReturnType::Void.to_string(),
                                                       position, })
            },
        }
    }
}
