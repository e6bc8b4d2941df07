use std::{io::Write, rc::Rc};

use crate::{
    ast::{Expression, FuncDef, Position, Statement, StructDef, Type, VariantDef},
    error::RuntimeError,
    interpreter::evaluator::core::{Context, EvalResult, Flow, Variable},
};

impl<W: Write> Context<W> {
    /// Executes a single statement.
    ///
    /// Handles control flow, output, definitions of variables, functions,
    /// structs and variants, assignments and bare calls. Statements execute
    /// for their side effects; the returned [`Flow`] tells the caller whether
    /// a `return` is in flight.
    pub fn exec_statement(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::If { condition, body, .. } => self.exec_if(condition, body),
            Statement::While { condition, body, .. } => self.exec_while(condition, body),
            Statement::Return { value, .. } => self.exec_return(value.as_ref()),
            Statement::Print { value, position } => {
                self.exec_print(value.as_ref(), *position)?;
                Ok(Flow::Normal)
            },
            Statement::FunctionDef(def) => {
                self.register_function(def)?;
                Ok(Flow::Normal)
            },
            Statement::Assignment { target,
                                    value,
                                    position, } => {
                let value = self.eval_value(value)?;
                self.assign_lvalue(target, value, *position)?;
                Ok(Flow::Normal)
            },
            Statement::VarDef { declared_type,
                                name,
                                value,
                                position,
                                .. } => {
                self.exec_var_def(declared_type, name, value, *position)?;
                Ok(Flow::Normal)
            },
            Statement::FunctionCall { name,
                                      arguments,
                                      position, } => {
                self.call_function(name, arguments, *position)?;
                Ok(Flow::Normal)
            },
            Statement::StructDef(def) => {
                self.register_struct(def)?;
                Ok(Flow::Normal)
            },
            Statement::VariantDef(def) => {
                self.register_variant(def)?;
                Ok(Flow::Normal)
            },
        }
    }

    /// Executes a statement list inside a fresh scope.
    ///
    /// The scope is popped on every exit path, including errors.
    pub fn exec_block(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        self.push_scope();
        let flow = self.exec_statements(statements);
        self.pop_scope();
        flow
    }

    /// Executes statements in order until one raises the `Return` flow.
    pub(crate) fn exec_statements(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        for statement in statements {
            if let flow @ Flow::Return(_) = self.exec_statement(statement)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_if(&mut self, condition: &Expression, body: &[Statement]) -> EvalResult<Flow> {
        if self.eval_condition(condition)? {
            return self.exec_block(body);
        }
        Ok(Flow::Normal)
    }

    /// Re-evaluates the condition before every iteration and stops as soon
    /// as it is `false`. A `return` inside the body stops the loop
    /// immediately.
    fn exec_while(&mut self, condition: &Expression, body: &[Statement]) -> EvalResult<Flow> {
        while self.eval_condition(condition)? {
            if let flow @ Flow::Return(_) = self.exec_block(body)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_return(&mut self, value: Option<&Expression>) -> EvalResult<Flow> {
        let result = match value {
            Some(expr) => Some(self.eval_value(expr)?),
            None => None,
        };
        Ok(Flow::Return(result))
    }

    /// Prints the value of the optional expression followed by a newline.
    /// With no expression only the newline is written.
    fn exec_print(&mut self, value: Option<&Expression>, position: Position) -> EvalResult<()> {
        let text = match value {
            Some(expr) => self.eval_value(expr)?.to_string(),
            None => String::new(),
        };
        self.write_line(&text, position)
    }

    /// Defines a new variable in the innermost scope.
    ///
    /// The initializer is bound to the declared type first, so an anonymous
    /// struct becomes a named struct and a variant member value is wrapped
    /// into its variant here.
    fn exec_var_def(&mut self,
                    declared_type: &Type,
                    name: &str,
                    value: &Expression,
                    position: Position)
                    -> EvalResult<()> {
        if self.scope_stack
               .last()
               .expect("at least global")
               .contains_key(name)
        {
            return Err(RuntimeError::Redefinition { kind: "variable",
                                                    name: name.to_string(),
                                                    position });
        }

        let value = self.eval_value(value)?;
        let bound = self.bind_value(value, declared_type, position)?;
        self.define_local(name, Variable::new(declared_type.clone(), bound));
        Ok(())
    }

    /// Registers a user-defined function.
    ///
    /// Functions live in their own namespace, separate from type names.
    fn register_function(&mut self, def: &FuncDef) -> EvalResult<()> {
        if self.functions.contains_key(&def.name) {
            return Err(RuntimeError::Redefinition { kind:     "function",
                                                    name:     def.name.clone(),
                                                    position: def.position, });
        }
        self.functions.insert(def.name.clone(), Rc::new(def.clone()));
        Ok(())
    }

    /// Registers a struct definition.
    fn register_struct(&mut self, def: &StructDef) -> EvalResult<()> {
        self.check_type_name(&def.name, "struct", def.position)?;
        self.structs.insert(def.name.clone(), Rc::new(def.clone()));
        Ok(())
    }

    /// Registers a variant definition.
    fn register_variant(&mut self, def: &VariantDef) -> EvalResult<()> {
        self.check_type_name(&def.name, "variant", def.position)?;
        self.variants.insert(def.name.clone(), Rc::new(def.clone()));
        Ok(())
    }

    /// Struct and variant names share one namespace.
    fn check_type_name(&self,
                       name: &str,
                       kind: &'static str,
                       position: Position)
                       -> EvalResult<()> {
        if self.structs.contains_key(name) || self.variants.contains_key(name) {
            return Err(RuntimeError::Redefinition { kind,
                                                    name: name.to_string(),
                                                    position });
        }
        Ok(())
    }
}
