use std::{cell::RefCell, collections::HashMap, io::Write, rc::Rc};

use crate::{
    ast::{Expression, FuncDef, Position, Program, StructDef, Type, VariantDef},
    error::RuntimeError,
    interpreter::value::Value,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Outcome of executing a statement.
///
/// A `return` statement does not produce its value in place. It raises the
/// `Return` flow, which travels upward through every enclosing block until
/// the owning function call resolves it into the call's result.
#[derive(Debug)]
pub enum Flow {
    /// Execution continues with the next statement.
    Normal,
    /// A `return` is in flight, carrying the returned value if any.
    Return(Option<Value>),
}

/// A declared variable: the annotated type plus the storage slot holding the
/// current value.
///
/// Slots are reference counted so that a by-reference parameter can alias the
/// caller's storage. Writes through either handle are visible through both.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Type the variable was declared with. Every later assignment is
    /// validated against it.
    pub declared: Type,
    /// Shared mutable storage for the current value.
    pub slot:     Rc<RefCell<Value>>,
}

impl Variable {
    /// Wraps a value in a fresh storage slot declared as `declared`.
    #[must_use]
    pub fn new(declared: Type, value: Value) -> Self {
        Self { declared,
               slot: Rc::new(RefCell::new(value)) }
    }
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the stack of lexical scopes plus
/// the registries of user-defined functions, structs and variants. Program
/// output is written to the sink supplied at construction.
///
/// ## Usage
///
/// `Context` is created once per run. `run()` executes a whole program; the
/// statement and expression methods access this state to resolve names and
/// enforce declared types.
pub struct Context<W> {
    pub scope_stack: Vec<HashMap<String, Variable>>,
    /// A mapping from function names to their [`FuncDef`] definitions.
    /// Populated when a function definition statement executes.
    pub functions:   HashMap<String, Rc<FuncDef>>,
    /// A mapping from struct names to their [`StructDef`] definitions.
    /// Shares a namespace with `variants`.
    pub structs:     HashMap<String, Rc<StructDef>>,
    /// A mapping from variant names to their [`VariantDef`] definitions.
    /// Shares a namespace with `structs`.
    pub variants:    HashMap<String, Rc<VariantDef>>,
    output:          W,
}

impl<W: Write> Context<W> {
    /// Creates a new evaluation context with a single empty global scope and
    /// no user-defined symbols. All `print` output is written to `output`.
    #[must_use]
    pub fn new(output: W) -> Self {
        Self { scope_stack: vec![HashMap::new()],
               functions:   HashMap::new(),
               structs:     HashMap::new(),
               variants:    HashMap::new(),
               output }
    }

    /// Executes every statement of a program in order.
    ///
    /// Definitions become visible the moment their defining statement
    /// executes, so a call can only reach functions defined above it. A
    /// `return` outside of any function stops the program quietly.
    ///
    /// # Errors
    /// Returns the first failure raised during execution: unknown symbols,
    /// type violations, arithmetic faults or a failed write to the output
    /// sink.
    ///
    /// # Example
    /// ```
    /// use strukta::interpreter::evaluator::core::Context;
    ///
    /// let program = strukta::parse("print 2 + 2 * 3;").unwrap();
    /// let mut output = Vec::new();
    ///
    /// Context::new(&mut output).run(&program).unwrap();
    ///
    /// assert_eq!(output, b"8\n");
    /// ```
    pub fn run(&mut self, program: &Program) -> EvalResult<()> {
        for statement in &program.statements {
            if let Flow::Return(_) = self.exec_statement(statement)? {
                break;
            }
        }
        Ok(())
    }

    /// Evaluates an expression and returns the resulting value, if any.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant: constants, variable access,
    /// struct initialization, unary and binary operations, conversions, type
    /// checks, field access and function calls.
    ///
    /// `None` is produced only by a call to a function declared `void`.
    pub fn eval_expression(&mut self, expr: &Expression) -> EvalResult<Option<Value>> {
        match expr {
            Expression::Constant { value, .. } => Ok(Some(Value::from(value))),
            Expression::Variable { name, position } => {
                self.eval_variable(name, *position).map(Some)
            },
            Expression::StructInit { values, .. } => self.eval_struct_init(values).map(Some),
            Expression::Binary { left,
                                 op,
                                 right,
                                 position, } => {
                self.eval_binary(left, *op, right, *position).map(Some)
            },
            Expression::Unary { op, expr, position } => {
                self.eval_unary(*op, expr, *position).map(Some)
            },
            Expression::Conversion { expr,
                                     target,
                                     position, } => {
                self.eval_conversion(expr, target, *position).map(Some)
            },
            Expression::TypeCheck { expr, target, .. } => {
                self.eval_type_check(expr, target).map(Some)
            },
            Expression::FieldAccess { base,
                                      field,
                                      position, } => {
                self.eval_field_access(base, field, *position).map(Some)
            },
            Expression::FunctionCall { name,
                                       arguments,
                                       position, } => {
                self.call_function(name, arguments, *position)
            },
        }
    }

    /// Evaluates a subexpression and ensures that it produces a value.
    ///
    /// Statement and operator logic almost always needs the same sequence:
    /// evaluate the expression, then report `MissingValue` at the
    /// expression's own position when it yields nothing. This helper
    /// centralizes that behavior.
    pub fn eval_value(&mut self, expr: &Expression) -> EvalResult<Value> {
        self.eval_expression(expr)?
            .ok_or(RuntimeError::MissingValue { position: expr.position() })
    }

    /// Evaluates a condition expression and requires it to be BOOL.
    pub(crate) fn eval_condition(&mut self, condition: &Expression) -> EvalResult<bool> {
        self.eval_value(condition)?.as_bool(condition.position())
    }

    fn eval_variable(&self, name: &str, position: Position) -> EvalResult<Value> {
        let variable =
            self.get_variable(name)
                .ok_or_else(|| RuntimeError::SymbolNotFound { kind: "Variable",
                                                              name: name.to_string(),
                                                              position })?;
        let value = variable.slot.borrow().clone();
        Ok(value)
    }

    /// Evaluates a struct initialization to an anonymous struct.
    ///
    /// The result carries the field values in written order and no bound
    /// definition. It stays anonymous until it is bound to a declared struct
    /// or variant type.
    fn eval_struct_init(&mut self, values: &[Expression]) -> EvalResult<Value> {
        let mut fields = Vec::with_capacity(values.len());
        for value in values {
            fields.push(self.eval_value(value)?);
        }
        Ok(Value::Struct(fields))
    }

    /// Writes one line of program output to the sink.
    pub(crate) fn write_line(&mut self, text: &str, position: Position) -> EvalResult<()> {
        if let Err(e) = writeln!(self.output, "{text}") {
            return Err(RuntimeError::PrintFailed { reason: e.to_string(),
                                                   position });
        }
        Ok(())
    }

    /// Adds a new innermost scope.
    pub fn push_scope(&mut self) {
        self.scope_stack.push(HashMap::new());
    }

    /// Removes the innermost scope.
    ///
    /// Called when leaving an `if` or `while` body.
    pub fn pop_scope(&mut self) {
        self.scope_stack.pop();
    }

    /// Retrieves a variable from the current scope stack.
    ///
    /// Lookup begins at the innermost scope and proceeds outward. Returns
    /// `None` if the name is not bound in any active scope.
    ///
    /// # Example
    /// ```
    /// use strukta::{ast::Type,
    ///               interpreter::{evaluator::core::{Context, Variable},
    ///                             value::Value}};
    ///
    /// let mut context = Context::new(Vec::new());
    /// context.define_local("x", Variable::new(Type::Int, Value::Int(5)));
    ///
    /// let variable = context.get_variable("x").unwrap();
    /// assert_eq!(*variable.slot.borrow(), Value::Int(5));
    /// ```
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Variable> {
        for scope in self.scope_stack.iter().rev() {
            if let Some(variable) = scope.get(name) {
                return Some(variable);
            }
        }
        None
    }

    /// Defines a variable in the current (innermost) scope.
    pub fn define_local(&mut self, name: &str, variable: Variable) {
        self.scope_stack
            .last_mut()
            .expect("at least global")
            .insert(name.to_string(), variable);
    }
}
