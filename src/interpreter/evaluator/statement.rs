use crate::{
    ast::{AssignmentTarget, Expr, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            symbol_table::{Identifier, SymbolKey},
        },
        parser::CONDITIONAL_KEYWORD,
    },
};

impl Context {
    /// Evaluates a single statement.
    ///
    /// An expression is bound and evaluated, and its value returned. A
    /// definition installs a new identifier in the symbol table and produces
    /// no value; its body is not evaluated.
    ///
    /// The symbol table is only modified once the statement has succeeded:
    /// a failing statement leaves the definitions as they were, including the
    /// lazy variables it happened to evaluate.
    ///
    /// # Example
    /// ```
    /// use numera::interpreter::{evaluator::core::Context, parser::parse_source};
    ///
    /// let mut context = Context::new();
    /// let define = parse_source("square(x) = x * x").unwrap();
    /// let call = parse_source("square(3)").unwrap();
    ///
    /// assert_eq!(context.eval_statement(&define).unwrap(), None);
    /// assert_eq!(context.eval_statement(&call).unwrap(), Some(9.0));
    /// ```
    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<Option<f64>> {
        let result = match statement {
            Statement::Expression(expr) => {
                self.bind(expr, &[], None)
                    .and_then(|()| self.eval(expr, None).map(Some))
            },
            Statement::Assignment { target,
                                    value,
                                    offset, } => self.define(target, value, *offset).map(|()| None),
        };
        self.settle(result.is_ok());
        result
    }

    /// Installs a definition.
    ///
    /// In a variable definition, references to the variable itself stand for
    /// its current value, so `x = x + 1` increments `x`. A function body may
    /// reference its parameters, existing variables and any existing
    /// function, including itself.
    fn define(&mut self, target: &AssignmentTarget, body: &Expr, offset: usize) -> EvalResult<()> {
        self.ensure_definable(target, offset)?;

        let identifier = match target {
            AssignmentTarget::Variable { name } => {
                let mut body = body.clone();
                if body.references_variable(name)
                   && self.symbols.contains(&SymbolKey::variable(name))
                {
                    let current = self.eval_variable(name, offset, None)?;
                    body.substitute(name, current);
                }
                self.bind(&body, &[], None)?;
                Identifier::variable(name.clone(), body)
            },
            AssignmentTarget::Function { name, params } => {
                let key = SymbolKey::function(name, params.len());
                self.bind(body, params, Some(&key))?;
                Identifier::function(name.clone(), params.clone(), body.clone())
            },
        };

        // Cached values belong to the entries they were read from, which the
        // definition may replace.
        self.settle(true);
        self.symbols.add(identifier);
        Ok(())
    }

    /// Rejects definitions that would replace a built-in or the reserved
    /// conditional keyword.
    fn ensure_definable(&self, target: &AssignmentTarget, offset: usize) -> EvalResult<()> {
        let key = match target {
            AssignmentTarget::Variable { name } => SymbolKey::variable(name),
            AssignmentTarget::Function { name, params } => SymbolKey::function(name, params.len()),
        };

        if key.name == CONDITIONAL_KEYWORD
           || self.symbols.get(&key).is_some_and(Identifier::is_builtin)
        {
            return Err(RuntimeError::BuiltinRedefinition { name: key.name,
                                                           offset });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::parser::parse_source;

    fn run(context: &mut Context, source: &str) -> EvalResult<Option<f64>> {
        let statement = parse_source(source).unwrap_or_else(|e| panic!("{source}: {e}"));
        context.eval_statement(&statement)
    }

    #[test]
    fn definitions_are_lazy() {
        let mut context = Context::new();
        assert_eq!(run(&mut context, "broken = 1 / 0"), Ok(None));
        assert_eq!(run(&mut context, "broken"),
                   Err(RuntimeError::DivisionByZero { offset: 11 }));
    }

    #[test]
    fn lazy_variables_are_cached_on_first_read() {
        let mut context = Context::new();
        run(&mut context, "a = 2").unwrap();
        run(&mut context, "b = a * 10").unwrap();
        assert_eq!(run(&mut context, "b"), Ok(Some(20.0)));
        run(&mut context, "a = 3").unwrap();
        assert_eq!(run(&mut context, "b"), Ok(Some(20.0)));
    }

    #[test]
    fn self_reference_uses_the_previous_value() {
        let mut context = Context::new();
        run(&mut context, "x = 5").unwrap();
        run(&mut context, "x = x + 1").unwrap();
        run(&mut context, "x = x * x").unwrap();
        assert_eq!(run(&mut context, "x"), Ok(Some(36.0)));
        assert_eq!(run(&mut context, "fresh = fresh + 1"),
                   Err(RuntimeError::UnknownVariable { name:   "fresh".to_string(),
                                                       offset: 8, }));
    }

    #[test]
    fn builtins_and_the_conditional_keyword_are_protected() {
        let mut context = Context::new();
        assert_eq!(run(&mut context, "PI = 1"),
                   Err(RuntimeError::BuiltinRedefinition { name:   "PI".to_string(),
                                                           offset: 3, }));
        assert_eq!(run(&mut context, "sin(x) = x"),
                   Err(RuntimeError::BuiltinRedefinition { name:   "sin".to_string(),
                                                           offset: 7, }));
        assert!(matches!(run(&mut context, "if(a, b, c) = a"),
                         Err(RuntimeError::BuiltinRedefinition { .. })));
        // A different key does not collide.
        assert_eq!(run(&mut context, "sin(x, y) = x + y"), Ok(None));
        assert_eq!(run(&mut context, "sin(1, 2)"), Ok(Some(3.0)));
    }

    #[test]
    fn failed_definitions_leave_the_table_untouched() {
        let mut context = Context::new();
        run(&mut context, "f(a) = a + 1").unwrap();
        let before = context.symbols.len();
        assert!(run(&mut context, "f(a) = a + undefined_name").is_err());
        assert_eq!(context.symbols.len(), before);
        assert_eq!(run(&mut context, "f(1)"), Ok(Some(2.0)));
    }

    #[test]
    fn failed_lines_do_not_cache_lazy_values() {
        let mut context = Context::new();
        run(&mut context, "b = 5").unwrap();
        run(&mut context, "x = b * 2").unwrap();
        assert_eq!(run(&mut context, "x + 1 / 0"),
                   Err(RuntimeError::DivisionByZero { offset: 6 }));
        run(&mut context, "b = 7").unwrap();
        assert_eq!(run(&mut context, "x"), Ok(Some(14.0)));
        run(&mut context, "b = 9").unwrap();
        assert_eq!(run(&mut context, "x"), Ok(Some(14.0)));
    }

    #[test]
    fn redefining_a_lazy_variable_from_itself() {
        let mut context = Context::new();
        run(&mut context, "a = 2").unwrap();
        run(&mut context, "x = a * 10").unwrap();
        run(&mut context, "x = x + 1").unwrap();
        run(&mut context, "a = 100").unwrap();
        assert_eq!(run(&mut context, "x"), Ok(Some(21.0)));
    }

    #[test]
    fn recursive_functions() {
        let mut context = Context::new();
        run(&mut context, "fact(n) = if(n <= 1, 1, n * fact(n - 1))").unwrap();
        assert_eq!(run(&mut context, "fact(10)"), Ok(Some(3_628_800.0)));
    }
}
