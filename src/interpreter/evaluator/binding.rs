use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::evaluator::{
        core::{Context, EvalResult},
        symbol_table::SymbolKey,
    },
};

impl Context {
    /// Resolves every name in `expr` against the symbol table.
    ///
    /// A variable reference must name one of `params` or an existing
    /// variable. A call must match an existing function by name and arity, or
    /// the function being defined (`defining`), which allows recursion.
    ///
    /// Nodes are checked in source order, so the leftmost unresolved name is
    /// reported.
    ///
    /// # Errors
    /// - `UnknownVariable` for an unresolved variable reference.
    /// - `UnknownFunction` for a call to an unknown name.
    /// - `ArgumentCountMismatch` for a known function name called with an
    ///   arity it is not defined for.
    pub(crate) fn bind(&self,
                       expr: &Expr,
                       params: &[String],
                       defining: Option<&SymbolKey>)
                       -> EvalResult<()> {
        match expr {
            Expr::Number { .. } => Ok(()),
            Expr::Variable { name, offset } => {
                if params.contains(name) || self.symbols.contains(&SymbolKey::variable(name)) {
                    Ok(())
                } else {
                    Err(RuntimeError::UnknownVariable { name:   name.clone(),
                                                        offset: *offset, })
                }
            },
            Expr::FunctionCall { name,
                                 arguments,
                                 offset, } => {
                let key = SymbolKey::function(name, arguments.len());
                if !self.symbols.contains(&key) && defining != Some(&key) {
                    return Err(self.unresolved_call(name, arguments.len(), *offset, defining));
                }
                arguments.iter()
                         .try_for_each(|argument| self.bind(argument, params, defining))
            },
            Expr::UnaryOp { expr, .. } => self.bind(expr, params, defining),
            Expr::BinaryOp { left, right, .. } => {
                self.bind(left, params, defining)?;
                self.bind(right, params, defining)
            },
            Expr::Conditional { condition,
                                then_branch,
                                else_branch,
                                .. } => {
                self.bind(condition, params, defining)?;
                self.bind(then_branch, params, defining)?;
                self.bind(else_branch, params, defining)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::Statement, interpreter::parser::parse_source};

    fn expression(source: &str) -> Expr {
        let Ok(Statement::Expression(expr)) = parse_source(source) else {
            panic!("'{source}' is not an expression");
        };
        expr
    }

    #[test]
    fn builtins_resolve() {
        let context = Context::new();
        assert_eq!(context.bind(&expression("sin(PI) + max(1, E)"), &[], None), Ok(()));
    }

    #[test]
    fn parameters_resolve_only_inside_their_function() {
        let context = Context::new();
        let body = expression("a * b");
        let params = ["a".to_string(), "b".to_string()];
        assert_eq!(context.bind(&body, &params, None), Ok(()));
        assert_eq!(context.bind(&body, &[], None),
                   Err(RuntimeError::UnknownVariable { name:   "a".to_string(),
                                                       offset: 0, }));
    }

    #[test]
    fn the_function_being_defined_may_call_itself() {
        let context = Context::new();
        let body = expression("if(n <= 0, 1, n * fact(n - 1))");
        let params = ["n".to_string()];
        let key = SymbolKey::function("fact", 1);
        assert_eq!(context.bind(&body, &params, Some(&key)), Ok(()));
        assert_eq!(context.bind(&body, &params, None),
                   Err(RuntimeError::UnknownFunction { name:   "fact".to_string(),
                                                       offset: 18, }));
    }

    #[test]
    fn leftmost_failure_is_reported() {
        let context = Context::new();
        assert_eq!(context.bind(&expression("sin(1, 2) + y"), &[], None),
                   Err(RuntimeError::ArgumentCountMismatch { name:     "sin".to_string(),
                                                             expected: "1".to_string(),
                                                             found:    2,
                                                             offset:   0, }));
        assert_eq!(context.bind(&expression("1 + y + sin(1, 2)"), &[], None),
                   Err(RuntimeError::UnknownVariable { name:   "y".to_string(),
                                                       offset: 4, }));
    }

    #[test]
    fn malformed_conditionals_are_arity_errors() {
        let context = Context::new();
        assert_eq!(context.bind(&expression("if(1, 2)"), &[], None),
                   Err(RuntimeError::ArgumentCountMismatch { name:     "if".to_string(),
                                                             expected: "3".to_string(),
                                                             found:    2,
                                                             offset:   0, }));
    }
}
