use std::f64::consts::{E, PI, TAU};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Bindings, Context, EvalResult},
            function::builtin,
            symbol_table::{Closure, IdentifierKind, SymbolKey},
        },
        parser::CONDITIONAL_KEYWORD,
        value::core::NativeValue,
    },
};

/// Signature of a native function.
///
/// A native receives its evaluated arguments, exactly as many as it declares
/// parameters, and answers with a number or a boolean.
pub type NativeFn = fn(&[f64]) -> NativeValue;

/// Descriptor of a built-in function: its name, its parameter names and the
/// function pointer implementing it.
#[derive(Debug, Clone, Copy)]
pub struct NativeFunction {
    /// The name the function is called by.
    pub name:   &'static str,
    /// The parameter names; their count is the arity.
    pub params: &'static [&'static str],
    /// The implementation.
    pub invoke: NativeFn,
}

/// Descriptor of a built-in constant.
#[derive(Debug, Clone, Copy)]
pub struct NativeConstant {
    /// The name the constant is referenced by.
    pub name:  &'static str,
    /// Its value.
    pub value: f64,
}

/// The golden ratio.
const PHI: f64 = 1.618_033_988_749_895;

/// Defines the built-in functions by generating their registration table.
///
/// Each entry provides:
/// - a string name,
/// - the parameter names, which also fix the arity,
/// - a function pointer implementing the builtin.
macro_rules! builtin_functions {
    (
        $(
            $name:literal ( $($param:ident),* ) => $func:path
        ),* $(,)?
    ) => {
        /// Every built-in function, in registration order.
        pub static BUILTIN_FUNCTIONS: &[NativeFunction] = &[
            $(
                NativeFunction { name:   $name,
                                 params: &[$(stringify!($param)),*],
                                 invoke: $func },
            )*
        ];
    };
}

builtin_functions! {
    "sin"        (x)             => builtin::sin,
    "cos"        (x)             => builtin::cos,
    "tan"        (x)             => builtin::tan,
    "asin"       (x)             => builtin::asin,
    "acos"       (x)             => builtin::acos,
    "atan"       (x)             => builtin::atan,
    "atan2"      (y, x)          => builtin::atan2,
    "sinh"       (x)             => builtin::sinh,
    "cosh"       (x)             => builtin::cosh,
    "tanh"       (x)             => builtin::tanh,
    "exp"        (x)             => builtin::exp,
    "ln"         (x)             => builtin::ln,
    "log"        (x, base)       => builtin::log,
    "log10"      (x)             => builtin::log10,
    "sqrt"       (x)             => builtin::sqrt,
    "cbrt"       (x)             => builtin::cbrt,
    "abs"        (x)             => builtin::abs,
    "sign"       (x)             => builtin::sign,
    "floor"      (x)             => builtin::floor,
    "ceil"       (x)             => builtin::ceil,
    "round"      (x)             => builtin::round,
    "trunc"      (x)             => builtin::trunc,
    "min"        (a, b)          => builtin::min,
    "max"        (a, b)          => builtin::max,
    "clamp"      (x, lo, hi)     => builtin::clamp,
    "hypot"      (x, y)          => builtin::hypot,
    "rad"        (deg)           => builtin::rad,
    "deg"        (rad)           => builtin::deg,
    "isint"      (x)             => builtin::isint,
    "isnan"      (x)             => builtin::isnan,
    "quadroot"   (a, b, c, k)    => builtin::quadroot,
    "quadroots"  (a, b, c)       => builtin::quadroots,
    "cubicroot"  (a, b, c, d, k) => builtin::cubicroot,
    "cubicroots" (a, b, c, d)    => builtin::cubicroots,
}

/// Every built-in constant.
pub static BUILTIN_CONSTANTS: &[NativeConstant] = &[NativeConstant { name: "PI", value: PI },
                                                    NativeConstant { name: "E", value: E },
                                                    NativeConstant { name: "TAU", value: TAU },
                                                    NativeConstant { name: "PHI", value: PHI }];

impl Context {
    /// Evaluates a function call.
    ///
    /// The arguments are evaluated first, under the caller's bindings. A
    /// native function receives them directly; a user-defined function
    /// evaluates its body with every parameter bound to its argument.
    ///
    /// # Errors
    /// - No function of this name and arity exists.
    /// - Any error raised while evaluating the arguments or the body.
    pub(crate) fn eval_function_call(&mut self,
                                     name: &str,
                                     arguments: &[Expr],
                                     offset: usize,
                                     bindings: Option<&Bindings>)
                                     -> EvalResult<f64> {
        let key = SymbolKey::function(name, arguments.len());
        let Some(function) = self.symbols.get(&key) else {
            return Err(self.unresolved_call(name, arguments.len(), offset, None));
        };
        let params = function.params().to_vec();
        let closure = function.closure().clone();

        let values = arguments.iter()
                              .map(|argument| self.eval(argument, bindings))
                              .collect::<EvalResult<Vec<_>>>()?;

        match closure {
            Closure::Native(invoke) => Ok(invoke(&values).into_f64()),
            Closure::Ast(body) => {
                let frame = params.into_iter().zip(values).collect::<Bindings>();
                self.eval(&body, Some(&frame))
            },
            Closure::Empty => Err(RuntimeError::Other { details: format!("Function '{key}' has no body."),
                                                        offset }),
        }
    }

    /// Builds the error for a call that matches no function.
    ///
    /// When functions of that name exist with other arities (including the
    /// one currently being defined, if any), the call is an arity error.
    /// Otherwise the name is unknown.
    pub(crate) fn unresolved_call(&self,
                                  name: &str,
                                  found: usize,
                                  offset: usize,
                                  defining: Option<&SymbolKey>)
                                  -> RuntimeError {
        if name == CONDITIONAL_KEYWORD {
            return RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                         expected: "3".to_string(),
                                                         found,
                                                         offset };
        }

        let mut arities = self.symbols.function_arities(name);
        if let Some(key) = defining
           && key.kind == IdentifierKind::Function
           && key.name == name
        {
            arities.push(key.arity);
            arities.sort_unstable();
            arities.dedup();
        }

        if arities.is_empty() {
            return RuntimeError::UnknownFunction { name: name.to_string(),
                                                   offset };
        }

        let expected = arities.iter()
                              .map(ToString::to_string)
                              .collect::<Vec<_>>()
                              .join(" or ");
        RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                              expected,
                                              found,
                                              offset }
    }
}
