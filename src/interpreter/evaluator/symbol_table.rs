use std::{collections::HashMap, fmt};

use crate::{
    ast::Expr,
    interpreter::evaluator::function::core::{
        BUILTIN_CONSTANTS, BUILTIN_FUNCTIONS, NativeFn, NativeFunction,
    },
    util::num::literal_source,
};

/// Whether an identifier names a value or a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    /// A variable or constant, referenced without parentheses.
    Variable,
    /// A function, called with a parenthesized argument list.
    Function,
}

/// The identity of a symbol table entry.
///
/// Functions of the same name but different arity are different symbols, and
/// a variable may share its name with functions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolKey {
    /// The identifier name.
    pub name:  String,
    /// Variable or function.
    pub kind:  IdentifierKind,
    /// Number of parameters; always zero for variables.
    pub arity: usize,
}

impl SymbolKey {
    /// The key of the variable `name`.
    #[must_use]
    pub fn variable(name: &str) -> Self {
        Self { name:  name.to_string(),
               kind:  IdentifierKind::Variable,
               arity: 0, }
    }

    /// The key of the function `name` taking `arity` arguments.
    #[must_use]
    pub fn function(name: &str, arity: usize) -> Self {
        Self { name: name.to_string(),
               kind: IdentifierKind::Function,
               arity }
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IdentifierKind::Variable => write!(f, "{}", self.name),
            IdentifierKind::Function => write!(f, "{}/{}", self.name, self.arity),
        }
    }
}

/// A deferred computation bound to an identifier.
#[derive(Debug, Clone)]
pub enum Closure {
    /// An unevaluated expression. Function bodies keep it forever; variable
    /// bodies collapse to [`Closure::Empty`] after their first evaluation.
    Ast(Expr),
    /// A native function.
    Native(NativeFn),
    /// No deferred work: the identifier's stored value is authoritative.
    Empty,
}

/// A named entry of the [`SymbolTable`].
#[derive(Debug, Clone)]
pub struct Identifier {
    name:    String,
    kind:    IdentifierKind,
    params:  Vec<String>,
    closure: Closure,
    value:   f64,
    builtin: bool,
}

impl Identifier {
    /// A user variable whose value is computed from `body` on first use.
    #[must_use]
    pub const fn variable(name: String, body: Expr) -> Self {
        Self { name,
               kind: IdentifierKind::Variable,
               params: Vec::new(),
               closure: Closure::Ast(body),
               value: 0.0,
               builtin: false }
    }

    /// A user function evaluating `body` with `params` bound to the
    /// arguments.
    #[must_use]
    pub const fn function(name: String, params: Vec<String>, body: Expr) -> Self {
        Self { name,
               kind: IdentifierKind::Function,
               params,
               closure: Closure::Ast(body),
               value: 0.0,
               builtin: false }
    }

    /// A built-in constant.
    #[must_use]
    pub fn constant(name: &str, value: f64) -> Self {
        Self { name: name.to_string(),
               kind: IdentifierKind::Variable,
               params: Vec::new(),
               closure: Closure::Empty,
               value,
               builtin: true }
    }

    /// A built-in function taken from its descriptor.
    #[must_use]
    pub fn native(descriptor: &NativeFunction) -> Self {
        Self { name:    descriptor.name.to_string(),
               kind:    IdentifierKind::Function,
               params:  descriptor.params.iter().map(ToString::to_string).collect(),
               closure: Closure::Native(descriptor.invoke),
               value:   0.0,
               builtin: true, }
    }

    /// The identifier name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variable or function.
    #[must_use]
    pub const fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// The formal parameter names; empty for variables.
    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The deferred computation of this identifier.
    #[must_use]
    pub const fn closure(&self) -> &Closure {
        &self.closure
    }

    /// The stored value. Only meaningful once the closure is
    /// [`Closure::Empty`].
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Whether the identifier was preloaded rather than user-defined.
    #[must_use]
    pub const fn is_builtin(&self) -> bool {
        self.builtin
    }

    /// The table key of this identifier.
    #[must_use]
    pub fn key(&self) -> SymbolKey {
        SymbolKey { name:  self.name.clone(),
                    kind:  self.kind,
                    arity: self.params.len(), }
    }
}

/// Renders the identifier as a definition that can be run again, e.g.
/// `f(a, b) = a * b` or `x = 4`.
impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IdentifierKind::Variable => write!(f, "{} = ", self.name)?,
            IdentifierKind::Function => {
                write!(f, "{}({}) = ", self.name, self.params.join(", "))?;
            },
        }
        match &self.closure {
            Closure::Ast(body) => write!(f, "{body}"),
            Closure::Native(_) => write!(f, "<native>"),
            Closure::Empty => write!(f, "{}", literal_source(self.value)),
        }
    }
}

/// Insertion-ordered storage of identifiers, unique by [`SymbolKey`].
///
/// ## Example
/// ```
/// use numera::{
///     ast::Expr,
///     interpreter::evaluator::symbol_table::{Identifier, SymbolKey, SymbolTable},
/// };
///
/// let mut table = SymbolTable::new();
/// let five = Expr::Number { value: 5.0, offset: 4 };
/// let seven = Expr::Number { value: 7.0, offset: 4 };
///
/// table.add(Identifier::variable("x".to_string(), five));
/// table.add(Identifier::variable("x".to_string(), seven.clone()));
///
/// assert_eq!(table.len(), 1);
/// assert!(table.contains(&SymbolKey::variable("x")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: Vec<Identifier>,
    index:   HashMap<SymbolKey, usize>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table preloaded with the built-in constants and functions.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        for constant in BUILTIN_CONSTANTS {
            table.add(Identifier::constant(constant.name, constant.value));
        }
        for function in BUILTIN_FUNCTIONS {
            table.add(Identifier::native(function));
        }
        table
    }

    /// Inserts an identifier, replacing in place any entry with the same key.
    ///
    /// A replaced entry keeps its position in the insertion order.
    pub fn add(&mut self, identifier: Identifier) {
        let key = identifier.key();
        if let Some(&position) = self.index.get(&key) {
            self.entries[position] = identifier;
        } else {
            self.index.insert(key, self.entries.len());
            self.entries.push(identifier);
        }
    }

    /// Looks up an identifier by key.
    #[must_use]
    pub fn get(&self, key: &SymbolKey) -> Option<&Identifier> {
        self.position(key).map(|position| &self.entries[position])
    }

    /// Whether an entry with this key exists.
    #[must_use]
    pub fn contains(&self, key: &SymbolKey) -> bool {
        self.index.contains_key(key)
    }

    /// The insertion position of the entry with this key.
    #[must_use]
    pub fn position(&self, key: &SymbolKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// The entry at an insertion position.
    ///
    /// # Panics
    /// Panics if `position` was not obtained from this table.
    #[must_use]
    pub fn entry(&self, position: usize) -> &Identifier {
        &self.entries[position]
    }

    /// Stores the evaluated value of a variable and drops its deferred body.
    pub(crate) fn cache(&mut self, position: usize, value: f64) {
        let entry = &mut self.entries[position];
        entry.value = value;
        entry.closure = Closure::Empty;
    }

    /// The arities under which functions named `name` exist, ascending.
    #[must_use]
    pub fn function_arities(&self, name: &str) -> Vec<usize> {
        let mut arities: Vec<usize> =
            self.entries
                .iter()
                .filter(|entry| entry.kind == IdentifierKind::Function && entry.name == name)
                .map(|entry| entry.params.len())
                .collect();
        arities.sort_unstable();
        arities
    }

    /// All entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Identifier> {
        self.entries.iter()
    }

    /// User-defined entries in insertion order.
    pub fn user_defined(&self) -> impl Iterator<Item = &Identifier> {
        self.entries.iter().filter(|entry| !entry.builtin)
    }

    /// User-defined entries ordered so that each comes after the entries its
    /// body refers to, and otherwise in insertion order.
    ///
    /// Replacing a definition keeps its position, so insertion order alone
    /// may put a body before the names it uses. Entries referring to each
    /// other in a cycle keep the order in which the cycle is first reached.
    pub fn dependency_order(&self) -> Vec<&Identifier> {
        let mut visited = vec![false; self.entries.len()];
        let mut order = Vec::new();
        for position in 0..self.entries.len() {
            self.visit(position, &mut visited, &mut order);
        }
        order
    }

    fn visit<'a>(&'a self, position: usize, visited: &mut [bool], order: &mut Vec<&'a Identifier>) {
        let entry = &self.entries[position];
        if entry.builtin || visited[position] {
            return;
        }
        visited[position] = true;

        if let Closure::Ast(body) = &entry.closure {
            let mut references = Vec::new();
            collect_references(body, &entry.params, &mut references);
            for key in references {
                if let Some(&dependency) = self.index.get(&key) {
                    self.visit(dependency, visited, order);
                }
            }
        }
        order.push(entry);
    }

    /// Removes every user-defined entry, keeping the built-ins.
    pub fn clear_user_defined(&mut self) {
        self.entries.retain(|entry| entry.builtin);
        self.index = self.entries
                         .iter()
                         .enumerate()
                         .map(|(position, entry)| (entry.key(), position))
                         .collect();
    }

    /// Number of entries, built-ins included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Pushes the key of every variable and function `expr` refers to, skipping
/// the names in `params`.
fn collect_references(expr: &Expr, params: &[String], references: &mut Vec<SymbolKey>) {
    match expr {
        Expr::Number { .. } => {},
        Expr::Variable { name, .. } => {
            if !params.contains(name) {
                references.push(SymbolKey::variable(name));
            }
        },
        Expr::FunctionCall { name, arguments, .. } => {
            references.push(SymbolKey::function(name, arguments.len()));
            for argument in arguments {
                collect_references(argument, params, references);
            }
        },
        Expr::UnaryOp { expr, .. } => collect_references(expr, params, references),
        Expr::BinaryOp { left, right, .. } => {
            collect_references(left, params, references);
            collect_references(right, params, references);
        },
        Expr::Conditional { condition,
                            then_branch,
                            else_branch,
                            .. } => {
            collect_references(condition, params, references);
            collect_references(then_branch, params, references);
            collect_references(else_branch, params, references);
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: f64) -> Expr {
        Expr::Number { value, offset: 0 }
    }

    #[test]
    fn replacement_keeps_insertion_order() {
        let mut table = SymbolTable::new();
        table.add(Identifier::variable("a".into(), number(1.0)));
        table.add(Identifier::variable("b".into(), number(2.0)));
        table.add(Identifier::variable("a".into(), number(3.0)));

        let names: Vec<_> = table.iter().map(Identifier::name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(table.get(&SymbolKey::variable("a")).unwrap().to_string(), "a = 3");
    }

    #[test]
    fn dependencies_come_first() {
        let reference = |name: &str| Expr::Variable { name:   name.to_string(),
                                                      offset: 0, };
        let mut table = SymbolTable::with_builtins();
        table.add(Identifier::variable("a".into(), number(1.0)));
        table.add(Identifier::variable("c".into(), number(5.0)));
        table.add(Identifier::function("f".into(), vec!["x".into()], reference("x")));
        table.add(Identifier::variable("a".into(), reference("c")));
        table.add(Identifier::function("g".into(),
                                       vec!["c".into()],
                                       Expr::FunctionCall { name:      "f".to_string(),
                                                            arguments: vec![reference("c")],
                                                            offset:    0, }));

        let names: Vec<_> = table.dependency_order().into_iter().map(Identifier::name).collect();
        assert_eq!(names, vec!["c", "a", "f", "g"]);
    }

    #[test]
    fn functions_are_keyed_by_arity() {
        let mut table = SymbolTable::new();
        table.add(Identifier::function("f".into(), vec!["a".into()], number(1.0)));
        table.add(Identifier::function("f".into(), vec!["a".into(), "b".into()], number(2.0)));
        table.add(Identifier::variable("f".into(), number(3.0)));

        assert_eq!(table.len(), 3);
        assert_eq!(table.function_arities("f"), vec![1, 2]);
        assert!(table.contains(&SymbolKey::function("f", 2)));
        assert!(!table.contains(&SymbolKey::function("f", 0)));
    }

    #[test]
    fn cache_collapses_the_closure() {
        let mut table = SymbolTable::new();
        table.add(Identifier::variable("x".into(), number(9.0)));
        let position = table.position(&SymbolKey::variable("x")).unwrap();
        table.cache(position, 9.0);

        let entry = table.entry(position);
        assert!(matches!(entry.closure(), Closure::Empty));
        assert_eq!(entry.value(), 9.0);
    }

    #[test]
    fn clearing_keeps_builtins_and_reindexes() {
        let mut table = SymbolTable::with_builtins();
        let builtins = table.len();
        table.add(Identifier::variable("x".into(), number(1.0)));
        table.clear_user_defined();

        assert_eq!(table.len(), builtins);
        assert_eq!(table.user_defined().count(), 0);
        let pi = table.get(&SymbolKey::variable("PI")).unwrap();
        assert!(pi.is_builtin());
        assert_eq!(pi.value(), std::f64::consts::PI);
        assert!(table.get(&SymbolKey::function("sin", 1)).is_some());
    }
}
