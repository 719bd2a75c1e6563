use std::{
    cell::RefCell,
    fmt,
    hash::{Hash, Hasher},
    rc::Rc,
};

use crate::{
    error::{ExpressionError, ExpressionResult},
    util::num::Number,
};

struct Binding<N> {
    name:  String,
    value: RefCell<Option<N>>,
}

/// A named numeric cell.
///
/// `Variable` is a shared handle: clones refer to the same cell, so a value
/// stored through one handle is visible through all of them. The parser hands
/// out one handle per name and wraps it in a separate expression node at
/// every occurrence.
///
/// Equality and hashing look at the name only, never at the value.
///
/// # Example
/// ```
/// use exprtree::ast::Variable;
///
/// let x = Variable::<i64>::new("x");
/// let alias = x.clone();
/// x.set_value(Some(3)).unwrap();
///
/// assert_eq!(alias.value(), Some(3));
/// assert_eq!(x, Variable::with_value("x", 7));
/// assert_eq!(x.to_string(), "x");
/// ```
pub struct Variable<N>(Rc<Binding<N>>);

impl<N: Number> Variable<N> {
    /// Creates a variable without a value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(Rc::new(Binding { name:  name.into(),
                               value: RefCell::new(None), }))
    }

    /// Creates a variable holding `value`.
    #[must_use]
    pub fn with_value(name: impl Into<String>, value: N) -> Self {
        Self(Rc::new(Binding { name:  name.into(),
                               value: RefCell::new(Some(value)), }))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns a copy of the stored value.
    #[must_use]
    pub fn value(&self) -> Option<N> {
        self.0.value.borrow().clone()
    }

    #[must_use]
    pub fn has_value(&self) -> bool {
        self.0.value.borrow().is_some()
    }

    /// Stores `value`, replacing any previous one.
    ///
    /// # Errors
    /// Returns [`ExpressionError::NullArgument`] for `None`; the variable is
    /// left untouched.
    pub fn set_value(&self, value: Option<N>) -> ExpressionResult<()> {
        let value = value.ok_or(ExpressionError::NullArgument { details: "variable value" })?;
        self.store(value);
        Ok(())
    }

    /// Copies the value held by `other`.
    ///
    /// A variable without a value cannot donate one: in that case nothing
    /// changes and `false` is returned.
    pub fn copy_value_from(&self, other: &Self) -> bool {
        match other.value() {
            Some(value) => {
                self.store(value);
                true
            },
            None => false,
        }
    }

    /// `true` if both handles refer to the same cell.
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn store(&self, value: N) {
        *self.0.value.borrow_mut() = Some(value);
    }
}

impl<N> Clone for Variable<N> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<N> PartialEq for Variable<N> {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name
    }
}

impl<N> Eq for Variable<N> {}

impl<N> Hash for Variable<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl<N> fmt::Display for Variable<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.name)
    }
}

impl<N: fmt::Debug> fmt::Debug for Variable<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
         .field("name", &self.0.name)
         .field("value", &*self.0.value.borrow())
         .finish()
    }
}
