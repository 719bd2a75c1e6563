use std::{
    cell::RefCell,
    fmt,
    hash::{Hash, Hasher},
    rc::{Rc, Weak},
};

use crate::{
    ast::{Associativity, BinaryOperator, OperatorRules, Variable},
    error::{ExpressionError, ExpressionResult},
    util::num::Number,
};

/// A node of an expression tree.
///
/// `Expression` is a reference-counted handle: cloning it yields another
/// handle to the *same* node (use [`Expression::deep_copy`] for a distinct
/// tree). Children are owned top-down through the operand slots of binary
/// nodes; every node additionally keeps a non-owning link to its parent, which
/// is only used to validate mutations and to navigate upwards.
///
/// The invariants maintained by [`Expression::set_left`] and
/// [`Expression::set_right`]:
/// - a node has at most one parent and the tree is acyclic;
/// - an assignment is always a root;
/// - the left operand of an assignment is a variable, and the assigned value
///   never refers to that variable.
///
/// Equality and hashing are structural.
pub struct Expression<N>(Rc<Node<N>>);

struct Node<N> {
    parent: RefCell<Weak<Node<N>>>,
    kind:   Kind<N>,
}

enum Kind<N> {
    Constant(N),
    Variable(Variable<N>),
    Binary(Binary<N>),
}

struct Binary<N> {
    operator: BinaryOperator,
    left:     RefCell<Option<Expression<N>>>,
    right:    RefCell<Option<Expression<N>>>,
}

impl<N> Binary<N> {
    const fn slot(&self, side: Side) -> &RefCell<Option<Expression<N>>> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

impl<N> Drop for Node<N> {
    // Unlinks the subtree bottom-up so deep chains do not recurse.
    fn drop(&mut self) {
        let Kind::Binary(binary) = &mut self.kind else {
            return;
        };
        let mut pending: Vec<Expression<N>> =
            [binary.left.get_mut().take(), binary.right.get_mut().take()].into_iter()
                                                                           .flatten()
                                                                           .collect();
        while let Some(expression) = pending.pop() {
            if let Ok(mut node) = Rc::try_unwrap(expression.0)
               && let Kind::Binary(binary) = &mut node.kind
            {
                pending.extend(binary.left.get_mut().take());
                pending.extend(binary.right.get_mut().take());
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    const fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Borrowed view of what kind of node an [`Expression`] is.
#[derive(Debug)]
pub enum ExpressionKind<'a, N> {
    /// A numeric literal.
    Constant(&'a N),
    /// An occurrence of a variable.
    Variable(&'a Variable<N>),
    /// A binary operation, including assignment.
    Binary(BinaryOperator),
}

impl<N: Number> Expression<N> {
    fn from_kind(kind: Kind<N>) -> Self {
        Self(Rc::new(Node { parent: RefCell::new(Weak::new()),
                            kind }))
    }

    /// Creates a literal node.
    #[must_use]
    pub fn constant(value: N) -> Self {
        Self::from_kind(Kind::Constant(value))
    }

    /// Creates a new occurrence of `variable`.
    ///
    /// The node shares the variable's cell: values stored through the
    /// variable are observed by this node and vice versa.
    #[must_use]
    pub fn variable(variable: &Variable<N>) -> Self {
        Self::from_kind(Kind::Variable(variable.clone()))
    }

    /// Creates a binary node and fills its operand slots.
    ///
    /// # Errors
    /// Returns [`ExpressionError::InvalidArgument`] if an operand violates a
    /// structural invariant (see [`Expression::set_left`]).
    ///
    /// # Example
    /// ```
    /// use exprtree::ast::{BinaryOperator, Expression};
    ///
    /// let sum = Expression::binary(BinaryOperator::Add,
    ///                              Some(Expression::constant(2)),
    ///                              None).unwrap();
    /// assert!(!sum.has_value());
    /// assert_eq!(sum.to_string(), "2 +");
    ///
    /// sum.set_right(Some(Expression::constant(3))).unwrap();
    /// assert_eq!(sum.value().unwrap(), 5);
    /// ```
    pub fn binary(operator: BinaryOperator,
                  left: Option<Self>,
                  right: Option<Self>)
                  -> ExpressionResult<Self> {
        let expression = Self::from_kind(Kind::Binary(Binary { operator,
                                                               left: RefCell::new(None),
                                                               right: RefCell::new(None) }));
        if left.is_some() {
            expression.set_left(left)?;
        }
        if right.is_some() {
            expression.set_right(right)?;
        }
        Ok(expression)
    }

    /// Creates `target = value`.
    ///
    /// # Errors
    /// Fails if `target` is not a variable node or if `value` refers to it.
    pub fn assignment(target: Self, value: Self) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::Assign, Some(target), Some(value))
    }

    /// Creates `left + right`.
    ///
    /// # Errors
    /// Fails if the operands violate a structural invariant.
    pub fn addition(left: Self, right: Self) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::Add, Some(left), Some(right))
    }

    /// Creates `left - right`.
    ///
    /// # Errors
    /// Fails if the operands violate a structural invariant.
    pub fn subtraction(left: Self, right: Self) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::Sub, Some(left), Some(right))
    }

    /// Creates `left * right`.
    ///
    /// # Errors
    /// Fails if the operands violate a structural invariant.
    pub fn multiplication(left: Self, right: Self) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::Mul, Some(left), Some(right))
    }

    /// Creates `left / right`.
    ///
    /// # Errors
    /// Fails if the operands violate a structural invariant.
    pub fn division(left: Self, right: Self) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::Div, Some(left), Some(right))
    }

    /// Creates `base ^ exponent`.
    ///
    /// # Errors
    /// Fails if the operands violate a structural invariant.
    pub fn power(base: Self, exponent: Self) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::Pow, Some(base), Some(exponent))
    }

    #[must_use]
    pub fn kind(&self) -> ExpressionKind<'_, N> {
        match &self.0.kind {
            Kind::Constant(value) => ExpressionKind::Constant(value),
            Kind::Variable(variable) => ExpressionKind::Variable(variable),
            Kind::Binary(binary) => ExpressionKind::Binary(binary.operator),
        }
    }

    #[must_use]
    pub fn as_constant(&self) -> Option<&N> {
        match &self.0.kind {
            Kind::Constant(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_variable(&self) -> Option<&Variable<N>> {
        match &self.0.kind {
            Kind::Variable(variable) => Some(variable),
            _ => None,
        }
    }

    /// The operator of a binary node.
    #[must_use]
    pub fn operator(&self) -> Option<BinaryOperator> {
        match &self.0.kind {
            Kind::Binary(binary) => Some(binary.operator),
            _ => None,
        }
    }

    /// The operator rules of a binary node.
    #[must_use]
    pub fn rules(&self) -> Option<OperatorRules> {
        self.operator().map(BinaryOperator::rules)
    }

    #[must_use]
    pub fn is_assignment(&self) -> bool {
        self.operator() == Some(BinaryOperator::Assign)
    }

    /// `true` if both handles refer to the same node.
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.operand(Side::Left)
    }

    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.operand(Side::Right)
    }

    fn operand(&self, side: Side) -> Option<Self> {
        match &self.0.kind {
            Kind::Binary(binary) => binary.slot(side).borrow().clone(),
            _ => None,
        }
    }

    /// Both operand slots; empty for terminal nodes.
    pub(crate) fn operands(&self) -> [Option<Self>; 2] {
        [self.left(), self.right()]
    }

    /// The node whose operand slot holds this node.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().upgrade().map(Self)
    }

    /// Replaces the left operand.
    ///
    /// Passing `None` empties the slot. The former operand, if any, is
    /// detached and becomes a root.
    ///
    /// # Errors
    /// Returns [`ExpressionError::InvalidArgument`], leaving the tree
    /// unchanged, if this is not a binary node or if `operand`
    /// - is this node or one of its ancestors,
    /// - is already part of this node's subtree or has another parent,
    /// - is an assignment,
    /// - breaks the shape of an assignment (non-variable target, or a value
    ///   referring to the target).
    pub fn set_left(&self, operand: Option<Self>) -> ExpressionResult<()> {
        self.set_operand(Side::Left, operand)
    }

    /// Replaces the right operand.
    ///
    /// # Errors
    /// Same conditions as [`Expression::set_left`].
    pub fn set_right(&self, operand: Option<Self>) -> ExpressionResult<()> {
        self.set_operand(Side::Right, operand)
    }

    fn set_operand(&self, side: Side, operand: Option<Self>) -> ExpressionResult<()> {
        let Kind::Binary(binary) = &self.0.kind else {
            return Err(ExpressionError::invalid(format!("'{self}' has no operand slots")));
        };

        if let Some(operand) = &operand {
            let current = binary.slot(side).borrow().clone();
            if current.is_some_and(|current| current.is_same(operand)) {
                return Ok(());
            }
            self.check_operand(binary, side, operand)?;
        }

        let previous = binary.slot(side).replace(operand.clone());
        if let Some(previous) = previous {
            previous.unlink();
        }
        if let Some(operand) = operand {
            operand.link(self);
        }
        Ok(())
    }

    fn check_operand(&self, binary: &Binary<N>, side: Side, operand: &Self) -> ExpressionResult<()> {
        if operand.is_assignment() {
            return Err(ExpressionError::invalid(format!("assignment '{operand}' cannot have a parent")));
        }
        if self.descends_from(operand) {
            return Err(ExpressionError::invalid(format!("'{operand}' is '{self}' or one of its ancestors")));
        }
        if operand.descends_from(self) {
            return Err(ExpressionError::invalid(format!("'{operand}' is already part of '{self}'")));
        }
        if let Some(parent) = operand.parent() {
            return Err(ExpressionError::invalid(format!("'{operand}' already belongs to '{parent}'")));
        }

        if binary.operator == BinaryOperator::Assign {
            let sibling = binary.slot(side.other()).borrow().clone();
            match side {
                Side::Left => {
                    let Some(target) = operand.as_variable() else {
                        return Err(ExpressionError::invalid(format!("assignment target '{operand}' is not a variable")));
                    };
                    if sibling.is_some_and(|value| value.references(target)) {
                        return Err(ExpressionError::invalid(format!("assigned value refers to '{target}'")));
                    }
                },
                Side::Right => {
                    if let Some(target) = sibling.as_ref().and_then(Self::as_variable)
                       && operand.references(target)
                    {
                        return Err(ExpressionError::invalid(format!("assigned value '{operand}' refers to '{target}'")));
                    }
                },
            }
        }
        Ok(())
    }

    /// Validates the parent link of this node.
    ///
    /// Links are maintained by [`Expression::set_left`] and
    /// [`Expression::set_right`]; this method only accepts a `parent` whose
    /// operand slot already holds this node, and only clears the link of a
    /// node that no slot holds anymore. It never creates a one-sided link.
    ///
    /// # Errors
    /// Returns [`ExpressionError::InvalidArgument`] if this node is an
    /// assignment, if `parent` lies inside this node's subtree, or if the
    /// link would not be mirrored by an operand slot.
    pub fn set_parent(&self, parent: Option<&Self>) -> ExpressionResult<()> {
        match parent {
            Some(parent) => {
                if self.is_assignment() {
                    return Err(ExpressionError::invalid(format!("assignment '{self}' cannot have a parent")));
                }
                if parent.descends_from(self) {
                    return Err(ExpressionError::invalid(format!("'{parent}' is part of '{self}'")));
                }
                if !parent.holds(self) {
                    return Err(ExpressionError::invalid(format!("'{parent}' does not hold '{self}' as an operand")));
                }
                self.link(parent);
            },
            None => {
                if let Some(current) = self.parent()
                   && current.holds(self)
                {
                    return Err(ExpressionError::invalid(format!("'{self}' is still an operand of '{current}'")));
                }
                self.unlink();
            },
        }
        Ok(())
    }

    /// Membership test.
    ///
    /// `None` is never contained. A node contains itself; binary nodes
    /// contain whatever their operands contain; terminals contain any
    /// expression structurally equal to them.
    ///
    /// # Example
    /// ```
    /// use exprtree::ast::{Expression, Variable};
    ///
    /// let x = Variable::<i64>::new("x");
    /// let sum = Expression::addition(Expression::variable(&x), Expression::constant(1)).unwrap();
    ///
    /// assert!(sum.contains(&sum));
    /// assert!(sum.contains(&Expression::variable(&Variable::new("x"))));
    /// assert!(!sum.contains(&Expression::constant(2)));
    /// assert!(!sum.contains(None));
    /// ```
    pub fn contains<'a>(&self, other: impl Into<Option<&'a Self>>) -> bool
        where N: 'a
    {
        let Some(other) = other.into() else {
            return false;
        };
        if self.is_same(other) {
            return true;
        }
        match &self.0.kind {
            Kind::Binary(_) => self.operands()
                                   .iter()
                                   .flatten()
                                   .any(|operand| operand.contains(other)),
            Kind::Constant(_) | Kind::Variable(_) => self == other,
        }
    }

    /// `true` if `ancestor` is this node or lies on its parent chain.
    ///
    /// Walks parent links upwards, so the cost is the depth of this node.
    fn descends_from(&self, ancestor: &Self) -> bool {
        let mut current = Some(self.clone());
        while let Some(node) = current {
            if node.is_same(ancestor) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    fn holds(&self, child: &Self) -> bool {
        self.operands()
            .iter()
            .flatten()
            .any(|operand| operand.is_same(child))
    }

    /// `true` if a variable equal to `variable` occurs in this subtree.
    #[must_use]
    pub fn references(&self, variable: &Variable<N>) -> bool {
        match &self.0.kind {
            Kind::Constant(_) => false,
            Kind::Variable(own) => own == variable,
            Kind::Binary(_) => self.operands()
                                   .iter()
                                   .flatten()
                                   .any(|operand| operand.references(variable)),
        }
    }

    fn link(&self, parent: &Self) {
        *self.0.parent.borrow_mut() = Rc::downgrade(&parent.0);
    }

    fn unlink(&self) {
        *self.0.parent.borrow_mut() = Weak::new();
    }

    /// Copies the tree into distinct, parentless nodes.
    ///
    /// The copy is structurally equal to the original. Variable occurrences
    /// keep sharing their variable cells.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        match &self.0.kind {
            Kind::Constant(value) => Self::constant(value.clone()),
            Kind::Variable(variable) => Self::variable(variable),
            Kind::Binary(binary) => {
                let [left, right] = self.operands().map(|operand| operand.map(|o| o.deep_copy()));
                let copy = Self::from_kind(Kind::Binary(Binary { operator: binary.operator,
                                                                 left:     RefCell::new(left),
                                                                 right:    RefCell::new(right), }));
                for operand in copy.operands().iter().flatten() {
                    operand.link(&copy);
                }
                copy
            },
        }
    }
}

impl<N> Clone for Expression<N> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<N: Number> PartialEq for Expression<N> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_same(other) {
            return true;
        }
        match (&self.0.kind, &other.0.kind) {
            (Kind::Constant(a), Kind::Constant(b)) => a.literal_eq(b),
            (Kind::Variable(a), Kind::Variable(b)) => a == b,
            (Kind::Binary(a), Kind::Binary(b)) => {
                a.operator == b.operator && self.operands() == other.operands()
            },
            _ => false,
        }
    }
}

impl<N: Number> Eq for Expression<N> {}

impl<N: Number> Hash for Expression<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.0.kind {
            Kind::Constant(value) => {
                0u8.hash(state);
                value.hash_literal(state);
            },
            Kind::Variable(variable) => {
                1u8.hash(state);
                variable.hash(state);
            },
            Kind::Binary(binary) => {
                2u8.hash(state);
                binary.operator.hash(state);
                self.operands().hash(state);
            },
        }
    }
}

impl<N: Number> fmt::Display for Expression<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            Kind::Constant(value) => write!(f, "{value}"),
            Kind::Variable(variable) => write!(f, "{variable}"),
            Kind::Binary(binary) => {
                let rules = binary.operator.rules();
                let [left, right] = self.operands();
                if let Some(left) = &left {
                    write_operand(f, left, rules, Side::Left)?;
                    write!(f, " ")?;
                }
                write!(f, "{}", rules.symbol)?;
                if let Some(right) = &right {
                    write!(f, " ")?;
                    write_operand(f, right, rules, Side::Right)?;
                }
                Ok(())
            },
        }
    }
}

/// Writes an operand, parenthesized when it binds more loosely than its
/// parent would assume on that side.
fn write_operand<N: Number>(f: &mut fmt::Formatter<'_>,
                            operand: &Expression<N>,
                            parent: OperatorRules,
                            side: Side)
                            -> fmt::Result {
    let grouped = operand.rules().is_some_and(|rules| {
                                     rules.priority < parent.priority
                                     || (rules.priority == parent.priority
                                         && matches!((parent.associativity, side),
                                                     (Associativity::Left, Side::Right)
                                                     | (Associativity::Right, Side::Left)))
                                 });
    if grouped {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}

impl<N: Number> fmt::Debug for Expression<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            Kind::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Kind::Variable(variable) => f.debug_tuple("Variable").field(&variable.name()).finish(),
            Kind::Binary(binary) => {
                let [left, right] = self.operands();
                f.debug_tuple(binary.operator.name())
                 .field(&left)
                 .field(&right)
                 .finish()
            },
        }
    }
}
