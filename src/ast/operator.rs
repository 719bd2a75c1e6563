use std::fmt;

/// Represents a binary operator.
///
/// Binary operators are the arithmetic operations plus assignment, which is
/// modelled as a binary node whose left operand is a variable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Assignment (`=`)
    Assign,
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`)
    Pow,
}

/// How operators of equal priority group.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Associativity {
    /// `a - b - c` groups as `(a - b) - c`.
    Left,
    /// `a ^ b ^ c` groups as `a ^ (b ^ c)`.
    Right,
}

/// Immutable metadata of a binary operator.
///
/// The same rules drive both parsing precedence and display formatting.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct OperatorRules {
    /// Source symbol, e.g. `"+"`.
    pub symbol:        &'static str,
    /// Binding strength: 0 = assignment, 1 = additive, 2 = multiplicative,
    /// 3 = power.
    pub priority:      u8,
    /// Grouping of operators with equal priority.
    pub associativity: Associativity,
}

impl OperatorRules {
    /// Minimum priority the right operand must have when parsed with
    /// precedence climbing.
    #[must_use]
    pub const fn right_binding(&self) -> u8 {
        match self.associativity {
            Associativity::Left => self.priority + 1,
            Associativity::Right => self.priority,
        }
    }
}

impl BinaryOperator {
    /// All operators, in priority order.
    pub const ALL: [Self; 6] = [Self::Assign,
                                Self::Add,
                                Self::Sub,
                                Self::Mul,
                                Self::Div,
                                Self::Pow];

    /// Returns the rules of this operator.
    ///
    /// # Example
    /// ```
    /// use exprtree::ast::{Associativity, BinaryOperator};
    ///
    /// let rules = BinaryOperator::Pow.rules();
    /// assert_eq!(rules.symbol, "^");
    /// assert_eq!(rules.priority, 3);
    /// assert_eq!(rules.associativity, Associativity::Right);
    /// ```
    #[must_use]
    pub const fn rules(self) -> OperatorRules {
        use Associativity::{Left, Right};

        let (symbol, priority, associativity) = match self {
            Self::Assign => ("=", 0, Right),
            Self::Add => ("+", 1, Left),
            Self::Sub => ("-", 1, Left),
            Self::Mul => ("*", 2, Left),
            Self::Div => ("/", 2, Left),
            Self::Pow => ("^", 3, Right),
        };
        OperatorRules { symbol,
                        priority,
                        associativity }
    }

    /// Shorthand for `self.rules().symbol`.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        self.rules().symbol
    }

    /// Name of the node variant built from this operator.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Assign => "Assignment",
            Self::Add => "Addition",
            Self::Sub => "Subtraction",
            Self::Mul => "Multiplication",
            Self::Div => "Division",
            Self::Pow => "Power",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
