/// Represents a literal value in the language.
///
/// `LiteralValue` covers all raw, constant values that can appear directly in
/// source code: integers, reals, strings, and booleans. It is used in the AST
/// to represent literal expressions and as a convenient container for
/// constants during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
    /// A double-quoted string literal, stored without its quotes.
    Str(String),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// GIANT expressions are deliberately small: literals, variable references,
/// and binary arithmetic. The many surface phrasings (`plus`, `added to`,
/// `divided by`, ...) are already collapsed to the canonical operator set by
/// the time an `Expr` exists; no node records which phrasing the source used.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, or boolean).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a binding by name.
    Variable {
        /// Name of the binding.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary arithmetic operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use giant::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::BinaryOp { line, .. } => *line,
        }
    }
}

/// Represents a top-level statement.
///
/// Statements are the units parsed from input lines. Each synonymous surface
/// form lowers to exactly one of these variants; `make x be 5`, `set x to 5`,
/// `let x be 5`, and `let x be equal to 5` all become the same `Assign`.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A binding of a name to the value of an expression.
    Assign {
        /// The name of the binding.
        name:  String,
        /// The value which is being bound.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// An output statement (`talk`, `show`, `wetin be`).
    Print {
        /// The expression to render.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// An `@anchor` declaration.
    AnchorDecl {
        /// The anchor name.
        name:     String,
        /// Expression producing the anchor value.
        value:    Expr,
        /// Metadata entries in declaration order.
        metadata: Vec<(String, Expr)>,
        /// Line number in the source code.
        line:     usize,
    },
    /// A `relational` declaration with its `relative to [...]` anchor list.
    RelationalDecl {
        /// The relational value's name.
        name:     String,
        /// Expression producing the numeric value.
        value:    Expr,
        /// Referenced anchor names in declaration order.
        anchors:  Vec<String>,
        /// Metadata entries in declaration order.
        metadata: Vec<(String, Expr)>,
        /// Line number in the source code.
        line:     usize,
    },
    /// The `list anchors` query.
    ListAnchors {
        /// Line number in the source code.
        line: usize,
    },
    /// A `describe anchor` / `inspect anchor` query.
    DescribeAnchor {
        /// The anchor name to describe.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A `when` clause with its `@action` body.
    When {
        /// The subject expression whose position is tested.
        subject:   Expr,
        /// The qualifier string (`"over"`, `"under"`, `"near"`).
        qualifier: String,
        /// Name of the reference anchor.
        reference: String,
        /// Body statements executed when the condition holds.
        body:      Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
}

/// Represents a canonical binary operator.
///
/// Every arithmetic infix phrase in the surface syntax lowers to one of these
/// four operators. Operand order is already resolved by the parser:
/// `a subtracted from b` arrives here as `Sub(b, a)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`plus`, `added to`)
    Add,
    /// Subtraction (`minus`, `subtract`, `subtracted from`)
    Sub,
    /// Multiplication (`times`, `multiplied by`)
    Mul,
    /// Division (`over`, `divided by`)
    Div,
}
