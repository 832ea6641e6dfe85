//! Label and field selectors.
//!
//! A [`Selector`] is a small boolean expression the backend evaluates to
//! filter listings. It is sent as the `labelSelector` or `fieldSelector` query
//! parameter.
//!
//! ```rust
//! use sensu_go::Selector;
//!
//! let selector = Selector::equal("env", "prod").and(Selector::not_equal("critical", false));
//! assert_eq!(selector.to_string(), r#"env == "prod" && critical != false"#);
//!
//! // Field selectors are prefixed with the resource's field prefix.
//! assert_eq!(
//!     selector.serialize(Some("check")),
//!     r#"check.env == "prod" && check.critical != false"#,
//! );
//! ```
//!
//! There is no grouping syntax: conjunctions are flat and evaluated left to
//! right.

use std::fmt;

// ============================================================================
// Literal
// ============================================================================

/// A value on the right-hand side of a comparison.
///
/// Strings are double-quoted, booleans render as `true`/`false` and numbers
/// are unquoted. Floats keep their fractional part (`2.0` stays `2.0`).
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A string literal.
    String(String),
    /// An integer literal.
    Int(i64),
    /// A floating-point literal.
    Float(f64),
    /// A boolean literal.
    Bool(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "\"{}\"", s),
            Literal::Int(i) => write!(f, "{}", i),
            // `{:?}` keeps the trailing `.0` on whole numbers
            Literal::Float(x) => write!(f, "{:?}", x),
            Literal::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<&String> for Literal {
    fn from(value: &String) -> Self {
        Literal::String(value.clone())
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<f32> for Literal {
    fn from(value: f32) -> Self {
        Literal::Float(f64::from(value))
    }
}

macro_rules! literal_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Literal {
                fn from(value: $t) -> Self {
                    Literal::Int(i64::from(value))
                }
            }
        )*
    };
}

literal_from_int!(i8, i16, i32, i64, u8, u16, u32);

// ============================================================================
// SetOperand
// ============================================================================

/// The right-hand side of `in` / `notin`.
///
/// The kind of operand decides which side is the field:
///
/// - [`SetOperand::Values`]: the left operand is the field, tested against a
///   list of strings (`field in ["a","b"]`).
/// - [`SetOperand::Field`]: the left operand is a quoted value, tested for
///   membership in an array field (`"value" in field`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOperand {
    /// An array-valued field name.
    Field(String),
    /// A list of values.
    Values(Vec<String>),
}

impl From<&str> for SetOperand {
    fn from(value: &str) -> Self {
        SetOperand::Field(value.to_string())
    }
}

impl From<String> for SetOperand {
    fn from(value: String) -> Self {
        SetOperand::Field(value)
    }
}

impl<S: Into<String>> From<Vec<S>> for SetOperand {
    fn from(values: Vec<S>) -> Self {
        SetOperand::Values(values.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for SetOperand {
    fn from(values: [S; N]) -> Self {
        SetOperand::Values(values.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// Selector
// ============================================================================

/// A selector expression.
///
/// Build leaves with [`equal`](Self::equal), [`not_equal`](Self::not_equal),
/// [`matches`](Self::matches), [`in_`](Self::in_) and
/// [`not_in`](Self::not_in); combine them with [`and`](Self::and) or
/// [`all`](Self::all).
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// `field == literal`
    Equal(String, Literal),
    /// `field != literal`
    NotEqual(String, Literal),
    /// `field matches "pattern"`
    Matches(String, String),
    /// Set membership, see [`SetOperand`].
    In(String, SetOperand),
    /// Negated set membership, see [`SetOperand`].
    NotIn(String, SetOperand),
    /// Conjunction of every sub-expression.
    And(Vec<Selector>),
}

impl Selector {
    /// `field == value`
    pub fn equal(field: impl Into<String>, value: impl Into<Literal>) -> Self {
        Selector::Equal(field.into(), value.into())
    }

    /// `field != value`
    pub fn not_equal(field: impl Into<String>, value: impl Into<Literal>) -> Self {
        Selector::NotEqual(field.into(), value.into())
    }

    /// `field matches "pattern"`. The pattern is always quoted as-is.
    pub fn matches(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Selector::Matches(field.into(), pattern.into())
    }

    /// Set membership.
    ///
    /// ```rust
    /// use sensu_go::Selector;
    ///
    /// assert_eq!(Selector::in_("a", "b").to_string(), r#""a" in b"#);
    /// assert_eq!(Selector::in_("a", ["1", "2"]).to_string(), r#"a in ["1","2"]"#);
    /// ```
    pub fn in_(left: impl Into<String>, right: impl Into<SetOperand>) -> Self {
        Selector::In(left.into(), right.into())
    }

    /// Negated set membership; same operand rules as [`in_`](Self::in_).
    pub fn not_in(left: impl Into<String>, right: impl Into<SetOperand>) -> Self {
        Selector::NotIn(left.into(), right.into())
    }

    /// Conjunction of all given selectors.
    pub fn all(selectors: impl IntoIterator<Item = Selector>) -> Self {
        Selector::And(selectors.into_iter().collect())
    }

    /// Appends `other` to this expression with `&&`.
    ///
    /// Conjunctions on either side are flattened, so chaining `and` never
    /// nests.
    #[must_use]
    pub fn and(self, other: Selector) -> Self {
        let mut terms = match self {
            Selector::And(terms) => terms,
            leaf => vec![leaf],
        };
        match other {
            Selector::And(more) => terms.extend(more),
            leaf => terms.push(leaf),
        }
        Selector::And(terms)
    }

    /// Renders the expression, prefixing every field with `prefix.` when a
    /// prefix is given.
    ///
    /// Label selectors are rendered without a prefix; field selectors use the
    /// resource type's field prefix.
    pub fn serialize(&self, prefix: Option<&str>) -> String {
        let field = |name: &str| match prefix {
            Some(p) => format!("{}.{}", p, name),
            None => name.to_string(),
        };

        match self {
            Selector::Equal(f, v) => format!("{} == {}", field(f), v),
            Selector::NotEqual(f, v) => format!("{} != {}", field(f), v),
            Selector::Matches(f, pattern) => format!("{} matches \"{}\"", field(f), pattern),
            Selector::In(left, right) => set_membership(left, "in", right, field),
            Selector::NotIn(left, right) => set_membership(left, "notin", right, field),
            Selector::And(terms) => terms
                .iter()
                .map(|t| t.serialize(prefix))
                .collect::<Vec<_>>()
                .join(" && "),
        }
    }
}

fn set_membership(
    left: &str,
    op: &str,
    right: &SetOperand,
    field: impl Fn(&str) -> String,
) -> String {
    match right {
        SetOperand::Field(name) => format!("\"{}\" {} {}", left, op, field(name)),
        SetOperand::Values(values) => {
            let list = values
                .iter()
                .map(|v| format!("\"{}\"", v))
                .collect::<Vec<_>>()
                .join(",");
            format!("{} {} [{}]", field(left), op, list)
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize(None))
    }
}
