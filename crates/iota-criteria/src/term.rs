//! Leaf terms of a criteria tree

use crate::quote::{escape_like, quote_value};
use std::fmt;

/// Comparison operators a [`Term::Compare`] can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    /// `LIKE 'value%'`
    Begins,
    /// `LIKE '%value%'`
    Contains,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Equal => write!(f, "="),
            Operator::NotEqual => write!(f, "<>"),
            Operator::LessThan => write!(f, "<"),
            Operator::LessThanOrEqual => write!(f, "<="),
            Operator::GreaterThan => write!(f, ">"),
            Operator::GreaterThanOrEqual => write!(f, ">="),
            Operator::Begins | Operator::Contains => write!(f, "LIKE"),
        }
    }
}

/// A single condition on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Compare {
        field: String,
        operator: Operator,
        value: String,
    },
    /// Rendered as `=` for zero or one value, `IN (..)` otherwise
    In { field: String, values: Vec<String> },
    Between {
        field: String,
        low: String,
        high: String,
    },
    /// Raw SQL, rendered verbatim
    Literal(String),
}

impl Term {
    pub fn compare(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Term::Compare {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// The field this term constrains; `None` for literals
    pub fn field(&self) -> Option<&str> {
        match self {
            Term::Compare { field, .. } | Term::In { field, .. } | Term::Between { field, .. } => {
                Some(field)
            }
            Term::Literal(_) => None,
        }
    }

    /// Quote `value` the way this term quotes its operand. `LIKE` terms
    /// escape wildcards in the value before adding their own.
    pub fn quote_value(&self, value: &str) -> String {
        match self {
            Term::Compare {
                operator: Operator::Begins,
                ..
            } => quote_value(&format!("{}%", escape_like(value))),
            Term::Compare {
                operator: Operator::Contains,
                ..
            } => quote_value(&format!("%{}%", escape_like(value))),
            _ => quote_value(value),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Compare {
                field,
                operator,
                value,
            } => write!(f, "{} {} {}", field, operator, self.quote_value(value)),
            Term::In { field, values } => match values.as_slice() {
                [] => write!(f, "{} = {}", field, quote_value("")),
                [value] => write!(f, "{} = {}", field, quote_value(value)),
                values => {
                    let quoted: Vec<String> = values.iter().map(|v| quote_value(v)).collect();
                    write!(f, "{} IN ({})", field, quoted.join(","))
                }
            },
            Term::Between { field, low, high } => write!(
                f,
                "{} BETWEEN {} AND {}",
                field,
                quote_value(low),
                quote_value(high)
            ),
            Term::Literal(sql) => f.write_str(sql),
        }
    }
}
