//! Builds criteria trees from user input
//!
//! Every field constructor looks its value up in the input map. Missing or
//! empty input produces no term, and [`SearchCriteria::land`] /
//! [`SearchCriteria::lor`] drop those absent nodes, so a search form can
//! describe every filter it offers and only the filled-in ones reach the
//! WHERE clause.
//!
//! A field named `alias.field` reads the input key `alias-field` first and
//! falls back to `field`, so one form can drive criteria over joined tables.

use crate::error::{CriteriaError, CriteriaResult};
use crate::expr::Criterion;
use crate::input::InputValue;
use crate::term::{Operator, Term};
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    input: HashMap<String, InputValue>,
}

impl SearchCriteria {
    pub fn new<I, K, V>(input: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<InputValue>,
    {
        Self {
            input: input
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Build from decoded request parameters
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self::new(params.iter().map(|(key, value)| (key.clone(), value.clone())))
    }

    pub fn input(&self) -> &HashMap<String, InputValue> {
        &self.input
    }

    pub fn eq(&self, field: &str) -> Option<Criterion> {
        self.compare(field, Operator::Equal)
    }

    pub fn ne(&self, field: &str) -> Option<Criterion> {
        self.compare(field, Operator::NotEqual)
    }

    pub fn lt(&self, field: &str) -> Option<Criterion> {
        self.compare(field, Operator::LessThan)
    }

    pub fn le(&self, field: &str) -> Option<Criterion> {
        self.compare(field, Operator::LessThanOrEqual)
    }

    pub fn gt(&self, field: &str) -> Option<Criterion> {
        self.compare(field, Operator::GreaterThan)
    }

    pub fn ge(&self, field: &str) -> Option<Criterion> {
        self.compare(field, Operator::GreaterThanOrEqual)
    }

    pub fn begins(&self, field: &str) -> Option<Criterion> {
        self.compare(field, Operator::Begins)
    }

    pub fn contains(&self, field: &str) -> Option<Criterion> {
        self.compare(field, Operator::Contains)
    }

    /// Match any of the field's values; accepts single and list input
    pub fn in_set(&self, field: &str) -> Option<Criterion> {
        let values = self.lookup(field)?.to_vec();
        Some(Term::In {
            field: field.to_string(),
            values,
        }
        .into())
    }

    /// `BETWEEN` over the `<field>_lo` and `<field>_hi` inputs; absent
    /// unless both bounds are given
    pub fn between(&self, field: &str) -> Option<Criterion> {
        let low = self.scalar(&format!("{}_lo", field))?;
        let high = self.scalar(&format!("{}_hi", field))?;
        Some(Self::between_term(field, low, high))
    }

    /// Like [`SearchCriteria::between`], but a single bound degrades to
    /// `>=` or `<=`
    pub fn between_open(&self, field: &str) -> Option<Criterion> {
        let low = self.scalar(&format!("{}_lo", field));
        let high = self.scalar(&format!("{}_hi", field));
        match (low, high) {
            (Some(low), Some(high)) => Some(Self::between_term(field, low, high)),
            (Some(low), None) => Some(Term::compare(field, Operator::GreaterThanOrEqual, low).into()),
            (None, Some(high)) => Some(Term::compare(field, Operator::LessThanOrEqual, high).into()),
            (None, None) => None,
        }
    }

    /// Raw SQL passed through untouched. Never absent.
    pub fn literal(&self, sql: impl Into<String>) -> Option<Criterion> {
        Some(Term::Literal(sql.into()).into())
    }

    pub fn land(&self, nodes: impl IntoIterator<Item = Option<Criterion>>) -> Option<Criterion> {
        Criterion::all(nodes)
    }

    pub fn lor(&self, nodes: impl IntoIterator<Item = Option<Criterion>>) -> Option<Criterion> {
        Criterion::any(nodes)
    }

    pub fn lnot(&self, node: Option<Criterion>) -> Option<Criterion> {
        Criterion::negate(node)
    }

    /// Negate a list of nodes holding at most one present node
    pub fn lnot_many(
        &self,
        nodes: impl IntoIterator<Item = Option<Criterion>>,
    ) -> CriteriaResult<Option<Criterion>> {
        let mut present: Vec<Criterion> = nodes.into_iter().flatten().collect();
        if present.len() > 1 {
            return Err(CriteriaError::NotArity {
                count: present.len(),
            });
        }
        Ok(Criterion::negate(present.pop()))
    }

    fn compare(&self, field: &str, operator: Operator) -> Option<Criterion> {
        let value = self.scalar(field)?;
        Some(Term::compare(field, operator, value).into())
    }

    fn between_term(field: &str, low: &str, high: &str) -> Criterion {
        Term::Between {
            field: field.to_string(),
            low: low.to_string(),
            high: high.to_string(),
        }
        .into()
    }

    fn scalar(&self, field: &str) -> Option<&str> {
        let value = self.lookup(field)?;
        let single = value.as_single();
        if single.is_none() {
            warn!("Ignoring list input for scalar criterion on '{}'", field);
        }
        single
    }

    fn lookup(&self, field: &str) -> Option<&InputValue> {
        let value = match field.split_once('.') {
            Some((alias, name)) => self
                .input
                .get(&format!("{}-{}", alias, name))
                .or_else(|| self.input.get(name)),
            None => self.input.get(field),
        }?;
        (!value.is_empty()).then_some(value)
    }
}
