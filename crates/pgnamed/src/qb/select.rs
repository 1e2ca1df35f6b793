//! SELECT builder with named parameters.

use crate::error::{QbError, QbResult};
use crate::qb::clause::{ClauseGroup, Join, JoinKind};
use crate::qb::param::{Param, ParamList, ParamValue};
use crate::qb::params::NamedParams;
use crate::qb::placeholder;
use std::collections::HashMap;
use std::fmt::Write;
use tokio_postgres::types::ToSql;

/// SELECT query builder with `:name` parameters.
///
/// Every mutator takes `&mut self` and returns it, so calls chain on one
/// builder instance. Rendering never mutates the builder.
#[derive(Clone, Debug)]
pub struct NamedQb {
    /// SELECT columns
    select: ClauseGroup,
    /// FROM expression
    from: String,
    /// JOIN clauses, in call order
    joins: Vec<Join>,
    /// WHERE predicates
    where_: ClauseGroup,
    /// GROUP BY expressions
    group_by: ClauseGroup,
    /// HAVING predicates
    having: ClauseGroup,
    /// ORDER BY expressions
    order_by: ClauseGroup,
    /// LIMIT (0 = none)
    max_results: u64,
    /// OFFSET (0 = none)
    first_result: u64,
    /// Named parameters
    params: NamedParams,
}

impl Default for NamedQb {
    fn default() -> Self {
        Self::new()
    }
}

impl NamedQb {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            select: ClauseGroup::list(),
            from: String::new(),
            joins: Vec::new(),
            where_: ClauseGroup::predicate(),
            group_by: ClauseGroup::list(),
            having: ClauseGroup::predicate(),
            order_by: ClauseGroup::list(),
            max_results: 0,
            first_result: 0,
            params: NamedParams::new(),
        }
    }

    // ==================== SELECT / FROM ====================

    /// Replace the SELECT list with `cols`.
    pub fn select(&mut self, cols: &str) -> &mut Self {
        self.select.set(cols);
        self
    }

    /// Append to the SELECT list.
    pub fn add_select(&mut self, cols: &str) -> &mut Self {
        self.select.add(cols);
        self
    }

    /// Set the FROM expression (table, alias, or subquery).
    pub fn from(&mut self, from_expr: &str) -> &mut Self {
        self.from = from_expr.to_string();
        self
    }

    // ==================== JOIN ====================

    fn push_join(&mut self, kind: JoinKind, table: &str, on: &str) -> &mut Self {
        self.joins.push(Join::new(kind, table, on));
        self
    }

    /// Add `JOIN table ON (on)`.
    pub fn join(&mut self, table: &str, on: &str) -> &mut Self {
        self.push_join(JoinKind::Plain, table, on)
    }

    /// Add `INNER JOIN table ON (on)`.
    pub fn inner_join(&mut self, table: &str, on: &str) -> &mut Self {
        self.push_join(JoinKind::Inner, table, on)
    }

    /// Add `LEFT JOIN table ON (on)`.
    pub fn left_join(&mut self, table: &str, on: &str) -> &mut Self {
        self.push_join(JoinKind::Left, table, on)
    }

    /// Add `RIGHT JOIN table ON (on)`.
    pub fn right_join(&mut self, table: &str, on: &str) -> &mut Self {
        self.push_join(JoinKind::Right, table, on)
    }

    /// Add `FULL JOIN table ON (on)`.
    pub fn full_join(&mut self, table: &str, on: &str) -> &mut Self {
        self.push_join(JoinKind::Full, table, on)
    }

    // ==================== WHERE / HAVING ====================

    /// Replace all WHERE predicates with `cond`.
    pub fn where_(&mut self, cond: &str) -> &mut Self {
        self.where_.set(cond);
        self
    }

    /// Add a WHERE predicate (`AND`-ed with the others).
    pub fn and_where(&mut self, cond: &str) -> &mut Self {
        self.where_.add(cond);
        self
    }

    /// Replace all HAVING predicates with `cond`.
    pub fn having(&mut self, cond: &str) -> &mut Self {
        self.having.set(cond);
        self
    }

    /// Add a HAVING predicate (`AND`-ed with the others).
    pub fn and_having(&mut self, cond: &str) -> &mut Self {
        self.having.add(cond);
        self
    }

    // ==================== Grouping & Ordering ====================

    /// Replace the GROUP BY list.
    pub fn group_by(&mut self, expr: &str) -> &mut Self {
        self.group_by.set(expr);
        self
    }

    /// Append to the GROUP BY list.
    pub fn add_group_by(&mut self, expr: &str) -> &mut Self {
        self.group_by.add(expr);
        self
    }

    /// Remove GROUP BY entirely.
    pub fn clean_group_by(&mut self) -> &mut Self {
        self.group_by.clear();
        self
    }

    /// Replace the ORDER BY list.
    pub fn order_by(&mut self, expr: &str) -> &mut Self {
        self.order_by.set(expr);
        self
    }

    /// Append to the ORDER BY list.
    pub fn add_order_by(&mut self, expr: &str) -> &mut Self {
        self.order_by.add(expr);
        self
    }

    /// Remove ORDER BY entirely.
    pub fn clean_order_by(&mut self) -> &mut Self {
        self.order_by.clear();
        self
    }

    // ==================== Pagination ====================

    /// Set LIMIT. `0` omits the clause.
    pub fn set_max_results(&mut self, n: u64) -> &mut Self {
        self.max_results = n;
        self
    }

    /// Set OFFSET. `0` omits the clause.
    pub fn set_first_result(&mut self, n: u64) -> &mut Self {
        self.first_result = n;
        self
    }

    /// Pagination helper.
    ///
    /// `page` is 1-based (clamped to >= 1).
    /// `per_page` is clamped to >= 1.
    pub fn paginate(&mut self, page: u64, per_page: u64) -> &mut Self {
        let p = page.max(1);
        let size = per_page.max(1);
        self.max_results = size;
        self.first_result = (p - 1).saturating_mul(size);
        self
    }

    pub fn max_results(&self) -> u64 {
        self.max_results
    }

    pub fn first_result(&self) -> u64 {
        self.first_result
    }

    // ==================== Parameters ====================

    /// Bind a single value to `:name`.
    pub fn set_param<T: ToSql + Send + Sync + 'static>(&mut self, name: &str, value: T) -> &mut Self {
        self.params.set(name, ParamValue::scalar(value));
        self
    }

    /// Bind a list to `:name`; it expands to one placeholder per element.
    pub fn set_param_list<T, I>(&mut self, name: &str, values: I) -> &mut Self
    where
        T: ToSql + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
    {
        self.params.set(name, ParamValue::sequence(values));
        self
    }

    /// Bind a pre-built value to `:name`.
    pub fn set_param_value(&mut self, name: &str, value: impl Into<ParamValue>) -> &mut Self {
        self.params.set(name, value.into());
        self
    }

    /// Remove the binding for `:name`. The placeholder text stays in the SQL.
    pub fn unset_param(&mut self, name: &str) -> &mut Self {
        self.params.remove(name);
        self
    }

    /// Copy every parameter of `other` into this builder, in `other`'s order.
    ///
    /// Names already bound here keep their position and take `other`'s value;
    /// new names are appended. Use this after embedding `other.to_named_sql()`
    /// as a subquery.
    pub fn merge_params_from(&mut self, other: &NamedQb) -> &mut Self {
        for (name, value) in other.params.iter() {
            self.params.set(name, value.clone());
        }
        self
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.params.contains(name)
    }

    /// Bound parameter names in positional order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(name, _)| name)
    }

    // ==================== Rendering ====================

    /// Render the statement with `:name` placeholders left as written.
    pub fn to_named_sql(&self) -> String {
        let mut clauses: Vec<String> = Vec::with_capacity(9);

        if let Some(s) = self.select.render("SELECT") {
            clauses.push(s);
        }
        if !self.from.is_empty() {
            clauses.push(format!("FROM {}", self.from));
        }
        if !self.joins.is_empty() {
            let joins: Vec<String> = self.joins.iter().map(Join::render).collect();
            clauses.push(joins.join(" "));
        }
        if let Some(s) = self.where_.render("WHERE") {
            clauses.push(s);
        }
        if let Some(s) = self.group_by.render("GROUP BY") {
            clauses.push(s);
        }
        if let Some(s) = self.having.render("HAVING") {
            clauses.push(s);
        }
        if let Some(s) = self.order_by.render("ORDER BY") {
            clauses.push(s);
        }
        if self.max_results != 0 {
            clauses.push(format!("LIMIT {}", self.max_results));
        }
        if self.first_result != 0 {
            clauses.push(format!("OFFSET {}", self.first_result));
        }

        clauses.join(" ")
    }

    /// Positional text for every bound name, numbered in insertion order.
    fn positional_map(&self) -> HashMap<&str, String> {
        let mut map = HashMap::with_capacity(self.params.len());
        let mut idx: usize = 0;

        for (name, value) in self.params.iter() {
            let mut text = String::new();
            for i in 0..value.slots() {
                idx += 1;
                if i > 0 {
                    text.push(',');
                }
                let _ = write!(&mut text, "${}", idx);
            }
            map.insert(name, text);
        }
        map
    }

    /// Render SQL with `$1, $2, ...` placeholders.
    ///
    /// Positions follow parameter insertion order, not where the names appear
    /// in the text. A name used several times gets the same number(s) at each
    /// use. Placeholders without a bound parameter are left untouched.
    pub fn to_sql(&self) -> String {
        let named = self.to_named_sql();
        let map = self.positional_map();
        let sql = placeholder::rewrite(&named, |name| map.get(name).map(String::as_str));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "pgnamed.sql",
            sql = %sql,
            params = self.params.slots(),
            "rendered query"
        );

        sql
    }

    /// Flatten the parameters into `$1, $2, ...` order.
    pub fn params(&self) -> ParamList {
        let mut list = ParamList::with_capacity(self.params.slots());
        for (_, value) in self.params.iter() {
            for p in value.iter() {
                list.push_param(Param::clone(p));
            }
        }
        list
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .flat_map(|(_, value)| value.iter())
            .map(Param::as_ref)
            .collect()
    }

    /// Render SQL and parameters together.
    pub fn build(&self) -> (String, ParamList) {
        (self.to_sql(), self.params())
    }

    // ==================== Validation ====================

    /// Check the builder for mismatches that would fail at the database.
    ///
    /// Reports the first of: an invalid parameter name, an empty SELECT or FROM,
    /// a placeholder with no bound parameter, a bound parameter no placeholder uses.
    pub fn validate(&self) -> QbResult<()> {
        let result = self.check();

        #[cfg(feature = "tracing")]
        {
            if let Err(err) = &result {
                tracing::warn!(target: "pgnamed.sql", error = %err, "query builder validation failed");
            }
        }

        result
    }

    fn check(&self) -> QbResult<()> {
        if let Some(name) = self.param_names().find(|n| !placeholder::is_valid_name(n)) {
            return Err(QbError::InvalidParamName(name.to_string()));
        }
        if self.select.is_empty() {
            return Err(QbError::EmptyClause("SELECT"));
        }
        if self.from.is_empty() {
            return Err(QbError::EmptyClause("FROM"));
        }

        let named = self.to_named_sql();
        let mut used: Vec<&str> = Vec::new();
        for ph in placeholder::placeholders(&named) {
            if !self.params.contains(ph.name) {
                return Err(QbError::unbound(ph.name));
            }
            used.push(ph.name);
        }
        if let Some(name) = self.param_names().find(|n| !used.contains(n)) {
            return Err(QbError::unused(name));
        }
        Ok(())
    }

    /// [`validate`](Self::validate), then [`build`](Self::build).
    pub fn try_build(&self) -> QbResult<(String, ParamList)> {
        self.validate()?;
        Ok(self.build())
    }
}

impl std::fmt::Display for NamedQb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_named_sql())
    }
}
