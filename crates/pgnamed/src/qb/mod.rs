//! Named-parameter SELECT builder.
//!
//! Clauses are collected as raw SQL fragments; values are bound by name and
//! referenced in fragments as `:name`. Rendering turns the names into
//! `$1, $2, ...` and flattens the values in the same order.
//!
//! # Features
//!
//! - **Replace or append**: `select`/`add_select`, `where_`/`and_where`, ... per clause
//! - **List expansion**: a list parameter expands to one placeholder per element
//! - **Stable numbering**: positions follow parameter insertion order
//! - **Subqueries**: embed `to_named_sql()` and `merge_params_from` the inner builder
//!
//! # Usage
//!
//! ```ignore
//! use pgnamed::qb;
//!
//! let mut q = qb::select("u.id, u.name");
//! q.from("users u")
//!     .left_join("roles r", "r.user_id = u.id")
//!     .where_("u.age > :min_age")
//!     .and_where("r.name IN (:roles)")
//!     .order_by("u.name")
//!     .set_max_results(20)
//!     .set_param("min_age", 18i32)
//!     .set_param_list("roles", ["admin", "staff"]);
//!
//! let rows = client.query(&q.to_sql(), &q.params_ref()).await?;
//! ```

mod clause;
mod param;
mod params;
pub mod placeholder;
mod select;

pub use clause::{ClauseGroup, Join, JoinKind};
pub use param::{Param, ParamList, ParamValue};
pub use params::NamedParams;
pub use select::NamedQb;

/// Create a builder with the given SELECT list.
///
/// # Example
/// ```ignore
/// let mut q = pgnamed::qb::select("id, name");
/// q.from("users");
/// ```
pub fn select(cols: &str) -> NamedQb {
    let mut qb = NamedQb::new();
    qb.select(cols);
    qb
}

/// Create a builder with the given FROM expression.
///
/// Use this for complex FROM clauses like aliases or subqueries.
///
/// # Example
/// ```ignore
/// let mut q = pgnamed::qb::select_from("users u");
/// q.select("u.*").inner_join("orders o", "u.id = o.user_id");
/// ```
pub fn select_from(from_expr: &str) -> NamedQb {
    let mut qb = NamedQb::new();
    qb.from(from_expr);
    qb
}
