//! # pgnamed
//!
//! Build a SELECT statement piece by piece with `:name` parameters, then render
//! it for a positional-parameter driver such as `tokio-postgres`.
//!
//! ## Features
//!
//! - **SQL explicit**: clauses are raw SQL fragments; only values are parameterized
//! - **Named parameters**: bind by name, render to `$1, $2, ...`
//! - **List parameters**: `IN (:ids)` expands to `IN ($1,$2,$3)`
//! - **Composable**: embed one builder's named SQL in another and merge parameters
//! - **Opt-in checks**: `validate()` catches unbound placeholders and unused parameters
//!
//! ## Example
//!
//! ```ignore
//! use pgnamed::NamedQb;
//!
//! let mut q = NamedQb::new();
//! q.select("id")
//!     .from("t")
//!     .where_("age > :a")
//!     .set_param("a", 5i32);
//!
//! assert_eq!(q.to_named_sql(), "SELECT id FROM t WHERE (age > :a)");
//! assert_eq!(q.to_sql(), "SELECT id FROM t WHERE (age > $1)");
//!
//! let rows = client.query(&q.to_sql(), &q.params_ref()).await?;
//! ```

pub mod error;
pub mod qb;

pub use error::{QbError, QbResult};

// Re-export qb module for easy access
pub use qb::{
    select, select_from, ClauseGroup, Join, JoinKind, NamedParams, NamedQb, Param, ParamList,
    ParamValue,
};
