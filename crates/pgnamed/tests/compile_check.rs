//! Compile-only tests for core API patterns.
//!
//! These tests verify that key API surfaces compile correctly.
//! They do NOT execute against a database; they only check types and signatures.

#![allow(dead_code)]

use pgnamed::{NamedQb, ParamList, QbResult};
use tokio_postgres::types::ToSql;

// Same parameter shape as `tokio_postgres::Client::query`.
fn driver_query(_sql: &str, _params: &[&(dyn ToSql + Sync)]) -> usize {
    _params.len()
}

fn assert_send_sync<T: Send + Sync>() {}
fn assert_clone<T: Clone>() {}

#[test]
fn builder_is_send_sync_clone() {
    assert_send_sync::<NamedQb>();
    assert_send_sync::<ParamList>();
    assert_clone::<NamedQb>();
}

#[test]
fn params_ref_fits_driver_signature() {
    let mut qb = NamedQb::new();
    qb.select("id")
        .from("users")
        .where_("id IN (:ids)")
        .set_param_list("ids", vec![1i64, 2, 3]);

    assert_eq!(driver_query(&qb.to_sql(), &qb.params_ref()), 3);

    let (sql, params) = qb.build();
    assert_eq!(driver_query(&sql, &params.as_refs()), 3);
}

#[test]
fn chained_calls_return_same_builder() {
    let mut qb = NamedQb::new();
    let same: &mut NamedQb = qb.select("a").from("t").and_where("x = :x");
    same.set_param("x", String::from("owned"));
    assert!(qb.has_param("x"));
}

fn try_render(qb: &NamedQb) -> QbResult<String> {
    let (sql, _) = qb.try_build()?;
    Ok(sql)
}

#[test]
fn try_build_propagates_with_question_mark() {
    let mut qb = NamedQb::new();
    qb.select("a").from("t");
    assert_eq!(try_render(&qb).as_deref(), Ok("SELECT a FROM t"));
}
