//! Public-API scenarios: subqueries, clones, and rebinding.

use pgnamed::{NamedQb, QbError, qb};

fn debug_params(qb: &NamedQb) -> Vec<String> {
    qb.params().to_debug_strings()
}

/// Highest `$n` index in rendered SQL.
fn max_placeholder(sql: &str) -> usize {
    sql.split('$')
        .skip(1)
        .filter_map(|s| {
            let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<usize>().ok()
        })
        .max()
        .unwrap_or(0)
}

#[test]
fn nested_subqueries_number_through_merge_order() {
    let mut roles = qb::select("r.user_id");
    roles
        .from("roles r")
        .where_("r.name IN (:roles)")
        .set_param_list("roles", ["admin", "owner"]);

    let mut users = qb::select("u.id");
    users
        .from("users u")
        .where_("u.active = :active")
        .and_where(&format!("u.id IN ({})", roles.to_named_sql()))
        .set_param("active", true)
        .merge_params_from(&roles);

    let mut orders = qb::select_from("orders o");
    orders
        .select("o.id, o.total")
        .where_("o.total > :min_total")
        .and_where(&format!("o.user_id IN ({})", users.to_named_sql()))
        .order_by("o.total DESC")
        .set_max_results(50)
        .set_param("min_total", 100i64)
        .merge_params_from(&users);

    let sql = orders.to_sql();
    assert_eq!(
        sql,
        "SELECT o.id, o.total FROM orders o WHERE (o.total > $1) AND (o.user_id IN (\
         SELECT u.id FROM users u WHERE (u.active = $2) AND (u.id IN (\
         SELECT r.user_id FROM roles r WHERE (r.name IN ($3,$4)))))) \
         ORDER BY o.total DESC LIMIT 50"
    );
    assert_eq!(
        debug_params(&orders),
        vec!["100", "true", "\"admin\"", "\"owner\""]
    );
    assert_eq!(max_placeholder(&sql), orders.params().len());
    assert_eq!(orders.validate(), Ok(()));
}

#[test]
fn shared_name_across_merge_takes_outer_position() {
    let mut inner = qb::select("id");
    inner
        .from("b")
        .where_("tenant = :tenant")
        .set_param("tenant", 7i32);

    let mut outer = qb::select("id");
    outer
        .from("a")
        .where_("tenant = :tenant")
        .and_where(&format!("id IN ({})", inner.to_named_sql()))
        .set_param("tenant", 1i32)
        .merge_params_from(&inner);

    assert_eq!(
        outer.to_sql(),
        "SELECT id FROM a WHERE (tenant = $1) AND (id IN (SELECT id FROM b WHERE (tenant = $1)))"
    );
    // the merged value wins
    assert_eq!(debug_params(&outer), vec!["7"]);
}

#[test]
fn clone_is_independent() {
    let mut base = qb::select("*");
    base.from("events").where_("kind = :kind").set_param("kind", "click");

    let mut paged = base.clone();
    paged.paginate(2, 25).set_param("kind", "view");

    assert_eq!(base.to_sql(), "SELECT * FROM events WHERE (kind = $1)");
    assert_eq!(debug_params(&base), vec!["\"click\""]);
    assert_eq!(
        paged.to_sql(),
        "SELECT * FROM events WHERE (kind = $1) LIMIT 25 OFFSET 25"
    );
    assert_eq!(debug_params(&paged), vec!["\"view\""]);
}

#[test]
fn rebinding_after_unset_moves_to_end() {
    let mut q = qb::select("*");
    q.from("t")
        .where_("a = :a AND b = :b")
        .set_param("a", 1i32)
        .set_param("b", 2i32)
        .unset_param("a");

    assert_eq!(q.to_sql(), "SELECT * FROM t WHERE (a = :a AND b = $1)");
    assert_eq!(q.validate(), Err(QbError::UnboundPlaceholder("a".to_string())));

    q.set_param("a", 3i32);
    assert_eq!(q.to_sql(), "SELECT * FROM t WHERE (a = $2 AND b = $1)");
    assert_eq!(debug_params(&q), vec!["2", "3"]);
}
