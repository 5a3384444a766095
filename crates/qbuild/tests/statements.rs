//! End-to-end statement building through the public API.

use qbuild::{
    and, bind, delete_from, insert_into, lit, multiple, nested, select, update, with, Dialect,
    Predicate, Statement,
};

/// Conditional search query: filters are only appended when present.
fn member_search(name: Option<&str>, ordered: bool) -> Statement {
    let base = select(&["*"]).from("members");

    base.map(|q| match name {
        Some(name) => q.where_(and("name = ?", [bind(name.to_string())])),
        None => q.where_(Predicate::new()),
    })
    .map(|q| if ordered { q.order_by(&["created_at DESC"]) } else { q })
}

#[test]
fn test_member_search_variants() {
    assert_eq!(member_search(None, false).sql(), "SELECT * FROM members");
    assert_eq!(
        member_search(None, true).sql(),
        "SELECT * FROM members ORDER BY created_at DESC"
    );
    assert_eq!(
        member_search(Some("John Doe"), false).sql(),
        "SELECT * FROM members WHERE name = ?"
    );
    assert_eq!(
        member_search(Some("John Doe"), true).sql(),
        "SELECT * FROM members WHERE name = ? ORDER BY created_at DESC"
    );
    assert_eq!(member_search(Some("John Doe"), true).args().len(), 1);
}

#[test]
fn test_insert_then_select_cte() {
    let q = with(
        "inserted",
        insert_into("audit_log", &["actor", "action"])
            .values([bind("alice"), bind("login")])
            .returning(&["id"]),
    )
    .select(&["id"])
    .from("inserted");

    let (sql, args) = q.build();
    assert_eq!(
        sql,
        "WITH inserted AS ( INSERT INTO audit_log ( actor , action ) \
         VALUES ( ? , ? ) RETURNING id ) SELECT id FROM inserted"
    );
    assert_eq!(args.len(), 2);
}

#[test]
fn test_dialect_numbering_spans_sub_expressions() {
    let q = with(
        "recent",
        select(&["id"])
            .from("events")
            .where_(and("kind = ?", [bind("click")])),
    )
    .select(&["*"])
    .from("recent")
    .where_(
        and("user_id IN ?", [nested(
            select(&["id"]).from("users").where_(and("plan = ?", [bind("pro")])),
        )])
        .and("created_at > ?", [bind("2026-01-01")]),
    )
    .dialect(Dialect::Postgres);

    assert_eq!(
        q.sql(),
        "WITH recent AS ( SELECT id FROM events WHERE kind = $1 ) \
         SELECT * FROM recent WHERE user_id IN ( SELECT id FROM users WHERE plan = $2 ) \
         AND created_at > $3"
    );
    assert_eq!(format!("{:?}", q.args()), "[\"click\", \"pro\", \"2026-01-01\"]");
}

#[test]
fn test_dialect_render_is_deterministic() {
    let build = || {
        select(&["*"])
            .from("t")
            .where_(and("a = ?", [bind(1i32)]).and("b = ?", [bind(2i32)]))
            .dialect(Dialect::Postgres)
    };
    assert_eq!(build().sql(), build().sql());

    let q = build();
    assert!(std::ptr::eq(q.sql(), q.sql()));
}

#[test]
fn test_multiple_statement_batch() {
    let q = multiple([
        update("counters").set("n = n + ?", [bind(1i64)]),
        delete_from("counters").where_(and("n > ?", [bind(100i64)])),
    ]);
    assert_eq!(
        q.sql(),
        "UPDATE counters SET n = n + ? ; DELETE FROM counters WHERE n > ? ;"
    );
    assert_eq!(format!("{:?}", q.args()), "[1, 100]");
}

#[test]
fn test_common_value_types_bind() {
    let day = chrono::NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
    let id = uuid::Uuid::nil();
    let payload = serde_json::json!({"k": 1});

    let q = insert_into("events", &["id", "day", "payload", "note"]).values([
        bind(id),
        bind(day),
        bind(payload),
        lit("NULL"),
    ]);
    assert_eq!(
        q.sql(),
        "INSERT INTO events ( id , day , payload , note ) VALUES ( ? , ? , ? , NULL )"
    );
    assert_eq!(q.args().len(), 3);
}

#[test]
fn test_shared_base_fans_out_across_threads() {
    let base = select(&["*"]).from("events");

    let handles: Vec<_> = (0..4i32)
        .map(|shard| {
            let base = base.clone();
            std::thread::spawn(move || {
                let q = base.where_(and("shard = ?", [bind(shard)]));
                (q.sql().to_string(), q.args().len())
            })
        })
        .collect();

    for handle in handles {
        let (sql, args) = handle.join().unwrap();
        assert_eq!(sql, "SELECT * FROM events WHERE shard = ?");
        assert_eq!(args, 1);
    }
    assert_eq!(base.sql(), "SELECT * FROM events");
}
