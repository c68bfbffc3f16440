//! Tests for `#[derive(Record)]`.

use sift::{Predicate, Query, QueryEngine, Record, Timestamp, ToValue, Value};

#[derive(Debug, Clone, PartialEq, sift_macros::Record)]
struct Post {
    title: String,
    #[record(rename = "createdAt")]
    created_at: String,
    views: u32,
    draft: bool,
    tags: Vec<String>,
    editor: Option<String>,
    #[record(skip)]
    body: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Open,
    Closed,
}

impl ToValue for Status {
    fn to_value(&self) -> Value<'_> {
        match self {
            Status::Open => Value::from("open"),
            Status::Closed => Value::from("closed"),
        }
    }
}

#[derive(sift_macros::Record)]
struct Ticket {
    status: Status,
    #[record(rename = "dueAt")]
    due: Timestamp,
}

#[derive(sift_macros::Record)]
struct Wrapper<T: ToValue> {
    inner: T,
}

fn post(title: &str, created_at: &str, views: u32, draft: bool) -> Post {
    Post {
        title: title.to_string(),
        created_at: created_at.to_string(),
        views,
        draft,
        tags: vec!["rust".to_string()],
        editor: None,
        body: "secret".to_string(),
    }
}

#[test]
fn field_constants() {
    assert_eq!(Post::TITLE, "title");
    assert_eq!(Post::CREATED_AT, "createdAt");
    assert_eq!(Post::VIEWS, "views");
    assert_eq!(Ticket::DUE_AT, "dueAt");
}

#[test]
fn field_access() {
    let p = post("Hello", "2021-04-09", 10, false);
    assert_eq!(p.field("title"), Value::from("Hello"));
    assert_eq!(p.field(Post::CREATED_AT), Value::from("2021-04-09"));
    assert_eq!(p.field("views"), Value::from(10));
    assert_eq!(p.field("draft"), Value::from(false));
    assert_eq!(p.field("tags"), Value::from(vec!["rust"]));
    assert!(p.field("editor").is_empty());
    // Renamed and skipped fields are not reachable by their Rust names.
    assert!(p.field("created_at").is_empty());
    assert!(p.field("body").is_empty());
    assert_eq!(p.body, "secret");
}

#[test]
fn custom_field_types() {
    let t = Ticket {
        status: Status::Closed,
        due: Timestamp(5),
    };
    assert_eq!(t.field("status"), Value::from("closed"));
    assert_eq!(t.field("dueAt"), Value::Timestamp(Timestamp(5)));
    assert_ne!(t.field("status"), Status::Open.to_value());

    let w = Wrapper { inner: 3.5f64 };
    assert_eq!(w.field("inner"), Value::from(3.5));
}

#[test]
fn derived_records_run_through_the_engine() {
    let posts = vec![
        post("b", "2021-04-09T22:28:29.954Z", 5, false),
        post("a", "Sat Apr 9 2021", 50, false),
        post("c", "2021-04-08", 500, true),
    ];
    let engine = QueryEngine::builder()
        .register_dates(Post::CREATED_AT)
        .build();

    let query = Query::new()
        .filter(Predicate::eq(Post::DRAFT, false))
        .order_desc(Post::CREATED_AT)
        .build();
    let titles: Vec<&str> = engine
        .execute(&posts, &query)
        .unwrap()
        .into_iter()
        .map(|p| p.title.as_str())
        .collect();
    assert_eq!(titles, vec!["b", "a"]);

    let popular = Predicate::is_in(Post::VIEWS, [50, 500]);
    assert_eq!(engine.count(&posts, &popular).unwrap(), 2);
    assert_eq!(
        engine.execute_cloned(&posts, &Query::from(popular).limit(1)).unwrap(),
        vec![posts[1].clone()]
    );
}
