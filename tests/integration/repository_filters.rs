//! Repository queries against a scratch schema.
//!
//! Needs a Postgres the test user may create schemas in:
//! `DATABASE_URL=postgres://... cargo test -- --ignored`. Each test builds its
//! own schema with the ticketing tables it reads and drops it afterwards.

use class_roster::repository::Repository;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    Executor, Pool, Postgres,
};

const TABLES: &str = r#"
    CREATE TABLE events (
        id bigint PRIMARY KEY,
        title text NOT NULL,
        start_date timestamptz,
        end_date timestamptz,
        status text NOT NULL,
        deleted_at timestamptz
    );
    CREATE TABLE products (
        id bigint PRIMARY KEY,
        event_id bigint NOT NULL,
        title text NOT NULL,
        description text,
        deleted_at timestamptz
    );
    CREATE TABLE orders (
        id bigint PRIMARY KEY,
        first_name text,
        last_name text,
        email text,
        status text NOT NULL,
        deleted_at timestamptz
    );
    CREATE TABLE attendees (
        id bigint PRIMARY KEY,
        order_id bigint NOT NULL,
        product_id bigint NOT NULL,
        first_name text,
        last_name text,
        public_id text,
        checked_in_at timestamptz,
        deleted_at timestamptz
    );
    CREATE TABLE questions (
        id bigint PRIMARY KEY,
        event_id bigint NOT NULL,
        belongs_to text NOT NULL,
        title text NOT NULL,
        deleted_at timestamptz
    );
    CREATE TABLE question_answers (
        id bigserial PRIMARY KEY,
        question_id bigint NOT NULL,
        attendee_id bigint,
        order_id bigint,
        answer text,
        deleted_at timestamptz
    );
"#;

const ROWS: &str = r#"
    INSERT INTO events (id, title, start_date, status, deleted_at) VALUES
        (1, 'Spring Term', '2025-09-01T00:00:00Z', 'LIVE', NULL),
        (2, 'Deleted Term', '2025-10-01T00:00:00Z', 'LIVE', NOW()),
        (3, 'Undated Term', NULL, 'LIVE', NULL),
        (4, 'Last Year', '2024-09-01T00:00:00Z', 'LIVE', NULL),
        (5, 'Draft Term', '2025-11-01T00:00:00Z', 'DRAFT', NULL);

    INSERT INTO products (id, event_id, title, description, deleted_at) VALUES
        (10, 1, 'Mon 22 Sep', '<strong>Ceramics</strong>', NULL),
        (11, 1, 'Mon 29 Sep', NULL, NOW()),
        (20, 2, 'Tue 7 Oct', NULL, NULL);

    INSERT INTO orders (id, first_name, last_name, email, status, deleted_at) VALUES
        (100, 'Grace', 'Hopper', 'grace@example.com', 'COMPLETED', NULL),
        (101, 'Alan', 'Turing', 'alan@example.com', 'COMPLETED', NOW()),
        (102, 'Edsger', 'Dijkstra', 'edsger@example.com', 'CANCELLED', NULL);

    INSERT INTO attendees (id, order_id, product_id, first_name, last_name, public_id, deleted_at) VALUES
        (1000, 100, 10, 'Ada', 'Hopper', 'A-1000', NULL),
        (1001, 100, 10, 'Gone', 'Hopper', 'A-1001', NOW()),
        (1002, 101, 10, 'Deleted', 'Order', 'A-1002', NULL),
        (1003, 102, 10, 'Cancelled', 'Order', 'A-1003', NULL),
        (1100, 100, 11, 'Deleted', 'Product', 'A-1100', NULL),
        (2000, 100, 20, 'Deleted', 'Event', 'A-2000', NULL);

    INSERT INTO questions (id, event_id, belongs_to, title) VALUES
        (1, 1, 'PRODUCT', 'Child age'),
        (2, 1, 'ORDER', 'Phone number');

    INSERT INTO question_answers (question_id, attendee_id, order_id, answer) VALUES
        (1, 1000, 100, '7'),
        (2, NULL, 100, '0400 000 000');
"#;

struct Scratch {
    admin: Pool<Postgres>,
    schema: String,
    repository: Repository,
}

impl Scratch {
    async fn new(name: &str) -> Self {
        let options: PgConnectOptions = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set for repository tests")
            .parse()
            .expect("Invalid DATABASE_URL");
        let schema = format!("roster_{}_{}", name, std::process::id());

        let admin = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await
            .expect("Failed to connect");
        admin
            .execute(format!("DROP SCHEMA IF EXISTS {0} CASCADE; CREATE SCHEMA {0}", schema).as_str())
            .await
            .expect("Failed to create schema");

        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect_with(options.options([("search_path", schema.as_str())]))
            .await
            .expect("Failed to connect to scratch schema");
        pool.execute(TABLES).await.expect("Failed to create tables");
        pool.execute(ROWS).await.expect("Failed to seed rows");

        Self {
            admin,
            schema,
            repository: Repository::new(pool),
        }
    }

    async fn teardown(self) {
        self.repository.pool.close().await;
        self.admin
            .execute(format!("DROP SCHEMA {} CASCADE", self.schema).as_str())
            .await
            .expect("Failed to drop schema");
    }
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_events_skip_deleted_and_unpublished() {
    let scratch = Scratch::new("events").await;

    let events = scratch.repository.events.list_live().await.unwrap();
    let ids: Vec<i64> = events.iter().map(|e| e.id).collect();
    // Most recent start first, undated events last
    assert_eq!(ids, vec![1, 4, 3]);

    scratch.teardown().await;
}

#[tokio::test]
#[ignore]
async fn test_products_count_completed_attendees_only() {
    let scratch = Scratch::new("products").await;

    let products = scratch.repository.products.list_for_event(1).await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, 10);
    assert_eq!(products[0].attendee_count, 1);

    let products = scratch.repository.products.list_for_event(2).await.unwrap();
    assert!(products.is_empty(), "products of a deleted event were listed");

    scratch.teardown().await;
}

#[tokio::test]
#[ignore]
async fn test_attendees_skip_deleted_and_incomplete() {
    let scratch = Scratch::new("attendees").await;

    let attendees = scratch.repository.attendees.list_for_product(10).await.unwrap();
    let ids: Vec<i64> = attendees.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1000]);
    assert_eq!(attendees[0].child_age.as_deref(), Some("7"));
    assert_eq!(attendees[0].parent_phone.as_deref(), Some("0400 000 000"));
    assert_eq!(attendees[0].ticket_id.as_deref(), Some("A-1000"));

    for product_id in [11, 20] {
        let attendees = scratch.repository.attendees.list_for_product(product_id).await.unwrap();
        assert!(attendees.is_empty(), "product {} should list nobody", product_id);
    }

    scratch.teardown().await;
}
