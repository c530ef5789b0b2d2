//! PostgreSQL repository tests. Run with `DATABASE_URL` set and `--ignored`.

use shortlink::domain::entities::NewShortLink;
use shortlink::domain::repositories::LinkRepository;
use shortlink::error::AppError;
use shortlink::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(code: &str, url: &str) -> NewShortLink {
    NewShortLink {
        code: code.to_string(),
        original_url: url.to_string(),
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_and_find(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let created = repo
        .insert_if_absent(new_link("abc123", "https://example.com"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(created.code, "abc123");
    assert_eq!(created.visits, 0);

    let found = repo.find_by_code("abc123").await.unwrap().unwrap();
    assert_eq!(found, created);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_taken_code_returns_none(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert_if_absent(new_link("abc123", "https://first.example.com"))
        .await
        .unwrap();
    let second = repo
        .insert_if_absent(new_link("abc123", "https://second.example.com"))
        .await
        .unwrap();

    assert!(second.is_none());
    let stored = repo.find_by_code("abc123").await.unwrap().unwrap();
    assert_eq!(stored.original_url, "https://first.example.com");
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_missing_code(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.find_by_code("zzz999").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_increment_and_totals(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert_eq!(repo.total_visits().await.unwrap(), 0);

    repo.insert_if_absent(new_link("abc123", "https://example.com/a"))
        .await
        .unwrap();
    repo.insert_if_absent(new_link("def456", "https://example.com/b"))
        .await
        .unwrap();

    for expected in 1..=3 {
        let link = repo.increment_visits("abc123").await.unwrap();
        assert_eq!(link.visits, expected);
    }
    repo.increment_visits("def456").await.unwrap();

    assert_eq!(
        repo.find_by_code("abc123").await.unwrap().unwrap().visits,
        3
    );
    assert_eq!(repo.total_visits().await.unwrap(), 4);
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_increment_missing_code(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let err = repo.increment_visits("zzz999").await.unwrap_err();

    assert!(matches!(err, AppError::NotFound { .. }));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_increments_are_not_lost(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    repo.insert_if_absent(new_link("abc123", "https://example.com"))
        .await
        .unwrap();

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_visits("abc123").await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(
        repo.find_by_code("abc123").await.unwrap().unwrap().visits,
        20
    );
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_health_check(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.health_check().await);
}
