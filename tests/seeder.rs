// tests/seeder.rs

use feed_core::seeder::seed_database;
use sqlx::PgPool;

#[sqlx::test]
async fn seeding_twice_is_idempotent(pool: PgPool) {
    seed_database(&pool).await.expect("first seed must succeed");
    seed_database(&pool).await.expect("second seed must succeed");

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    let posts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
        .fetch_one(&pool)
        .await
        .unwrap();
    let comments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(&pool)
        .await
        .unwrap();
    let likes: i64 = sqlx::query_scalar(
        "SELECT (SELECT COUNT(*) FROM post_likes) + (SELECT COUNT(*) FROM comment_likes)",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(users, 3);
    assert_eq!(posts, 1);
    assert_eq!(comments, 3);
    assert_eq!(likes, 3);
}
