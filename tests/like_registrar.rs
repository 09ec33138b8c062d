// tests/like_registrar.rs

mod common;

use feed_core::error::FeedError;
use feed_core::likes::{register_like, LikeTarget, COMMENT_LIKE_WEIGHT, POST_LIKE_WEIGHT};
use feed_core::store::EventStore;
use futures::future::join_all;
use sqlx::PgPool;
use uuid::Uuid;

use common::{create_comment, create_post, create_user};

#[sqlx::test]
async fn first_post_like_succeeds_with_weight(pool: PgPool) {
    let store = EventStore::new(pool);
    let author = create_user(&store, "author").await;
    let fan = create_user(&store, "fan").await;
    let post = create_post(&store, author, "a post").await;

    let record = register_like(&store, fan, LikeTarget::Post(post))
        .await
        .expect("first like must succeed");

    assert_eq!(record.user_id, fan);
    assert_eq!(record.target, LikeTarget::Post(post));
    assert_eq!(record.weight, POST_LIKE_WEIGHT);
}

#[sqlx::test]
async fn duplicate_post_like_is_already_liked(pool: PgPool) {
    let store = EventStore::new(pool);
    let author = create_user(&store, "author").await;
    let fan = create_user(&store, "fan").await;
    let post = create_post(&store, author, "a post").await;

    register_like(&store, fan, LikeTarget::Post(post))
        .await
        .expect("first like must succeed");

    let second = register_like(&store, fan, LikeTarget::Post(post)).await;
    assert!(matches!(second, Err(FeedError::AlreadyLiked)));

    // Repeats keep failing the same way.
    let third = register_like(&store, fan, LikeTarget::Post(post)).await;
    assert!(matches!(third, Err(FeedError::AlreadyLiked)));
}

#[sqlx::test]
async fn duplicate_comment_like_is_already_liked(pool: PgPool) {
    let store = EventStore::new(pool);
    let author = create_user(&store, "author").await;
    let fan = create_user(&store, "fan").await;
    let post = create_post(&store, author, "a post").await;
    let comment = create_comment(&store, post, author, None, "a comment").await;

    let record = register_like(&store, fan, LikeTarget::Comment(comment))
        .await
        .expect("first like must succeed");
    assert_eq!(record.weight, COMMENT_LIKE_WEIGHT);

    let second = register_like(&store, fan, LikeTarget::Comment(comment)).await;
    assert!(matches!(second, Err(FeedError::AlreadyLiked)));
}

#[sqlx::test]
async fn same_user_may_like_post_and_its_comments(pool: PgPool) {
    let store = EventStore::new(pool);
    let author = create_user(&store, "author").await;
    let fan = create_user(&store, "fan").await;
    let post = create_post(&store, author, "a post").await;
    let comment = create_comment(&store, post, author, None, "a comment").await;

    register_like(&store, fan, LikeTarget::Post(post))
        .await
        .expect("post like must succeed");
    register_like(&store, fan, LikeTarget::Comment(comment))
        .await
        .expect("comment like is a distinct target and must succeed");
}

#[sqlx::test]
async fn concurrent_duplicate_likes_admit_exactly_one_winner(pool: PgPool) {
    let store = EventStore::new(pool);
    let author = create_user(&store, "author").await;
    let fan = create_user(&store, "fan").await;
    let post = create_post(&store, author, "a post").await;

    const ATTEMPTS: usize = 8;
    let tasks = (0..ATTEMPTS).map(|_| {
        let store = store.clone();
        tokio::spawn(async move { register_like(&store, fan, LikeTarget::Post(post)).await })
    });

    let outcomes = join_all(tasks).await;

    let mut successes = 0;
    let mut already_liked = 0;
    for outcome in outcomes {
        match outcome.expect("like task panicked") {
            Ok(_) => successes += 1,
            Err(FeedError::AlreadyLiked) => already_liked += 1,
            Err(other) => panic!("unexpected error kind: {other}"),
        }
    }

    assert_eq!(successes, 1, "exactly one attempt may win the race");
    assert_eq!(already_liked, ATTEMPTS - 1);

    let stored: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM post_likes WHERE user_id = $1 AND post_id = $2",
    )
    .bind(fan)
    .bind(post)
    .fetch_one(store.pool())
    .await
    .unwrap();
    assert_eq!(stored, 1, "storage must hold a single like row");
}

#[sqlx::test]
async fn liking_missing_target_is_constraint_violation_not_already_liked(pool: PgPool) {
    let store = EventStore::new(pool);
    let fan = create_user(&store, "fan").await;

    let result = register_like(&store, fan, LikeTarget::Post(Uuid::new_v4())).await;
    match result {
        Err(FeedError::ConstraintViolation { .. }) => {}
        other => panic!("expected ConstraintViolation, got {other:?}"),
    }
}
