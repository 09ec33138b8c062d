use dotenvy::dotenv;

use feed_core::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    let pool = feed_core::connect_pool(&config).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("database migrations completed");

    feed_core::seeder::seed_database(&pool).await?;

    let store = feed_core::EventStore::new(pool);
    let board =
        feed_core::leaderboard(&store, chrono::Utc::now(), config.leaderboard_size).await?;
    for entry in board {
        log::info!("{}: {} karma", entry.username, entry.karma);
    }
    Ok(())
}
