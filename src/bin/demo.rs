// bin/demo.rs
//
// Walks through create/read/update/delete on both tables, straight against
// the database. Run with `cargo run --bin demo`.
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use chrono::{Duration, Utc};
use serde_json::json;

use sportz_api::config::AppConfig;
use sportz_api::database::connection::{connect, run_migrations};
use sportz_api::database::repository::{CommentaryRepository, MatchRepository, PgRepository};
use sportz_api::models::commentary::NewCommentary;
use sportz_api::models::matches::{MatchStatus, MatchUpdate, NewMatch};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("🏟️ Sports Application - CRUD Demo");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let pool = match connect(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("❌ Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let repo = PgRepository::new(pool.clone());
    let outcome = match run_migrations(&pool).await {
        Ok(()) => run(&repo).await,
        Err(e) => Err(e.into()),
    };

    pool.close().await;
    tracing::info!("🔌 Database pool closed.");

    match outcome {
        Ok(()) => {
            tracing::info!("✨ CRUD operations completed successfully!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("❌ Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(repo: &PgRepository) -> anyhow::Result<()> {
    tracing::info!("📝 CREATE: Adding a new match...");
    let new_match = repo
        .create_match(NewMatch {
            sport: "Football".to_string(),
            home_team: "Manchester United".to_string(),
            away_team: "Liverpool".to_string(),
            status: MatchStatus::Scheduled,
            start_time: Utc::now() + Duration::hours(1),
            end_time: None,
            home_score: 0,
            away_score: 0,
        })
        .await
        .context("failed to create match")?;
    tracing::info!(
        "✅ Match created: id={} {} vs {} ({})",
        new_match.id,
        new_match.home_team,
        new_match.away_team,
        new_match.status.as_str()
    );

    tracing::info!("📖 READ: Fetching the match...");
    let found = repo
        .find_match(new_match.id)
        .await
        .context("failed to fetch match")?;
    tracing::info!("✅ Match found: {:?}", found);

    tracing::info!("✏️ UPDATE: Updating match status to live...");
    let updated = repo
        .update_match(new_match.id, MatchUpdate::status(MatchStatus::Live))
        .await
        .context("failed to update match")?
        .ok_or_else(|| anyhow!("Failed to update match"))?;
    tracing::info!("✅ Match updated: id={} status={}", updated.id, updated.status.as_str());

    tracing::info!("💬 CREATE: Adding match commentary...");
    let entry = repo
        .create_commentary(NewCommentary {
            match_id: new_match.id,
            minute: 23,
            sequence: 1,
            period: "first_half".to_string(),
            event_type: "goal".to_string(),
            actor: "Bruno Fernandes".to_string(),
            team: "Manchester United".to_string(),
            message: "Brilliant free-kick goal!".to_string(),
            metadata: Some(json!({
                "videoTimestamp": "00:23:15",
                "replaysAvailable": true,
            })),
            tags: Some(vec![
                "goal".to_string(),
                "free_kick".to_string(),
                "manchester_united".to_string(),
            ]),
        })
        .await
        .context("failed to create commentary")?;
    tracing::info!(
        "✅ Commentary added: id={} minute={} {} by {}",
        entry.id,
        entry.minute,
        entry.event_type,
        entry.actor
    );

    tracing::info!("📖 READ: Fetching match commentary...");
    let timeline = repo
        .list_commentary(new_match.id)
        .await
        .context("failed to fetch commentary")?;
    tracing::info!("✅ Commentary retrieved: {} entries", timeline.len());

    tracing::info!("✏️ UPDATE: Updating match scores...");
    let final_match = repo
        .update_match(
            new_match.id,
            MatchUpdate::score(1, 0).with_status(MatchStatus::Finished),
        )
        .await
        .context("failed to update scores")?
        .ok_or_else(|| anyhow!("Failed to update scores"))?;
    tracing::info!(
        "✅ Final score updated: id={} {}-{} ({})",
        final_match.id,
        final_match.home_score,
        final_match.away_score,
        final_match.status.as_str()
    );

    // Commentary references the match, so it has to go first.
    tracing::info!("🗑️ DELETE: Removing commentary...");
    repo.delete_commentary(entry.id)
        .await
        .context("failed to delete commentary")?;
    tracing::info!("✅ Commentary deleted.");

    tracing::info!("🗑️ DELETE: Removing match...");
    repo.delete_match(new_match.id)
        .await
        .context("failed to delete match")?;
    tracing::info!("✅ Match deleted.");

    Ok(())
}
