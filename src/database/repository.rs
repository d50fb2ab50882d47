use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::commentary::{Commentary, NewCommentary};
use crate::models::matches::{Match, MatchUpdate, NewMatch};

pub type DbResult<T> = std::result::Result<T, sqlx::Error>;

const MATCH_COLUMNS: &str = "id, sport, home_team, away_team, status, start_time, end_time, \
                             home_score, away_score, created_at";

const COMMENTARY_COLUMNS: &str = "id, match_id, minute, sequence, period, event_type, actor, \
                                  team, message, metadata, tags, created_at";

/// Persistence operations on the `matches` table.
///
/// Operations on an id that does not exist touch no rows: reads and updates
/// return `None`, deletes return `0`.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn list_matches(&self, limit: i64) -> DbResult<Vec<Match>>;
    async fn create_match(&self, new_match: NewMatch) -> DbResult<Match>;
    async fn find_match(&self, id: i32) -> DbResult<Option<Match>>;
    async fn update_match(&self, id: i32, update: MatchUpdate) -> DbResult<Option<Match>>;
    async fn delete_match(&self, id: i32) -> DbResult<u64>;
    async fn ping(&self) -> DbResult<()>;
}

/// Persistence operations on the `commentary` table.
#[async_trait]
pub trait CommentaryRepository: Send + Sync {
    async fn create_commentary(&self, entry: NewCommentary) -> DbResult<Commentary>;
    async fn list_commentary(&self, match_id: i32) -> DbResult<Vec<Commentary>>;
    async fn delete_commentary(&self, id: i32) -> DbResult<u64>;
}

/// Postgres-backed repository over a shared pool.
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        PgRepository { pool }
    }
}

#[async_trait]
impl MatchRepository for PgRepository {
    async fn list_matches(&self, limit: i64) -> DbResult<Vec<Match>> {
        let sql = format!(
            "SELECT {} FROM matches ORDER BY created_at DESC, id DESC LIMIT $1",
            MATCH_COLUMNS
        );

        sqlx::query_as::<_, Match>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }

    async fn create_match(&self, new_match: NewMatch) -> DbResult<Match> {
        let sql = format!(
            r#"
            INSERT INTO matches
                (sport, home_team, away_team, status, start_time, end_time, home_score, away_score)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            MATCH_COLUMNS
        );

        sqlx::query_as::<_, Match>(&sql)
            .bind(new_match.sport)
            .bind(new_match.home_team)
            .bind(new_match.away_team)
            .bind(new_match.status)
            .bind(new_match.start_time)
            .bind(new_match.end_time)
            .bind(new_match.home_score)
            .bind(new_match.away_score)
            .fetch_one(&self.pool)
            .await
    }

    async fn find_match(&self, id: i32) -> DbResult<Option<Match>> {
        let sql = format!("SELECT {} FROM matches WHERE id = $1", MATCH_COLUMNS);

        sqlx::query_as::<_, Match>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_match(&self, id: i32, update: MatchUpdate) -> DbResult<Option<Match>> {
        let sql = format!(
            r#"
            UPDATE matches SET
                status = COALESCE($2, status),
                end_time = COALESCE($3, end_time),
                home_score = COALESCE($4, home_score),
                away_score = COALESCE($5, away_score)
            WHERE id = $1
            RETURNING {}
            "#,
            MATCH_COLUMNS
        );

        sqlx::query_as::<_, Match>(&sql)
            .bind(id)
            .bind(update.status)
            .bind(update.end_time)
            .bind(update.home_score)
            .bind(update.away_score)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete_match(&self, id: i32) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CommentaryRepository for PgRepository {
    async fn create_commentary(&self, entry: NewCommentary) -> DbResult<Commentary> {
        let sql = format!(
            r#"
            INSERT INTO commentary
                (match_id, minute, sequence, period, event_type, actor, team, message, metadata, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            COMMENTARY_COLUMNS
        );

        sqlx::query_as::<_, Commentary>(&sql)
            .bind(entry.match_id)
            .bind(entry.minute)
            .bind(entry.sequence)
            .bind(entry.period)
            .bind(entry.event_type)
            .bind(entry.actor)
            .bind(entry.team)
            .bind(entry.message)
            .bind(entry.metadata)
            .bind(entry.tags)
            .fetch_one(&self.pool)
            .await
    }

    async fn list_commentary(&self, match_id: i32) -> DbResult<Vec<Commentary>> {
        let sql = format!(
            "SELECT {} FROM commentary WHERE match_id = $1 ORDER BY minute, sequence, id",
            COMMENTARY_COLUMNS
        );

        sqlx::query_as::<_, Commentary>(&sql)
            .bind(match_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn delete_commentary(&self, id: i32) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM commentary WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
