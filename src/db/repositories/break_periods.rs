use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::db::{
    connection::Database,
    helpers::{format_datetime, parse_completion, parse_datetime},
};
use crate::models::BreakPeriod;

pub(crate) fn row_to_break(row: &Row) -> Result<BreakPeriod> {
    let created_at: String = row.get("created_at")?;
    let finished_at: Option<String> = row.get("finished_at")?;

    Ok(BreakPeriod {
        break_id: row.get("break_id")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        finished_at: parse_completion(finished_at, "finished_at")?,
    })
}

impl Database {
    pub async fn insert_break_period(
        &self,
        period_id: &str,
        break_id: &str,
        created_at: DateTime<Utc>,
    ) -> Result<()> {
        let period_id = period_id.to_string();
        let break_id = break_id.to_string();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO break_periods (break_id, period_id, created_at, finished_at)
                 VALUES (?1, ?2, ?3, NULL)",
                params![break_id, period_id, format_datetime(created_at)],
            )
            .with_context(|| "failed to insert break period")?;
            Ok(())
        })
        .await
    }

    pub async fn get_break_period(&self, break_id: &str) -> Result<Option<BreakPeriod>> {
        let break_id = break_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT break_id, created_at, finished_at
                 FROM break_periods
                 WHERE break_id = ?1",
            )?;

            let mut rows = stmt.query(params![break_id])?;
            let found = match rows.next()? {
                Some(row) => Some(row_to_break(row)?),
                None => None,
            };
            Ok(found)
        })
        .await
    }

    pub async fn get_open_break(&self, period_id: &str) -> Result<Option<BreakPeriod>> {
        let period_id = period_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT break_id, created_at, finished_at
                 FROM break_periods
                 WHERE period_id = ?1 AND finished_at IS NULL
                 ORDER BY created_at DESC
                 LIMIT 1",
            )?;

            let mut rows = stmt.query(params![period_id])?;
            let found = match rows.next()? {
                Some(row) => Some(row_to_break(row)?),
                None => None,
            };
            Ok(found)
        })
        .await
    }

    /// Returns `false` when the break is already closed or does not exist.
    pub async fn finish_break_period(
        &self,
        break_id: &str,
        finished_at: DateTime<Utc>,
    ) -> Result<bool> {
        let break_id = break_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE break_periods
                 SET finished_at = ?1
                 WHERE break_id = ?2 AND finished_at IS NULL",
                params![format_datetime(finished_at), break_id],
            )?;
            Ok(rows_affected > 0)
        })
        .await
    }
}
