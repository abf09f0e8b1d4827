use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::{
    connection::Database,
    helpers::{format_datetime, parse_completion, parse_datetime},
    repositories::break_periods::row_to_break,
};
use crate::models::{TimeRange, WorkPeriod};

fn row_to_period(row: &Row) -> Result<WorkPeriod> {
    let created_at: String = row.get("created_at")?;
    let finished_at: Option<String> = row.get("finished_at")?;

    Ok(WorkPeriod {
        period_id: row.get("period_id")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        finished_at: parse_completion(finished_at, "finished_at")?,
        breaks: Vec::new(),
    })
}

/// Load each period's breaks, oldest first.
fn attach_breaks(conn: &Connection, periods: &mut [WorkPeriod]) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT break_id, created_at, finished_at
         FROM break_periods
         WHERE period_id = ?1
         ORDER BY created_at ASC",
    )?;

    for period in periods.iter_mut() {
        let mut rows = stmt.query(params![period.period_id])?;
        while let Some(row) = rows.next()? {
            period.breaks.push(row_to_break(row)?);
        }
    }

    Ok(())
}

impl Database {
    pub async fn insert_work_period(
        &self,
        uid: &str,
        period_id: &str,
        created_at: DateTime<Utc>,
    ) -> Result<()> {
        let uid = uid.to_string();
        let period_id = period_id.to_string();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO work_periods (period_id, uid, created_at, finished_at)
                 VALUES (?1, ?2, ?3, NULL)",
                params![period_id, uid, format_datetime(created_at)],
            )
            .with_context(|| "failed to insert work period")?;
            Ok(())
        })
        .await
    }

    /// Finished periods of one user, oldest first. With a range, only periods
    /// created strictly inside it are returned.
    pub async fn list_finished_work_periods(
        &self,
        uid: &str,
        range: Option<TimeRange>,
    ) -> Result<Vec<WorkPeriod>> {
        let uid = uid.to_string();
        self.execute(move |conn| {
            let mut periods = Vec::new();
            {
                let mut stmt;
                let mut rows = match range {
                    Some(range) => {
                        stmt = conn.prepare(
                            "SELECT period_id, created_at, finished_at
                             FROM work_periods
                             WHERE uid = ?1
                               AND finished_at IS NOT NULL
                               AND created_at > ?2
                               AND created_at < ?3
                             ORDER BY created_at ASC",
                        )?;
                        stmt.query(params![
                            uid,
                            format_datetime(range.start),
                            format_datetime(range.end),
                        ])?
                    }
                    None => {
                        stmt = conn.prepare(
                            "SELECT period_id, created_at, finished_at
                             FROM work_periods
                             WHERE uid = ?1 AND finished_at IS NOT NULL
                             ORDER BY created_at ASC",
                        )?;
                        stmt.query(params![uid])?
                    }
                };

                while let Some(row) = rows.next()? {
                    periods.push(row_to_period(row)?);
                }
            }

            attach_breaks(conn, &mut periods)?;
            Ok(periods)
        })
        .await
    }

    pub async fn get_work_period(&self, period_id: &str) -> Result<Option<WorkPeriod>> {
        let period_id = period_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT period_id, created_at, finished_at
                 FROM work_periods
                 WHERE period_id = ?1",
            )?;

            let mut rows = stmt.query(params![period_id])?;
            let Some(row) = rows.next()? else {
                return Ok(None);
            };
            let mut period = [row_to_period(row)?];
            drop(rows);

            attach_breaks(conn, &mut period)?;
            let [period] = period;
            Ok(Some(period))
        })
        .await
    }

    /// The user's most recently started period that has not been closed.
    pub async fn get_open_work_period(&self, uid: &str) -> Result<Option<WorkPeriod>> {
        let uid = uid.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT period_id, created_at, finished_at
                 FROM work_periods
                 WHERE uid = ?1 AND finished_at IS NULL
                 ORDER BY created_at DESC
                 LIMIT 1",
            )?;

            let mut rows = stmt.query(params![uid])?;
            let period = match rows.next()? {
                Some(row) => Some(row_to_period(row)?),
                None => None,
            };
            Ok(period)
        })
        .await
    }

    /// Close an open period and any break still open inside it.
    ///
    /// Returns `false` when the period is already closed or does not exist.
    pub async fn finish_work_period(
        &self,
        period_id: &str,
        finished_at: DateTime<Utc>,
    ) -> Result<bool> {
        let period_id = period_id.to_string();
        self.execute(move |conn| {
            let tx = conn.transaction()?;
            let finished = format_datetime(finished_at);

            let rows_affected = tx.execute(
                "UPDATE work_periods
                 SET finished_at = ?1
                 WHERE period_id = ?2 AND finished_at IS NULL",
                params![finished, period_id],
            )?;

            if rows_affected > 0 {
                tx.execute(
                    "UPDATE break_periods
                     SET finished_at = ?1
                     WHERE period_id = ?2 AND finished_at IS NULL",
                    params![finished, period_id],
                )?;
            }

            tx.commit()?;
            Ok(rows_affected > 0)
        })
        .await
    }

    #[cfg(test)]
    pub(crate) async fn work_period_owner(&self, period_id: &str) -> Result<Option<String>> {
        let period_id = period_id.to_string();
        self.execute(move |conn| {
            Ok(conn
                .query_row(
                    "SELECT uid FROM work_periods WHERE period_id = ?1",
                    params![period_id],
                    |row| row.get(0),
                )
                .optional()?)
        })
        .await
    }
}
