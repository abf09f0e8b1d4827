use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::analysis::elapsed_hours;
use crate::db::connection::Database;
use crate::models::{
    ActiveBreakPeriod, ActiveWorkPeriod, BreakPeriod, TimeRange, WorkPeriod,
};

/// Storage operations the timesheet controller depends on.
///
/// Built once at startup and shared as `Arc<dyn PeriodStore>`.
#[async_trait]
pub trait PeriodStore: Send + Sync {
    /// Finished periods with their breaks, ordered by creation time.
    async fn fetch_periods(&self, uid: &str, range: Option<TimeRange>) -> Result<Vec<WorkPeriod>>;

    async fn fetch_active_period(
        &self,
        uid: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ActiveWorkPeriod>>;

    async fn get_work_period(&self, period_id: &str) -> Result<Option<WorkPeriod>>;

    async fn get_break_period(&self, break_id: &str) -> Result<Option<BreakPeriod>>;

    async fn create_work_period(&self, uid: &str, at: DateTime<Utc>) -> Result<ActiveWorkPeriod>;

    async fn create_break_period(
        &self,
        period_id: &str,
        at: DateTime<Utc>,
    ) -> Result<ActiveBreakPeriod>;

    /// `false` when the period was already closed.
    async fn close_work_period(&self, period_id: &str, at: DateTime<Utc>) -> Result<bool>;

    /// `false` when the break was already closed.
    async fn close_break_period(&self, break_id: &str, at: DateTime<Utc>) -> Result<bool>;
}

#[async_trait]
impl PeriodStore for Database {
    async fn fetch_periods(&self, uid: &str, range: Option<TimeRange>) -> Result<Vec<WorkPeriod>> {
        self.list_finished_work_periods(uid, range).await
    }

    async fn fetch_active_period(
        &self,
        uid: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ActiveWorkPeriod>> {
        let Some(period) = self.get_open_work_period(uid).await? else {
            return Ok(None);
        };

        let active_break = self
            .get_open_break(&period.period_id)
            .await?
            .map(|open| ActiveBreakPeriod {
                break_id: open.break_id,
                created_at: open.created_at,
            });

        Ok(Some(ActiveWorkPeriod {
            active_since: elapsed_hours(period.created_at, now),
            period_id: period.period_id,
            created_at: period.created_at,
            active_break,
        }))
    }

    async fn get_work_period(&self, period_id: &str) -> Result<Option<WorkPeriod>> {
        Database::get_work_period(self, period_id).await
    }

    async fn get_break_period(&self, break_id: &str) -> Result<Option<BreakPeriod>> {
        Database::get_break_period(self, break_id).await
    }

    async fn create_work_period(&self, uid: &str, at: DateTime<Utc>) -> Result<ActiveWorkPeriod> {
        let period_id = Uuid::new_v4().to_string();
        self.insert_work_period(uid, &period_id, at).await?;

        Ok(ActiveWorkPeriod {
            period_id,
            created_at: at,
            active_since: 0.0,
            active_break: None,
        })
    }

    async fn create_break_period(
        &self,
        period_id: &str,
        at: DateTime<Utc>,
    ) -> Result<ActiveBreakPeriod> {
        let break_id = Uuid::new_v4().to_string();
        self.insert_break_period(period_id, &break_id, at).await?;

        Ok(ActiveBreakPeriod {
            break_id,
            created_at: at,
        })
    }

    async fn close_work_period(&self, period_id: &str, at: DateTime<Utc>) -> Result<bool> {
        self.finish_work_period(period_id, at).await
    }

    async fn close_break_period(&self, break_id: &str, at: DateTime<Utc>) -> Result<bool> {
        self.finish_break_period(break_id, at).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::models::Completion;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0).unwrap()
    }

    fn store() -> Database {
        Database::open_in_memory().unwrap()
    }

    async fn worked(db: &Database, uid: &str, start: DateTime<Utc>, hours: i64) -> String {
        let period = db.create_work_period(uid, start).await.unwrap();
        assert!(db
            .close_work_period(&period.period_id, start + Duration::hours(hours))
            .await
            .unwrap());
        period.period_id
    }

    #[tokio::test]
    async fn fetch_returns_only_finished_periods_in_creation_order() {
        let db = store();
        let later = worked(&db, "alice", at(2, 9, 0), 2).await;
        let earlier = worked(&db, "alice", at(1, 9, 0), 3).await;
        db.create_work_period("alice", at(3, 9, 0)).await.unwrap();
        worked(&db, "bob", at(1, 10, 0), 1).await;

        let periods = db.fetch_periods("alice", None).await.unwrap();
        let ids: Vec<&str> = periods.iter().map(|p| p.period_id.as_str()).collect();
        assert_eq!(ids, vec![earlier.as_str(), later.as_str()]);
        assert_eq!(
            periods[0].finished_at,
            Completion::Finished(at(1, 12, 0))
        );
        assert_eq!(db.work_period_owner(&later).await.unwrap().as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn range_bounds_are_exclusive() {
        let db = store();
        worked(&db, "alice", at(1, 0, 0), 1).await;
        let inside = worked(&db, "alice", at(1, 12, 0), 1).await;
        worked(&db, "alice", at(2, 0, 0), 1).await;

        let range = TimeRange::new(at(1, 0, 0), at(2, 0, 0));
        let periods = db.fetch_periods("alice", Some(range)).await.unwrap();
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].period_id, inside);
    }

    #[tokio::test]
    async fn periods_carry_their_breaks() {
        let db = store();
        let period = db.create_work_period("alice", at(1, 9, 0)).await.unwrap();
        let first = db
            .create_break_period(&period.period_id, at(1, 10, 0))
            .await
            .unwrap();
        assert!(db.close_break_period(&first.break_id, at(1, 10, 30)).await.unwrap());
        db.create_break_period(&period.period_id, at(1, 12, 0))
            .await
            .unwrap();
        assert!(db.close_work_period(&period.period_id, at(1, 13, 0)).await.unwrap());

        let stored = PeriodStore::get_work_period(&db, &period.period_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.breaks.len(), 2);
        assert_eq!(stored.breaks[0].break_id, first.break_id);
        assert_eq!(stored.breaks[0].finished_at, Completion::Finished(at(1, 10, 30)));
        // Closing the period also closed the break left open inside it.
        assert_eq!(stored.breaks[1].finished_at, Completion::Finished(at(1, 13, 0)));
    }

    #[tokio::test]
    async fn closing_twice_reports_already_closed() {
        let db = store();
        let period = db.create_work_period("alice", at(1, 9, 0)).await.unwrap();
        let pause = db
            .create_break_period(&period.period_id, at(1, 9, 30))
            .await
            .unwrap();

        assert!(db.close_break_period(&pause.break_id, at(1, 9, 45)).await.unwrap());
        assert!(!db.close_break_period(&pause.break_id, at(1, 9, 50)).await.unwrap());
        assert!(db.close_work_period(&period.period_id, at(1, 11, 0)).await.unwrap());
        assert!(!db.close_work_period(&period.period_id, at(1, 12, 0)).await.unwrap());
        assert!(!db.close_work_period("missing", at(1, 12, 0)).await.unwrap());
    }

    #[tokio::test]
    async fn active_period_reports_open_break() {
        let db = store();
        assert!(db
            .fetch_active_period("alice", at(1, 9, 0))
            .await
            .unwrap()
            .is_none());

        let period = db.create_work_period("alice", at(1, 9, 0)).await.unwrap();
        let pause = db
            .create_break_period(&period.period_id, at(1, 10, 0))
            .await
            .unwrap();

        let active = db
            .fetch_active_period("alice", at(1, 10, 30))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.period_id, period.period_id);
        assert_eq!(active.active_since, 1.5);
        assert_eq!(active.active_break, Some(pause));
    }

    #[tokio::test]
    async fn created_timestamps_read_back_unchanged() {
        let db = store();
        let start = at(1, 9, 0) + Duration::nanoseconds(123_456_789);
        let period = db.create_work_period("alice", start).await.unwrap();
        let pause = db
            .create_break_period(&period.period_id, start + Duration::nanoseconds(1))
            .await
            .unwrap();

        let active = db
            .fetch_active_period("alice", at(1, 10, 0))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.created_at, period.created_at);
        assert_eq!(active.active_break, Some(pause.clone()));

        let finish = at(1, 11, 0) + Duration::nanoseconds(987_654_321);
        assert!(db.close_work_period(&period.period_id, finish).await.unwrap());

        let stored = PeriodStore::get_work_period(&db, &period.period_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.created_at, period.created_at);
        assert_eq!(stored.finished_at, Completion::Finished(finish));
        assert_eq!(stored.breaks[0].created_at, pause.created_at);
    }

    #[tokio::test]
    async fn break_for_unknown_period_is_rejected() {
        let db = store();
        assert!(db.create_break_period("missing", at(1, 9, 0)).await.is_err());
        assert!(PeriodStore::get_break_period(&db, "missing").await.unwrap().is_none());
    }
}
