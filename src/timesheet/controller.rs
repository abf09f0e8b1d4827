use std::{collections::BTreeMap, sync::Arc};

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};

use crate::{
    analysis::{
        self, AnalysisResult, BucketAnalysisResult, BucketSize, RangedAnalysisResult,
    },
    db::PeriodStore,
    models::{ActiveBreakPeriod, ActiveWorkPeriod, TimeRange, UserData, WorkPeriod},
};

use super::error::{Result, TimesheetError};

/// Ties the storage collaborator to the analysis engine for one service.
#[derive(Clone)]
pub struct TimesheetController {
    store: Arc<dyn PeriodStore>,
}

impl TimesheetController {
    pub fn new(store: Arc<dyn PeriodStore>) -> Self {
        Self { store }
    }

    async fn fetch(&self, uid: &str, range: Option<TimeRange>) -> Result<Vec<WorkPeriod>> {
        self.store.fetch_periods(uid, range).await.map_err(|err| {
            error!("unable to get user data for {uid}: {err:#}");
            TimesheetError::Storage(err)
        })
    }

    pub async fn user_data(&self, uid: &str) -> Result<UserData> {
        debug!("fetching data for user {uid}");
        let work_periods = self.fetch(uid, None).await?;
        Ok(UserData {
            uid: uid.to_string(),
            work_periods,
        })
    }

    pub async fn user_data_in_range(&self, uid: &str, range: TimeRange) -> Result<Vec<WorkPeriod>> {
        debug!(
            "fetching data for user {uid} over range {} - {}",
            range.start, range.end
        );
        self.fetch(uid, Some(range)).await
    }

    pub async fn grouped_user_data(
        &self,
        uid: &str,
        range: TimeRange,
    ) -> Result<BTreeMap<String, Vec<WorkPeriod>>> {
        let periods = self.user_data_in_range(uid, range).await?;
        debug!("grouping {} periods by day", periods.len());
        Ok(analysis::group_periods_by_day(&periods, range.start, range.end))
    }

    pub async fn analyse_user(&self, uid: &str) -> Result<AnalysisResult> {
        info!("performing analysis for user {uid}");
        let periods = self.fetch(uid, None).await?;
        Ok(analysis::summarize(&periods))
    }

    pub async fn analyse_user_in_range(
        &self,
        uid: &str,
        range: TimeRange,
    ) -> Result<RangedAnalysisResult> {
        info!(
            "performing analysis for user {uid} over range {} - {}",
            range.start, range.end
        );
        let periods = self.fetch(uid, Some(range)).await?;
        Ok(RangedAnalysisResult {
            start: range.start,
            end: range.end,
            results: analysis::summarize(&periods),
        })
    }

    pub async fn analyse_user_by_day(
        &self,
        uid: &str,
        range: TimeRange,
    ) -> Result<BTreeMap<String, AnalysisResult>> {
        info!(
            "performing daily analysis for user {uid} over range {} - {}",
            range.start, range.end
        );
        let periods = self.fetch(uid, Some(range)).await?;
        Ok(analysis::summarize_by_day(&periods, range.start, range.end))
    }

    pub async fn bucket_analysis(
        &self,
        uid: &str,
        range: TimeRange,
        size: BucketSize,
    ) -> Result<BTreeMap<DateTime<Utc>, BucketAnalysisResult>> {
        info!(
            "performing bucket analysis for user {uid} over range {} - {} ({} minute buckets)",
            range.start,
            range.end,
            size.minutes()
        );
        let periods = self.fetch(uid, Some(range)).await?;
        analysis::summarize_by_bucket(&periods, range.start, range.end, size).map_err(|err| {
            warn!("bucket analysis for user {uid} failed: {err}");
            TimesheetError::Analysis(err)
        })
    }

    pub async fn active_period(&self, uid: &str) -> Result<ActiveWorkPeriod> {
        debug!("retrieving active work period for user {uid}");
        self.store
            .fetch_active_period(uid, Utc::now())
            .await?
            .ok_or_else(|| TimesheetError::NotFound {
                kind: "active work period for user",
                id: uid.to_string(),
            })
    }

    pub async fn start_work_period(&self, uid: &str) -> Result<ActiveWorkPeriod> {
        let period = self
            .store
            .create_work_period(uid, Utc::now())
            .await
            .map_err(|err| {
                error!("unable to create new work period for user {uid}: {err:#}");
                TimesheetError::Storage(err)
            })?;
        info!("created work period {} for user {uid}", period.period_id);
        Ok(period)
    }

    pub async fn start_break_period(&self, uid: &str, period_id: &str) -> Result<ActiveBreakPeriod> {
        let period = self.require_work_period(period_id).await?;
        if !period.finished_at.is_pending() {
            return Err(TimesheetError::AlreadyClosed {
                kind: "work period",
                id: period_id.to_string(),
            });
        }

        let created = self
            .store
            .create_break_period(period_id, Utc::now())
            .await
            .map_err(|err| {
                error!("unable to create new break period for user {uid}: {err:#}");
                TimesheetError::Storage(err)
            })?;
        info!("created break period {} in work period {period_id}", created.break_id);
        Ok(created)
    }

    pub async fn end_work_period(&self, period_id: &str) -> Result<()> {
        self.require_work_period(period_id).await?;

        debug!("closing work period {period_id}");
        if !self.store.close_work_period(period_id, Utc::now()).await? {
            return Err(TimesheetError::AlreadyClosed {
                kind: "work period",
                id: period_id.to_string(),
            });
        }
        info!("closed work period {period_id}");
        Ok(())
    }

    pub async fn end_break_period(&self, break_id: &str) -> Result<()> {
        if self.store.get_break_period(break_id).await?.is_none() {
            return Err(TimesheetError::NotFound {
                kind: "break period",
                id: break_id.to_string(),
            });
        }

        debug!("closing break period {break_id}");
        if !self.store.close_break_period(break_id, Utc::now()).await? {
            return Err(TimesheetError::AlreadyClosed {
                kind: "break period",
                id: break_id.to_string(),
            });
        }
        info!("closed break period {break_id}");
        Ok(())
    }

    async fn require_work_period(&self, period_id: &str) -> Result<WorkPeriod> {
        self.store
            .get_work_period(period_id)
            .await?
            .ok_or_else(|| TimesheetError::NotFound {
                kind: "work period",
                id: period_id.to_string(),
            })
    }
}
