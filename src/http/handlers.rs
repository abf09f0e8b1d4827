use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use log::debug;
use serde::Deserialize;
use uuid::Uuid;

use crate::analysis::{AnalysisResult, BucketAnalysisResult, BucketSize, RangedAnalysisResult};
use crate::models::{ActiveBreakPeriod, ActiveWorkPeriod, UserData};
use crate::timesheet::{parse_date_range, parse_minute_range, TimesheetController};

use super::auth::AuthenticatedUser;
use super::envelope::{self, Envelope};
use super::error::ApiError;

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct GroupQuery {
    pub group: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BucketQuery {
    pub bucket_size: Option<String>,
}

fn bucket_size(query: &BucketQuery) -> Result<BucketSize, ApiError> {
    let Some(raw) = query.bucket_size.as_deref() else {
        return Ok(BucketSize::default());
    };
    let minutes: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::MalformedBucketSize(raw.to_string()))?;
    Ok(BucketSize::from_minutes(minutes)?)
}

/// Ids are v4 UUIDs; anything else is rejected before touching storage.
fn parse_id(raw: &str, kind: &'static str) -> Result<String, ApiError> {
    Uuid::parse_str(raw.trim())
        .map(|id| id.to_string())
        .map_err(|_| ApiError::InvalidId {
            kind,
            value: raw.to_string(),
        })
}

pub async fn health() -> Json<Envelope<()>> {
    debug!("received request for health check route");
    envelope::success()
}

pub async fn active_period(
    State(controller): State<TimesheetController>,
    AuthenticatedUser(uid): AuthenticatedUser,
) -> ApiResult<ActiveWorkPeriod> {
    debug!("received request to get active period for user {uid}");
    let period = controller.active_period(&uid).await?;
    Ok(envelope::payload(period))
}

pub async fn user_data(
    State(controller): State<TimesheetController>,
    AuthenticatedUser(uid): AuthenticatedUser,
) -> ApiResult<UserData> {
    debug!("received request to get user data for user {uid}");
    let data = controller.user_data(&uid).await?;
    Ok(envelope::data(data))
}

pub async fn user_data_in_range(
    State(controller): State<TimesheetController>,
    AuthenticatedUser(uid): AuthenticatedUser,
    Path((start, end)): Path<(String, String)>,
    Query(query): Query<GroupQuery>,
) -> Result<Response, ApiError> {
    let range = parse_date_range(&start, &end)?;
    debug!("received request for user {uid} data between {start} and {end}");

    if query.group.as_deref() == Some("true") {
        let grouped = controller.grouped_user_data(&uid, range).await?;
        return Ok(envelope::data(grouped).into_response());
    }

    let periods = controller.user_data_in_range(&uid, range).await?;
    Ok(envelope::data(periods).into_response())
}

pub async fn analyse_user(
    State(controller): State<TimesheetController>,
    AuthenticatedUser(uid): AuthenticatedUser,
) -> ApiResult<AnalysisResult> {
    let results = controller.analyse_user(&uid).await?;
    Ok(envelope::payload(results))
}

/// Summary over a date range. The end day is included, so
/// `/analyse/2024-01-01/2024-01-01` covers all of January 1st.
pub async fn analyse_user_in_range(
    State(controller): State<TimesheetController>,
    AuthenticatedUser(uid): AuthenticatedUser,
    Path((start, end)): Path<(String, String)>,
) -> ApiResult<RangedAnalysisResult> {
    let range = parse_date_range(&start, &end)?;
    let results = controller.analyse_user_in_range(&uid, range).await?;
    Ok(envelope::payload(results))
}

pub async fn analyse_user_by_day(
    State(controller): State<TimesheetController>,
    AuthenticatedUser(uid): AuthenticatedUser,
    Path((start, end)): Path<(String, String)>,
) -> ApiResult<BTreeMap<String, AnalysisResult>> {
    let range = parse_date_range(&start, &end)?;
    let results = controller.analyse_user_by_day(&uid, range).await?;
    Ok(envelope::payload(results))
}

pub async fn bucket_analysis(
    State(controller): State<TimesheetController>,
    AuthenticatedUser(uid): AuthenticatedUser,
    Path((start, end)): Path<(String, String)>,
    Query(query): Query<BucketQuery>,
) -> ApiResult<BTreeMap<DateTime<Utc>, BucketAnalysisResult>> {
    let range = parse_minute_range(&start, &end)?;
    let size = bucket_size(&query)?;
    debug!("received bucket analysis request for user {uid}");

    let results = controller.bucket_analysis(&uid, range, size).await?;
    Ok(envelope::payload(results))
}

pub async fn start_work_period(
    State(controller): State<TimesheetController>,
    AuthenticatedUser(uid): AuthenticatedUser,
) -> ApiResult<ActiveWorkPeriod> {
    debug!("received request to create new work period for user {uid}");
    let period = controller.start_work_period(&uid).await?;
    Ok(envelope::payload(period))
}

pub async fn start_break_period(
    State(controller): State<TimesheetController>,
    AuthenticatedUser(uid): AuthenticatedUser,
    Path(period_id): Path<String>,
) -> ApiResult<ActiveBreakPeriod> {
    let period_id = parse_id(&period_id, "period")?;
    debug!("received request to create new break period for user {uid}");
    let created = controller.start_break_period(&uid, &period_id).await?;
    Ok(envelope::payload(created))
}

pub async fn end_work_period(
    State(controller): State<TimesheetController>,
    AuthenticatedUser(uid): AuthenticatedUser,
    Path(period_id): Path<String>,
) -> ApiResult<()> {
    let period_id = parse_id(&period_id, "period")?;
    debug!("received request from user {uid} to end work period {period_id}");
    controller.end_work_period(&period_id).await?;
    Ok(envelope::message(format!(
        "successfully closed work period {period_id}"
    )))
}

pub async fn end_break_period(
    State(controller): State<TimesheetController>,
    AuthenticatedUser(uid): AuthenticatedUser,
    Path(break_id): Path<String>,
) -> ApiResult<()> {
    let break_id = parse_id(&break_id, "break")?;
    debug!("received request from user {uid} to end break period {break_id}");
    controller.end_break_period(&break_id).await?;
    Ok(envelope::message(format!(
        "successfully closed break period {break_id}"
    )))
}
