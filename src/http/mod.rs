//! HTTP surface for the timesheet service.
//!
//! Every route lives under `/timesheets`. All routes except the health check
//! require the `X-Authenticated-Userid` header set by the upstream gateway.

mod auth;
mod envelope;
mod error;
mod handlers;


use axum::{
    routing::{get, post},
    Router,
};

use crate::timesheet::TimesheetController;

pub use auth::{AuthenticatedUser, USER_HEADER};
pub use error::ApiError;

pub const ROUTE_PREFIX: &str = "/timesheets";

pub fn router(controller: TimesheetController) -> Router {
    let routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/active", get(handlers::active_period))
        .route("/data", get(handlers::user_data))
        .route("/data/{start}/{end}", get(handlers::user_data_in_range))
        .route("/analyse", get(handlers::analyse_user))
        .route("/analyse/{start}/{end}", get(handlers::analyse_user_in_range))
        .route("/analyse/{start}/{end}/daily", get(handlers::analyse_user_by_day))
        .route(
            "/bucket_analysis/{start}/{end}",
            get(handlers::bucket_analysis),
        )
        .route("/work_period", post(handlers::start_work_period))
        .route(
            "/work_period/{period_id}",
            axum::routing::patch(handlers::end_work_period),
        )
        // POST takes a work period id, PATCH a break id.
        .route(
            "/break_period/{id}",
            post(handlers::start_break_period).patch(handlers::end_break_period),
        );

    Router::new()
        .nest(ROUTE_PREFIX, routes)
        .with_state(controller)
}
