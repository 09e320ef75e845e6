use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::error::AttendanceError;
use crate::service::AttendanceService;

#[derive(Deserialize, ToSchema)]
pub struct RecordAttendance {
    #[schema(example = 7)]
    pub user_id: u64,

    #[schema(example = "2024-01-15", format = "date", value_type = String)]
    pub date: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RecordBulkAttendance {
    #[schema(example = 7)]
    pub user_id: u64,

    #[schema(example = json!(["2024-01-15", "2024-01-16", "2024-01-17"]))]
    pub dates: Vec<String>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    /// Calendar year, e.g. 2024
    #[schema(example = 2024)]
    pub year: i32,

    /// Month number, 1 to 12
    #[schema(example = 1)]
    pub month: u32,
}

/// Record a single attendance day
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = RecordAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = crate::model::attendance::AttendanceRecord),
        (status = 400, description = "Date is not a valid YYYY-MM-DD", body = Object, example = json!({
            "message": "invalid date: 2024-02-30"
        })),
        (status = 404, description = "User not found", body = Object, example = json!({
            "message": "user 99999 not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn record_attendance(
    service: web::Data<AttendanceService>,
    payload: web::Json<RecordAttendance>,
) -> Result<HttpResponse, AttendanceError> {
    let record = service
        .record_attendance(payload.user_id, &payload.date)
        .await?;

    Ok(HttpResponse::Created().json(record))
}

/// Record several attendance days in one batch
#[utoipa::path(
    post,
    path = "/api/attendance/bulk",
    request_body = RecordBulkAttendance,
    responses(
        (status = 201, description = "Records created in input order", body = [crate::model::attendance::AttendanceRecord]),
        (status = 400, description = "A date failed to parse; nothing was written"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn record_bulk_attendance(
    service: web::Data<AttendanceService>,
    payload: web::Json<RecordBulkAttendance>,
) -> Result<HttpResponse, AttendanceError> {
    let records = service
        .record_bulk_attendance(payload.user_id, &payload.dates)
        .await?;

    Ok(HttpResponse::Created().json(records))
}

/// Monthly attendance summary for a member
#[utoipa::path(
    get,
    path = "/api/attendance/users/{user_id}/summary",
    params(
        ("user_id", description = "User ID"),
        SummaryQuery
    ),
    responses(
        (status = 200, body = crate::model::attendance::MonthlyAttendanceSummary),
        (status = 400, description = "Month or year out of range"),
        (status = 404, description = "User not found")
    ),
    tag = "Attendance"
)]
pub async fn monthly_summary(
    service: web::Data<AttendanceService>,
    path: web::Path<u64>,
    query: web::Query<SummaryQuery>,
) -> Result<HttpResponse, AttendanceError> {
    let summary = service
        .get_monthly_summary(path.into_inner(), query.year, query.month)
        .await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Full attendance history, most recent first
#[utoipa::path(
    get,
    path = "/api/attendance/users/{user_id}/history",
    params(
        ("user_id", description = "User ID")
    ),
    responses(
        (status = 200, body = [crate::model::attendance::AttendanceRecord]),
        (status = 404, description = "User not found")
    ),
    tag = "Attendance"
)]
pub async fn history(
    service: web::Data<AttendanceService>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AttendanceError> {
    let records = service.get_history(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(records))
}

/// Delete one attendance record
#[utoipa::path(
    delete,
    path = "/api/attendance/{record_id}",
    params(
        ("record_id", description = "Attendance record ID")
    ),
    responses(
        (status = 200, body = crate::service::DeleteResponse),
        (status = 404, description = "Record not found", body = Object, example = json!({
            "message": "record 42 not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    service: web::Data<AttendanceService>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AttendanceError> {
    let result = service.delete_attendance(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(result))
}
