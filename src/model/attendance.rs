use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 42,
        "user_id": 7,
        "attendance_date": "2024-01-15",
        "created_at": "2024-01-15T18:30:00Z"
    })
)]
pub struct AttendanceRecord {
    #[schema(example = 42)]
    pub id: u64,

    #[schema(example = 7)]
    pub user_id: u64,

    #[schema(example = "2024-01-15", value_type = String, format = "date")]
    pub attendance_date: NaiveDate,

    #[schema(example = "2024-01-15T18:30:00Z", value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

/// Monthly roll-up of a member's attendance. Computed per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlyAttendanceSummary {
    #[schema(example = 2024)]
    pub year: i32,

    #[schema(example = 1)]
    pub month: u32,

    #[schema(example = 31)]
    pub total_days: u32,

    /// Days in the month that are not Sundays
    #[schema(example = 27)]
    pub working_days: u32,

    #[schema(example = 8)]
    pub attended_days: u32,

    #[schema(example = 19)]
    pub missed_days: u32,

    #[schema(example = 30)]
    pub attendance_percentage: u32,

    #[schema(example = json!(["2024-01-07", "2024-01-14", "2024-01-21", "2024-01-28"]))]
    pub sundays: Vec<String>,

    #[schema(example = json!(["2024-01-01", "2024-01-02"]))]
    pub attendance_dates: Vec<String>,
}
