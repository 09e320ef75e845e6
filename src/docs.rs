use crate::api::attendance::{RecordAttendance, RecordBulkAttendance, SummaryQuery};
use crate::model::attendance::{AttendanceRecord, MonthlyAttendanceSummary};
use crate::service::DeleteResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gym Attendance API",
        version = "1.0.0",
        description = r#"
## Gym Attendance Tracking

Records the days members attend the gym and reports monthly compliance.

### Key Features
- **Attendance recording**
  - Single days or whole batches; a batch with any malformed date is rejected before anything is written
- **Monthly summary**
  - Attended, missed and rest days (Sundays) with an attendance percentage
- **History**
  - Every recorded day for a member, most recent first

### Response Format
- Dates are `YYYY-MM-DD`, timestamps RFC 3339
- Errors are `{"message": "..."}`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::record_attendance,
        crate::api::attendance::record_bulk_attendance,
        crate::api::attendance::monthly_summary,
        crate::api::attendance::history,
        crate::api::attendance::delete_attendance
    ),
    components(
        schemas(
            AttendanceRecord,
            MonthlyAttendanceSummary,
            RecordAttendance,
            RecordBulkAttendance,
            SummaryQuery,
            DeleteResponse
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance tracking APIs"),
    )
)]
pub struct ApiDoc;
