use std::ops::RangeInclusive;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use crate::calendar;
use crate::error::{AttendanceError, Field};
use crate::model::attendance::{AttendanceRecord, MonthlyAttendanceSummary};
use crate::store::AttendanceStore;

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = true)]
    pub success: bool,
}

/// Attendance operations over an injected store.
#[derive(Clone)]
pub struct AttendanceService {
    store: Arc<dyn AttendanceStore>,
    years: RangeInclusive<i32>,
}

fn parse_date(value: &str) -> Result<NaiveDate, AttendanceError> {
    calendar::parse_iso_date(value).ok_or_else(|| AttendanceError::invalid(Field::Date, value))
}

impl AttendanceService {
    pub fn new(store: Arc<dyn AttendanceStore>, years: RangeInclusive<i32>) -> Self {
        Self { store, years }
    }

    fn validate_period(&self, year: i32, month: u32) -> Result<(), AttendanceError> {
        if !(1..=12).contains(&month) {
            return Err(AttendanceError::invalid(Field::Month, month));
        }
        if !self.years.contains(&year) {
            return Err(AttendanceError::invalid(Field::Year, year));
        }
        Ok(())
    }

    async fn require_user(&self, user_id: u64) -> Result<(), AttendanceError> {
        if self.store.user_exists(user_id).await? {
            Ok(())
        } else {
            debug!(user_id, "Unknown user");
            Err(AttendanceError::user_not_found(user_id))
        }
    }

    #[instrument(name = "record_attendance", skip(self))]
    pub async fn record_attendance(
        &self,
        user_id: u64,
        date: &str,
    ) -> Result<AttendanceRecord, AttendanceError> {
        let date = parse_date(date)?;
        self.require_user(user_id).await?;

        let record = self.store.insert_one(user_id, date).await?;
        info!(record_id = record.id, "Attendance recorded");
        Ok(record)
    }

    /// Every date is parsed before anything is written, so one bad entry
    /// rejects the whole batch. An empty batch writes nothing and returns `[]`.
    #[instrument(name = "record_bulk_attendance", skip(self, dates), fields(count = dates.len()))]
    pub async fn record_bulk_attendance(
        &self,
        user_id: u64,
        dates: &[String],
    ) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        let parsed = dates
            .iter()
            .map(|d| parse_date(d))
            .collect::<Result<Vec<_>, _>>()?;
        self.require_user(user_id).await?;

        if parsed.is_empty() {
            return Ok(Vec::new());
        }

        let records = self.store.insert_many(user_id, &parsed).await?;
        info!(inserted = records.len(), "Bulk attendance recorded");
        Ok(records)
    }

    #[instrument(name = "monthly_summary", skip(self))]
    pub async fn get_monthly_summary(
        &self,
        user_id: u64,
        year: i32,
        month: u32,
    ) -> Result<MonthlyAttendanceSummary, AttendanceError> {
        self.validate_period(year, month)?;
        // month is already 1..=12, so only an unrepresentable year gets here
        let (first_day, last_day) = calendar::month_bounds(year, month)
            .ok_or_else(|| AttendanceError::invalid(Field::Year, year))?;
        self.require_user(user_id).await?;

        let dates: Vec<NaiveDate> = self
            .store
            .find_by_user_and_range(user_id, first_day, last_day)
            .await?
            .into_iter()
            .map(|r| r.attendance_date)
            .collect();

        Ok(calendar::compute_summary(year, month, &dates))
    }

    /// Most recent first. Same-day entries fall back to newest id first.
    #[instrument(name = "attendance_history", skip(self))]
    pub async fn get_history(
        &self,
        user_id: u64,
    ) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        self.require_user(user_id).await?;

        let mut records = self.store.find_by_user(user_id).await?;
        records.sort_by(|a, b| {
            b.attendance_date
                .cmp(&a.attendance_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }

    /// Not idempotent: a second call for the same id is `NotFound`.
    #[instrument(name = "delete_attendance", skip(self))]
    pub async fn delete_attendance(
        &self,
        record_id: u64,
    ) -> Result<DeleteResponse, AttendanceError> {
        if self.store.find_by_id(record_id).await?.is_none() {
            return Err(AttendanceError::record_not_found(record_id));
        }

        // another request may have removed it since the lookup
        if !self.store.delete_by_id(record_id).await? {
            return Err(AttendanceError::record_not_found(record_id));
        }

        info!("Attendance deleted");
        Ok(DeleteResponse { success: true })
    }
}
