use async_trait::async_trait;
use chrono::NaiveDate;

use crate::model::attendance::AttendanceRecord;

#[cfg(test)]
pub mod memory;
pub mod mysql;

pub use mysql::MySqlAttendanceStore;

/// Persistence operations the attendance service relies on.
///
/// Implementations own id and `created_at` assignment. Nothing here enforces
/// uniqueness of (user, date); callers may store the same day twice.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn user_exists(&self, user_id: u64) -> Result<bool, sqlx::Error>;

    async fn insert_one(
        &self,
        user_id: u64,
        date: NaiveDate,
    ) -> Result<AttendanceRecord, sqlx::Error>;

    /// Same as repeated `insert_one`, issued as one batch. Output order
    /// matches `dates`.
    async fn insert_many(
        &self,
        user_id: u64,
        dates: &[NaiveDate],
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error>;

    /// Records with `from <= attendance_date <= to`.
    async fn find_by_user_and_range(
        &self,
        user_id: u64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error>;

    async fn find_by_user(&self, user_id: u64) -> Result<Vec<AttendanceRecord>, sqlx::Error>;

    async fn find_by_id(&self, record_id: u64) -> Result<Option<AttendanceRecord>, sqlx::Error>;

    /// `true` if a row was removed.
    async fn delete_by_id(&self, record_id: u64) -> Result<bool, sqlx::Error>;
}
