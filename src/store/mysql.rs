use async_trait::async_trait;
use chrono::{NaiveDate, SubsecRound, Utc};
use futures_util::TryStreamExt;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use tracing::debug;

use super::AttendanceStore;
use crate::model::attendance::AttendanceRecord;

/// Three placeholders per row keeps each statement far below MySQL's
/// 65,535 bind limit.
const ROWS_PER_INSERT: usize = 1000;

/// Rows read back after a multi-row insert must be exactly the submitted
/// dates, in order.
fn matches_batch(inserted: &[AttendanceRecord], dates: &[NaiveDate]) -> bool {
    inserted.len() == dates.len()
        && inserted
            .iter()
            .zip(dates)
            .all(|(record, date)| record.attendance_date == *date)
}

/// `attendance` table backed by MySQL. User existence is read from the
/// `users` table owned by user management.
#[derive(Clone)]
pub struct MySqlAttendanceStore {
    pool: MySqlPool,
}

impl MySqlAttendanceStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceStore for MySqlAttendanceStore {
    async fn user_exists(&self, user_id: u64) -> Result<bool, sqlx::Error> {
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = ? LIMIT 1)",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists != 0)
    }

    async fn insert_one(
        &self,
        user_id: u64,
        date: NaiveDate,
    ) -> Result<AttendanceRecord, sqlx::Error> {
        // TIMESTAMP columns hold whole seconds
        let created_at = Utc::now().trunc_subsecs(0);

        let result = sqlx::query(
            r#"
            INSERT INTO attendance (user_id, attendance_date, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(AttendanceRecord {
            id: result.last_insert_id(),
            user_id,
            attendance_date: date,
            created_at,
        })
    }

    async fn insert_many(
        &self,
        user_id: u64,
        dates: &[NaiveDate],
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let created_at = Utc::now().trunc_subsecs(0);
        let mut records = Vec::with_capacity(dates.len());

        let mut tx = self.pool.begin().await?;

        // Two round trips per chunk: one multi-row INSERT, one SELECT that
        // reads the assigned ids back.
        for chunk in dates.chunks(ROWS_PER_INSERT) {
            let mut insert = QueryBuilder::<MySql>::new(
                "INSERT INTO attendance (user_id, attendance_date, created_at) ",
            );
            insert.push_values(chunk, |mut row, date| {
                row.push_bind(user_id).push_bind(*date).push_bind(created_at);
            });
            let result = insert.build().execute(&mut *tx).await?;

            // LAST_INSERT_ID() is the first id of the statement; the rest are
            // ascending in VALUES order.
            let inserted = sqlx::query_as::<_, AttendanceRecord>(
                r#"
                SELECT id, user_id, attendance_date, created_at
                FROM attendance
                WHERE user_id = ?
                AND id >= ?
                ORDER BY id
                LIMIT ?
                "#,
            )
            .bind(user_id)
            .bind(result.last_insert_id())
            .bind(chunk.len() as u64)
            .fetch_all(&mut *tx)
            .await?;

            if !matches_batch(&inserted, chunk) {
                // dropping the transaction rolls the whole batch back
                return Err(sqlx::Error::Protocol(format!(
                    "bulk insert read back {} rows that do not match the {} submitted",
                    inserted.len(),
                    chunk.len()
                )));
            }
            records.extend(inserted);
        }

        tx.commit().await?;

        debug!(user_id, count = records.len(), "Bulk attendance committed");
        Ok(records)
    }

    async fn find_by_user_and_range(
        &self,
        user_id: u64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT id, user_id, attendance_date, created_at
            FROM attendance
            WHERE user_id = ?
            AND attendance_date BETWEEN ? AND ?
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
    }

    async fn find_by_user(&self, user_id: u64) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT id, user_id, attendance_date, created_at
            FROM attendance
            WHERE user_id = ?
            ORDER BY attendance_date DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch(&self.pool)
        .try_collect()
        .await
    }

    async fn find_by_id(&self, record_id: u64) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT id, user_id, attendance_date, created_at
            FROM attendance
            WHERE id = ?
            "#,
        )
        .bind(record_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_by_id(&self, record_id: u64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = ?")
            .bind(record_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
