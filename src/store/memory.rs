use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use super::AttendanceStore;
use crate::model::attendance::AttendanceRecord;

/// In-process store for tests. Known users are fixed at construction.
#[derive(Default)]
pub struct MemoryAttendanceStore {
    users: HashSet<u64>,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    rows: BTreeMap<u64, AttendanceRecord>,
}

impl MemoryAttendanceStore {
    pub fn with_users(users: impl IntoIterator<Item = u64>) -> Self {
        Self {
            users: users.into_iter().collect(),
            inner: Mutex::default(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.inner.lock().unwrap().rows.len()
    }
}

impl Inner {
    fn insert(&mut self, user_id: u64, date: NaiveDate) -> AttendanceRecord {
        self.next_id += 1;
        let record = AttendanceRecord {
            id: self.next_id,
            user_id,
            attendance_date: date,
            created_at: Utc::now(),
        };
        self.rows.insert(record.id, record.clone());
        record
    }
}

#[async_trait]
impl AttendanceStore for MemoryAttendanceStore {
    async fn user_exists(&self, user_id: u64) -> Result<bool, sqlx::Error> {
        Ok(self.users.contains(&user_id))
    }

    async fn insert_one(
        &self,
        user_id: u64,
        date: NaiveDate,
    ) -> Result<AttendanceRecord, sqlx::Error> {
        Ok(self.inner.lock().unwrap().insert(user_id, date))
    }

    async fn insert_many(
        &self,
        user_id: u64,
        dates: &[NaiveDate],
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let mut inner = self.inner.lock().unwrap();
        Ok(dates.iter().map(|&d| inner.insert(user_id, d)).collect())
    }

    async fn find_by_user_and_range(
        &self,
        user_id: u64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .rows
            .values()
            .filter(|r| r.user_id == user_id && r.attendance_date >= from && r.attendance_date <= to)
            .cloned()
            .collect())
    }

    async fn find_by_user(&self, user_id: u64) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .rows
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, record_id: u64) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        Ok(self.inner.lock().unwrap().rows.get(&record_id).cloned())
    }

    async fn delete_by_id(&self, record_id: u64) -> Result<bool, sqlx::Error> {
        Ok(self.inner.lock().unwrap().rows.remove(&record_id).is_some())
    }
}
