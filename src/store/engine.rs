//! Fitlog Record Store
//!
//! SQLite-backed persistence for workouts, meals, weights and the goal.
//! One `Store` handle owns the connection; it is opened at startup, shared
//! through `Arc`, and closed at shutdown.
//!
//! Thread-safe via a std Mutex around the connection (rusqlite's `Connection`
//! is `!Sync`). No lock is ever held across an `.await`.

use chrono::{DateTime, Utc};
use rusqlite::{params_from_iter, Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::store::error::{StoreError, StoreResult};
use crate::store::query::RecordFilter;
use crate::store::record::{get_date, Dated, Record};
use crate::store::types::{Goal, Meal, NewGoal, Weight, Workout};

/// File name of the database inside the data directory
pub const DATABASE_FILE: &str = "fitlog.db";

/// Handle to the record store
pub struct Store {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Store {
    /// Open (or create) the store inside `data_dir`
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        std::fs::create_dir_all(data_dir)?;
        let path = data_dir.join(DATABASE_FILE);

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
            ",
        )?;

        let store = Self::init(conn, Some(path))?;
        tracing::info!(path = ?store.path, "Opened record store");
        Ok(store)
    }

    /// A private in-memory store (tests, demos)
    pub fn in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> StoreResult<Self> {
        conn.execute_batch(Workout::SCHEMA)?;
        conn.execute_batch(Meal::SCHEMA)?;
        conn.execute_batch(Weight::SCHEMA)?;
        conn.execute_batch(Goal::SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Database file path, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Lock(format!("store connection poisoned: {}", e)))
    }

    // ==================== Generic CRUD ====================

    /// Insert a new record
    pub fn insert<R: Record>(&self, record: R) -> StoreResult<R> {
        let conn = self.lock()?;
        write_row(&conn, &record, false)?;
        tracing::debug!(kind = R::KIND, id = record.id(), "Inserted record");
        Ok(record)
    }

    /// Fetch a record by id
    pub fn get<R: Record>(&self, id: &str) -> StoreResult<R> {
        let conn = self.lock()?;
        read_row::<R>(&conn, id)?.ok_or_else(|| StoreError::not_found(R::KIND, id))
    }

    /// Read-modify-write a record by id
    ///
    /// `f` runs while the store lock is held, so the update is atomic with
    /// respect to other store calls.
    pub fn update<R, F>(&self, id: &str, f: F) -> StoreResult<R>
    where
        R: Record,
        F: FnOnce(&mut R),
    {
        let conn = self.lock()?;
        let mut record =
            read_row::<R>(&conn, id)?.ok_or_else(|| StoreError::not_found(R::KIND, id))?;
        f(&mut record);
        write_row(&conn, &record, true)?;
        tracing::debug!(kind = R::KIND, id, "Updated record");
        Ok(record)
    }

    /// Delete a record by id
    pub fn delete<R: Record>(&self, id: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        let sql = format!("DELETE FROM {} WHERE id = ?1", R::TABLE);
        let removed = conn.execute(&sql, [id])?;
        if removed == 0 {
            return Err(StoreError::not_found(R::KIND, id));
        }
        tracing::debug!(kind = R::KIND, id, "Deleted record");
        Ok(())
    }

    /// Any single record of this kind (oldest first)
    pub fn first<R: Record>(&self) -> StoreResult<Option<R>> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {} FROM {} ORDER BY rowid ASC LIMIT 1",
            R::COLUMNS.join(", "),
            R::TABLE
        );
        Ok(conn.query_row(&sql, [], R::from_row).optional()?)
    }

    /// Number of records of this kind
    pub fn count<R: Record>(&self) -> StoreResult<usize> {
        let conn = self.lock()?;
        let sql = format!("SELECT COUNT(*) FROM {}", R::TABLE);
        let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ==================== Dated queries ====================

    /// Records matching a date range / category filter, sorted and limited
    pub fn find<R: Dated>(&self, filter: &RecordFilter<R::Date>) -> StoreResult<Vec<R>> {
        let conn = self.lock()?;
        let (tail, params) = filter.to_sql(R::CATEGORY_COLUMN);
        let sql = format!("SELECT {} FROM {}{}", R::COLUMNS.join(", "), R::TABLE, tail);

        let mut stmt = conn.prepare_cached(&sql)?;
        let rows = stmt.query_map(params_from_iter(params), R::from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// The single most recent record by `date`
    pub fn latest<R: Dated>(&self) -> StoreResult<Option<R>> {
        let mut records = self.find::<R>(&RecordFilter::new().limit(1))?;
        Ok(records.pop())
    }

    /// Distinct raw `date` values across all records of this kind
    pub fn distinct_dates<R: Dated>(&self) -> StoreResult<Vec<R::Date>> {
        let conn = self.lock()?;
        let sql = format!("SELECT DISTINCT date FROM {}", R::TABLE);
        let mut stmt = conn.prepare_cached(&sql)?;
        let rows = stmt.query_map([], |row| get_date::<R::Date>(row, 0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    // ==================== Goal ====================

    /// Create the goal, or overwrite the existing one in place
    ///
    /// The existence check and the write happen under one lock acquisition,
    /// so concurrent calls can never leave two goal rows behind.
    pub fn upsert_goal(&self, new: NewGoal, now: DateTime<Utc>) -> StoreResult<Goal> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {} FROM {} ORDER BY rowid ASC LIMIT 1",
            Goal::COLUMNS.join(", "),
            Goal::TABLE
        );
        let existing = conn.query_row(&sql, [], Goal::from_row).optional()?;

        let goal = match existing {
            Some(mut goal) => {
                goal.replace_with(new, now);
                write_row(&conn, &goal, true)?;
                tracing::info!(goal_id = %goal.id, "Replaced existing goal");
                goal
            }
            None => {
                let goal = Goal::from_new(new, now);
                write_row(&conn, &goal, false)?;
                tracing::info!(goal_id = %goal.id, "Created goal");
                goal
            }
        };
        Ok(goal)
    }

    // ==================== Lifecycle ====================

    /// Verify the connection answers queries
    pub fn ping(&self) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    /// Close the connection, flushing SQLite state
    pub fn close(self) -> StoreResult<()> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|e| StoreError::Lock(format!("store connection poisoned: {}", e)))?;
        conn.close().map_err(|(_, e)| StoreError::Sqlite(e))?;
        tracing::info!("Record store closed");
        Ok(())
    }
}

fn read_row<R: Record>(conn: &Connection, id: &str) -> StoreResult<Option<R>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE id = ?1",
        R::COLUMNS.join(", "),
        R::TABLE
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    Ok(stmt.query_row([id], R::from_row).optional()?)
}

fn write_row<R: Record>(conn: &Connection, record: &R, replace: bool) -> StoreResult<()> {
    let placeholders: Vec<String> = (1..=R::COLUMNS.len()).map(|i| format!("?{i}")).collect();
    let verb = if replace { "INSERT OR REPLACE" } else { "INSERT" };
    let sql = format!(
        "{} INTO {} ({}) VALUES ({})",
        verb,
        R::TABLE,
        R::COLUMNS.join(", "),
        placeholders.join(", ")
    );
    conn.prepare_cached(&sql)?
        .execute(params_from_iter(record.values()))?;
    Ok(())
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("path", &self.path).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::{MealPatch, NewMeal, NewWeight, NewWorkout};
    use chrono::{NaiveDate, TimeZone};
    use tempfile::tempdir;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, d, h, 0, 0).unwrap()
    }

    fn workout(kind: &str, date: DateTime<Utc>) -> Workout {
        Workout::from_new(
            NewWorkout {
                kind: kind.to_string(),
                name: format!("{} session", kind),
                duration: 30,
                calories_burned: 200,
                notes: None,
                date: Some(date),
            },
            date,
        )
    }

    fn weight(lbs: f64, d: u32) -> Weight {
        Weight::from_new(
            NewWeight {
                weight: lbs,
                date: NaiveDate::from_ymd_opt(2026, 2, d),
            },
            at(d, 7),
        )
    }

    #[test]
    fn test_insert_and_get() {
        let store = Store::in_memory().unwrap();
        let saved = store.insert(workout("cardio", at(9, 8))).unwrap();

        let fetched: Workout = store.get(&saved.id).unwrap();
        assert_eq!(fetched, saved);
    }

    #[test]
    fn test_get_unknown_id_is_not_found() {
        let store = Store::in_memory().unwrap();
        let err = store.get::<Meal>("missing").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Meal not found: missing");
    }

    #[test]
    fn test_delete_unknown_id_is_not_found() {
        let store = Store::in_memory().unwrap();
        assert!(store.delete::<Workout>("missing").unwrap_err().is_not_found());
        assert!(store.delete::<Meal>("missing").unwrap_err().is_not_found());
        assert!(store.delete::<Weight>("missing").unwrap_err().is_not_found());
        assert!(store.delete::<Goal>("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_removes_record() {
        let store = Store::in_memory().unwrap();
        let saved = store.insert(weight(180.0, 9)).unwrap();

        store.delete::<Weight>(&saved.id).unwrap();
        assert!(store.get::<Weight>(&saved.id).unwrap_err().is_not_found());
        assert_eq!(store.count::<Weight>().unwrap(), 0);
    }

    #[test]
    fn test_update_merges_fields() {
        let store = Store::in_memory().unwrap();
        let meal = Meal::from_new(
            NewMeal {
                kind: "lunch".into(),
                description: "Chicken salad".into(),
                calories: 450,
                protein: 35,
                carbs: Some(25),
                fat: Some(18),
                notes: None,
                date: Some(at(9, 12)),
            },
            at(9, 12),
        );
        let saved = store.insert(meal).unwrap();

        let patch = MealPatch {
            calories: Some(500),
            ..Default::default()
        };
        let updated: Meal = store
            .update(&saved.id, |m: &mut Meal| m.apply(patch, at(9, 13)))
            .unwrap();

        assert_eq!(updated.calories, 500);
        assert_eq!(updated.protein, 35);
        assert_eq!(updated.updated_at, at(9, 13));
        assert_eq!(store.get::<Meal>(&saved.id).unwrap(), updated);
        assert_eq!(store.count::<Meal>().unwrap(), 1);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let store = Store::in_memory().unwrap();
        let err = store
            .update::<Weight, _>("missing", |w| w.weight = 1.0)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_find_range_category_and_order() {
        let store = Store::in_memory().unwrap();
        store.insert(workout("cardio", at(1, 8))).unwrap();
        store.insert(workout("strength", at(2, 8))).unwrap();
        store.insert(workout("cardio", at(3, 8))).unwrap();
        store.insert(workout("cardio", at(5, 8))).unwrap();

        let found: Vec<Workout> = store
            .find(&RecordFilter::between(at(2, 0), at(4, 0)))
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].date, at(3, 8));
        assert_eq!(found[1].date, at(2, 8));

        let cardio: Vec<Workout> = store
            .find(&RecordFilter::new().category("cardio").ascending())
            .unwrap();
        let dates: Vec<_> = cardio.iter().map(|w| w.date).collect();
        assert_eq!(dates, vec![at(1, 8), at(3, 8), at(5, 8)]);

        let limited: Vec<Workout> = store.find(&RecordFilter::new().limit(2)).unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].date, at(5, 8));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let store = Store::in_memory().unwrap();
        store.insert(weight(181.0, 1)).unwrap();
        store.insert(weight(180.0, 4)).unwrap();
        store.insert(weight(179.0, 8)).unwrap();

        let day = |d| NaiveDate::from_ymd_opt(2026, 2, d).unwrap();
        let found: Vec<Weight> = store
            .find(&RecordFilter::between(day(1), day(8)).ascending())
            .unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].weight, 181.0);
    }

    #[test]
    fn test_latest_and_distinct_dates() {
        let store = Store::in_memory().unwrap();
        assert!(store.latest::<Weight>().unwrap().is_none());

        store.insert(weight(182.0, 3)).unwrap();
        store.insert(weight(180.5, 7)).unwrap();
        store.insert(weight(181.0, 5)).unwrap();
        store.insert(weight(181.2, 5)).unwrap();

        let latest = store.latest::<Weight>().unwrap().unwrap();
        assert_eq!(latest.weight, 180.5);

        let mut dates = store.distinct_dates::<Weight>().unwrap();
        dates.sort();
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());
    }

    #[test]
    fn test_upsert_goal_keeps_single_record() {
        let store = Store::in_memory().unwrap();
        let first = store
            .upsert_goal(
                NewGoal {
                    start_weight: 200.0,
                    target_weight: 170.0,
                    target_date: None,
                    daily_calorie_goal: Some(2000),
                    weekly_workouts: Some(4),
                    active_days_per_week: Some(5),
                },
                at(1, 8),
            )
            .unwrap();

        let second = store
            .upsert_goal(
                NewGoal {
                    start_weight: 195.0,
                    target_weight: 175.0,
                    target_date: None,
                    daily_calorie_goal: None,
                    weekly_workouts: None,
                    active_days_per_week: None,
                },
                at(2, 8),
            )
            .unwrap();

        assert_eq!(store.count::<Goal>().unwrap(), 1);
        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.start_weight, 195.0);
        assert_eq!(second.daily_calorie_goal, None);

        let stored = store.first::<Goal>().unwrap().unwrap();
        assert_eq!(stored, second);
    }

    #[test]
    fn test_concurrent_upsert_goal_keeps_single_record() {
        let dir = tempdir().unwrap();
        let store = std::sync::Arc::new(Store::open(dir.path()).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .upsert_goal(
                            NewGoal {
                                start_weight: 200.0 + i as f64,
                                target_weight: 170.0,
                                target_date: None,
                                daily_calorie_goal: None,
                                weekly_workouts: None,
                                active_days_per_week: None,
                            },
                            at(1, 8),
                        )
                        .unwrap()
                })
            })
            .collect();

        let ids: Vec<String> = handles
            .into_iter()
            .map(|h| h.join().unwrap().id)
            .collect();

        assert_eq!(store.count::<Goal>().unwrap(), 1);
        assert!(ids.iter().all(|id| *id == ids[0]));
    }

    #[test]
    fn test_persistence() {
        let dir = tempdir().unwrap();
        let id = {
            let store = Store::open(dir.path()).unwrap();
            let saved = store.insert(workout("cardio", at(9, 8))).unwrap();
            store.close().unwrap();
            saved.id
        };

        let store = Store::open(dir.path()).unwrap();
        let fetched: Workout = store.get(&id).unwrap();
        assert_eq!(fetched.kind, "cardio");
        assert!(store.path().unwrap().ends_with(DATABASE_FILE));
        store.ping().unwrap();
    }
}
