//! Row mapping between record types and SQLite tables
//!
//! `Record` describes how a kind is laid out in its table so the store can
//! offer generic insert/get/update/delete. `Dated` adds the `date` column used
//! by range, sort and "latest" queries.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::{FromSqlError, Type, Value, ValueRef};
use rusqlite::Row;

use crate::store::types::{Goal, Meal, Weight, Workout};

/// A record kind persisted in its own table
pub trait Record: Sized + Send + 'static {
    /// Human-readable kind name used in errors ("Workout")
    const KIND: &'static str;
    /// Table name
    const TABLE: &'static str;
    /// Column names in `values()` / `from_row()` order; `id` comes first
    const COLUMNS: &'static [&'static str];
    /// `CREATE TABLE` / `CREATE INDEX` statements
    const SCHEMA: &'static str;

    fn id(&self) -> &str;

    /// Column values in `COLUMNS` order
    fn values(&self) -> Vec<Value>;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// A record kind with a `date` column
pub trait Dated: Record {
    type Date: DateKey + Copy + Ord;

    /// Column holding the free-form category, if the kind has one
    const CATEGORY_COLUMN: Option<&'static str> = None;
}

/// A value that can be stored in and compared on a `date` column
pub trait DateKey: Sized {
    fn to_sql(&self) -> Value;
    fn from_sql(value: ValueRef<'_>) -> Result<Self, FromSqlError>;
}

impl DateKey for DateTime<Utc> {
    fn to_sql(&self) -> Value {
        Value::Integer(self.timestamp_millis())
    }

    fn from_sql(value: ValueRef<'_>) -> Result<Self, FromSqlError> {
        let millis = value.as_i64()?;
        DateTime::from_timestamp_millis(millis).ok_or(FromSqlError::OutOfRange(millis))
    }
}

impl DateKey for NaiveDate {
    fn to_sql(&self) -> Value {
        Value::Text(self.format("%Y-%m-%d").to_string())
    }

    fn from_sql(value: ValueRef<'_>) -> Result<Self, FromSqlError> {
        let text = value.as_str()?;
        NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// Read a `DateKey` column, mapping decode failures to a rusqlite error
pub(crate) fn get_date<D: DateKey>(row: &Row<'_>, idx: usize) -> rusqlite::Result<D> {
    let value = row.get_ref(idx)?;
    let data_type = value.data_type();
    D::from_sql(value).map_err(|e| match e {
        FromSqlError::InvalidType => rusqlite::Error::InvalidColumnType(
            idx,
            format!("column {idx}"),
            data_type,
        ),
        other => rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(other)),
    })
}

fn get_opt_date<D: DateKey>(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<D>> {
    match row.get_ref(idx)? {
        ValueRef::Null => Ok(None),
        _ => get_date(row, idx).map(Some),
    }
}

fn opt_int(value: Option<i64>) -> Value {
    value.map(Value::Integer).unwrap_or(Value::Null)
}

fn opt_text(value: &Option<String>) -> Value {
    value.clone().map(Value::Text).unwrap_or(Value::Null)
}

impl Record for Workout {
    const KIND: &'static str = "Workout";
    const TABLE: &'static str = "workouts";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "type",
        "name",
        "duration",
        "calories_burned",
        "notes",
        "date",
        "created_at",
        "updated_at",
    ];
    const SCHEMA: &'static str = "
        CREATE TABLE IF NOT EXISTS workouts (
            id TEXT PRIMARY KEY,
            type TEXT NOT NULL,
            name TEXT NOT NULL,
            duration INTEGER NOT NULL,
            calories_burned INTEGER NOT NULL DEFAULT 0,
            notes TEXT,
            date INTEGER NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_workouts_date ON workouts(date);
        CREATE INDEX IF NOT EXISTS idx_workouts_type ON workouts(type);
    ";

    fn id(&self) -> &str {
        &self.id
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.clone()),
            Value::Text(self.kind.clone()),
            Value::Text(self.name.clone()),
            Value::Integer(self.duration),
            Value::Integer(self.calories_burned),
            opt_text(&self.notes),
            self.date.to_sql(),
            self.created_at.to_sql(),
            self.updated_at.to_sql(),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            kind: row.get(1)?,
            name: row.get(2)?,
            duration: row.get(3)?,
            calories_burned: row.get(4)?,
            notes: row.get(5)?,
            date: get_date(row, 6)?,
            created_at: get_date(row, 7)?,
            updated_at: get_date(row, 8)?,
        })
    }
}

impl Dated for Workout {
    type Date = DateTime<Utc>;
    const CATEGORY_COLUMN: Option<&'static str> = Some("type");
}

impl Record for Meal {
    const KIND: &'static str = "Meal";
    const TABLE: &'static str = "meals";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "type",
        "description",
        "calories",
        "protein",
        "carbs",
        "fat",
        "notes",
        "date",
        "created_at",
        "updated_at",
    ];
    const SCHEMA: &'static str = "
        CREATE TABLE IF NOT EXISTS meals (
            id TEXT PRIMARY KEY,
            type TEXT NOT NULL,
            description TEXT NOT NULL,
            calories INTEGER NOT NULL,
            protein INTEGER NOT NULL DEFAULT 0,
            carbs INTEGER,
            fat INTEGER,
            notes TEXT,
            date INTEGER NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_meals_date ON meals(date);
        CREATE INDEX IF NOT EXISTS idx_meals_type ON meals(type);
    ";

    fn id(&self) -> &str {
        &self.id
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.clone()),
            Value::Text(self.kind.clone()),
            Value::Text(self.description.clone()),
            Value::Integer(self.calories),
            Value::Integer(self.protein),
            opt_int(self.carbs),
            opt_int(self.fat),
            opt_text(&self.notes),
            self.date.to_sql(),
            self.created_at.to_sql(),
            self.updated_at.to_sql(),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            kind: row.get(1)?,
            description: row.get(2)?,
            calories: row.get(3)?,
            protein: row.get(4)?,
            carbs: row.get(5)?,
            fat: row.get(6)?,
            notes: row.get(7)?,
            date: get_date(row, 8)?,
            created_at: get_date(row, 9)?,
            updated_at: get_date(row, 10)?,
        })
    }
}

impl Dated for Meal {
    type Date = DateTime<Utc>;
    const CATEGORY_COLUMN: Option<&'static str> = Some("type");
}

impl Record for Weight {
    const KIND: &'static str = "Weight entry";
    const TABLE: &'static str = "weights";
    const COLUMNS: &'static [&'static str] = &["id", "weight", "date", "created_at"];
    const SCHEMA: &'static str = "
        CREATE TABLE IF NOT EXISTS weights (
            id TEXT PRIMARY KEY,
            weight REAL NOT NULL,
            date TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_weights_date ON weights(date);
    ";

    fn id(&self) -> &str {
        &self.id
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.clone()),
            Value::Real(self.weight),
            self.date.to_sql(),
            self.created_at.to_sql(),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            weight: row.get(1)?,
            date: get_date(row, 2)?,
            created_at: get_date(row, 3)?,
        })
    }
}

impl Dated for Weight {
    type Date = NaiveDate;
}

impl Record for Goal {
    const KIND: &'static str = "Goal";
    const TABLE: &'static str = "goals";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "start_weight",
        "target_weight",
        "target_date",
        "daily_calorie_goal",
        "weekly_workouts",
        "active_days_per_week",
        "created_at",
        "updated_at",
    ];
    const SCHEMA: &'static str = "
        CREATE TABLE IF NOT EXISTS goals (
            id TEXT PRIMARY KEY,
            start_weight REAL NOT NULL,
            target_weight REAL NOT NULL,
            target_date TEXT,
            daily_calorie_goal INTEGER,
            weekly_workouts INTEGER,
            active_days_per_week INTEGER,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );
    ";

    fn id(&self) -> &str {
        &self.id
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.clone()),
            Value::Real(self.start_weight),
            Value::Real(self.target_weight),
            self.target_date.map(|d| d.to_sql()).unwrap_or(Value::Null),
            opt_int(self.daily_calorie_goal),
            opt_int(self.weekly_workouts),
            opt_int(self.active_days_per_week),
            self.created_at.to_sql(),
            self.updated_at.to_sql(),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            start_weight: row.get(1)?,
            target_weight: row.get(2)?,
            target_date: get_opt_date(row, 3)?,
            daily_calorie_goal: row.get(4)?,
            weekly_workouts: row.get(5)?,
            active_days_per_week: row.get(6)?,
            created_at: get_date(row, 7)?,
            updated_at: get_date(row, 8)?,
        })
    }
}
