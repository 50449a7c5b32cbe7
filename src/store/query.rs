//! Range/sort/limit filters for dated records

use rusqlite::types::Value;

use crate::store::record::DateKey;

/// Sort direction on the `date` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    fn sql(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// Filter over a dated record kind
///
/// Bounds are inclusive on both ends. The category filter is ignored for
/// kinds without a category column.
#[derive(Debug, Clone)]
pub struct RecordFilter<D> {
    pub since: Option<D>,
    pub until: Option<D>,
    pub category: Option<String>,
    pub order: SortOrder,
    pub limit: Option<usize>,
}

impl<D> Default for RecordFilter<D> {
    fn default() -> Self {
        Self {
            since: None,
            until: None,
            category: None,
            order: SortOrder::Descending,
            limit: None,
        }
    }
}

impl<D: DateKey> RecordFilter<D> {
    /// Everything, newest first
    pub fn new() -> Self {
        Self::default()
    }

    /// Records with `since <= date <= until`
    pub fn between(since: D, until: D) -> Self {
        Self {
            since: Some(since),
            until: Some(until),
            ..Self::default()
        }
    }

    pub fn since(mut self, since: D) -> Self {
        self.since = Some(since);
        self
    }

    pub fn until(mut self, until: D) -> Self {
        self.until = Some(until);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn ascending(self) -> Self {
        self.order(SortOrder::Ascending)
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render the WHERE/ORDER/LIMIT tail and its bound parameters
    pub(crate) fn to_sql(&self, category_column: Option<&str>) -> (String, Vec<Value>) {
        let mut clauses = Vec::new();
        let mut params = Vec::new();

        if let Some(since) = &self.since {
            params.push(since.to_sql());
            clauses.push(format!("date >= ?{}", params.len()));
        }
        if let Some(until) = &self.until {
            params.push(until.to_sql());
            clauses.push(format!("date <= ?{}", params.len()));
        }
        if let (Some(column), Some(category)) = (category_column, &self.category) {
            params.push(Value::Text(category.clone()));
            clauses.push(format!("{} = ?{}", column, params.len()));
        }

        let mut sql = String::new();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        // rowid breaks ties so equal dates keep insertion order
        let dir = self.order.sql();
        sql.push_str(&format!(" ORDER BY date {dir}, rowid {dir}"));

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        (sql, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    #[test]
    fn test_default_filter_sql() {
        let (sql, params) = RecordFilter::<NaiveDate>::new().to_sql(None);
        assert_eq!(sql, " ORDER BY date DESC, rowid DESC");
        assert!(params.is_empty());
    }

    #[test]
    fn test_full_filter_sql() {
        let filter = RecordFilter::between(day(1), day(7))
            .category("cardio")
            .ascending()
            .limit(5);
        let (sql, params) = filter.to_sql(Some("type"));

        assert_eq!(
            sql,
            " WHERE date >= ?1 AND date <= ?2 AND type = ?3 ORDER BY date ASC, rowid ASC LIMIT 5"
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_category_ignored_without_column() {
        let filter = RecordFilter::new().until(day(3)).category("cardio");
        let (sql, params) = filter.to_sql(None);
        assert_eq!(sql, " WHERE date <= ?1 ORDER BY date DESC, rowid DESC");
        assert_eq!(params.len(), 1);
    }
}
