//! Materialized query results.

use rusqlite::types::Value;

/// Finite, restartable sequence of rows returned by a query.
///
/// Starts positioned before the first row, like a freshly returned cursor;
/// call `move_to_first` or `move_to_next` before reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    position: isize,
}

impl Cursor {
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows,
            position: -1,
        }
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Current position; `-1` before the first row, `count()` after the last.
    pub fn position(&self) -> isize {
        self.position
    }

    /// Moves to `position`, clamping to the before-first/after-last sentinels.
    ///
    /// Returns whether the cursor now points at a row.
    pub fn move_to_position(&mut self, position: isize) -> bool {
        let count = self.rows.len() as isize;
        self.position = position.clamp(-1, count);
        self.position >= 0 && self.position < count
    }

    pub fn move_to_first(&mut self) -> bool {
        self.move_to_position(0)
    }

    pub fn move_to_next(&mut self) -> bool {
        self.move_to_position(self.position + 1)
    }

    pub fn is_before_first(&self) -> bool {
        self.position < 0
    }

    pub fn is_after_last(&self) -> bool {
        self.position >= self.rows.len() as isize
    }

    /// Value at `column` in the current row.
    pub fn get(&self, column: usize) -> Option<&Value> {
        let row = usize::try_from(self.position).ok()?;
        self.rows.get(row)?.get(column)
    }

    pub fn is_null(&self, column: usize) -> bool {
        matches!(self.get(column), None | Some(Value::Null))
    }

    pub fn get_long(&self, column: usize) -> Option<i64> {
        match self.get(column)? {
            Value::Integer(number) => Some(*number),
            _ => None,
        }
    }

    pub fn get_string(&self, column: usize) -> Option<String> {
        match self.get(column)? {
            Value::Text(text) => Some(text.clone()),
            Value::Integer(number) => Some(number.to_string()),
            Value::Real(number) => Some(number.to_string()),
            Value::Null | Value::Blob(_) => None,
        }
    }

    /// Iterates every row from the start without moving the cursor.
    pub fn rows(&self) -> impl Iterator<Item = CursorRow<'_>> {
        self.rows.iter().map(|values| CursorRow {
            columns: &self.columns,
            values,
        })
    }
}

/// Borrowed view of one cursor row.
#[derive(Debug, Clone, Copy)]
pub struct CursorRow<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> CursorRow<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let index = self.columns.iter().position(|name| name == column)?;
        self.values.get(index)
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::Cursor;
    use rusqlite::types::Value;

    fn sample() -> Cursor {
        Cursor::new(
            vec!["_id".to_string(), "name".to_string()],
            vec![
                vec![Value::Integer(1), Value::Text("Toto".to_string())],
                vec![Value::Integer(2), Value::Null],
            ],
        )
    }

    #[test]
    fn cursor_walks_rows_and_restarts() {
        let mut cursor = sample();
        assert!(cursor.is_before_first());
        assert_eq!(cursor.get(0), None);

        assert!(cursor.move_to_next());
        assert_eq!(cursor.get_long(0), Some(1));
        assert!(cursor.move_to_next());
        assert!(cursor.is_null(1));
        assert!(!cursor.move_to_next());
        assert!(cursor.is_after_last());
        assert!(!cursor.move_to_next());

        assert!(cursor.move_to_first());
        assert_eq!(cursor.get_string(1).as_deref(), Some("Toto"));
    }

    #[test]
    fn rows_iterate_by_column_name() {
        let cursor = sample();
        let names: Vec<_> = cursor
            .rows()
            .map(|row| row.get("name").cloned())
            .collect();
        assert_eq!(
            names,
            vec![Some(Value::Text("Toto".to_string())), Some(Value::Null)]
        );
        assert_eq!(cursor.column_index("name"), Some(1));
        assert_eq!(cursor.column_index("breed"), None);
    }

    #[test]
    fn empty_cursor_cannot_move_to_first() {
        let mut cursor = Cursor::new(vec!["_id".to_string()], Vec::new());
        assert!(cursor.is_empty());
        assert!(!cursor.move_to_first());
        assert!(cursor.is_after_last());
    }
}
