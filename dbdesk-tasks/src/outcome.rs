/// Printable command results
///
/// Read commands produce an [`Outcome::Rows`] table built from typed rows;
/// write commands produce [`Outcome::Completed`] with the affected row count.
use std::fmt;

/// Placeholder printed for SQL NULL
pub const NULL: &str = "NULL";

/// A row type that can be rendered as a table line
pub trait Record {
    /// Column headers, in the order of [`Record::values`]
    const COLUMNS: &'static [&'static str];

    /// Column values rendered as text
    fn values(&self) -> Vec<String>;
}

/// Renders a nullable text column
pub fn nullable(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| NULL.to_string())
}

/// Query result ready for printing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_records<R: Record>(records: &[R]) -> Self {
        Table {
            columns: R::COLUMNS.to_vec(),
            rows: records.iter().map(Record::values).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.columns.join(" | "))?;
        if self.rows.is_empty() {
            return write!(f, "\n(no rows)");
        }
        for row in &self.rows {
            write!(f, "\n{}", row.join(" | "))?;
        }
        Ok(())
    }
}

/// Result of one menu command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Rows returned by a read command
    Rows(Table),

    /// A write command finished
    Completed {
        /// Rows inserted, updated or deleted
        rows_affected: u64,
    },

    /// The command stopped early with an explanation; nothing was written
    Notice(String),
}

impl Outcome {
    pub fn rows<R: Record>(records: &[R]) -> Self {
        Outcome::Rows(Table::from_records(records))
    }

    pub fn completed(rows_affected: u64) -> Self {
        Outcome::Completed { rows_affected }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Rows(table) => write!(f, "{}", table),
            Outcome::Completed { rows_affected } => {
                write!(f, "Task completed ({} row(s) affected)", rows_affected)
            }
            Outcome::Notice(message) => write!(f, "{}", message),
        }
    }
}
