use super::*;
use crate::TableId;

/// A completed session: per-player totals in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    id: TableId,
    entries: Vec<TableEntry>,
}

impl Table {
    pub fn new(id: TableId, entries: Vec<TableEntry>) -> Self {
        Self { id, entries }
    }
    pub fn id(&self) -> TableId {
        self.id
    }
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use crate::pg::*;

    /// Entries are kept as one JSONB payload per table.
    impl Schema for Table {
        fn name() -> &'static str {
            TABLES
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                TABLES,
                " (
                    id          BIGSERIAL PRIMARY KEY,
                    data        JSONB NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            ""
        }
        fn truncates() -> &'static str {
            const_format::concatcp!("TRUNCATE TABLE ", TABLES, " RESTART IDENTITY;")
        }
    }
}
