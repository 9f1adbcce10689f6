/// Schema metadata for PostgreSQL tables.
///
/// All methods return `&'static str` so statements can be assembled at
/// compile time with [`const_format::concatcp!`]. The trait performs no
/// I/O; the stores run the statements.
pub trait Schema {
    /// Returns the table name in the database.
    fn name() -> &'static str;
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL statement.
    fn creates() -> &'static str;
    /// Returns `CREATE INDEX IF NOT EXISTS` statements for all indices.
    fn indices() -> &'static str;
    /// Returns `TRUNCATE TABLE` statement for clearing data.
    fn truncates() -> &'static str;
}
