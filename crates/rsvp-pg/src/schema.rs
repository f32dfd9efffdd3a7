/// Schema metadata for PostgreSQL tables.
///
/// Provides compile-time SQL generation for table creation, indexing,
/// and teardown. All methods return `&'static str` to avoid runtime
/// allocations and enable compile-time string construction via
/// `const_format::concatcp!`.
///
/// This trait contains no I/O operations; it purely describes table
/// structure. [`create`] and [`teardown`] apply it to a live connection.
pub trait Schema {
    /// Returns the table name in the database.
    fn name() -> &'static str;
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL statement.
    fn creates() -> &'static str;
    /// Returns `CREATE INDEX IF NOT EXISTS` statements for all indices.
    fn indices() -> &'static str;
    /// Returns `DROP TABLE IF EXISTS` statement.
    fn drops() -> &'static str;
}

/// Creates the table and its indices. Idempotent.
pub async fn create<S: Schema>(client: &tokio_postgres::Client) -> Result<(), super::PgErr> {
    log::info!("creating table {}", S::name());
    client.batch_execute(S::creates()).await?;
    client.batch_execute(S::indices()).await
}

/// Drops the table. Idempotent.
pub async fn teardown<S: Schema>(client: &tokio_postgres::Client) -> Result<(), super::PgErr> {
    log::info!("dropping table {}", S::name());
    client.batch_execute(S::drops()).await
}
