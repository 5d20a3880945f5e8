/// Trait to define the schema of a database object for PostgreSQL.
pub trait SqlxSchema {
    /// The name of the database table.
    const TABLE_NAME: &'static str;
    /// The name of the primary key column.
    const ID_COLUMN_NAME: &'static str;
    /// A list of all column names in the table, primary key first.
    const COLUMNS: &'static [&'static str];
    /// Index statements run after the table is created.
    const INDEXES_SQL: &'static [&'static str] = &[];

    fn table_name() -> &'static str {
        Self::TABLE_NAME
    }

    /// Columns written on insert. The primary key is filled by the database.
    fn insert_columns() -> Vec<&'static str> {
        Self::COLUMNS.iter().copied().filter(|c| *c != Self::ID_COLUMN_NAME).collect()
    }

    /// Example: "SELECT id, content FROM document_embedding"
    fn select_all_sql() -> String {
        format!("SELECT {} FROM {}", Self::COLUMNS.join(", "), Self::TABLE_NAME)
    }

    /// Example: "INSERT INTO document_embedding (content, metadata) "
    fn insert_prefix_sql() -> String {
        format!("INSERT INTO {} ({}) ", Self::TABLE_NAME, Self::insert_columns().join(", "))
    }

    /// Statements creating the table and everything it owns (sequences,
    /// functions), in execution order.
    fn create_table_sql() -> Vec<String>;
}
