//! Database schema initialization

use rusqlite::{params, Connection};

use super::{ProjectStore, StoreError, SCHEMA_VERSION};

impl ProjectStore {
    /// Initialize the schema if it does not exist yet
    ///
    /// Money columns hold integer cents; date columns hold ISO-8601 text so
    /// lexicographic comparison matches chronological order (the overdue
    /// query compares `deadline` against `date('now')` directly).
    pub(super) fn init_schema(&self, conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            CREATE TABLE IF NOT EXISTS architects (
                architect_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                phone_number TEXT NOT NULL,
                email TEXT NOT NULL,
                physical_address TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS contractors (
                contractor_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                phone_number TEXT NOT NULL,
                email TEXT NOT NULL,
                physical_address TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS customers (
                customer_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                phone_number TEXT NOT NULL,
                email TEXT NOT NULL,
                physical_address TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS projects (
                project_id INTEGER PRIMARY KEY,
                project_number INTEGER NOT NULL,
                project_name TEXT NOT NULL,
                building_type TEXT NOT NULL,
                address TEXT NOT NULL,
                erf_number TEXT NOT NULL,
                total_fee INTEGER NOT NULL,
                amount_paid INTEGER NOT NULL,
                deadline TEXT NOT NULL,
                completion_date TEXT,
                architect_id INTEGER NOT NULL REFERENCES architects(architect_id),
                contractor_id INTEGER NOT NULL REFERENCES contractors(contractor_id),
                customer_id INTEGER NOT NULL REFERENCES customers(customer_id)
            );
            CREATE INDEX IF NOT EXISTS idx_projects_number ON projects(project_number);
            CREATE INDEX IF NOT EXISTS idx_projects_name ON projects(project_name);
            CREATE INDEX IF NOT EXISTS idx_projects_completion ON projects(completion_date);
            "#,
        )?;

        // Record the version only on first initialization
        conn.execute(
            "INSERT INTO schema_version (version)
             SELECT ?1 WHERE NOT EXISTS (SELECT 1 FROM schema_version)",
            params![SCHEMA_VERSION],
        )?;

        Ok(())
    }
}
