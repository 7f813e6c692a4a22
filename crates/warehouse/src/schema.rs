//! Warehouse schema definitions
//!
//! DDL string generators; database and table names are substituted at
//! runtime. All statements are idempotent (`IF NOT EXISTS`) so schema setup
//! can run before every load.

/// Generate CREATE DATABASE statement
pub fn create_database(database: &str) -> String {
    format!("CREATE DATABASE IF NOT EXISTS {database}")
}

/// Generate CREATE TABLE for the station status table
pub fn create_status_table(database: &str, table: &str) -> String {
    format!(
        r#"CREATE TABLE IF NOT EXISTS {database}.{table} (
    last_updated Nullable(Int64),
    ttl Nullable(Int64),
    version Nullable(String),
    data_fetched_at DateTime64(0, 'UTC'),
    date_partition Date,
    stations String
) ENGINE = MergeTree()
PARTITION BY date_partition
ORDER BY data_fetched_at
COMMENT 'Raw station status snapshots - one row per collection event'"#
    )
}

/// Generate CREATE TABLE for the station information table
pub fn create_station_info_table(database: &str, table: &str) -> String {
    format!(
        r#"CREATE TABLE IF NOT EXISTS {database}.{table} (
    last_updated Nullable(Int64),
    ttl Nullable(Int64),
    version Nullable(String),
    data_fetched_at DateTime64(0, 'UTC'),
    stations String
) ENGINE = MergeTree()
ORDER BY data_fetched_at
COMMENT 'Station reference data - replaced wholesale on load'"#
    )
}

/// All statements needed for a working warehouse, in execution order
pub fn create_statements(database: &str, status_table: &str, info_table: &str) -> Vec<String> {
    vec![
        create_database(database),
        create_status_table(database, status_table),
        create_station_info_table(database, info_table),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_database() {
        assert_eq!(
            create_database("bike_sharing"),
            "CREATE DATABASE IF NOT EXISTS bike_sharing"
        );
    }

    #[test]
    fn test_status_table_ddl() {
        let sql = create_status_table("bike_sharing", "raw_station_status");
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS bike_sharing.raw_station_status"));
        assert!(sql.contains("data_fetched_at DateTime64(0, 'UTC')"));
        assert!(sql.contains("PARTITION BY date_partition"));
        assert!(sql.contains("ORDER BY data_fetched_at"));
    }

    #[test]
    fn test_station_info_table_ddl() {
        let sql = create_station_info_table("bike_sharing", "raw_station_info");
        assert!(sql.contains("bike_sharing.raw_station_info"));
        assert!(!sql.contains("PARTITION BY"));
    }

    #[test]
    fn test_create_statements_order() {
        let stmts = create_statements("db", "status", "info");
        assert_eq!(stmts.len(), 3);
        assert!(stmts[0].starts_with("CREATE DATABASE"));
        assert!(stmts[1].contains("db.status"));
        assert!(stmts[2].contains("db.info"));
    }
}
