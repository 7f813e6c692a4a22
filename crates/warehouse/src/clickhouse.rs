//! ClickHouse warehouse implementation
//!
//! Append-only: this client only ever creates tables, inserts rows, and
//! reads back the set of loaded collection timestamps. Deduplication happens
//! upstream, before rows are built.

use std::collections::HashSet;

use async_trait::async_trait;
use clickhouse::insert::Insert;
use clickhouse::Client;

use dockstream_store::format_timestamp;

use crate::error::WarehouseError;
use crate::rows::{StationInfoRow, StatusRow};
use crate::schema;
use crate::Warehouse;

/// Default ClickHouse HTTP URL
pub const DEFAULT_URL: &str = "http://localhost:8123";

/// Configuration for the ClickHouse warehouse
#[derive(Debug, Clone)]
pub struct ClickHouseConfig {
    /// ClickHouse HTTP URL (e.g., "http://localhost:8123")
    pub url: String,

    /// Database name
    pub database: String,

    /// Station status table
    pub status_table: String,

    /// Station information table
    pub station_info_table: String,

    /// Username for authentication (optional)
    pub username: Option<String>,

    /// Password for authentication (optional)
    pub password: Option<String>,
}

impl Default for ClickHouseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.into(),
            database: "bike_sharing".into(),
            status_table: "raw_station_status".into(),
            station_info_table: "raw_station_info".into(),
            username: None,
            password: None,
        }
    }
}

impl ClickHouseConfig {
    /// Set the ClickHouse URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the database name
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the status table name
    pub fn with_status_table(mut self, table: impl Into<String>) -> Self {
        self.status_table = table.into();
        self
    }

    /// Set authentication credentials
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Build the ClickHouse client from this config
    ///
    /// The client carries no default database; every statement uses
    /// qualified names so schema setup works before the database exists.
    pub fn build_client(&self) -> Client {
        let mut client = Client::default().with_url(&self.url);

        if let Some(ref username) = self.username {
            client = client.with_user(username);
        }

        if let Some(ref password) = self.password {
            client = client.with_password(password);
        }

        client
    }
}

/// ClickHouse-backed warehouse
pub struct ClickHouseWarehouse {
    client: Client,
    config: ClickHouseConfig,
}

impl ClickHouseWarehouse {
    /// Create a warehouse client
    pub fn new(config: ClickHouseConfig) -> Self {
        let client = config.build_client();
        Self { client, config }
    }

    /// Get reference to config
    pub fn config(&self) -> &ClickHouseConfig {
        &self.config
    }

    /// Qualified status table name (`database.table`)
    fn status_table(&self) -> String {
        format!("{}.{}", self.config.database, self.config.status_table)
    }

    /// Qualified station info table name
    fn station_info_table(&self) -> String {
        format!("{}.{}", self.config.database, self.config.station_info_table)
    }

    /// Test connectivity
    pub async fn ping(&self) -> Result<(), WarehouseError> {
        self.client.query("SELECT 1").execute().await?;
        Ok(())
    }

    /// Create the database and tables if they do not exist
    pub async fn ensure_schema(&self) -> Result<(), WarehouseError> {
        let statements = schema::create_statements(
            &self.config.database,
            &self.config.status_table,
            &self.config.station_info_table,
        );
        for sql in &statements {
            self.client.query(sql).execute().await?;
        }
        tracing::debug!(
            database = %self.config.database,
            "warehouse schema ensured"
        );
        Ok(())
    }

    /// Replace the station information snapshot
    ///
    /// Reference data holds exactly one current snapshot, so this truncates
    /// before inserting rather than appending.
    pub async fn replace_station_info(&self, row: &StationInfoRow) -> Result<(), WarehouseError> {
        let table = self.station_info_table();

        self.client
            .query(&format!("TRUNCATE TABLE {table}"))
            .execute()
            .await?;

        let mut insert: Insert<StationInfoRow> = self.client.insert(&table).await?;
        insert.write(row).await?;
        insert.end().await?;

        tracing::info!(table = %table, "replaced station information");
        Ok(())
    }
}

#[async_trait]
impl Warehouse for ClickHouseWarehouse {
    async fn loaded_timestamps(&self) -> Result<HashSet<String>, WarehouseError> {
        let sql = format!(
            "SELECT DISTINCT toInt64(data_fetched_at) FROM {}",
            self.status_table()
        );
        let seconds = self.client.query(&sql).fetch_all::<i64>().await?;

        let mut loaded = HashSet::with_capacity(seconds.len());
        for secs in seconds {
            match chrono::DateTime::from_timestamp(secs, 0) {
                Some(dt) => {
                    loaded.insert(format_timestamp(dt.naive_utc()));
                }
                None => {
                    tracing::warn!(epoch = secs, "ignoring out-of-range ledger timestamp");
                }
            }
        }

        tracing::debug!(count = loaded.len(), "read loaded timestamps from ledger");
        Ok(loaded)
    }

    async fn append_rows(&self, rows: &[StatusRow]) -> Result<(), WarehouseError> {
        if rows.is_empty() {
            return Ok(());
        }

        let table = self.status_table();
        let mut insert: Insert<StatusRow> = self.client.insert(&table).await?;
        for row in rows {
            insert.write(row).await?;
        }
        insert.end().await?;

        tracing::debug!(table = %table, count = rows.len(), "appended status rows");
        Ok(())
    }
}

#[cfg(test)]
#[path = "clickhouse_test.rs"]
mod clickhouse_test;
