use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub base_url: String,
    pub max_pages: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub page_delay_ms: u64,
    pub exchange_rate: f64,
    pub csv_path: PathBuf,
    /// Relational sink is skipped when unset.
    pub database_url: Option<String>,
    pub db_table: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Spreadsheet sink is skipped when unset.
    pub sheets_spreadsheet_id: Option<String>,
    pub sheets_credentials_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("base_url", &self.base_url)
            .field("max_pages", &self.max_pages)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("exchange_rate", &self.exchange_rate)
            .field("csv_path", &self.csv_path)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_table", &self.db_table)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("sheets_spreadsheet_id", &self.sheets_spreadsheet_id)
            .field("sheets_credentials_path", &self.sheets_credentials_path)
            .finish()
    }
}
