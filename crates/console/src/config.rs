/// Console configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Base URL of the platform API (default: `http://localhost:8080/api`).
    pub api_base_url: String,
    /// Where the access token is persisted between runs.
    pub token_path: String,
    /// Rows per page for entity listings (default: `8`).
    pub page_size: u32,
    /// Notification poll interval in seconds (default: `30`).
    pub poll_interval_secs: u64,
}

impl ConsoleConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                       |
    /// |----------------------|-------------------------------|
    /// | `API_BASE_URL`       | `http://localhost:8080/api`   |
    /// | `TOKEN_PATH`         | `.utezone-token`              |
    /// | `PAGE_SIZE`          | `8`                           |
    /// | `POLL_INTERVAL_SECS` | `30`                          |
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api".into());

        let token_path =
            std::env::var("TOKEN_PATH").unwrap_or_else(|_| ".utezone-token".into());

        let page_size: u32 = std::env::var("PAGE_SIZE")
            .unwrap_or_else(|_| "8".into())
            .parse()
            .expect("PAGE_SIZE must be a valid u32");

        let poll_interval_secs: u64 = std::env::var("POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("POLL_INTERVAL_SECS must be a valid u64");

        Self {
            api_base_url,
            token_path,
            page_size,
            poll_interval_secs,
        }
    }
}
