/// HTTP endpoint paths served by Tally.
pub mod endpoints {
    pub const HEALTH: &str = "/health";
    pub const BALANCE: &str = "/balance";
    pub const TRANSACTIONS: &str = "/transactions";
    pub const TRANSACTION: &str = "/transactions/:id";
    pub const DEPOSIT: &str = "/deposit";
    pub const WITHDRAW: &str = "/withdraw";
    pub const STATS: &str = "/stats";
}

/// Health check response.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub success: bool,
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            success: true,
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Body of `POST /deposit` and `POST /withdraw`.
///
/// `amount` stays a raw JSON value so numeric strings are accepted and
/// a missing amount is reported as an invalid amount, not a parse error.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct RecordRequest {
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Query string of `GET /transactions`.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct PageParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl From<PageParams> for tally_ledger::PageRequest {
    fn from(params: PageParams) -> Self {
        let defaults = Self::default();
        Self::new(
            params.limit.unwrap_or(defaults.limit),
            params.offset.unwrap_or(defaults.offset),
        )
    }
}
