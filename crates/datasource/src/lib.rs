pub mod eastmoney;

pub use eastmoney::EastmoneyClient;

use async_trait::async_trait;

use common::{DailyBar, Quote, Result};

/// Abstraction over the market data source.
///
/// `EastmoneyClient` implements this against the live quote API.
/// Tests substitute in-memory implementations.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Full-market snapshot at call time.
    async fn fetch_universe_snapshot(&self) -> Result<Vec<Quote>>;

    /// Full available daily history for one instrument, ascending by date.
    async fn fetch_history(&self, code: &str) -> Result<Vec<DailyBar>>;
}
