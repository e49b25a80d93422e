use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use common::{DailyBar, Error, Quote, Result};

use crate::MarketDataSource;

const SPOT_URL: &str = "https://push2.eastmoney.com/api/qt/clist/get";
const KLINE_URL: &str = "https://push2his.eastmoney.com/api/qt/stock/kline/get";

/// Rows per snapshot page. The full A-share universe is ~5600 codes, so
/// two pages cover it.
const PAGE_SIZE: usize = 5_000;
/// Hard stop on snapshot paging.
const MAX_PAGES: usize = 20;

/// REST client for the Eastmoney push2 quote API.
///
/// All reads are idempotent GETs. Transport errors and HTTP 5xx responses
/// are retried with a doubling backoff, bounded at `MAX_ATTEMPTS` total
/// attempts; any other non-success status propagates immediately.
pub struct EastmoneyClient {
    http: Client,
    max_attempts: u32,
    base_delay: Duration,
}

impl EastmoneyClient {
    const MAX_ATTEMPTS: u32 = 5;

    pub fn new() -> Self {
        Self {
            http: Client::builder()
                .use_rustls_tls()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            max_attempts: Self::MAX_ATTEMPTS,
            base_delay: Duration::from_secs(1),
        }
    }

    async fn get_with_retry(&self, url: &str) -> Result<String> {
        let mut last_error = Error::Http("no attempts made".into());

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                tokio::time::sleep(self.base_delay * 2u32.pow(attempt - 1)).await;
            }

            let resp = match self.http.get(url).send().await {
                Ok(resp) => resp,
                Err(e) if e.is_connect() || e.is_timeout() => {
                    debug!(attempt, error = %e, "Transport error, will retry");
                    last_error = Error::Http(e.to_string());
                    continue;
                }
                Err(e) => return Err(Error::Http(e.to_string())),
            };

            let status = resp.status();
            if status.is_server_error() {
                debug!(attempt, %status, "Server error, will retry");
                last_error = Error::Http(format!("HTTP {status}"));
                continue;
            }
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(Error::Http(format!("HTTP {status}: {body}")));
            }

            return resp.text().await.map_err(|e| Error::Http(e.to_string()));
        }

        Err(last_error)
    }

    async fn fetch_snapshot_page(&self, page: usize) -> Result<(Vec<RawQuote>, usize)> {
        let url = format!(
            "{SPOT_URL}?pn={page}&pz={PAGE_SIZE}&po=1&np=1&fltt=2&invt=2\
             &fs=m:0+t:6,m:0+t:80,m:1+t:2,m:1+t:23,m:0+t:81+s:2048\
             &fields=f3,f12,f14"
        );
        let body = self.get_with_retry(&url).await?;
        let resp: ClistResponse = serde_json::from_str(&body)?;
        let data = resp
            .data
            .ok_or_else(|| Error::Snapshot("empty clist payload".into()))?;
        Ok((data.diff, data.total))
    }
}

impl Default for EastmoneyClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataSource for EastmoneyClient {
    async fn fetch_universe_snapshot(&self) -> Result<Vec<Quote>> {
        let mut quotes = Vec::new();
        let mut seen_rows = 0usize;
        let mut page = 1usize;

        loop {
            let (rows, total) = self
                .fetch_snapshot_page(page)
                .await
                .map_err(|e| Error::Snapshot(e.to_string()))?;
            if rows.is_empty() {
                break;
            }
            seen_rows += rows.len();

            for raw in rows {
                match raw.into_quote() {
                    Ok(q) => quotes.push(q),
                    Err(e) => warn!(error = %e, "Skipping malformed snapshot row"),
                }
            }

            if seen_rows >= total || page >= MAX_PAGES {
                break;
            }
            page += 1;
        }

        if quotes.is_empty() {
            return Err(Error::Snapshot("snapshot contained no usable rows".into()));
        }
        debug!(count = quotes.len(), "Fetched universe snapshot");
        Ok(quotes)
    }

    async fn fetch_history(&self, code: &str) -> Result<Vec<DailyBar>> {
        let url = format!(
            "{KLINE_URL}?secid={}&klt=101&fqt=1&beg=0&end=20500101\
             &fields1=f1,f2,f3,f4,f5,f6\
             &fields2=f51,f52,f53,f54,f55,f56,f57,f58,f59,f60,f61",
            secid(code)
        );
        let body = self.get_with_retry(&url).await.map_err(|e| Error::History {
            code: code.to_string(),
            reason: e.to_string(),
        })?;
        let resp: KlineResponse = serde_json::from_str(&body)?;
        let lines = resp.data.map(|d| d.klines).unwrap_or_default();

        let mut bars = Vec::with_capacity(lines.len());
        for line in &lines {
            match parse_kline(line) {
                Ok(bar) => bars.push(bar),
                Err(e) => warn!(code, error = %e, "Skipping malformed kline row"),
            }
        }

        if bars.is_empty() {
            return Err(Error::History {
                code: code.to_string(),
                reason: "no usable kline rows".into(),
            });
        }
        Ok(bars)
    }
}

/// Eastmoney secid market prefix: `1.` for Shanghai-listed codes, `0.`
/// for Shenzhen and Beijing.
fn secid(code: &str) -> String {
    if code.starts_with('6') {
        format!("1.{code}")
    } else {
        format!("0.{code}")
    }
}

/// One kline row:
/// `date,open,close,high,low,volume,amount,amplitude,pct_change,change,turnover`.
fn parse_kline(line: &str) -> Result<DailyBar> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 9 {
        return Err(Error::MalformedRecord(format!(
            "kline row has {} fields",
            fields.len()
        )));
    }

    let date = NaiveDate::parse_from_str(fields[0], "%Y-%m-%d")
        .map_err(|_| Error::MalformedRecord(format!("kline date '{}'", fields[0])))?;
    let num = |i: usize| -> Result<f64> {
        fields[i]
            .parse::<f64>()
            .map_err(|_| Error::MalformedRecord(format!("kline field {i}: '{}'", fields[i])))
    };

    Ok(DailyBar {
        date,
        open: num(1)?,
        close: num(2)?,
        high: num(3)?,
        low: num(4)?,
        volume: num(5)?,
        amount: num(6)?,
        pct_change: num(8)?,
    })
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ClistResponse {
    data: Option<ClistData>,
}

#[derive(Debug, Deserialize)]
struct ClistData {
    total: usize,
    #[serde(default)]
    diff: Vec<RawQuote>,
}

/// Raw snapshot row as returned by the clist endpoint. Suspended stocks
/// report `"-"` instead of a number for the percent change.
#[derive(Debug, Deserialize)]
struct RawQuote {
    #[serde(rename = "f12")]
    code: String,
    #[serde(rename = "f14")]
    name: String,
    #[serde(rename = "f3", default)]
    pct_change: Value,
}

impl RawQuote {
    fn into_quote(self) -> Result<Quote> {
        let pct_change = match &self.pct_change {
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(s) => s.parse::<f64>().map_err(|_| {
                Error::MalformedRecord(format!("{}: pct change '{s}'", self.code))
            })?,
            other => {
                return Err(Error::MalformedRecord(format!(
                    "{}: pct change {other}",
                    self.code
                )))
            }
        };
        if !pct_change.is_finite() {
            return Err(Error::MalformedRecord(format!(
                "{}: non-finite pct change",
                self.code
            )));
        }

        Ok(Quote {
            code: self.code,
            name: self.name,
            pct_change,
        })
    }
}

#[derive(Debug, Deserialize)]
struct KlineResponse {
    data: Option<KlineData>,
}

#[derive(Debug, Deserialize)]
struct KlineData {
    #[serde(default)]
    klines: Vec<String>,
}
