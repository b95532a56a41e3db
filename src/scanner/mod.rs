//! Per-ticker pipeline and run aggregation.
//!
//! Each ticker walks Fetch -> Validate -> Indicate -> Score -> Filter
//! -> Target independently; any failure turns into a `SkipReason` and
//! the run carries on. A single ticker can never abort the batch.

use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::config::{Config, TickerMapping};
use crate::indicators::compute_snapshot;
use crate::models::{Opportunity, SkipReason, TickerMeta};
use crate::services::MarketDataProvider;
use crate::signals::targets::round2;
use crate::signals::{compute_targets, score_snapshot};

/// Outcome of one batch run. Opportunities are sorted by weighted
/// score descending; skips keep their reasons inspectable.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub opportunities: Vec<Opportunity>,
    pub skipped: Vec<(String, SkipReason)>,
}

pub struct Scanner {
    provider: Arc<dyn MarketDataProvider>,
    config: Config,
}

impl Scanner {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: Config) -> Self {
        Self { provider, config }
    }

    /// Run the full pipeline over every ticker in the mapping.
    ///
    /// Tickers are fully independent, so fetch-and-compute runs through
    /// a bounded buffer of concurrent futures. `buffered` yields results
    /// in input order, and the explicit sort below makes the final
    /// ordering independent of completion order either way. Ties on
    /// weighted score keep mapping order (the sort is stable).
    pub async fn run(&self, mapping: &TickerMapping) -> ScanReport {
        info!(tickers = mapping.len(), "starting scan");

        let outcomes: Vec<(String, Result<Opportunity, SkipReason>)> =
            stream::iter(mapping.entries().iter().cloned())
                .map(|(ticker, meta)| async move {
                    let outcome = self.evaluate_ticker(&ticker, meta).await;
                    (ticker, outcome)
                })
                .buffered(self.config.fetch_concurrency)
                .collect()
                .await;

        let mut report = ScanReport::default();
        for (ticker, outcome) in outcomes {
            match outcome {
                Ok(opportunity) => report.opportunities.push(opportunity),
                Err(reason) => {
                    match reason {
                        SkipReason::BelowMinScore { score, min } => {
                            debug!(ticker = %ticker, score, min, "ticker below minimum score");
                        }
                        ref other => {
                            error!(ticker = %ticker, reason = %other, "ticker skipped");
                        }
                    }
                    report.skipped.push((ticker, reason));
                }
            }
        }

        report
            .opportunities
            .sort_by(|a, b| b.score.weighted_score.total_cmp(&a.score.weighted_score));

        info!(
            found = report.opportunities.len(),
            skipped = report.skipped.len(),
            "scan finished"
        );
        report
    }

    async fn evaluate_ticker(
        &self,
        ticker: &str,
        meta: TickerMeta,
    ) -> Result<Opportunity, SkipReason> {
        let bars = self
            .provider
            .fetch_history(ticker, &self.config.data_period, &self.config.data_interval)
            .await
            .map_err(|e| SkipReason::FetchFailed(e.to_string()))?;

        if bars.is_empty() {
            return Err(SkipReason::EmptyHistory);
        }

        let need = self.config.min_data_points.max(self.config.indicators.min_bars());
        if bars.len() < need {
            return Err(SkipReason::InsufficientHistory {
                got: bars.len(),
                need,
            });
        }

        // Length was checked above, so a missing snapshot here means a
        // non-finite value crept in from malformed bar data.
        let snapshot = compute_snapshot(&bars, &self.config.indicators)
            .ok_or_else(|| SkipReason::Computation("non-finite indicator value".into()))?;

        let score = score_snapshot(&snapshot, &self.config.scoring);
        if score.raw_score < self.config.min_score {
            return Err(SkipReason::BelowMinScore {
                score: score.raw_score,
                min: self.config.min_score,
            });
        }

        let targets = compute_targets(snapshot.close, &self.config.targets);
        Ok(Opportunity {
            ticker: ticker.to_string(),
            meta,
            date: Utc::now().date_naive(),
            price: round2(snapshot.close),
            snapshot,
            score,
            targets,
        })
    }
}
