//! Fetch, validate, select, render and publish, in that order.
//!
//! Every stage consumes the full output of the previous one and the first
//! failure ends the run. Logging goes through the [`RunContext`] span so
//! each event carries the run id.

use std::fmt::{Display, Formatter};

use time::OffsetDateTime;
use tracing::{info, Instrument as _, Span};
use uuid::Uuid;

use crate::domain::Instrument;
use crate::error::CoreError;
use crate::feed::FeedSource;
use crate::publish::{Document, PublishReceipt, Publisher, DEFAULT_OBJECT_KEY};
use crate::render::{build_view_model_at, render_html, PageConfig, ViewModel};
use crate::selector::TypeAllowList;
use crate::validator::validate;

/// Identifier attached to every log event of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(Uuid);

impl RunId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for RunId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Logging capability and clock for one run.
#[derive(Debug, Clone)]
pub struct RunContext {
    run_id: RunId,
    span: Span,
    started_at: OffsetDateTime,
}

impl RunContext {
    pub fn new() -> Self {
        Self::with_run_id(RunId::new_v4())
    }

    pub fn with_run_id(run_id: RunId) -> Self {
        Self {
            run_id,
            span: tracing::info_span!("tickergen_run", run_id = %run_id),
            started_at: OffsetDateTime::now_utc(),
        }
    }

    /// Pin the generation time, mostly for reproducible output.
    pub fn at(mut self, started_at: OffsetDateTime) -> Self {
        self.started_at = started_at;
        self
    }

    pub const fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub const fn started_at(&self) -> OffsetDateTime {
        self.started_at
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings shared by every stage after the fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub allowed_types: TypeAllowList,
    pub page: PageConfig,
    pub object_key: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            allowed_types: TypeAllowList::default(),
            page: PageConfig::default(),
            object_key: String::from(DEFAULT_OBJECT_KEY),
        }
    }
}

/// Selected instruments with their view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub validated: usize,
    pub instruments: Vec<Instrument>,
    pub view: ViewModel,
}

/// Output of the pure part of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub selection: Selection,
    pub document: Document,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub run_id: RunId,
    pub validated: usize,
    pub selected: usize,
    pub instrument_types: usize,
    pub tables: usize,
    pub receipt: PublishReceipt,
}

/// Validate, select and build the view model from a raw feed body.
pub fn select_and_classify(
    ctx: &RunContext,
    body: &str,
    config: &PipelineConfig,
) -> Result<Selection, CoreError> {
    let _entered = ctx.span.enter();

    info!(stage = "validate", bytes = body.len(), "validating feed");
    let instruments = validate(body)?;
    let validated = instruments.len();

    info!(stage = "select", validated, allowed = ?config.allowed_types.types(), "selecting instruments");
    let instruments = config.allowed_types.select(instruments);

    info!(stage = "render", selected = instruments.len(), "building view model");
    let view = build_view_model_at(&instruments, &config.page, ctx.started_at)?;

    Ok(Selection {
        validated,
        instruments,
        view,
    })
}

/// Everything except the I/O boundaries: body in, HTML document out.
pub fn build_page(
    ctx: &RunContext,
    body: &str,
    config: &PipelineConfig,
) -> Result<Page, CoreError> {
    let selection = select_and_classify(ctx, body, config)?;
    let html = render_html(&selection.view);

    ctx.span.in_scope(|| {
        info!(
            stage = "render",
            bytes = html.len(),
            tables = selection.view.table_count(),
            "rendered html"
        );
    });

    Ok(Page {
        selection,
        document: Document::html(&config.object_key, html),
    })
}

/// Run one full fetch-transform-publish cycle.
pub async fn run(
    ctx: &RunContext,
    feed: &dyn FeedSource,
    publisher: &dyn Publisher,
    config: &PipelineConfig,
) -> Result<RunReport, CoreError> {
    let body = fetch(ctx, feed).await?;
    let page = build_page(ctx, &body, config)?;

    let receipt = async {
        info!(
            stage = "publish",
            key = %page.document.key,
            target = %publisher.describe(),
            "publishing document"
        );
        publisher.publish(&page.document).await
    }
    .instrument(ctx.span.clone())
    .await?;

    let report = RunReport {
        run_id: ctx.run_id,
        validated: page.selection.validated,
        selected: page.selection.instruments.len(),
        instrument_types: page.selection.view.sections.len(),
        tables: page.selection.view.table_count(),
        receipt,
    };

    ctx.span.in_scope(|| {
        info!(location = %report.receipt.location, "tickers generated");
    });

    Ok(report)
}

/// Retrieve the raw feed body.
pub async fn fetch(ctx: &RunContext, feed: &dyn FeedSource) -> Result<String, CoreError> {
    async {
        info!(stage = "fetch", source = %feed.describe(), "fetching instrument feed");
        Ok::<_, CoreError>(feed.fetch().await?)
    }
    .instrument(ctx.span.clone())
    .await
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use super::*;
    use crate::error::ErrorKind;

    fn feed_body() -> String {
        json!({
            "data": [
                ["OTP", "OTP Bank", "OTP Bank Nyrt.", "HU0000061726", "Részvény"],
                ["HUGOV", "Állampapír", "Magyar Állampapír 2030", "HU0000404090", "Kötvény"],
                ["SPY", "SPDR S&P 500", "SPDR S&P 500 ETF Trust", "US78462F1030", "ETF"]
            ]
        })
        .to_string()
    }

    #[test]
    fn build_page_selects_and_renders() {
        let ctx = RunContext::new().at(datetime!(2026-10-14 06:00 UTC));
        let page = build_page(&ctx, &feed_body(), &PipelineConfig::default()).expect("page");

        assert_eq!(page.selection.validated, 3);
        assert_eq!(page.selection.instruments.len(), 2);
        assert_eq!(page.document.key, "tickers.html");
        assert_eq!(page.document.content_type, "text/html; charset=utf-8");
        assert!(page.document.body.contains("Oct 14, 2026"));
        assert!(!page.document.body.contains("HUGOV"));
    }

    #[test]
    fn empty_selection_is_an_empty_result() {
        let ctx = RunContext::new();
        let config = PipelineConfig {
            allowed_types: TypeAllowList::new(["Warrant"]),
            ..PipelineConfig::default()
        };

        let err = build_page(&ctx, &feed_body(), &config).expect_err("nothing selected");
        assert_eq!(err.kind(), ErrorKind::EmptyResult);
    }

    #[test]
    fn run_id_is_stable_for_a_context() {
        let run_id = RunId::new_v4();
        let ctx = RunContext::with_run_id(run_id);
        assert_eq!(ctx.run_id(), run_id);
        assert_eq!(run_id.to_string().len(), 36);
    }
}
