//! # Tickergen Core
//!
//! Turns the instrument feed into a static tickers page.
//!
//! ## Pipeline
//!
//! ```text
//! feed body ──▶ validator ──▶ selector ──▶ classifier ──▶ view model ──▶ HTML ──▶ publisher
//! ```
//!
//! Every stage is a plain function returning `Result`; the first error
//! aborts the run.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`classifier`] | Distinct types, countries and ticker lists |
//! | [`domain`] | `Instrument` and `Isin` |
//! | [`error`] | Error types and [`ErrorKind`] |
//! | [`feed`] | Feed retrieval over HTTP or from a file |
//! | [`http_client`] | HTTP transport seam |
//! | [`pipeline`] | Stage composition and run context |
//! | [`publish`] | Upload to a bucket endpoint or a directory |
//! | [`render`] | View model and HTML expansion |
//! | [`selector`] | Type allow-list filter |
//! | [`validator`] | Feed shape and field checks |
//!
//! ## Quick Start
//!
//! ```rust
//! use tickergen_core::{build_page, PipelineConfig, RunContext};
//!
//! let body = r#"{"data": [["SPY", "SPDR S&P 500", "SPDR S&P 500 ETF Trust", "US78462F1030", "ETF"]]}"#;
//! let page = build_page(&RunContext::new(), body, &PipelineConfig::default())?;
//! assert!(page.document.body.contains("SPY"));
//! # Ok::<(), tickergen_core::CoreError>(())
//! ```

pub mod classifier;
pub mod domain;
pub mod error;
pub mod feed;
pub mod http_client;
pub mod pipeline;
pub mod publish;
pub mod render;
pub mod selector;
pub mod validator;

pub use classifier::{countries_for_type, distinct_types, tickers_for_type_and_country};

pub use domain::{Instrument, Isin};

pub use error::{
    CoreError, ErrorKind, FeedError, InstrumentError, InstrumentField, IsinError, PublishError,
};

pub use feed::{FeedSource, FileFeed, HttpFeed, DEFAULT_FEED_URL};

pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
    ScriptedHttpClient,
};

pub use pipeline::{
    build_page, fetch, run, select_and_classify, Page, PipelineConfig, RunContext, RunId,
    RunReport, Selection,
};

pub use publish::{
    DirectoryPublisher, Document, HttpPublisher, PublishReceipt, Publisher, DEFAULT_OBJECT_KEY,
};

pub use render::{
    build_view_model, build_view_model_at, render_html, PageConfig, ViewModel,
    CONTENT_TYPE_HTML, DEFAULT_SCREENER_URL,
};

pub use selector::{TypeAllowList, DEFAULT_INSTRUMENT_TYPES};

pub use validator::{validate, validate_payload};
