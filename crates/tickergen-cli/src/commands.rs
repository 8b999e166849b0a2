use std::io::Write;
use std::sync::Arc;

use tickergen_core::{
    build_page, fetch, run, select_and_classify, DirectoryPublisher, FeedSource, FileFeed,
    HttpClient, HttpFeed, HttpPublisher, Publisher, ReqwestHttpClient, RunContext,
};
use tracing::info;

use crate::cli::{Cli, Command, GenerateArgs};
use crate::config::{FeedLocation, JobConfig, PublishTarget};
use crate::error::CliError;

pub async fn run_command(cli: &Cli) -> Result<(), CliError> {
    let mut config = JobConfig::from_cli(cli)?;
    let client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let feed = feed_source(&config.feed, Arc::clone(&client), config.timeout_ms);
    let ctx = RunContext::new();

    match &cli.command {
        Command::Generate(args) => {
            config = config.with_object_key(&args.object_key)?;
            generate(&ctx, &config, args, feed.as_ref(), client).await
        }
        Command::Render => {
            let body = fetch(&ctx, feed.as_ref()).await?;
            let page = build_page(&ctx, &body, &config.pipeline)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(page.document.body.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
        Command::Inspect => {
            let body = fetch(&ctx, feed.as_ref()).await?;
            let selection = select_and_classify(&ctx, &body, &config.pipeline)?;
            let payload = if cli.pretty {
                serde_json::to_string_pretty(&selection.view)?
            } else {
                serde_json::to_string(&selection.view)?
            };
            println!("{payload}");
            Ok(())
        }
    }
}

async fn generate(
    ctx: &RunContext,
    config: &JobConfig,
    args: &GenerateArgs,
    feed: &dyn FeedSource,
    client: Arc<dyn HttpClient>,
) -> Result<(), CliError> {
    let target = PublishTarget::from_args(args)?;
    let publisher: Box<dyn Publisher> = match &target {
        PublishTarget::Bucket(url) => {
            Box::new(HttpPublisher::new(client, url.clone()).with_timeout_ms(config.timeout_ms))
        }
        PublishTarget::Directory(dir) => Box::new(DirectoryPublisher::new(dir.clone())),
    };

    ctx.span().in_scope(|| {
        info!(
            version = env!("CARGO_PKG_VERSION"),
            os = std::env::consts::OS,
            arch = std::env::consts::ARCH,
            feed = %feed.describe(),
            publish_target = %publisher.describe(),
            object_key = %config.pipeline.object_key,
            analytics_enabled = config.pipeline.page.analytics_id.is_some(),
            "starting"
        );
    });

    let report = run(ctx, feed, publisher.as_ref(), &config.pipeline).await?;

    ctx.span().in_scope(|| {
        info!(
            validated = report.validated,
            selected = report.selected,
            instrument_types = report.instrument_types,
            tables = report.tables,
            bytes = report.receipt.bytes,
            "run complete"
        );
    });

    Ok(())
}

fn feed_source(
    location: &FeedLocation,
    client: Arc<dyn HttpClient>,
    timeout_ms: u64,
) -> Box<dyn FeedSource> {
    match location {
        FeedLocation::Url(url) => Box::new(HttpFeed::new(client, url.clone()).with_timeout_ms(timeout_ms)),
        FeedLocation::File(path) => Box::new(FileFeed::new(path.clone())),
    }
}
