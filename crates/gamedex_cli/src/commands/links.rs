use std::sync::Arc;

use console::Term;
use gamedex::CatalogLayout;
use gamedex::http::reqwest_transport::ReqwestTransport;
use gamedex::links::{self, BrokenLink, LinkReport};

use crate::commands::shared::load_catalog;
use crate::config::Config;
use crate::progress::ProgressReporter;
use crate::shutdown::is_shutdown_requested;

/// Check every external link of the catalog; fails when any is broken.
pub(crate) async fn handle_links(
    layout: CatalogLayout,
    config: &Config,
    concurrency: Option<usize>,
    timeout_secs: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(layout)?;
    let targets = links::collect_link_targets(&catalog);
    let options = config.link_options(concurrency);
    let transport = Arc::new(ReqwestTransport::with_timeout(
        config.link_timeout(timeout_secs),
    )?);

    tracing::debug!(
        concurrency = options.concurrency,
        requests_per_second = options.requests_per_second,
        "Starting link check"
    );

    let reporter = Arc::new(ProgressReporter::new());
    let callback = reporter.as_callback();
    let report = links::check_links(
        &targets,
        &options,
        transport,
        Some(&*callback),
        &is_shutdown_requested,
    )
    .await;
    reporter.finish();

    print_report(&report);

    if report.broken.is_empty() {
        Ok(())
    } else {
        Err(format!("{} broken link(s)", report.broken.len()).into())
    }
}

fn print_report(report: &LinkReport) {
    if Term::stdout().is_term() {
        println!();
        if report.broken.is_empty() {
            println!(
                "{} All {} links reachable",
                console::style("✓").green(),
                report.checked
            );
        } else {
            println!("{}", console::style("Broken links:").bold());
            for line in broken_lines(&report.broken) {
                println!("  {}", line);
            }
        }
        if report.skipped > 0 {
            println!(
                "{} {} links skipped (interrupted)",
                console::style("⚠").yellow(),
                report.skipped
            );
        }
    } else {
        for link in &report.broken {
            tracing::warn!(file = %link.file, url = %link.url, reason = %link.reason, "Broken link");
        }
    }
}

/// `file: url (reason)`, one per broken link.
fn broken_lines(broken: &[BrokenLink]) -> Vec<String> {
    broken
        .iter()
        .map(|link| format!("{}: {} ({})", link.file, link.url, link.reason))
        .collect()
}
