use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use backon::Retryable;
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::http::{HttpError, HttpTransport, LinkRequest};
use crate::rate_limit::{DEFAULT_RPS, RequestRateLimiter};
use crate::retry::RetryPolicy;

use super::LinkTarget;

/// Without a browser-like agent many hosts answer 403.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64)";

/// Progress is logged every this many checked links.
pub const PROGRESS_INTERVAL: usize = 50;

pub type LinkProgressCallback = dyn Fn(LinkProgress) + Send + Sync;

#[derive(Debug, Clone)]
pub struct LinkCheckOptions {
    pub concurrency: usize,
    pub requests_per_second: u32,
    pub retry: RetryPolicy,
    pub user_agent: String,
}

impl Default for LinkCheckOptions {
    fn default() -> Self {
        Self {
            concurrency: 8,
            requests_per_second: DEFAULT_RPS,
            retry: RetryPolicy::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum LinkProgress {
    Started {
        links: usize,
        distinct: usize,
    },
    Checked {
        checked: usize,
        total: usize,
    },
    Broken {
        url: String,
        reason: BrokenReason,
    },
    Finished {
        checked: usize,
        broken: usize,
        skipped: usize,
    },
}

/// Why a link counts as broken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum BrokenReason {
    /// The final response had a 4xx or 5xx status.
    Status(u16),
    /// No response was received.
    NoResponse(String),
}

impl std::fmt::Display for BrokenReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrokenReason::Status(status) => write!(f, "{}", status),
            BrokenReason::NoResponse(message) => {
                write!(f, "disconnected without response ({})", message)
            }
        }
    }
}

/// A broken URL as referenced from one entry file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    pub file: String,
    pub url: String,
    pub reason: BrokenReason,
}

#[derive(Debug, Clone, Default)]
pub struct LinkReport {
    /// Distinct URLs checked.
    pub checked: usize,
    /// Distinct URLs not checked because a stop was requested.
    pub skipped: usize,
    /// Sorted by file, then URL.
    pub broken: Vec<BrokenLink>,
}

/// Check every distinct URL once and report broken ones per referencing file.
///
/// `should_stop` is polled before each dispatch; once it returns true no new
/// requests are started and running ones are awaited.
pub async fn check_links(
    targets: &[LinkTarget],
    options: &LinkCheckOptions,
    transport: Arc<dyn HttpTransport>,
    on_progress: Option<&LinkProgressCallback>,
    should_stop: &(dyn Fn() -> bool + Send + Sync),
) -> LinkReport {
    let mut files_by_url: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut pending: Vec<&str> = Vec::new();
    for target in targets {
        let files = files_by_url.entry(target.url.as_str()).or_insert_with(|| {
            pending.push(target.url.as_str());
            Vec::new()
        });
        if !files.contains(&target.file.as_str()) {
            files.push(target.file.as_str());
        }
    }

    let total = pending.len();
    emit_progress(
        on_progress,
        LinkProgress::Started {
            links: targets.len(),
            distinct: total,
        },
    );

    let concurrency = std::cmp::max(1, options.concurrency);
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let limiter = RequestRateLimiter::new(options.requests_per_second);
    let mut join_set: JoinSet<(String, Option<BrokenReason>)> = JoinSet::new();
    let mut queue = pending.into_iter();
    let mut report = LinkReport::default();
    let mut stopped = false;
    // Dispatched URLs whose outcome has not come back yet.
    let mut in_flight: HashSet<String> = HashSet::new();

    loop {
        while !stopped && join_set.len() < concurrency {
            if should_stop() {
                stopped = true;
                break;
            }
            let Some(url) = queue.next() else {
                break;
            };

            in_flight.insert(url.to_string());
            join_set.spawn(check_with_permit(
                Arc::clone(&transport),
                Arc::clone(&semaphore),
                limiter.clone(),
                url.to_string(),
                options.clone(),
            ));
        }

        let Some(joined) = join_set.join_next().await else {
            break;
        };

        match joined {
            Ok((url, broken)) => {
                in_flight.remove(&url);
                record_outcome(&mut report, &files_by_url, url, broken, total, on_progress);
            }
            Err(err) => {
                tracing::error!(error = %err, "Link check task failed");
            }
        }
    }

    // Only tasks that panicked or were cancelled are left.
    let mut lost: Vec<String> = in_flight.into_iter().collect();
    lost.sort();
    for url in lost {
        let reason = BrokenReason::NoResponse("check aborted".to_string());
        record_outcome(&mut report, &files_by_url, url, Some(reason), total, on_progress);
    }

    report.skipped = queue.count();
    report
        .broken
        .sort_by(|a, b| a.file.cmp(&b.file).then_with(|| a.url.cmp(&b.url)));

    emit_progress(
        on_progress,
        LinkProgress::Finished {
            checked: report.checked,
            broken: report.broken.len(),
            skipped: report.skipped,
        },
    );

    report
}

async fn check_with_permit(
    transport: Arc<dyn HttpTransport>,
    semaphore: Arc<Semaphore>,
    limiter: RequestRateLimiter,
    url: String,
    options: LinkCheckOptions,
) -> (String, Option<BrokenReason>) {
    let Ok(_permit) = semaphore.acquire().await else {
        return (url, Some(BrokenReason::NoResponse("semaphore closed".to_string())));
    };

    let outcome = check_url(transport.as_ref(), &limiter, &url, &options).await;
    (url, outcome)
}

/// `None` when the URL answered with a status below 400.
async fn check_url(
    transport: &dyn HttpTransport,
    limiter: &RequestRateLimiter,
    url: &str,
    options: &LinkCheckOptions,
) -> Option<BrokenReason> {
    let attempt = std::sync::atomic::AtomicU32::new(0);
    let send = || async {
        attempt.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        limiter.wait().await;
        transport
            .get_status(LinkRequest::new(url, options.user_agent.as_str()))
            .await
    };

    let result = send
        .retry(options.retry.backoff())
        .when(|err: &HttpError| matches!(err, HttpError::Transport(_)))
        .notify(|err, dur| {
            tracing::debug!(
                url = %url,
                attempt = attempt.load(std::sync::atomic::Ordering::SeqCst),
                retry_in = ?dur,
                error = %err,
                "Retrying link"
            );
        })
        .await;

    match result {
        Ok(status) if status < 400 => None,
        Ok(status) => Some(BrokenReason::Status(status)),
        Err(err) => Some(BrokenReason::NoResponse(err.to_string())),
    }
}

fn record_outcome(
    report: &mut LinkReport,
    files_by_url: &HashMap<&str, Vec<&str>>,
    url: String,
    broken: Option<BrokenReason>,
    total: usize,
    on_progress: Option<&LinkProgressCallback>,
) {
    report.checked += 1;
    emit_progress(
        on_progress,
        LinkProgress::Checked {
            checked: report.checked,
            total,
        },
    );

    let Some(reason) = broken else {
        return;
    };
    emit_progress(
        on_progress,
        LinkProgress::Broken {
            url: url.clone(),
            reason: reason.clone(),
        },
    );
    for file in files_by_url.get(url.as_str()).into_iter().flatten() {
        report.broken.push(BrokenLink {
            file: file.to_string(),
            url: url.clone(),
            reason: reason.clone(),
        });
    }
}

fn emit_progress(on_progress: Option<&LinkProgressCallback>, event: LinkProgress) {
    if let Some(callback) = on_progress {
        callback(event);
    }
}
