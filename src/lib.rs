//! cdnsieve library: CDN-front detection for domain lists
//!
//! Recon target lists are full of domains that resolve to a CDN or WAF edge
//! rather than to infrastructure the owner operates. This library classifies
//! each domain with two cheap probes (DNS tool output, then HTTP response
//! headers) against a static provider signature set, and keeps only the
//! domains that look direct-hosted.
//!
//! # Example
//!
//! ```no_run
//! use cdnsieve::{run_filter, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     target: Some("www.example.com".to_string()),
//!     ..Default::default()
//! };
//!
//! let report = run_filter(config).await?;
//! eprintln!(
//!     "{} of {} domains are direct-hosted",
//!     report.direct_hosted, report.total_domains
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Surviving domains are printed to stdout as they are classified; everything
//! else (detections, progress, failure counts) goes through the logger on
//! stderr.
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod classify;
pub mod config;
mod dns;
mod error_handling;
mod http;
mod initialization;
mod models;
mod signatures;
mod user_agent;

// Re-export public API
pub use classify::{strip_port, Classifier, Prober};
pub use config::{Config, LogFormat, LogLevel};
pub use dns::CommandDnsProber;
pub use error_handling::{ErrorStats, ErrorType};
pub use http::HeaderHttpProber;
pub use initialization::init_logger_with;
pub use models::Verdict;
pub use run::{classify_domains, run_filter, FilterReport};
pub use signatures::{find_provider, CDN_PROVIDERS};

// Internal run module (contains the main filtering logic)
mod run {
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use futures::stream::{self, StreamExt};
    use log::{info, warn};
    use tokio::io::{AsyncBufReadExt, BufReader};

    use crate::classify::Classifier;
    use crate::config::{Config, HTTP_PROBE_TIMEOUT};
    use crate::dns::CommandDnsProber;
    use crate::error_handling::{log_error_statistics, ErrorStats};
    use crate::http::HeaderHttpProber;
    use crate::initialization::init_client;

    /// Results of a completed filtering run.
    #[derive(Debug, Clone)]
    pub struct FilterReport {
        /// Total number of domains classified
        pub total_domains: usize,
        /// Number of domains with no CDN signature (written to stdout)
        pub direct_hosted: usize,
        /// Number of domains filtered out as CDN-fronted or unreachable
        pub filtered: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Reads the domain list from the configured source.
    ///
    /// A `--list` file wins over `--target`, which wins over stdin. Lines are
    /// trimmed; blank lines and `#` comments are skipped so annotated recon
    /// lists can be fed in unedited.
    async fn read_domains(config: &Config) -> Result<Vec<String>> {
        if let Some(path) = &config.list {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open domain list {}", path.display()))?;
            let mut lines = BufReader::new(file).lines();
            let mut domains = Vec::new();
            while let Some(line) = lines
                .next_line()
                .await
                .context("Failed to read domain list")?
            {
                push_domain(&mut domains, &line);
            }
            Ok(domains)
        } else if let Some(target) = &config.target {
            Ok(vec![target.clone()])
        } else {
            info!("Reading domains from stdin");
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            let mut domains = Vec::new();
            while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
                push_domain(&mut domains, &line);
            }
            Ok(domains)
        }
    }

    fn push_domain(domains: &mut Vec<String>, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return;
        }
        domains.push(trimmed.to_string());
    }

    /// Classifies domains on a bounded worker pool, streaming survivors.
    ///
    /// Each domain is one unit of work: a worker runs it through the full
    /// DNS-then-HTTP pipeline before taking the next. Domains are admitted in
    /// input order and results collected in completion order, so a slow
    /// verdict never holds back the fast ones behind it; with a single worker
    /// the two orders coincide. `on_direct` is called with each surviving
    /// domain the moment its verdict lands.
    ///
    /// Returns the number of surviving and filtered domains. A worker that
    /// panics is logged and its domain counted as filtered; the run continues.
    pub async fn classify_domains<F>(
        domains: Vec<String>,
        classifier: Arc<Classifier>,
        workers: usize,
        mut on_direct: F,
    ) -> (usize, usize)
    where
        F: FnMut(&str),
    {
        let mut results = stream::iter(domains)
            .map(|domain| {
                let classifier = Arc::clone(&classifier);
                tokio::spawn(async move { classifier.classify(&domain).await })
            })
            .buffer_unordered(workers.max(1));

        let mut direct = 0usize;
        let mut filtered = 0usize;
        while let Some(task_result) = results.next().await {
            match task_result {
                Ok(Some(domain)) => {
                    direct += 1;
                    on_direct(&domain);
                }
                Ok(None) => filtered += 1,
                Err(join_error) => {
                    filtered += 1;
                    warn!("Task panicked: {join_error:?}");
                }
            }
        }

        (direct, filtered)
    }

    /// Runs the CDN filter with the provided configuration.
    ///
    /// This is the main entry point for the library. It reads domains from the
    /// configured source, classifies them concurrently, prints each surviving
    /// domain to stdout in completion order, and logs failure counts at the
    /// end.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The domain list file cannot be opened or read
    /// - The HTTP client cannot be initialized
    ///
    /// Individual probe failures never fail the run; they are counted and
    /// reported in the end-of-run summary instead.
    pub async fn run_filter(config: Config) -> Result<FilterReport> {
        let domains = read_domains(&config).await?;
        let total_domains = domains.len();
        info!("Total domains to classify: {total_domains}");

        let error_stats = Arc::new(ErrorStats::new());
        let client = init_client(HTTP_PROBE_TIMEOUT).context("Failed to initialize HTTP client")?;

        let dns = Arc::new(CommandDnsProber::new(
            Arc::clone(&error_stats),
            config.verbose,
        ));
        let http = Arc::new(HeaderHttpProber::new(
            client,
            Arc::clone(&error_stats),
            config.verbose,
        ));
        let classifier = Arc::new(Classifier::new(dns, http));

        let start_time = std::time::Instant::now();
        let (direct_hosted, filtered) =
            classify_domains(domains, classifier, config.concurrence, |domain| {
                println!("{domain}")
            })
            .await;
        let elapsed_seconds = start_time.elapsed().as_secs_f64();

        log_error_statistics(&error_stats);
        info!(
            "Classified {} domain{} ({} direct-hosted, {} CDN-filtered) in {:.1}s",
            total_domains,
            if total_domains == 1 { "" } else { "s" },
            direct_hosted,
            filtered,
            elapsed_seconds
        );

        Ok(FilterReport {
            total_domains,
            direct_hosted,
            filtered,
            elapsed_seconds,
        })
    }

}
