//! HTTP-stage probing of response headers.
//!
//! Some CDN setups resolve to opaque edge IPs that the DNS stage cannot name.
//! The second stage sends one plain `GET http://<domain>` and inspects the
//! identification headers of whatever answers: the `server` banner and the
//! `x-cdn` tag several providers attach at the edge.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use reqwest::header::USER_AGENT;

use crate::classify::Prober;
use crate::config::INSPECTED_HEADERS;
use crate::error_handling::{update_error_stats, ErrorStats};
use crate::models::{report_detection, DetectionSource, Verdict};
use crate::signatures::find_provider;
use crate::user_agent::random_user_agent;

/// HTTP prober that matches CDN signatures in response headers.
///
/// A domain that cannot be reached at all is treated as blocked rather than
/// clear. That conflates dead hosts with filtering ones, but for recon the
/// cheap side of the trade is dropping a domain nobody can talk to anyway;
/// the failure is still counted so the run summary shows how often it happens.
pub struct HeaderHttpProber {
    client: Arc<reqwest::Client>,
    error_stats: Arc<ErrorStats>,
    verbose: bool,
}

impl HeaderHttpProber {
    /// Creates a prober that sends requests through `client`.
    ///
    /// The client's timeout bounds how long a worker can sit on one domain;
    /// redirects are left to the client's policy so a domain that bounces to
    /// its canonical edge still gets its final headers inspected.
    pub fn new(client: Arc<reqwest::Client>, error_stats: Arc<ErrorStats>, verbose: bool) -> Self {
        HeaderHttpProber {
            client,
            error_stats,
            verbose,
        }
    }
}

#[async_trait]
impl Prober for HeaderHttpProber {
    async fn probe(&self, domain: &str) -> Verdict {
        let url = format!("http://{domain}");

        // Fresh User-Agent per request; a fixed one gets fingerprinted fast.
        let result = self
            .client
            .get(&url)
            .header(USER_AGENT, random_user_agent())
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                debug!("HTTP probe failed for {domain}: {e}");
                update_error_stats(&self.error_stats, &e);
                return Verdict::Blocked;
            }
        };

        for name in INSPECTED_HEADERS {
            let Some(value) = response
                .headers()
                .get(*name)
                .and_then(|value| value.to_str().ok())
            else {
                continue;
            };
            if let Some(provider) = find_provider(value) {
                report_detection(self.verbose, domain, DetectionSource::Http, provider);
                return Verdict::Blocked;
            }
        }

        Verdict::Clear
    }
}
