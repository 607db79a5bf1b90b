//! The two-stage classification pipeline.
//!
//! A domain is run through the DNS stage first and the HTTP stage only if DNS
//! found nothing; the first `Blocked` verdict ends the pipeline. Probes sit
//! behind the [`Prober`] trait so tests can substitute scripted stand-ins for
//! the real subprocess and network probes.

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::Verdict;

/// A single detection stage: inspects one domain and returns a verdict.
///
/// Implementations must be cheap to share; the dispatcher clones them behind
/// `Arc` into every worker task.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probes `domain` (bare hostname, no port) for CDN signatures.
    async fn probe(&self, domain: &str) -> Verdict;
}

/// Strips a trailing `:port` suffix from a raw domain token.
///
/// Everything from the first colon on is dropped, matching how scanner output
/// like `example.com:8443` names its targets. Tokens without a colon pass
/// through unchanged.
pub fn strip_port(domain: &str) -> &str {
    domain.split(':').next().unwrap_or(domain)
}

/// Runs domains through the DNS stage and then the HTTP stage.
pub struct Classifier {
    dns: Arc<dyn Prober>,
    http: Arc<dyn Prober>,
}

impl Classifier {
    /// Builds a classifier from the two stage probers.
    pub fn new(dns: Arc<dyn Prober>, http: Arc<dyn Prober>) -> Self {
        Classifier { dns, http }
    }

    /// Classifies one raw domain token.
    ///
    /// Returns the bare hostname when both stages come back clear, `None` when
    /// either stage detects a CDN. The HTTP stage is skipped entirely once DNS
    /// has blocked the domain.
    pub async fn classify(&self, raw: &str) -> Option<String> {
        let domain = strip_port(raw);

        if self.dns.probe(domain).await == Verdict::Blocked {
            return None;
        }
        match self.http.probe(domain).await {
            Verdict::Blocked => None,
            Verdict::Clear => Some(domain.to_string()),
        }
    }
}
