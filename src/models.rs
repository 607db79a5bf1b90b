//! Shared data types for probe verdicts and CDN detection events.

use std::fmt;

use log::{debug, info};

/// Outcome of a single probe stage for one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No CDN signature found; the domain moves on to the next stage.
    Clear,
    /// A CDN signature matched; the domain is filtered out.
    Blocked,
}

/// Which probe stage produced a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionSource {
    /// The `host` lookup output matched.
    DnsHost,
    /// The `dig` lookup output matched.
    DnsDig,
    /// An HTTP response header matched.
    Http,
}

impl DetectionSource {
    /// Human-readable stage label used in detection events.
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionSource::DnsHost => "DNS 'host'",
            DetectionSource::DnsDig => "DNS 'dig'",
            DetectionSource::Http => "HTTP",
        }
    }
}

/// One CDN detection, ready for display on the diagnostic stream.
pub struct DetectionEvent<'a> {
    /// Domain that triggered the detection.
    pub domain: &'a str,
    /// Probe stage that matched.
    pub source: DetectionSource,
    /// Provider token that matched, as declared in the signature set.
    pub provider: &'a str,
}

impl fmt::Display for DetectionEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (CDN detected via {}: {})",
            self.domain,
            self.source.as_str(),
            capitalize(self.provider)
        )
    }
}

/// Emits a detection event on the diagnostic stream.
///
/// With `verbose` the event is logged at info so operators see each filtered
/// domain as it happens; otherwise it drops to debug. Either way it rides the
/// logger (stderr), never stdout.
pub fn report_detection(verbose: bool, domain: &str, source: DetectionSource, provider: &str) {
    let event = DetectionEvent {
        domain,
        source,
        provider,
    };
    if verbose {
        info!("{event}");
    } else {
        debug!("{event}");
    }
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_event_display() {
        let event = DetectionEvent {
            domain: "www.example.com",
            source: DetectionSource::DnsHost,
            provider: "cloudflare",
        };
        assert_eq!(
            event.to_string(),
            "www.example.com (CDN detected via DNS 'host': Cloudflare)"
        );
    }

    #[test]
    fn test_detection_source_labels() {
        assert_eq!(DetectionSource::DnsHost.as_str(), "DNS 'host'");
        assert_eq!(DetectionSource::DnsDig.as_str(), "DNS 'dig'");
        assert_eq!(DetectionSource::Http.as_str(), "HTTP");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("akamai"), "Akamai");
        assert_eq!(capitalize("f"), "F");
        assert_eq!(capitalize(""), "");
    }
}
