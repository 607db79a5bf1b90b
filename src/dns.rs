//! DNS-stage probing via external lookup tools.
//!
//! CDN fronting usually shows up in the resolution chain long before any HTTP
//! exchange: a CNAME into `*.cloudflare.net`, an Akamai edge hostname in an
//! answer section. Rather than reimplement every record type, this stage shells
//! out to the system lookup tools and pattern-matches their combined output.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use crate::classify::Prober;
use crate::error_handling::{ErrorStats, ErrorType};
use crate::models::{report_detection, DetectionSource, Verdict};
use crate::signatures::find_provider;

/// Lookup tool consulted first.
pub const DEFAULT_HOST_COMMAND: &str = "host";
/// Lookup tool consulted when the first finds nothing.
pub const DEFAULT_DIG_COMMAND: &str = "dig";

/// DNS prober that inspects the stdout of external lookup tools.
///
/// Runs `host <domain>` and, only if that output carries no CDN signature,
/// `dig <domain>`. A tool that cannot be spawned or prints nothing simply
/// contributes no evidence; the stage never blocks a domain on a failed
/// lookup, it just falls through to the HTTP stage.
pub struct CommandDnsProber {
    host_command: String,
    dig_command: String,
    error_stats: Arc<ErrorStats>,
    verbose: bool,
}

impl CommandDnsProber {
    /// Creates a prober using the system `host` and `dig` tools.
    pub fn new(error_stats: Arc<ErrorStats>, verbose: bool) -> Self {
        Self::with_commands(
            DEFAULT_HOST_COMMAND,
            DEFAULT_DIG_COMMAND,
            error_stats,
            verbose,
        )
    }

    /// Creates a prober with custom lookup commands.
    ///
    /// Useful when the tools live outside `PATH` or are wrapped; tests also
    /// use this to substitute harmless commands for the real resolvers.
    pub fn with_commands(
        host_command: impl Into<String>,
        dig_command: impl Into<String>,
        error_stats: Arc<ErrorStats>,
        verbose: bool,
    ) -> Self {
        CommandDnsProber {
            host_command: host_command.into(),
            dig_command: dig_command.into(),
            error_stats,
            verbose,
        }
    }

    /// Runs one lookup tool and captures its stdout.
    ///
    /// Returns `None` when the tool cannot be spawned. Non-zero exit statuses
    /// are not treated as failures; tools like `host` exit non-zero for
    /// NXDOMAIN while still printing output worth matching.
    async fn run_lookup(&self, command: &str, domain: &str) -> Option<String> {
        match Command::new(command).arg(domain).output().await {
            Ok(output) => Some(String::from_utf8_lossy(&output.stdout).into_owned()),
            Err(e) => {
                debug!("DNS lookup tool '{command}' failed for {domain}: {e}");
                self.error_stats.increment(ErrorType::DnsToolError);
                None
            }
        }
    }
}

#[async_trait]
impl Prober for CommandDnsProber {
    async fn probe(&self, domain: &str) -> Verdict {
        let stages = [
            (self.host_command.as_str(), DetectionSource::DnsHost),
            (self.dig_command.as_str(), DetectionSource::DnsDig),
        ];

        for (command, source) in stages {
            let Some(output) = self.run_lookup(command, domain).await else {
                continue;
            };
            if let Some(provider) = find_provider(&output) {
                report_detection(self.verbose, domain, source, provider);
                return Verdict::Blocked;
            }
        }

        Verdict::Clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The tests swap the lookup tools for stock shell commands: `echo` makes
    // the "tool output" exactly the queried name, `true` produces no output,
    // and a bogus path exercises the spawn failure path. No resolver needed.

    fn stats() -> Arc<ErrorStats> {
        Arc::new(ErrorStats::new())
    }

    #[tokio::test]
    async fn test_blocked_when_tool_output_names_a_provider() {
        let prober = CommandDnsProber::with_commands("echo", "echo", stats(), false);
        assert_eq!(prober.probe("cdn.cloudflare.net").await, Verdict::Blocked);
    }

    #[tokio::test]
    async fn test_clear_for_unremarkable_output() {
        let prober = CommandDnsProber::with_commands("echo", "echo", stats(), false);
        assert_eq!(prober.probe("origin.example.com").await, Verdict::Clear);
    }

    #[tokio::test]
    async fn test_second_tool_consulted_when_first_is_silent() {
        // `true` prints nothing, so only the dig-style fallback can match.
        let prober = CommandDnsProber::with_commands("true", "echo", stats(), false);
        assert_eq!(prober.probe("edge.fastly.net").await, Verdict::Blocked);
    }

    #[tokio::test]
    async fn test_missing_tools_fall_through_to_clear() {
        let error_stats = stats();
        let prober = CommandDnsProber::with_commands(
            "/nonexistent/host-tool",
            "/nonexistent/dig-tool",
            Arc::clone(&error_stats),
            false,
        );

        assert_eq!(prober.probe("example.com").await, Verdict::Clear);
        assert_eq!(error_stats.get_count(ErrorType::DnsToolError), 2);
    }

    #[tokio::test]
    async fn test_matching_is_case_insensitive_over_tool_output() {
        // `echo` preserves the mixed case; the matcher must not care.
        let prober = CommandDnsProber::with_commands("echo", "echo", stats(), false);
        assert_eq!(prober.probe("edge.CloudFlare.net").await, Verdict::Blocked);
    }
}
