//! User-Agent rotation for HTTP probes.
//!
//! CDN edges and WAFs fingerprint repeated identical clients quickly, so each
//! probe request draws a fresh browser-like User-Agent from a fixed pool
//! instead of reusing one string for the whole run.

use rand::seq::IndexedRandom;

/// Browser User-Agent strings the HTTP probe rotates through.
///
/// A spread of current Chrome, Firefox, Safari, and Edge strings across
/// Windows, macOS, and Linux. Versions drift out of date over time; bump them
/// when a pass against known targets starts drawing challenge pages.
pub const USER_AGENT_POOL: &[&str] = &[
    // Chrome on Windows / macOS / Linux
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    // Firefox on Windows / Linux
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:127.0) Gecko/20100101 Firefox/127.0",
    "Mozilla/5.0 (X11; Linux x86_64; rv:127.0) Gecko/20100101 Firefox/127.0",
    // Safari on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15",
    // Edge on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36 Edg/126.0.0.0",
];

/// Picks a User-Agent string at random from the pool.
pub fn random_user_agent() -> &'static str {
    USER_AGENT_POOL
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(USER_AGENT_POOL[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_entries_look_like_browsers() {
        for ua in USER_AGENT_POOL {
            assert!(ua.starts_with("Mozilla/5.0"), "unexpected UA: {ua}");
            // Header values must stay on one line
            assert!(!ua.contains('\n'));
        }
    }

    #[test]
    fn test_random_user_agent_draws_from_pool() {
        for _ in 0..20 {
            let ua = random_user_agent();
            assert!(USER_AGENT_POOL.contains(&ua));
        }
    }

    #[test]
    fn test_rotation_actually_varies() {
        let first = random_user_agent();
        // With 7 entries, 100 draws landing on one string is effectively impossible.
        let varied = (0..100).any(|_| random_user_agent() != first);
        assert!(varied);
    }
}
