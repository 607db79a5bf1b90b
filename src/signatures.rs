//! The static CDN/WAF signature set and the matcher applied to probe output.

/// Provider tokens searched for in DNS tool output and HTTP response headers.
///
/// Declaration order is match order: the first token found wins and is the
/// provider named in detection events. Tokens must stay lowercase; the matcher
/// lowercases its input and compares byte-for-byte.
///
/// These are deliberately loose substrings. `fastly` matches both the
/// `*.fastly.net` CNAME chain and a `Server: Fastly` banner without needing
/// per-provider parsing. To cover another provider, add its token here.
pub const CDN_PROVIDERS: &[&str] = &[
    "akamai",
    "imperva",
    "cloudflare",
    "fastly",
    "verizon",
    "stackpath",
    "incapsula",
];

/// Returns the first known provider whose token occurs in `text`.
///
/// The match is a case-insensitive substring test over the whole input, so a
/// provider name appearing anywhere (a CNAME target, an SOA line, a header
/// value) counts as a detection.
pub fn find_provider(text: &str) -> Option<&'static str> {
    let haystack = text.to_lowercase();
    CDN_PROVIDERS
        .iter()
        .copied()
        .find(|provider| haystack.contains(provider))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_provider_tokens_are_lowercase() {
        for provider in CDN_PROVIDERS {
            assert!(!provider.is_empty());
            assert_eq!(*provider, provider.to_lowercase());
        }
    }

    #[test]
    fn test_every_provider_matches_itself() {
        for provider in CDN_PROVIDERS {
            assert_eq!(find_provider(provider), Some(*provider));
        }
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(find_provider("Server: CloudFlare"), Some("cloudflare"));
        assert_eq!(find_provider("AKAMAI TECHNOLOGIES"), Some("akamai"));
    }

    #[test]
    fn test_match_inside_dns_tool_output() {
        let output = "www.example.com is an alias for j2.shared.global.fastly.net.\n\
                      j2.shared.global.fastly.net has address 151.101.1.57\n";
        assert_eq!(find_provider(output), Some("fastly"));
    }

    #[test]
    fn test_no_match_returns_none() {
        assert_eq!(find_provider("example.com has address 93.184.216.34"), None);
        assert_eq!(find_provider(""), None);
    }

    #[test]
    fn test_declaration_order_breaks_ties() {
        // akamai is declared before cloudflare, so it wins when both appear.
        assert_eq!(
            find_provider("cloudflare fronting an akamai origin"),
            Some("akamai")
        );
    }

    proptest! {
        #[test]
        fn prop_match_survives_casing_and_context(
            prefix in "[a-z0-9 .;/-]{0,40}",
            suffix in "[a-z0-9 .;/-]{0,40}",
            index in 0usize..CDN_PROVIDERS.len(),
            flips in proptest::collection::vec(any::<bool>(), 16),
        ) {
            let mixed: String = CDN_PROVIDERS[index]
                .chars()
                .enumerate()
                .map(|(i, c)| {
                    if flips.get(i).copied().unwrap_or(false) {
                        c.to_ascii_uppercase()
                    } else {
                        c
                    }
                })
                .collect();
            let blob = format!("{prefix}{mixed}{suffix}");
            prop_assert!(find_provider(&blob).is_some());
        }

        #[test]
        fn prop_plain_hostnames_never_match(host in "[bdeghjmnoqtuw.-]{1,60}") {
            // Alphabet chosen so no provider token can be spelled.
            prop_assert_eq!(find_provider(&host), None);
        }
    }
}
