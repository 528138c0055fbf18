// ── Chatflow Engine: HTTP Client Factory & Retry Backoff ───────────────────
//
// Shared HTTP plumbing for the credential provider and the exchange client:
//   • reqwest::Client factory with explicit connect/request timeouts
//   • Retry on 429 (rate limit), 500, 502, 503, 504, 529
//   • Exponential backoff with ±25% jitter, respecting `Retry-After`
//   • Char-boundary-safe truncation for logged error bodies

use std::time::{Duration, SystemTime};

/// Initial retry delay in milliseconds (doubles each attempt).
const INITIAL_RETRY_DELAY_MS: u64 = 1_000;

/// Maximum retry delay cap in milliseconds.
const MAX_RETRY_DELAY_MS: u64 = 30_000;

// ── Client factory ─────────────────────────────────────────────────────────

/// Build the HTTP client used for all outbound calls. Both timeouts are
/// explicit: a hung remote endpoint must never block an interaction for
/// longer than the request timeout.
pub fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(crate::atoms::constants::CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(crate::atoms::constants::REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_default()
}

// ── Retryable status detection ─────────────────────────────────────────────

/// Check if an HTTP status code represents a transient/retryable error.
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504 | 529)
}

// ── Retry-After header parsing ─────────────────────────────────────────────

/// Parse a Retry-After header value (integer seconds only).
/// HTTP-date format is not implemented — falls back to computed backoff.
pub fn parse_retry_after(header_value: &str) -> Option<u64> {
    header_value.trim().parse::<u64>().ok()
}

// ── Backoff delay ──────────────────────────────────────────────────────────

/// Sleep with exponential backoff + ±25% jitter.
/// Respects a server-specified Retry-After delay if one was sent.
/// Returns the actual delay duration for logging. `attempt` is 0-based.
pub async fn retry_delay(attempt: u32, retry_after_secs: Option<u64>) -> Duration {
    let base_ms = INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt.min(10));
    let capped_ms = base_ms.min(MAX_RETRY_DELAY_MS);
    let delay_ms = if let Some(secs) = retry_after_secs {
        // Use the server-specified delay, capped at 60s and floored at our
        // computed backoff.
        (secs.min(60) * 1000).max(capped_ms)
    } else {
        capped_ms
    };
    let delay = Duration::from_millis(apply_jitter(delay_ms));
    tokio::time::sleep(delay).await;
    delay
}

// ── Log truncation ─────────────────────────────────────────────────────────

/// Truncate to at most `max_chars` characters, always on a char boundary.
/// Error bodies go through this before logging; plain byte slicing panics
/// when the cut lands inside a multibyte character.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Apply ±25% jitter to prevent thundering-herd effects.
fn apply_jitter(base_ms: u64) -> u64 {
    let jitter_range = (base_ms / 4) as i64;
    if jitter_range == 0 {
        return base_ms.max(100);
    }
    let offset = (rand_jitter() % (2 * jitter_range + 1)) - jitter_range;
    let result = base_ms as i64 + offset;
    result.max(100) as u64
}

/// Simple jitter source using system clock nanos (no extra crate needed).
fn rand_jitter() -> i64 {
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    (nanos % 1000) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_stays_within_bounds() {
        for _ in 0..100 {
            let v = apply_jitter(1_000);
            assert!((750..=1_250).contains(&v), "jittered value {} out of range", v);
        }
        // Tiny bases never collapse to zero.
        assert!(apply_jitter(0) >= 100);
    }

    #[test]
    fn only_transient_statuses_are_retryable() {
        for status in [429, 500, 502, 503, 504, 529] {
            assert!(is_retryable_status(status), "{status} should be retryable");
        }
        for status in [200, 400, 401, 403, 404, 422] {
            assert!(!is_retryable_status(status), "{status} should not be retryable");
        }
    }

    #[test]
    fn retry_after_parses_integer_seconds_only() {
        assert_eq!(parse_retry_after("30"), Some(30));
        assert_eq!(parse_retry_after("  5 "), Some(5));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2026 07:28:00 GMT"), None);
        assert_eq!(parse_retry_after(""), None);
    }

    #[test]
    fn truncation_lands_on_char_boundaries() {
        let body = format!("{}€tail", "a".repeat(199));
        // Cutting at 200 chars keeps the whole euro sign instead of
        // slicing into its three-byte encoding.
        let cut = truncate_chars(&body, 200);
        assert_eq!(cut.chars().count(), 200);
        assert!(cut.ends_with('€'));

        assert_eq!(truncate_chars("short", 200), "short");
        assert_eq!(truncate_chars("", 200), "");
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
    }
}
