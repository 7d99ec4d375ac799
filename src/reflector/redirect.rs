//! Relative redirect chain.

use axum::response::Redirect;

/// Counter used when `times` does not parse (e.g. overflows `u64`).
pub const FALLBACK_TIMES: u64 = 5;

/// Where every chain ends.
pub const CHAIN_END: &str = "/get";

/// Parse the `times` path segment, falling back to [`FALLBACK_TIMES`].
pub fn parse_times(raw: &str) -> u64 {
    match raw.parse() {
        Ok(times) => times,
        Err(error) => {
            tracing::warn!(times = %raw, %error, fallback = FALLBACK_TIMES, "Unparseable redirect counter");
            FALLBACK_TIMES
        }
    }
}

/// Location of the next hop for a given counter.
pub fn next_hop(counter: u64) -> String {
    if counter > 1 {
        format!("/relative-redirect/{}", counter - 1)
    } else {
        CHAIN_END.to_string()
    }
}

/// 307 with a root-relative `Location` and no body.
pub fn redirect_to(location: &str) -> Redirect {
    Redirect::temporary(location)
}
