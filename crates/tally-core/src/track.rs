//! Client-supplied identifier normalization.
//!
//! Nothing in this module errors: a malformed track id is replaced with a
//! freshly minted one, a suspicious user-agent with the empty string, and
//! an unparsable `previous_count` cookie with zero.

use uuid::Uuid;

/// Longest user-agent accepted into the visit log, in bytes.
const MAX_USER_AGENT_LEN: usize = 255;

/// UUID group lengths for the strict 8-4-4-4-12 shape.
const UUID_GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

/// Strict UUID shape check: five hyphen-separated hex groups of 8-4-4-4-12
/// characters, nothing more. Braced, urn-prefixed, or ungrouped forms are
/// rejected even though they denote valid UUIDs.
pub fn is_valid_track_id(s: &str) -> bool {
    let mut groups = s.split('-');
    for want in UUID_GROUPS {
        match groups.next() {
            Some(g) if g.len() == want && g.bytes().all(|b| b.is_ascii_hexdigit()) => {}
            _ => return false,
        }
    }
    groups.next().is_none()
}

/// Pick the effective track id: keep `candidate` when it already has the
/// strict UUID shape, otherwise mint a fresh random one.
pub fn resolve_track_id(candidate: Option<&str>) -> String {
    match candidate {
        Some(s) if is_valid_track_id(s) => s.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

/// Printable-ASCII user-agents up to 255 bytes pass through unchanged;
/// anything else is replaced with the empty string.
pub fn sanitize_user_agent(ua: &str) -> &str {
    if ua.len() <= MAX_USER_AGENT_LEN && ua.bytes().all(|b| (0x20..=0x7e).contains(&b)) {
        ua
    } else {
        ""
    }
}

/// Read a `previous_count` cookie value. Any value that is not a plain
/// non-negative decimal counts as zero.
pub fn parse_previous_count(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}
