//! Client IP extraction and normalization for rate limiting.

use axum::http::HeaderMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::ratelimit::constants::IPV6_PREFIX_SEGMENTS;

/// Parse the first address of a proxy header, if present and valid.
fn header_ip(headers: &HeaderMap, name: &str) -> Option<IpAddr> {
    headers
        .get(name)?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

/// Determine the client IP for a request.
///
/// With `trust_proxy`, `X-Forwarded-For` (first hop) and then `X-Real-IP` are
/// consulted before the peer address. Falls back to 127.0.0.1 when nothing is known.
pub fn extract_client_ip(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_proxy: bool,
) -> IpAddr {
    let forwarded = trust_proxy
        .then(|| header_ip(headers, "X-Forwarded-For").or_else(|| header_ip(headers, "X-Real-IP")))
        .flatten();

    forwarded
        .or_else(|| peer.map(|addr| addr.ip()))
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

/// Normalize an IP into its rate-limit bucket key.
///
/// IPv6 addresses collapse to their /64 prefix, since a single client
/// typically controls the whole allocation.
pub fn normalize_ip(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => v4.to_string(),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => v4.to_string(),
            None => {
                let prefix: Vec<String> = v6.segments()[..IPV6_PREFIX_SEGMENTS]
                    .iter()
                    .map(|seg| format!("{seg:x}"))
                    .collect();
                format!("{}::/64", prefix.join(":"))
            }
        },
    }
}

/// Map an allowlist entry onto the key space of [`normalize_ip`].
///
/// Entries that are not IP addresses are kept verbatim.
pub fn normalize_allowlist_entry(entry: &str) -> String {
    entry
        .trim()
        .parse::<IpAddr>()
        .map_or_else(|_| entry.trim().to_string(), normalize_ip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    fn peer() -> Option<SocketAddr> {
        Some(SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), 12345))
    }

    #[test]
    fn test_normalize_ipv4() {
        let ip = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 100));
        assert_eq!(normalize_ip(ip), "192.168.1.100");
    }

    #[test]
    fn test_normalize_ipv6_to_prefix() {
        let a = IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0x85a3, 0x1234, 0, 0, 0, 1));
        let b = IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0x85a3, 0x1234, 0xffff, 0, 0, 9));
        assert_eq!(normalize_ip(a), "2001:db8:85a3:1234::/64");
        assert_eq!(normalize_ip(a), normalize_ip(b));
    }

    #[test]
    fn test_normalize_ipv4_mapped_ipv6() {
        let ip = IpAddr::V6(Ipv4Addr::new(203, 0, 113, 7).to_ipv6_mapped());
        assert_eq!(normalize_ip(ip), "203.0.113.7");
    }

    #[test]
    fn test_peer_address_without_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Forwarded-For", "203.0.113.50".parse().unwrap());

        let ip = extract_client_ip(&headers, peer(), false);
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));
    }

    #[test]
    fn test_forwarded_for_first_hop_when_trusted() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Forwarded-For", "203.0.113.50, 70.41.3.18".parse().unwrap());
        headers.insert("X-Real-IP", "198.51.100.25".parse().unwrap());

        let ip = extract_client_ip(&headers, peer(), true);
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(203, 0, 113, 50)));
    }

    #[test]
    fn test_real_ip_when_forwarded_for_missing() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Real-IP", "198.51.100.25".parse().unwrap());

        let ip = extract_client_ip(&headers, peer(), true);
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(198, 51, 100, 25)));
    }

    #[test]
    fn test_invalid_header_falls_back_to_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Forwarded-For", "not-an-ip".parse().unwrap());

        let ip = extract_client_ip(&headers, peer(), true);
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));
    }

    #[test]
    fn test_fallback_to_localhost() {
        let ip = extract_client_ip(&HeaderMap::new(), None, true);
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn test_normalize_allowlist_entry() {
        assert_eq!(normalize_allowlist_entry(" 10.0.0.9 "), "10.0.0.9");
        assert_eq!(
            normalize_allowlist_entry("2001:db8::1"),
            normalize_ip("2001:db8::1".parse().unwrap())
        );
        assert_eq!(normalize_allowlist_entry("::ffff:203.0.113.7"), "203.0.113.7");
        assert_eq!(normalize_allowlist_entry("office-gateway"), "office-gateway");
    }
}
