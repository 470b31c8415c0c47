//! Host validation.
//!
//! Accepted hosts are IPv4 literals, IPv6 literals (bare or in brackets) and DNS-style names
//! made of ASCII letters, digits, `-` and `_`. Internationalized names are not accepted.
//!
//! Names are also run through [`url::Host::parse`]: anything the URL parser would read as an
//! IPv4 address (`1.2.3`, `123`, `0x7f.1`) or rewrite is rejected, so a host that passes
//! [`check_host`] renders exactly as given, up to ASCII case.

use std::net::{IpAddr, Ipv6Addr};

use crate::error::{Error, Result};

const MAX_HOST_LEN: usize = 255;
const MAX_LABEL_LEN: usize = 63;

/// Checks that `host` is a syntactically valid host name or IP literal.
///
/// # Errors
///
/// Returns [`Error::InvalidHost`] otherwise.
pub fn check_host(host: &str) -> Result<()> {
    if is_ip_literal(host) || (is_dns_name(host) && parses_as_same_domain(host)) {
        Ok(())
    } else {
        Err(Error::InvalidHost(host.to_string()))
    }
}

/// Returns the host in the form a URL expects, wrapping bare IPv6 literals in brackets.
#[must_use]
pub fn url_host(host: &str) -> String {
    if host.parse::<Ipv6Addr>().is_ok() {
        format!("[{host}]")
    } else {
        host.to_string()
    }
}

fn is_ip_literal(host: &str) -> bool {
    if let Some(inner) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        return inner.parse::<Ipv6Addr>().is_ok();
    }
    host.parse::<IpAddr>().is_ok()
}

fn parses_as_same_domain(host: &str) -> bool {
    match url::Host::parse(host) {
        Ok(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case(host),
        _ => false,
    }
}

fn is_dns_name(host: &str) -> bool {
    let name = host.strip_suffix('.').unwrap_or(host);
    if name.is_empty() || name.len() > MAX_HOST_LEN {
        return false;
    }

    name.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    })
}
