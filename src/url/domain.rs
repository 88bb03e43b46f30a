use url::Url;

/// Returns true if both URLs have a host and the hosts match case-insensitively
///
/// Ports and schemes are not compared.
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(left), Some(right)) => left.eq_ignore_ascii_case(right),
        _ => false,
    }
}
