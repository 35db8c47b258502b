//! RFC 8484 JSON answer parsing.

use crawldns_domain::{RecordFamily, ResolveError};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// JSON body returned by `application/dns-json` endpoints. Unknown fields
/// (TC, RD, Question, ...) are ignored; `Answer` is absent on NXDOMAIN.
#[derive(Debug, Deserialize)]
pub struct DnsJsonResponse {
    #[serde(rename = "Status")]
    pub status: i64,
    #[serde(rename = "Answer", default)]
    pub answer: Vec<DnsJsonAnswer>,
}

#[derive(Debug, Deserialize)]
pub struct DnsJsonAnswer {
    pub data: String,
}

/// Extract addresses from a 200-status DoH body, in answer order.
///
/// A non-zero `Status` is a DNS-level failure (SERVFAIL, NXDOMAIN, ...)
/// and fails the whole parse. Answers whose `data` is not an address
/// literal of the requested family (CNAME targets, malformed strings) are
/// filtered out, not errors.
pub fn parse_answers(
    hostname: &str,
    body: &str,
    family: RecordFamily,
) -> Result<Vec<IpAddr>, ResolveError> {
    let response: DnsJsonResponse = serde_json::from_str(body).map_err(|e| {
        ResolveError::ResolutionFailed(format!("malformed DoH answer for {hostname}: {e}"))
    })?;

    if response.status != 0 {
        return Err(ResolveError::ResolutionFailed(format!(
            "DNS status {} for {hostname}",
            response.status
        )));
    }

    let addresses = response
        .answer
        .iter()
        .filter_map(|record| match family {
            // The std parsers accept exactly the strict literal forms:
            // dotted-quad octets 0-255 for IPv4, RFC 4291 text for IPv6.
            RecordFamily::Ipv4 => record.data.parse::<Ipv4Addr>().ok().map(IpAddr::V4),
            RecordFamily::Ipv6 => record.data.parse::<Ipv6Addr>().ok().map(IpAddr::V6),
        })
        .collect();

    Ok(addresses)
}
