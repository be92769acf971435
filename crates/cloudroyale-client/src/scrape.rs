//! Admin listing page extraction
//!
//! The panel has no API for enumerating servers; the only source is the
//! `/admin/` HTML page. Each server row links to its detail page and shows
//! the primary IP plus a Swedish power badge (`PÅ` = on, `AV` = off), so the
//! extraction keys off three patterns:
//!
//! - `<a href="/admin/vps?id=<id>"><name>` for id and display name
//! - a strict dotted-quad for the IP
//! - `'>PÅ</span>` / `'>AV</span>` for the power state
//!
//! The IP and badge are only searched *within* the slice between one server
//! anchor and the next, so a row that fails to decode cannot shift the
//! fields of any other row. Incomplete rows are logged and skipped.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// One row of the admin listing: a remote VPS instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    /// Panel-assigned server id, as it appears in the detail-page href.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Primary IPv4 address.
    pub ip: String,

    /// Power state: `true` when the badge reads `PÅ`.
    pub online: bool,
}

/// Extract server records from the `/admin/` listing page.
///
/// Records come back in document order. A page without server anchors
/// yields an empty vector.
pub fn parse_server_listing(html: &str) -> Vec<ServerRecord> {
    let anchor_re = Regex::new(r#"<a href="/admin/vps\?id=(\w+)">([^<]+)"#).unwrap();
    let ip_re = Regex::new(
        r"\b(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)(?:\.(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)){3}\b",
    )
    .unwrap();
    let status_re = Regex::new(r"'>(AV|PÅ)</span>").unwrap();

    // (block start, id, name) per server anchor
    let anchors: Vec<(usize, String, String)> = anchor_re
        .captures_iter(html)
        .map(|cap| {
            let whole = cap.get(0).unwrap();
            (whole.end(), cap[1].to_string(), cap[2].to_string())
        })
        .collect();

    let mut records = Vec::with_capacity(anchors.len());

    for (i, (block_start, id, name)) in anchors.iter().enumerate() {
        let block_end = anchors
            .get(i + 1)
            .map_or(html.len(), |(next_start, _, _)| *next_start);
        let block = &html[*block_start..block_end];

        let ip = ip_re.find(block).map(|m| m.as_str().to_string());
        let online = status_re.captures(block).map(|cap| &cap[1] == "PÅ");

        match (ip, online) {
            (Some(ip), Some(online)) => records.push(ServerRecord {
                id: id.clone(),
                name: name.clone(),
                ip,
                online,
            }),
            (ip, online) => {
                tracing::warn!(
                    id = %id,
                    name = %name,
                    missing_ip = ip.is_none(),
                    missing_status = online.is_none(),
                    "skipping listing row that did not fully decode"
                );
            }
        }
    }

    records
}
