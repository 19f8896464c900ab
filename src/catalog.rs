// Static table of OpenSIPS statistics the probe knows how to report

use crate::error::ProbeError;

/// Ids that look like statistics but are blocked: the targeted proxy versions do not
/// expose them reliably through `get_statistics`.
const UNSUPPORTED: &[&str] = &["udp-load", "tcp-load", "load"];

/// (id, description). The description is appended to the status line after the value.
const CATALOG: &[(&str, &str)] = &[
    // dialog module
    ("active_dialogs", "current active dialogs"),
    ("early_dialogs", "current early dialogs"),
    ("processed_dialogs", "processed dialogs"),
    ("expired_dialogs", "expired dialogs"),
    ("failed_dialogs", "failed dialogs"),
    // core
    ("rcv_requests", "received requests"),
    ("rcv_replies", "received replies"),
    ("fwd_requests", "forwarded requests"),
    ("fwd_replies", "forwarded replies"),
    ("drop_requests", "dropped requests"),
    ("drop_replies", "dropped replies"),
    ("err_requests", "erroneous requests"),
    ("err_replies", "erroneous replies"),
    ("bad_URIs_rcvd", "received bad URIs"),
    ("unsupported_methods", "requests with unsupported methods"),
    ("bad_msg_hdr", "messages with bad headers"),
    // shared memory
    ("total_size", "bytes of shared memory in total"),
    ("used_size", "bytes of shared memory in use"),
    ("real_used_size", "bytes of shared memory in use including overhead"),
    ("max_used_size", "bytes of shared memory used at peak"),
    ("free_size", "bytes of shared memory free"),
    ("fragments", "shared memory fragments"),
    // transactions
    ("UAS_transactions", "UAS transactions"),
    ("UAC_transactions", "UAC transactions"),
    ("inuse_transactions", "transactions in use"),
    // user location
    ("registered_users", "registered users"),
    ("users", "logged in users"),
    ("location-contacts", "registered contacts"),
    ("location-expires", "expired contacts"),
];

/// Human-readable description for a metric id. Exact, case-sensitive match.
pub fn describe(id: &str) -> Result<&'static str, ProbeError> {
    if UNSUPPORTED.contains(&id) {
        return Err(ProbeError::UnsupportedMetric(id.to_string()));
    }
    CATALOG
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, description)| *description)
        .ok_or_else(|| ProbeError::UnknownMetric(id.to_string()))
}

/// Supported ids with descriptions, in table order.
pub fn entries() -> impl Iterator<Item = (&'static str, &'static str)> {
    CATALOG.iter().copied()
}

pub fn unsupported() -> &'static [&'static str] {
    UNSUPPORTED
}
