//! `show ap summary` table extraction.
//!
//! Both controller families print one line per joined AP with the name
//! first, then a single-digit slot count, exactly six spaces, the model
//! code, and a MAC address. Header and footer lines never fit that shape.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::AccessPointRecord;

const AP_SUMMARY_PATTERN: &str = r"(\S{1,64})\s+([0-9])\s{6}([-A-Z0-9]+)\s+([a-zA-Z0-9:.]+)";

static AP_SUMMARY_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(AP_SUMMARY_PATTERN).expect("AP summary pattern is valid"));

/// Every AP row in `output`, in source order. Duplicates are kept.
pub fn parse_ap_summary(output: &str) -> Vec<AccessPointRecord> {
    AP_SUMMARY_ROW
        .captures_iter(output)
        .map(|caps| {
            let field = |i: usize| caps.get(i).map_or("", |m| m.as_str());
            AccessPointRecord {
                name: field(1).to_owned(),
                slots: field(2).parse().unwrap_or_default(),
                model: field(3).to_owned(),
                mac: field(4).to_owned(),
            }
        })
        .collect()
}

/// Just the names, in source order.
pub fn ap_names(output: &str) -> Vec<String> {
    parse_ap_summary(output)
        .into_iter()
        .map(|ap| ap.name)
        .collect()
}

/// Render records back into summary-table lines the parser accepts.
pub fn render_summary_rows(records: &[AccessPointRecord]) -> String {
    let width = records.iter().map(|ap| ap.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for ap in records {
        let _ = writeln!(
            out,
            "{:<width$}  {}      {}  {}",
            ap.name, ap.slots, ap.model, ap.mac
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const IOSXE_SUMMARY: &str = "\
Number of APs: 3

AP Name                            Slots    AP Model  Ethernet MAC    Radio MAC       Location                          Country     IP Address                                 State
-------------------------------------------------------------------------------------------------------------------------------------------------------------------------------------
Lobby-AP01                         2      C9120AXI-B  0042.5a0b.1c2d  0042.5a0e.7f80  default location                  US          10.10.20.11                                Registered
Floor2-AP07                        2      C9130AXI-B  0042.5a0b.3e4f  0042.5a0e.9a20  default location                  US          10.10.20.12                                Registered
Lobby-AP01                         3      C9136I-B    70d3.79b2.0011  70d3.79b3.0020  default location                  US          10.10.20.13                                Registered
";

    const AIREOS_SUMMARY: &str = "\
Number of APs.................................... 2

Global AP User Name.............................. admin
Global AP Dot1x User Name........................ Not Configured

AP Name             Slots  AP Model              Ethernet MAC       Location          Country     IP Address       Clients   DSE Location
------------------  -----  --------------------  -----------------  ----------------  ----------  ---------------  --------  --------------
AP-East-01           2      AIR-AP3802I-B-K9      00:a2:ee:11:22:33  default location  US          10.1.1.21          4        [0 ,0 ,0 ]
AP-West-02           2      AIR-AP2802I-B-K9      00:a2:ee:44:55:66  default location  US          10.1.1.22          0        [0 ,0 ,0 ]
";

    #[test]
    fn parses_iosxe_table_in_order_with_duplicates() {
        assert_eq!(
            ap_names(IOSXE_SUMMARY),
            vec!["Lobby-AP01", "Floor2-AP07", "Lobby-AP01"]
        );
    }

    #[test]
    fn parses_aireos_table() {
        let aps = parse_ap_summary(AIREOS_SUMMARY);
        assert_eq!(aps.len(), 2);
        assert_eq!(
            aps[0],
            AccessPointRecord::new("AP-East-01", 2, "AIR-AP3802I-B-K9", "00:a2:ee:11:22:33")
        );
        assert_eq!(aps[1].name, "AP-West-02");
    }

    #[test]
    fn no_rows_is_empty_not_error() {
        assert!(parse_ap_summary("Number of APs: 0\n").is_empty());
        assert!(parse_ap_summary("").is_empty());
    }

    #[test]
    fn reparsing_rendered_rows_is_stable() {
        let original = parse_ap_summary(IOSXE_SUMMARY);
        let rendered = render_summary_rows(&original);
        assert_eq!(parse_ap_summary(&rendered), original);
        assert_eq!(ap_names(&rendered), ap_names(IOSXE_SUMMARY));
    }
}
