//! Scan results and their cleanup.
//!
//! A scan reports each access point as many times as the radio hears its
//! beacon, so the raw buffer is filtered by BSSID before it is handed out.
//! SSIDs are never compared: roaming and mesh deployments legitimately share
//! one SSID across many access points.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// Maximum SSID length in bytes (IEEE 802.11).
pub const SSID_MAX_LEN: usize = 32;

/// A link-layer (MAC) address, such as an access point's BSSID.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// Raw octets.
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

/// Colon separated upper-case hex, e.g. `AB:CD:EF:01:02:03`.
impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            a, b, c, d, e, g
        )
    }
}

/// Formats a MAC/BSSID address as colon separated upper-case hex.
pub fn mac_to_string(octets: &[u8; 6]) -> String {
    MacAddress(*octets).to_string()
}

/// One network seen during a scan.
///
/// Channel, RSSI and security are passed through from the radio untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanRecord {
    /// Network name. Not necessarily UTF-8 and not unique.
    pub ssid: heapless::Vec<u8, SSID_MAX_LEN>,
    /// Hardware address of the access point.
    pub bssid: MacAddress,
    /// Channel the access point operates on.
    pub channel: u16,
    /// Received signal strength in dBm.
    pub rssi: i16,
    /// Driver specific authentication/security code.
    pub security: u8,
}

impl ScanRecord {
    /// Creates a record. SSIDs longer than [`SSID_MAX_LEN`] are truncated.
    pub fn new(ssid: &[u8], bssid: impl Into<MacAddress>) -> Self {
        Self {
            ssid: ssid.iter().take(SSID_MAX_LEN).copied().collect(),
            bssid: bssid.into(),
            ..Self::default()
        }
    }

    /// Sets the channel.
    #[must_use]
    pub fn with_channel(mut self, channel: u16) -> Self {
        self.channel = channel;
        self
    }

    /// Sets the signal strength.
    #[must_use]
    pub fn with_rssi(mut self, rssi: i16) -> Self {
        self.rssi = rssi;
        self
    }

    /// Sets the security code.
    #[must_use]
    pub fn with_security(mut self, security: u8) -> Self {
        self.security = security;
        self
    }

    /// SSID as text, if it is valid UTF-8.
    pub fn ssid_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.ssid).ok()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ScanRecord {
    fn format(&self, fmt: defmt::Formatter<'_>) {
        defmt::write!(
            fmt,
            "ScanRecord {{ ssid: {=[u8]:a}, bssid: {}, channel: {}, rssi: {} }}",
            &self.ssid[..],
            self.bssid,
            self.channel,
            self.rssi
        );
    }
}

/// Number of records in `records` reporting `bssid`.
fn occurrences(records: &[ScanRecord], bssid: &MacAddress) -> usize {
    records.iter().filter(|r| r.bssid == *bssid).count()
}

/// Drops every record whose BSSID appears more than once in `records`.
///
/// A BSSID seen twice loses both records; only access points reported exactly
/// once survive. Surviving records keep their discovery order.
pub fn remove_duplicates(records: &[ScanRecord]) -> Vec<ScanRecord> {
    records
        .iter()
        .filter(|r| occurrences(records, &r.bssid) == 1)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: [u8; 6] = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55];
    const B: [u8; 6] = [0xAB, 0xCD, 0xEF, 0x01, 0x02, 0x03];
    const C: [u8; 6] = [0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x01];

    #[test]
    fn mac_formatting() {
        assert_eq!(mac_to_string(&B), "AB:CD:EF:01:02:03");
        assert_eq!(MacAddress(A).to_string(), "00:11:22:33:44:55");
        assert_eq!(mac_to_string(&[0x0a; 6]), "0A:0A:0A:0A:0A:0A");
    }

    #[test]
    fn repeated_bssids_are_all_dropped() {
        let records = [
            ScanRecord::new(b"home", A),
            ScanRecord::new(b"home", A),
            ScanRecord::new(b"cafe", B),
            ScanRecord::new(b"mesh", C),
            ScanRecord::new(b"mesh", C),
            ScanRecord::new(b"mesh", C),
        ];

        let unique = remove_duplicates(&records);

        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].bssid, MacAddress(B));
    }

    #[test]
    fn shared_ssid_is_not_a_duplicate() {
        let records = [
            ScanRecord::new(b"mesh", A),
            ScanRecord::new(b"mesh", B),
            ScanRecord::new(b"mesh", C),
        ];

        assert_eq!(remove_duplicates(&records), records);
    }

    #[test]
    fn keeps_discovery_order() {
        let records = [
            ScanRecord::new(b"c", C).with_rssi(-80),
            ScanRecord::new(b"x", A),
            ScanRecord::new(b"a", B).with_rssi(-40),
            ScanRecord::new(b"y", A),
        ];

        let unique = remove_duplicates(&records);

        assert_eq!(unique, [records[0].clone(), records[2].clone()]);
    }

    #[test]
    fn empty_scan() {
        assert!(remove_duplicates(&[]).is_empty());
    }

    #[test]
    fn long_ssid_is_truncated() {
        let record = ScanRecord::new(&[b'x'; 40], A);
        assert_eq!(record.ssid.len(), SSID_MAX_LEN);
    }

    #[test]
    fn ssid_as_text() {
        assert_eq!(ScanRecord::new(b"office", A).ssid_str(), Some("office"));
        assert_eq!(ScanRecord::new(&[0xff, 0xfe], A).ssid_str(), None);
    }
}
