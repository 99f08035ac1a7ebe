//! Capability surface of the radio driver.
//!
//! The manager never talks to hardware directly. Everything it needs from the
//! radio chip, the network interface and the board goes through [`RadioLink`],
//! so a firmware build plugs in the real driver and tests plug in a stub.

use crate::scanner::ScanRecord;

/// Supported authentication methods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AuthMode {
    /// Open network (not password protected).
    Open,
    /// Password-protected WPA1 with TKIP.
    Wpa,
    /// Password-protected WPA2 with AES.
    #[default]
    Wpa2,
    /// Password-protected WPA1/2 mix.
    WpaWpa2Mixed,
}

impl AuthMode {
    /// The CYW43 driver constant for this method.
    pub const fn to_raw(self) -> u32 {
        match self {
            Self::Open => 0,
            Self::Wpa => 0x0020_0002,
            Self::Wpa2 => 0x0040_0004,
            Self::WpaWpa2Mixed => 0x0040_0006,
        }
    }

    /// Looks up a CYW43 driver constant.
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Open),
            0x0020_0002 => Some(Self::Wpa),
            0x0040_0004 => Some(Self::Wpa2),
            0x0040_0006 => Some(Self::WpaWpa2Mixed),
            _ => None,
        }
    }
}

/// Options for a scan request. The default scans every channel for every network.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanOptions<'a> {
    /// Only report networks with this SSID.
    pub ssid: Option<&'a str>,
    /// Only scan this channel.
    pub channel: Option<u8>,
    /// Report networks that hide their SSID.
    pub show_hidden: bool,
}

/// Everything the manager needs from the radio subsystem.
///
/// Requests return as soon as the driver accepted or rejected them; the
/// manager observes their outcome by polling [`RadioLink::link_status`] and
/// [`RadioLink::poll_scan`].
pub trait RadioLink {
    /// Error reported when the driver rejects a request.
    type Error: core::fmt::Debug;

    /// Powers up and initializes the radio chip.
    fn chip_init(&mut self) -> Result<(), Self::Error>;

    /// Shuts the radio chip down. Must tolerate being called on a chip that
    /// is already down.
    fn chip_deinit(&mut self);

    /// Puts the radio into station mode.
    fn enable_station_mode(&mut self) -> Result<(), Self::Error>;

    /// Raw link status code of the station interface, see [`crate::status`].
    fn link_status(&mut self) -> i32;

    /// Starts associating with a network without waiting for the outcome.
    fn begin_connect(
        &mut self,
        ssid: &str,
        passphrase: &str,
        auth: AuthMode,
    ) -> Result<(), Self::Error>;

    /// Asks the station to leave its current network.
    fn leave_network(&mut self) -> Result<(), Self::Error>;

    /// Starts a scan for nearby networks.
    fn start_scan(&mut self, options: &ScanOptions<'_>) -> Result<(), Self::Error>;

    /// Hands every network discovered since the previous poll to `on_result`,
    /// then reports whether the scan is still running.
    fn poll_scan(&mut self, on_result: &mut dyn FnMut(&ScanRecord)) -> bool;

    /// IPv4 address of the station interface, packed little-endian
    /// (see [`IpAddress::from_packed`](crate::IpAddress::from_packed)).
    fn interface_address(&mut self) -> u32;

    /// Drives the board indicator output.
    fn set_indicator(&mut self, on: bool);

    /// Milliseconds since boot from a monotonic source.
    fn uptime_ms(&mut self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_mode_driver_constants() {
        assert_eq!(AuthMode::Wpa2.to_raw(), 0x0040_0004);
        assert_eq!(AuthMode::from_raw(0x0040_0006), Some(AuthMode::WpaWpa2Mixed));
        assert_eq!(AuthMode::from_raw(0), Some(AuthMode::Open));
        assert_eq!(AuthMode::from_raw(0x0080_0000), None);
        assert_eq!(AuthMode::default(), AuthMode::Wpa2);
    }

    #[test]
    fn default_scan_is_unfiltered() {
        let options = ScanOptions::default();
        assert!(options.ssid.is_none());
        assert!(options.channel.is_none());
        assert!(!options.show_hidden);
    }
}
