//! Link status reported by the radio.
//!
//! The radio hands back a signed status code on every query. The codes follow
//! the CYW43 link-status vocabulary; other backends translate their own state
//! into these values (see [`RadioLink::link_status`](crate::RadioLink::link_status)).

use core::fmt;

/// Reported by the manager itself while the driver is not initialized.
pub const NOT_INIT: i32 = -255;
/// Station is up but not associated with any network.
pub const LINK_DOWN: i32 = 0;
/// Associated with a network.
pub const LINK_JOIN: i32 = 1;
/// Associated, no IP address yet.
pub const LINK_NOIP: i32 = 2;
/// Associated with an IP address.
pub const LINK_UP: i32 = 3;
/// Association failed.
pub const LINK_FAIL: i32 = -1;
/// Network not found.
pub const LINK_NONET: i32 = -2;
/// Authentication rejected.
pub const LINK_BADAUTH: i32 = -3;

/// Current state of the station interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// Driver not initialized.
    NotInitialized,
    /// Initial state after driver initialization.
    Offline,
    /// Connected to a network.
    Joined,
    /// Connected to a network, but no IP address.
    NoInternet,
    /// Connected to a network with an IP address.
    Connected,
    /// Failed to connect to a network.
    ConnectFailed,
    /// Network not found (out of range).
    NotFound,
    /// Failed to authenticate (bad password).
    AuthFailed,
    /// The radio reported a code outside the table above.
    Unknown,
}

impl LinkStatus {
    /// Maps a raw radio status code. Unmapped codes become [`LinkStatus::Unknown`].
    pub const fn from_raw(code: i32) -> Self {
        match code {
            NOT_INIT => Self::NotInitialized,
            LINK_DOWN => Self::Offline,
            LINK_JOIN => Self::Joined,
            LINK_NOIP => Self::NoInternet,
            LINK_UP => Self::Connected,
            LINK_FAIL => Self::ConnectFailed,
            LINK_NONET => Self::NotFound,
            LINK_BADAUTH => Self::AuthFailed,
            _ => Self::Unknown,
        }
    }

    /// Fixed label for the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INIT",
            Self::Offline => "OFFLINE",
            Self::Joined => "JOINED",
            Self::NoInternet => "NO_INTERNET",
            Self::Connected => "CONNECTED",
            Self::ConnectFailed => "CONNECT_FAILED",
            Self::NotFound => "NOTFOUND",
            Self::AuthFailed => "AUTH_FAILED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl From<i32> for LinkStatus {
    fn from(code: i32) -> Self {
        Self::from_raw(code)
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_known_code() {
        let table = [
            (NOT_INIT, LinkStatus::NotInitialized),
            (LINK_DOWN, LinkStatus::Offline),
            (LINK_JOIN, LinkStatus::Joined),
            (LINK_NOIP, LinkStatus::NoInternet),
            (LINK_UP, LinkStatus::Connected),
            (LINK_FAIL, LinkStatus::ConnectFailed),
            (LINK_NONET, LinkStatus::NotFound),
            (LINK_BADAUTH, LinkStatus::AuthFailed),
        ];
        for (code, status) in table {
            assert_eq!(LinkStatus::from_raw(code), status);
        }
    }

    #[test]
    fn unmapped_codes_are_unknown() {
        assert_eq!(LinkStatus::from(4), LinkStatus::Unknown);
        assert_eq!(LinkStatus::from(-4), LinkStatus::Unknown);
        assert_eq!(LinkStatus::from(i32::MIN), LinkStatus::Unknown);
    }

    #[test]
    fn labels() {
        assert_eq!(LinkStatus::Connected.as_str(), "CONNECTED");
        assert_eq!(LinkStatus::NotFound.as_str(), "NOTFOUND");
        assert_eq!(LinkStatus::NoInternet.to_string(), "NO_INTERNET");
        assert_eq!(LinkStatus::Unknown.to_string(), "UNKNOWN");
    }
}
