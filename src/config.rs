use crate::radio::AuthMode;

/// Default connect timeout used by [`WifiConfig::new`], in milliseconds.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u32 = 15_000;

/// How often the blocking operations re-check the radio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollConfig {
    /// Sleep between status checks while connecting.
    pub connect_interval_ms: u32,
    /// Sleep between status checks while waiting for a blocking disconnect.
    pub disconnect_interval_ms: u32,
    /// Sleep between scan progress checks.
    pub scan_interval_ms: u32,
}

impl PollConfig {
    /// 200 ms for connect/disconnect, 10 ms for scans.
    pub const fn new() -> Self {
        Self {
            connect_interval_ms: 200,
            disconnect_interval_ms: 200,
            scan_interval_ms: 10,
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for WiFi connection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WifiConfig<'a> {
    /// Network name.
    pub ssid: &'a str,
    /// Passphrase, empty for open networks.
    pub password: &'a str,
    /// Authentication method.
    pub auth: AuthMode,
    /// How long to wait for the link to come up.
    pub timeout_ms: u32,
}

impl<'a> WifiConfig<'a> {
    /// WPA2 network with the default timeout.
    pub const fn new(ssid: &'a str, password: &'a str) -> Self {
        Self {
            ssid,
            password,
            auth: AuthMode::Wpa2,
            timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
        }
    }

    /// Network without a password.
    pub const fn open(ssid: &'a str) -> Self {
        Self {
            ssid,
            password: "",
            auth: AuthMode::Open,
            timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
        }
    }

    /// Overrides the authentication method.
    #[must_use]
    pub const fn with_auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }

    /// Overrides the connect timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_defaults() {
        let poll = PollConfig::default();
        assert_eq!(poll.connect_interval_ms, 200);
        assert_eq!(poll.disconnect_interval_ms, 200);
        assert_eq!(poll.scan_interval_ms, 10);
    }

    #[test]
    fn wifi_config_builders() {
        let config = WifiConfig::new("lab", "hunter22")
            .with_auth(AuthMode::WpaWpa2Mixed)
            .with_timeout_ms(5_000);

        assert_eq!(config.ssid, "lab");
        assert_eq!(config.auth, AuthMode::WpaWpa2Mixed);
        assert_eq!(config.timeout_ms, 5_000);

        let open = WifiConfig::open("guest");
        assert_eq!(open.auth, AuthMode::Open);
        assert!(open.password.is_empty());
        assert_eq!(open.timeout_ms, DEFAULT_CONNECT_TIMEOUT_MS);
    }
}
