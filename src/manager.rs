//! Connection lifecycle management.
//!
//! [`WifiManager`] owns the radio and layers initialization tracking, blocking
//! connect/disconnect and scanning on top of it. The blocking operations poll
//! the radio on a fixed interval and await the injected delay in between, so
//! other tasks on the executor keep running while they wait.

use alloc::string::String;
use alloc::vec::Vec;

use embedded_hal_async::delay::DelayNs;

use crate::config::{PollConfig, WifiConfig};
use crate::error::WifiError;
use crate::ip::IpAddress;
use crate::radio::{AuthMode, RadioLink, ScanOptions};
use crate::scanner::{self, ScanRecord};
use crate::status::LinkStatus;

/// WiFi station manager.
pub struct WifiManager<R, D> {
    radio: R,
    delay: D,
    poll: PollConfig,
    initialized: bool,
    scan_results: Vec<ScanRecord>,
}

impl<R: RadioLink, D: DelayNs> WifiManager<R, D> {
    /// Wraps a radio with the default poll intervals. The radio is not touched
    /// until [`WifiManager::initialize`].
    pub fn new(radio: R, delay: D) -> Self {
        Self::with_config(radio, delay, PollConfig::default())
    }

    /// Wraps a radio with custom poll intervals.
    pub fn with_config(radio: R, delay: D, poll: PollConfig) -> Self {
        Self {
            radio,
            delay,
            poll,
            initialized: false,
            scan_results: Vec::new(),
        }
    }

    /// Brings up the radio chip and switches it to station mode.
    ///
    /// Every other operation fails until this succeeds. Calling it again
    /// while initialized does nothing.
    pub fn initialize(&mut self) -> Result<(), WifiError<R::Error>> {
        if self.initialized {
            return Ok(());
        }

        if let Err(e) = self.radio.chip_init() {
            error!("wifi: chip init failed");
            return Err(WifiError::Rejected(e));
        }

        if let Err(e) = self.radio.enable_station_mode() {
            error!("wifi: station mode rejected, powering chip down");
            self.radio.chip_deinit();
            return Err(WifiError::Rejected(e));
        }

        self.initialized = true;
        info!("wifi: initialized");
        Ok(())
    }

    /// Whether the driver is initialized and ready to be used.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Shuts the radio down. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.radio.chip_deinit();
        self.initialized = false;
        self.scan_results.clear();
        info!("wifi: shut down");
    }

    /// Current link status, queried from the radio on every call.
    pub fn status(&mut self) -> LinkStatus {
        if !self.initialized {
            return LinkStatus::NotInitialized;
        }
        LinkStatus::from_raw(self.radio.link_status())
    }

    /// Label of the current link status, e.g. `"CONNECTED"`.
    pub fn status_description(&mut self) -> &'static str {
        self.status().as_str()
    }

    /// Joins a network, waiting up to `timeout_ms` for the link to come up.
    ///
    /// Only allowed while [`LinkStatus::Offline`]. On timeout the association
    /// attempt keeps running in the radio and may still complete later.
    pub async fn connect(
        &mut self,
        ssid: &str,
        passphrase: &str,
        auth: AuthMode,
        timeout_ms: u32,
    ) -> Result<(), WifiError<R::Error>> {
        self.require_initialized()?;
        let status = self.status();
        if status != LinkStatus::Offline {
            debug!("wifi: cannot connect while {}", status);
            return Err(WifiError::InvalidState(status));
        }

        if let Err(e) = self.radio.begin_connect(ssid, passphrase, auth) {
            warn!("wifi: connect request rejected");
            return Err(WifiError::Rejected(e));
        }
        debug!("wifi: connecting to {}", ssid);

        let timeout = u64::from(timeout_ms);
        let start = self.radio.uptime_ms();
        while self.status() != LinkStatus::Connected
            && self.radio.uptime_ms().saturating_sub(start) <= timeout
        {
            self.delay.delay_ms(self.poll.connect_interval_ms).await;
        }

        match self.status() {
            LinkStatus::Connected => {
                info!("wifi: connected to {}", ssid);
                Ok(())
            }
            status => {
                warn!("wifi: connect timed out ({})", status);
                Err(WifiError::Timeout(status))
            }
        }
    }

    /// [`WifiManager::connect`] with the parameters taken from `config`.
    pub async fn connect_with(
        &mut self,
        config: &WifiConfig<'_>,
    ) -> Result<(), WifiError<R::Error>> {
        self.connect(config.ssid, config.password, config.auth, config.timeout_ms)
            .await
    }

    /// Leaves the current network. Only allowed while [`LinkStatus::Connected`].
    ///
    /// Without `block` the result is the radio's answer to the leave request.
    /// With `block` the call waits until the link is no longer connected and
    /// then succeeds, whatever the radio answered to the request.
    pub async fn disconnect(&mut self, block: bool) -> Result<(), WifiError<R::Error>> {
        self.require_initialized()?;
        let status = self.status();
        if status != LinkStatus::Connected {
            debug!("wifi: cannot disconnect while {}", status);
            return Err(WifiError::InvalidState(status));
        }

        let leave = self.radio.leave_network();
        if !block {
            return leave.map_err(WifiError::Rejected);
        }

        if leave.is_err() {
            warn!("wifi: leave request rejected, waiting for link to drop anyway");
        }
        while self.status() == LinkStatus::Connected {
            self.delay.delay_ms(self.poll.disconnect_interval_ms).await;
        }
        info!("wifi: disconnected");
        Ok(())
    }

    /// Local IPv4 address, or [`IpAddress::UNSPECIFIED`] while offline or
    /// not initialized.
    pub fn local_address(&mut self) -> IpAddress {
        match self.status() {
            LinkStatus::NotInitialized | LinkStatus::Offline => IpAddress::UNSPECIFIED,
            _ => IpAddress::from_packed(self.radio.interface_address()),
        }
    }

    /// Scans for nearby networks and waits for the scan to finish.
    ///
    /// The chip cannot scan while associated, so this fails while
    /// [`LinkStatus::Connected`]. Access points reported more than once are
    /// filtered out, see [`scanner::remove_duplicates`].
    pub async fn scan(&mut self) -> Result<Vec<ScanRecord>, WifiError<R::Error>> {
        self.scan_with(&ScanOptions::default()).await
    }

    /// [`WifiManager::scan`] with explicit scan options.
    pub async fn scan_with(
        &mut self,
        options: &ScanOptions<'_>,
    ) -> Result<Vec<ScanRecord>, WifiError<R::Error>> {
        self.require_initialized()?;
        let status = self.status();
        if status == LinkStatus::Connected {
            debug!("wifi: cannot scan while connected");
            return Err(WifiError::InvalidState(status));
        }

        self.scan_results.clear();
        if let Err(e) = self.radio.start_scan(options) {
            warn!("wifi: scan request rejected");
            return Err(WifiError::Rejected(e));
        }

        loop {
            let results = &mut self.scan_results;
            let active = self
                .radio
                .poll_scan(&mut |record: &ScanRecord| results.push(record.clone()));
            if !active {
                break;
            }
            self.delay.delay_ms(self.poll.scan_interval_ms).await;
        }

        let reports = self.scan_results.len();
        self.scan_results = scanner::remove_duplicates(&self.scan_results);
        debug!(
            "wifi: scan done, {} networks from {} reports",
            self.scan_results.len(),
            reports
        );
        Ok(self.scan_results.clone())
    }

    /// Results of the most recent successful scan.
    pub fn last_scan(&self) -> &[ScanRecord] {
        &self.scan_results
    }

    /// Sets the board indicator output. Ignored while not initialized.
    pub fn set_indicator(&mut self, on: bool) {
        if !self.initialized {
            debug!("wifi: indicator ignored, not initialized");
            return;
        }
        self.radio.set_indicator(on);
    }

    /// Formats a MAC/BSSID address as `AB:CD:EF:01:02:03`.
    pub fn mac_to_string(bssid: &[u8; 6]) -> String {
        scanner::mac_to_string(bssid)
    }

    /// Poll intervals in use.
    pub fn poll_config(&self) -> PollConfig {
        self.poll
    }

    /// The wrapped radio.
    pub fn radio(&self) -> &R {
        &self.radio
    }

    /// The wrapped radio, mutably. Requests issued through it bypass the
    /// manager's state checks.
    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    /// Gives back the radio and the delay.
    pub fn release(self) -> (R, D) {
        (self.radio, self.delay)
    }

    fn require_initialized(&self) -> Result<(), WifiError<R::Error>> {
        if self.initialized {
            Ok(())
        } else {
            Err(WifiError::NotInitialized)
        }
    }
}
