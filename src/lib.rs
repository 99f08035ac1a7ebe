//! Station-mode WiFi manager
//!
//! This library wraps a vendor WiFi radio driver behind the [`RadioLink`] trait
//! and layers a small connection lifecycle on top of it: chip bring-up,
//! station-mode association, link-status polling, scanning and disconnecting.
//!
//! ## Features
//!
//! - Polling connect/disconnect/scan with fixed intervals and a connect timeout
//! - Scan results deduplicated by BSSID
//! - Hardware independent core, testable on the host with a stub radio
//! - ESP32 backend built on `esp-radio` and `embassy-net` (`esp32` feature)
//!
//! ## Example
//!
//! ```no_run
//! # async fn demo<R: wifi_station::RadioLink, D: embedded_hal_async::delay::DelayNs>(radio: R, delay: D) {
//! use wifi_station::{AuthMode, WifiManager};
//!
//! let mut wifi = WifiManager::new(radio, delay);
//! if wifi.initialize().is_ok()
//!     && wifi.connect("my-network", "secret", AuthMode::Wpa2, 15_000).await.is_ok()
//! {
//!     // wifi.local_address() now holds the DHCP lease
//! }
//! wifi.shutdown();
//! # }
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

/// Poll intervals and connection credentials
pub mod config;

/// Error type returned by the manager
pub mod error;

/// IPv4 address value type
pub mod ip;

/// Connection lifecycle over a [`RadioLink`]
pub mod manager;

/// Radio driver capability trait
pub mod radio;

/// Scan records and BSSID deduplication
pub mod scanner;

/// Link status codes and descriptions
pub mod status;

/// ESP32 radio backend
#[cfg(feature = "esp32")]
pub mod esp;

pub use config::{PollConfig, WifiConfig};
pub use error::WifiError;
pub use ip::IpAddress;
pub use manager::WifiManager;
pub use radio::{AuthMode, RadioLink, ScanOptions};
pub use scanner::{MacAddress, ScanRecord, remove_duplicates};
pub use status::LinkStatus;
