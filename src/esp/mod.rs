//! ESP32 radio backend.
//!
//! [`EspRadio`] implements [`RadioLink`] with the on-chip radio driven through
//! `esp-radio`, an `embassy-net` stack for the DHCP lease, and a GPIO output as
//! the board indicator.
//!
//! ## Example
//!
//! ```no_run
//! # async fn demo(spawner: embassy_executor::Spawner, p: esp_hal::peripherals::Peripherals) {
//! use esp_hal::gpio::{Level, Output, OutputConfig};
//! use wifi_station::{WifiManager, esp};
//!
//! esp::init_heap();
//! let led = Output::new(p.GPIO2, Level::Low, OutputConfig::default());
//! let (radio, runner) = esp::init_radio(p.WIFI, led, 0x1234).unwrap();
//! spawner.spawn(esp::net_task(runner)).unwrap();
//!
//! let mut wifi = WifiManager::new(radio, embassy_time::Delay);
//! # }
//! ```

mod types;

use alloc::vec::Vec;
use core::fmt;

use embassy_net::{Runner, Stack, StackResources};
use esp_hal::gpio::Output;
use esp_hal::peripherals::WIFI;
use esp_println::println;
use esp_radio::wifi::{
    AccessPointInfo,
    AuthMethod,
    ClientConfig,
    ModeConfig,
    ScanConfig,
    WifiController,
    WifiDevice,
    WifiError,
    WifiMode,
    WifiStaState,
};

use crate::radio::{AuthMode, RadioLink, ScanOptions};
use crate::scanner::ScanRecord;
use crate::status::{LINK_DOWN, LINK_JOIN, LINK_NOIP, LINK_UP};
use types::{RADIO_INIT, STACK_RESOURCES};

/// Reclaimed RAM heap size (from bootloader sections)
const RECLAIMED_HEAP_SIZE: usize = 98768;

/// Main heap size, holds radio buffers and scan results
const MAIN_HEAP_SIZE: usize = 64 * 1024;

/// Raw status reported for station states with no link-status equivalent.
const STATE_UNMAPPED: i32 = i32::MIN;

/// Sets up the heap used by `esp-radio` and the scan buffers.
///
/// Must run once, before [`init_radio`].
pub fn init_heap() {
    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: RECLAIMED_HEAP_SIZE);
    esp_alloc::heap_allocator!(size: MAIN_HEAP_SIZE);
}

/// Failure while bringing up the radio backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// `esp_radio::init` failed.
    Radio,
    /// The WiFi controller could not be created.
    Controller,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::Radio => write!(f, "radio initialization failed"),
            InitError::Controller => write!(f, "WiFi controller creation failed"),
        }
    }
}

/// Brings up the radio controller and a DHCP network stack on the station
/// interface.
///
/// The returned runner drives the network stack and must be spawned, see
/// [`net_task`]. Can only be called once per boot.
pub fn init_radio(
    device: WIFI<'static>,
    indicator: Output<'static>,
    seed: u64,
) -> Result<(EspRadio, Runner<'static, WifiDevice<'static>>), InitError> {
    let radio_init = esp_radio::init().map_err(|e| {
        println!("Failed to initialize radio: {:?}", e);
        InitError::Radio
    })?;
    let radio_init = RADIO_INIT.init(radio_init);

    let (controller, interfaces) = esp_radio::wifi::new(radio_init, device, Default::default())
        .map_err(|e| {
            println!("Failed to create WiFi controller: {}", e);
            InitError::Controller
        })?;

    let net_config = embassy_net::Config::dhcpv4(Default::default());
    let resources = STACK_RESOURCES.init(StackResources::new());
    let (stack, runner) = embassy_net::new(interfaces.sta, net_config, resources, seed);

    Ok((EspRadio::new(controller, stack, indicator), runner))
}

/// Embassy task running the network stack.
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await
}

/// [`RadioLink`] over the ESP32 radio.
pub struct EspRadio {
    controller: WifiController<'static>,
    stack: Stack<'static>,
    indicator: Output<'static>,
    found: Vec<ScanRecord>,
}

impl EspRadio {
    /// Wraps an already created controller and network stack.
    pub fn new(
        controller: WifiController<'static>,
        stack: Stack<'static>,
        indicator: Output<'static>,
    ) -> Self {
        Self {
            controller,
            stack,
            indicator,
            found: Vec::new(),
        }
    }

    /// Network stack bound to the station interface.
    pub fn stack(&self) -> Stack<'static> {
        self.stack
    }
}

impl RadioLink for EspRadio {
    type Error = WifiError;

    fn chip_init(&mut self) -> Result<(), WifiError> {
        self.controller
            .set_config(&ModeConfig::Client(ClientConfig::default()))?;
        self.controller.start()
    }

    fn chip_deinit(&mut self) {
        if let Err(e) = self.controller.stop() {
            println!("Failed to stop WiFi controller: {}", e);
        }
        self.found.clear();
        self.indicator.set_low();
    }

    fn enable_station_mode(&mut self) -> Result<(), WifiError> {
        self.controller.set_mode(WifiMode::Sta)
    }

    fn link_status(&mut self) -> i32 {
        match esp_radio::wifi::sta_state() {
            WifiStaState::Connected => {
                if self.stack.config_v4().is_some() {
                    LINK_UP
                } else if self.stack.is_link_up() {
                    LINK_NOIP
                } else {
                    LINK_JOIN
                }
            }
            WifiStaState::Started | WifiStaState::Disconnected => LINK_DOWN,
            _ => STATE_UNMAPPED,
        }
    }

    fn begin_connect(
        &mut self,
        ssid: &str,
        passphrase: &str,
        auth: AuthMode,
    ) -> Result<(), WifiError> {
        let client_config = ClientConfig::default()
            .with_ssid(ssid.into())
            .with_password(passphrase.into())
            .with_auth_method(auth_method(auth));
        self.controller
            .set_config(&ModeConfig::Client(client_config))?;
        self.controller.connect()
    }

    fn leave_network(&mut self) -> Result<(), WifiError> {
        self.controller.disconnect()
    }

    fn start_scan(&mut self, options: &ScanOptions<'_>) -> Result<(), WifiError> {
        let mut scan_config = ScanConfig::default().with_show_hidden(options.show_hidden);
        if let Some(ssid) = options.ssid {
            scan_config = scan_config.with_ssid(ssid);
        }
        if let Some(channel) = options.channel {
            scan_config = scan_config.with_channel(channel);
        }

        // esp-radio only hands out complete results, so the scan runs to the
        // end here and the records are delivered on the next poll.
        let access_points = self.controller.scan_with_config_sync(scan_config)?;
        self.found = access_points.iter().map(scan_record).collect();
        Ok(())
    }

    fn poll_scan(&mut self, on_result: &mut dyn FnMut(&ScanRecord)) -> bool {
        for record in self.found.drain(..) {
            on_result(&record);
        }
        false
    }

    fn interface_address(&mut self) -> u32 {
        self.stack
            .config_v4()
            .map_or(0, |config| u32::from_le_bytes(config.address.address().octets()))
    }

    fn set_indicator(&mut self, on: bool) {
        if on {
            self.indicator.set_high();
        } else {
            self.indicator.set_low();
        }
    }

    fn uptime_ms(&mut self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }
}

fn auth_method(auth: AuthMode) -> AuthMethod {
    match auth {
        AuthMode::Open => AuthMethod::None,
        AuthMode::Wpa => AuthMethod::Wpa,
        AuthMode::Wpa2 => AuthMethod::Wpa2Personal,
        AuthMode::WpaWpa2Mixed => AuthMethod::WpaWpa2Personal,
    }
}

/// ESP-IDF `wifi_auth_mode_t` value of an access point's auth method.
fn security_code(auth: Option<AuthMethod>) -> u8 {
    match auth {
        Some(AuthMethod::None) => 0,
        Some(AuthMethod::Wep) => 1,
        Some(AuthMethod::Wpa) => 2,
        Some(AuthMethod::Wpa2Personal) => 3,
        Some(AuthMethod::WpaWpa2Personal) => 4,
        Some(AuthMethod::Wpa2Enterprise) => 5,
        Some(AuthMethod::Wpa3Personal) => 6,
        Some(AuthMethod::Wpa2Wpa3Personal) => 7,
        Some(AuthMethod::WapiPersonal) => 8,
        _ => u8::MAX,
    }
}

fn scan_record(ap: &AccessPointInfo) -> ScanRecord {
    ScanRecord::new(ap.ssid.as_bytes(), ap.bssid)
        .with_channel(u16::from(ap.channel))
        .with_rssi(i16::from(ap.signal_strength))
        .with_security(security_code(ap.auth_method))
}
