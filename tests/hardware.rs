//! On-target checks of the ESP32 backend.
//! Needs a board but no access point: only the offline lifecycle and a scan
//! are exercised.

#![no_std]
#![no_main]

#[cfg(test)]
#[embedded_test::tests(executor = esp_rtos::embassy::Executor::new())]
mod tests {
    use embassy_time::Delay;
    use esp_hal::gpio::{Level, Output, OutputConfig};
    use wifi_station::esp::{self, EspRadio};
    use wifi_station::{IpAddress, LinkStatus, WifiError, WifiManager};

    type Wifi = WifiManager<EspRadio, Delay>;

    #[init]
    fn init() -> Wifi {
        let peripherals = esp_hal::init(esp_hal::Config::default());
        esp::init_heap();
        let timg0 = esp_hal::timer::timg::TimerGroup::new(peripherals.TIMG0);
        esp_rtos::start(timg0.timer0);

        let led = Output::new(peripherals.GPIO2, Level::Low, OutputConfig::default());
        let (radio, _runner) = esp::init_radio(peripherals.WIFI, led, 0x5EED).unwrap();
        WifiManager::new(radio, Delay)
    }

    #[test]
    fn lifecycle_while_offline(mut wifi: Wifi) {
        assert_eq!(wifi.status(), LinkStatus::NotInitialized);

        wifi.initialize().unwrap();
        assert_eq!(wifi.status(), LinkStatus::Offline);
        assert_eq!(wifi.local_address(), IpAddress::UNSPECIFIED);
        wifi.set_indicator(true);

        wifi.shutdown();
        assert_eq!(wifi.status(), LinkStatus::NotInitialized);
    }

    #[test]
    async fn disconnect_needs_a_link(mut wifi: Wifi) {
        wifi.initialize().unwrap();
        assert!(matches!(
            wifi.disconnect(false).await,
            Err(WifiError::InvalidState(LinkStatus::Offline))
        ));
    }

    #[test]
    async fn scan_completes(mut wifi: Wifi) {
        wifi.initialize().unwrap();
        let networks = wifi.scan().await.unwrap();
        assert_eq!(wifi.last_scan(), networks.as_slice());
    }
}
