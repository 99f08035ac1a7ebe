#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_time::{Delay, Duration, Timer};
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;
use esp_println::println;
use panic_rtt_target as _;
use wifi_station::esp::{self, EspRadio};
use wifi_station::{LinkStatus, WifiConfig, WifiManager};

// WiFi credentials, taken from the build environment
const SSID: &str = env!("SSID");
const PASSWORD: &str = env!("PASSWORD");

const WIFI_TIMEOUT_MS: u32 = 15_000;

type Wifi = WifiManager<EspRadio, Delay>;

esp_bootloader_esp_idf::esp_app_desc!();

fn report(wifi: &mut Wifi) {
    println!("WiFi: Link status - {}", wifi.status_description());
    println!("WiFi: Local IP - {}", wifi.local_address());
}

async fn list_networks(wifi: &mut Wifi) {
    println!("Starting Wi-Fi scan...");
    match wifi.scan().await {
        Ok(networks) => {
            println!("Found {} networks:", networks.len());
            for (i, ap) in networks.iter().enumerate() {
                let ssid = match ap.ssid_str() {
                    Some("") | None => "<hidden>",
                    Some(ssid) => ssid,
                };
                println!(
                    "  {}: SSID: {}, BSSID: {}, Channel: {}, RSSI: {}",
                    i + 1,
                    ssid,
                    ap.bssid,
                    ap.channel,
                    ap.rssi
                );
            }
        }
        Err(e) => println!("WiFi scan failed: {}", e),
    }
}

async fn run(wifi: &mut Wifi) {
    if let Err(e) = wifi.initialize() {
        println!("WiFi failed to initialize! ({})", e);
        return;
    }
    println!("WiFi initialized successfully!");
    report(wifi);

    list_networks(wifi).await;

    println!("Attempting to connect...");
    let config = WifiConfig::new(SSID, PASSWORD).with_timeout_ms(WIFI_TIMEOUT_MS);
    if let Err(e) = wifi.connect_with(&config).await {
        println!("Connection attempt failed! - {} ({})", wifi.status_description(), e);
        return;
    }
    println!("WiFi Connected!");
    wifi.set_indicator(true);
    report(wifi);

    println!("Sleeping...");
    Timer::after(Duration::from_millis(2000)).await;
    if wifi.status() != LinkStatus::Connected {
        println!("Connection lost ({})!", wifi.status_description());
        return;
    }
    println!("WiFi still connected!");
    report(wifi);

    println!("Disconnecting...");
    if let Err(e) = wifi.disconnect(true).await {
        println!("Failed to disconnect! ({})", e);
        return;
    }
    println!("WiFi Disconnected!");
    wifi.set_indicator(false);
    report(wifi);
}

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    rtt_target::rtt_init_defmt!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp::init_heap();
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    println!("Embassy initialized!");

    let led = Output::new(peripherals.GPIO2, Level::Low, OutputConfig::default());
    let rng = Rng::new();
    let seed = u64::from(rng.random()) << 32 | u64::from(rng.random());

    match esp::init_radio(peripherals.WIFI, led, seed) {
        Ok((radio, runner)) => {
            if let Err(e) = spawner.spawn(esp::net_task(runner)) {
                println!("Failed to spawn network task: {}", e);
            } else {
                let mut wifi = WifiManager::new(radio, Delay);
                run(&mut wifi).await;
                wifi.shutdown();
                println!("Done. Bye!");
            }
        }
        Err(e) => println!("Radio setup failed: {}", e),
    }

    loop {
        Timer::after(Duration::from_secs(1)).await;
    }
}
