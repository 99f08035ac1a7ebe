//! Static storage for the radio backend.
//!
//! The radio controller and the network stack resources are borrowed for
//! `'static` by the WiFi controller and the embassy-net runner task.

use embassy_net::StackResources;
use static_cell::StaticCell;

/// Sockets available to the application on top of DHCP.
const MAX_SOCKETS: usize = 3;

/// Static storage for radio initialization controller.
pub(super) static RADIO_INIT: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();

/// Static storage for the station interface's network stack.
pub(super) static STACK_RESOURCES: StaticCell<StackResources<MAX_SOCKETS>> = StaticCell::new();
