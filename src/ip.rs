use core::fmt;
use core::net::Ipv4Addr;

/// An IPv4 address, kept in display order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IpAddress([u8; 4]);

impl IpAddress {
    /// `0.0.0.0`, returned when no address is assigned.
    pub const UNSPECIFIED: Self = Self([0; 4]);

    /// Builds an address from its four octets, first octet first.
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self([a, b, c, d])
    }

    /// Builds an address from the packed form handed out by the radio.
    ///
    /// The packed value holds the address in network order in memory on a
    /// little-endian core, so its least significant byte is the first octet.
    pub const fn from_packed(packed: u32) -> Self {
        Self(packed.to_le_bytes())
    }

    /// Inverse of [`IpAddress::from_packed`].
    pub const fn to_packed(self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    /// The four octets, first octet first.
    pub const fn octets(self) -> [u8; 4] {
        self.0
    }

    /// Whether this is the `0.0.0.0` sentinel.
    pub const fn is_unspecified(self) -> bool {
        matches!(self.0, [0, 0, 0, 0])
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IpAddress {
    fn format(&self, fmt: defmt::Formatter<'_>) {
        let [a, b, c, d] = self.0;
        defmt::write!(fmt, "{}.{}.{}.{}", a, b, c, d);
    }
}

impl From<[u8; 4]> for IpAddress {
    fn from(octets: [u8; 4]) -> Self {
        Self(octets)
    }
}

impl From<Ipv4Addr> for IpAddress {
    fn from(addr: Ipv4Addr) -> Self {
        Self(addr.octets())
    }
}

impl From<IpAddress> for Ipv4Addr {
    fn from(addr: IpAddress) -> Self {
        Ipv4Addr::from(addr.0)
    }
}
