use std::fmt;

use rand::Rng;

/// This is our representation of a MAC-address
///
/// ```
/// use libdot11::frame::components::MacAddress;
///
/// let address = MacAddress([255, 255, 255, 255, 255, 255]);
/// println!("{}", address.is_broadcast());
/// // -> true
/// ```
///
#[derive(Clone, Debug, Eq, PartialEq, Copy, Ord, PartialOrd, Hash)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    pub fn from_slice(slice: &[u8]) -> Option<MacAddress> {
        let bytes: [u8; 6] = slice.try_into().ok()?;
        Some(MacAddress(bytes))
    }

    pub fn broadcast() -> Self {
        MacAddress([255, 255, 255, 255, 255, 255])
    }

    pub fn zeroed() -> Self {
        MacAddress([0, 0, 0, 0, 0, 0])
    }

    /// Vendor prefix, the first three bytes.
    pub fn oui(&self) -> [u8; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }

    /// Take the given vendor prefix and fill the device part with random bytes.
    pub fn random_with_oui<R: Rng>(oui: [u8; 3], rng: &mut R) -> Self {
        let mut mac = [0u8; 6];
        mac[..3].copy_from_slice(&oui);
        rng.fill(&mut mac[3..]);
        MacAddress(mac)
    }

    /// Encode mac address for network.
    pub fn encode(&self) -> [u8; 6] {
        self.0
    }

    /// Check if this is a multicast address
    pub fn is_mcast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }

    /// Check whether this MAC addresses the whole network.
    pub fn is_broadcast(&self) -> bool {
        self.0 == [255, 255, 255, 255, 255, 255]
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; 6]
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5],
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MacParseError {
    InvalidDigit,
    InvalidLength,
}

impl fmt::Display for MacParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacParseError::InvalidDigit => write!(f, "invalid hex digit in mac address"),
            MacParseError::InvalidLength => {
                write!(f, "mac address must have six octets (AA:BB:CC:DD:EE:FF)")
            }
        }
    }
}

impl std::error::Error for MacParseError {}

impl std::str::FromStr for MacAddress {
    type Err = MacParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut array = [0u8; 6];

        let input_lower = input.trim().to_lowercase();
        // Colons, dashes or twelve bare hex digits.
        let bytes: Vec<&str> = if input_lower.contains(':') {
            input_lower.split(':').collect()
        } else if input_lower.contains('-') {
            input_lower.split('-').collect()
        } else if input_lower.len() == 12 && input_lower.is_ascii() {
            (0..12).step_by(2).map(|i| &input_lower[i..i + 2]).collect()
        } else {
            return Err(MacParseError::InvalidLength);
        };

        if bytes.len() != 6 {
            return Err(MacParseError::InvalidLength);
        }

        for (count, byte) in bytes.iter().enumerate() {
            if byte.is_empty() || byte.len() > 2 {
                return Err(MacParseError::InvalidDigit);
            }
            array[count] = u8::from_str_radix(byte, 16).map_err(|_| MacParseError::InvalidDigit)?;
        }

        Ok(MacAddress(array))
    }
}
