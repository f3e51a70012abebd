use crate::error::Error;
use crate::frame::components::*;
use crate::traits::Addresses;

#[derive(Clone, Debug, PartialEq)]
pub struct Beacon {
    pub header: ManagementHeader,
    pub timestamp: u64,
    pub beacon_interval: u16,
    pub capability_info: u16,
    pub elements: BeaconElements,
}

impl Beacon {
    /// Size of timestamp, beacon interval and capability info.
    pub const FIXED_LEN: usize = 12;

    /// The fixed part of the body, little endian.
    pub fn encode_fixed(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::FIXED_LEN);

        bytes.extend_from_slice(&self.timestamp.to_le_bytes());
        bytes.extend_from_slice(&self.beacon_interval.to_le_bytes());
        bytes.extend_from_slice(&self.capability_info.to_le_bytes());

        bytes
    }

    /// Header, fixed fields and information elements.
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = self.header.encode();
        bytes.extend(self.encode_fixed());
        bytes.extend(self.elements.encode()?);
        Ok(bytes)
    }

    /// The SSID the beacon announces, if the element was present.
    pub fn ssid(&self) -> Option<&str> {
        self.elements.ssid.as_deref()
    }

    pub fn channel(&self) -> Option<u8> {
        self.elements.ds_parameter_set
    }
}

impl Addresses for Beacon {
    fn src(&self) -> Option<&MacAddress> {
        self.header.src()
    }

    fn dest(&self) -> &MacAddress {
        self.header.dest()
    }

    fn bssid(&self) -> Option<&MacAddress> {
        self.header.bssid()
    }
}
