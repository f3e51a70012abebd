use super::{FrameControl, MacAddress, SequenceControl};
use crate::traits::Addresses;

/// Representation of a management frame header. This format is used by all management frames!
///
/// **Bytes 0-1** frame control, see [FrameControl]. \
/// **Bytes 2-3** duration. Crafted frames always carry 0. \
/// **Bytes 4-9** Address 1, the receiver. \
/// **Bytes 10-15** Address 2, the transmitter. \
/// **Bytes 16-21** Address 3, the BSSID. \
/// **Bytes 22-23** sequence control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManagementHeader {
    pub frame_control: FrameControl,
    pub duration: [u8; 2],
    pub address_1: MacAddress,
    pub address_2: MacAddress,
    pub address_3: MacAddress,
    pub sequence_control: SequenceControl,
}

impl ManagementHeader {
    /// Encoded size of a management header.
    pub const LEN: usize = 24;

    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::LEN);

        bytes.extend_from_slice(&self.frame_control.encode());
        bytes.extend_from_slice(&self.duration);
        bytes.extend_from_slice(&self.address_1.encode());
        bytes.extend_from_slice(&self.address_2.encode());
        bytes.extend_from_slice(&self.address_3.encode());
        bytes.extend_from_slice(&self.sequence_control.encode());

        bytes
    }
}

/// Management frames never travel through the distribution system, so the
/// address roles are fixed: receiver, transmitter, BSSID.
impl Addresses for ManagementHeader {
    fn src(&self) -> Option<&MacAddress> {
        Some(&self.address_2)
    }

    fn dest(&self) -> &MacAddress {
        &self.address_1
    }

    fn bssid(&self) -> Option<&MacAddress> {
        Some(&self.address_3)
    }
}
