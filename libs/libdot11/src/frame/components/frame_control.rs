use crate::frame_types::*;

/// The very first two bytes of every frame contain the FrameControl header.
///
/// First byte:
///
/// - **bit_0-1**: Protocol version. Always 0.
/// - **bit_2-3**: [FrameType]
/// - **bit_4-7**: [FrameSubType]
///
/// Second byte (Flags):
/// - **bit_0** `to_ds`
/// - **bit_1** `from_ds`
/// - **bit_2** `more_frag`
/// - **bit_3** `retry`
/// - **bit_4** `power_mgmt`
/// - **bit_5** `more_data`
/// - **bit_6** `protected`
/// - **bit_7** `order`
///
/// A beacon therefore starts with `0x80 0x00`, a deauthentication with `0xC0 0x00`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameControl {
    pub protocol_version: u8,
    pub frame_type: FrameType,
    pub frame_subtype: FrameSubType,
    pub flags: u8,
}

impl FrameControl {
    pub fn encode(&self) -> [u8; 2] {
        let protocol_version_bits = self.protocol_version & 0b11;
        let frame_type_bits = (self.frame_type.to_bits() & 0b11) << 2;
        let frame_subtype_bits = (self.frame_subtype.to_bytes() & 0b1111) << 4;

        let first_byte = frame_subtype_bits | frame_type_bits | protocol_version_bits;

        [first_byte, self.flags]
    }
}
