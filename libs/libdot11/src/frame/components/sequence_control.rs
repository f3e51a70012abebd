#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceControl {
    /// The 4 bit fragment number from a sequence control field.
    pub fragment_number: u8,
    /// The 12 bit sequence number from a sequence control field.
    pub sequence_number: u16,
}

impl SequenceControl {
    /// Fragment number in the low nibble, sequence number above it, little endian.
    pub fn encode(&self) -> [u8; 2] {
        let value = (self.sequence_number << 4) | (self.fragment_number as u16 & 0x0F);
        value.to_le_bytes()
    }
}
