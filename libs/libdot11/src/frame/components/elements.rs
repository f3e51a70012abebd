use crate::error::Error;

/// SSIDs are at most 32 octets on the wire.
pub const MAX_SSID_LEN: usize = 32;

/// The element length field is a single byte.
pub const MAX_ELEMENT_LEN: usize = 255;

/// Information element identifiers used by crafted beacons.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ElementId {
    Ssid = 0,
    SupportedRates = 1,
    DsParameterSet = 3,
}

/// A single entry of the Supported Rates element.
///
/// On the wire a rate is stored in units of 500 kbit/s, the high bit marks it
/// as part of the basic rate set.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SupportedRate {
    pub mandatory: bool,
    pub rate: f32,
}

impl SupportedRate {
    pub fn encode(&self) -> u8 {
        let units = (self.rate * 2.0).round() as u8 & 0x7F;
        if self.mandatory {
            units | 0x80
        } else {
            units
        }
    }

    pub fn decode(byte: u8) -> Self {
        SupportedRate {
            mandatory: byte & 0x80 != 0,
            rate: (byte & 0x7F) as f32 / 2.0,
        }
    }
}

/// Appends `[id][len][payload]` triplets to a growable buffer.
///
/// Every push checks the payload against the one byte length field, so element
/// offsets can never be corrupted by an oversized payload.
#[derive(Debug, Default)]
pub struct ElementWriter {
    bytes: Vec<u8>,
}

impl ElementWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: u8, payload: &[u8]) -> Result<&mut Self, Error> {
        if payload.len() > MAX_ELEMENT_LEN {
            return Err(Error::ElementTooLong {
                id,
                len: payload.len(),
            });
        }

        self.bytes.push(id);
        self.bytes.push(payload.len() as u8);
        self.bytes.extend_from_slice(payload);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// The tagged parameters that follow the fixed beacon fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BeaconElements {
    pub ssid: Option<String>,
    pub supported_rates: Vec<SupportedRate>,
    pub ds_parameter_set: Option<u8>,
    /// Elements we don't interpret, kept as `(id, payload)`.
    pub other: Vec<(u8, Vec<u8>)>,
}

impl BeaconElements {
    /// Encode in the fixed order SSID, Supported Rates, DS Parameter Set,
    /// followed by any uninterpreted elements.
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        let mut writer = ElementWriter::new();

        if let Some(ssid) = &self.ssid {
            if ssid.len() > MAX_SSID_LEN {
                return Err(Error::SsidTooLong {
                    len: ssid.len(),
                    max: MAX_SSID_LEN,
                });
            }
            writer.push(ElementId::Ssid as u8, ssid.as_bytes())?;
        }

        if !self.supported_rates.is_empty() {
            let rates: Vec<u8> = self.supported_rates.iter().map(|r| r.encode()).collect();
            writer.push(ElementId::SupportedRates as u8, &rates)?;
        }

        if let Some(channel) = self.ds_parameter_set {
            writer.push(ElementId::DsParameterSet as u8, &[channel])?;
        }

        for (id, payload) in &self.other {
            writer.push(*id, payload)?;
        }

        Ok(writer.into_bytes())
    }
}
