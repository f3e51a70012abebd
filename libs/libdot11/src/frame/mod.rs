use byteorder::{ByteOrder, LittleEndian};
use enum_dispatch::enum_dispatch;

/// Contains structs representing recurring sets of structured data.
/// For instance, MAC-Addresses, headers, information elements.
pub mod components;

/// Management frame structs
mod management;

pub use management::*;

use crate::error::Error;
use components::{
    BeaconElements, FrameControl, MacAddress, ManagementHeader, SequenceControl, SupportedRate,
};

/// Upper bound for any frame this crate produces, preamble included.
pub const MAX_FRAME_LEN: usize = 2048;

/// Length of the radiotap preamble we prepend to every injected frame.
pub const RADIOTAP_LEN: usize = 8;

/// Capability information announcing an ESS with privacy enabled.
pub const DEFAULT_CAPABILITY_INFO: u16 = 0x1111;

/// Beacon interval in time units (1 TU = 1024 µs).
pub const DEFAULT_BEACON_INTERVAL: u16 = 100;

/// Rates advertised by crafted beacons: 1, 2, 5.5 and 11 Mbit/s as basic rates,
/// 6, 9, 12 and 18 Mbit/s as optional ones.
pub const BEACON_RATES: [SupportedRate; 8] = [
    SupportedRate {
        rate: 1.0,
        mandatory: true,
    },
    SupportedRate {
        rate: 2.0,
        mandatory: true,
    },
    SupportedRate {
        rate: 5.5,
        mandatory: true,
    },
    SupportedRate {
        rate: 11.0,
        mandatory: true,
    },
    SupportedRate {
        rate: 6.0,
        mandatory: false,
    },
    SupportedRate {
        rate: 9.0,
        mandatory: false,
    },
    SupportedRate {
        rate: 12.0,
        mandatory: false,
    },
    SupportedRate {
        rate: 18.0,
        mandatory: false,
    },
];

#[enum_dispatch(Addresses)]
#[derive(Clone, Debug)]
/// The frames this crate knows how to craft and read back.
pub enum Frame {
    Beacon(Beacon),
    Deauthentication(Deauthentication),
}

/// Which side of the association a deauthentication frame pretends to come from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// AP tells the client to leave.
    FromAp,
    /// Client tells the AP it is leaving.
    FromClient,
}

/// Everything needed to craft one beacon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BeaconSpec {
    pub ssid: String,
    pub bssid: MacAddress,
    pub channel: u8,
    pub beacon_interval: u16,
    pub capability_info: u16,
}

/// Everything needed to craft one deauthentication frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeauthSpec {
    pub bssid: MacAddress,
    /// The station being kicked. Broadcast targets every station of the BSS.
    pub client: MacAddress,
    pub direction: Direction,
    pub reason: DeauthenticationReason,
}

/// Immutable per-send template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameSpec {
    Beacon(BeaconSpec),
    Deauthentication(DeauthSpec),
}

impl FrameSpec {
    /// Build the management header for this template.
    ///
    /// Address order on the wire is destination, source, BSSID.
    pub fn header(&self) -> ManagementHeader {
        let (frame_subtype, destination, source, bssid) = match self {
            FrameSpec::Beacon(beacon) => (
                crate::FrameSubType::Beacon,
                MacAddress::broadcast(),
                beacon.bssid,
                beacon.bssid,
            ),
            FrameSpec::Deauthentication(deauth) => match deauth.direction {
                Direction::FromAp => (
                    crate::FrameSubType::Deauthentication,
                    deauth.client,
                    deauth.bssid,
                    deauth.bssid,
                ),
                Direction::FromClient => (
                    crate::FrameSubType::Deauthentication,
                    deauth.bssid,
                    deauth.client,
                    deauth.bssid,
                ),
            },
        };

        ManagementHeader {
            frame_control: FrameControl {
                protocol_version: 0,
                frame_type: crate::FrameType::Management,
                frame_subtype,
                flags: 0u8,
            },
            duration: [0u8; 2],
            address_1: destination,
            address_2: source,
            address_3: bssid,
            sequence_control: SequenceControl {
                fragment_number: 0u8,
                sequence_number: 0u16,
            },
        }
    }

    /// Turn the template into the frame struct it describes.
    pub fn to_frame(&self) -> Frame {
        let header = self.header();
        match self {
            FrameSpec::Beacon(beacon) => Frame::Beacon(Beacon {
                header,
                timestamp: 0,
                beacon_interval: beacon.beacon_interval,
                capability_info: beacon.capability_info,
                elements: BeaconElements {
                    ssid: Some(beacon.ssid.clone()),
                    supported_rates: BEACON_RATES.to_vec(),
                    ds_parameter_set: Some(beacon.channel),
                    other: Vec::new(),
                },
            }),
            FrameSpec::Deauthentication(deauth) => Frame::Deauthentication(Deauthentication {
                header,
                reason_code: deauth.reason,
            }),
        }
    }
}

/// A frame ready for injection: `[preamble][MAC header][body][elements]`.
///
/// Section lengths are kept next to the bytes so callers can check the layout
/// without decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedFrame {
    bytes: Vec<u8>,
    preamble_len: usize,
    header_len: usize,
    body_len: usize,
    elements_len: usize,
}

impl EncodedFrame {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn preamble_len(&self) -> usize {
        self.preamble_len
    }

    pub fn header_len(&self) -> usize {
        self.header_len
    }

    pub fn body_len(&self) -> usize {
        self.body_len
    }

    pub fn elements_len(&self) -> usize {
        self.elements_len
    }

    /// The 802.11 part of the frame, without the radiotap preamble.
    pub fn mpdu(&self) -> &[u8] {
        &self.bytes[self.preamble_len..]
    }
}

impl AsRef<[u8]> for EncodedFrame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Radiotap preamble: version 0, no padding, no optional fields.
/// The length field declares the preamble's own size.
pub fn radiotap_preamble() -> [u8; RADIOTAP_LEN] {
    let mut rth = [0u8; RADIOTAP_LEN];
    LittleEndian::write_u16(&mut rth[2..4], RADIOTAP_LEN as u16);
    LittleEndian::write_u32(&mut rth[4..8], 0);
    rth
}

/// Encode a frame template into the bytes handed to the injector.
///
/// Pure and deterministic. Fails only on templates that cannot be represented
/// on the wire, e.g. an SSID longer than 32 bytes.
pub fn encode(spec: &FrameSpec) -> Result<EncodedFrame, Error> {
    let preamble = radiotap_preamble();
    let header = spec.header().encode();

    let (body, elements) = match spec.to_frame() {
        Frame::Beacon(beacon) => (beacon.encode_fixed(), beacon.elements.encode()?),
        Frame::Deauthentication(deauth) => (deauth.encode_body(), Vec::new()),
    };

    let len = preamble.len() + header.len() + body.len() + elements.len();
    if len > MAX_FRAME_LEN {
        return Err(Error::FrameTooLong {
            len,
            max: MAX_FRAME_LEN,
        });
    }

    let mut bytes = Vec::with_capacity(len);
    bytes.extend_from_slice(&preamble);
    bytes.extend_from_slice(&header);
    bytes.extend_from_slice(&body);
    bytes.extend_from_slice(&elements);

    Ok(EncodedFrame {
        bytes,
        preamble_len: preamble.len(),
        header_len: header.len(),
        body_len: body.len(),
        elements_len: elements.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beacon_spec(ssid: &str) -> FrameSpec {
        FrameSpec::Beacon(BeaconSpec {
            ssid: ssid.to_string(),
            bssid: MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]),
            channel: 6,
            beacon_interval: DEFAULT_BEACON_INTERVAL,
            capability_info: DEFAULT_CAPABILITY_INFO,
        })
    }

    #[test]
    fn test_preamble_declares_own_length() {
        let rth = radiotap_preamble();
        assert_eq!(rth, [0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_beacon_layout() {
        let frame = encode(&beacon_spec("FakeAP")).unwrap();
        let bytes = frame.as_bytes();

        // Frame control, duration
        assert_eq!(&bytes[8..12], &[0x80, 0x00, 0x00, 0x00]);
        // Broadcast destination, then source and BSSID
        assert_eq!(&bytes[12..18], &[0xFF; 6]);
        assert_eq!(&bytes[18..24], &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!(&bytes[24..30], &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        // Sequence control
        assert_eq!(&bytes[30..32], &[0x00, 0x00]);
        // Timestamp, interval 100 and capability 0x1111, little endian
        assert_eq!(&bytes[32..40], &[0u8; 8]);
        assert_eq!(&bytes[40..42], &[0x64, 0x00]);
        assert_eq!(&bytes[42..44], &[0x11, 0x11]);
        // SSID, rates, DS parameter set
        assert_eq!(&bytes[44..52], &[0x00, 0x06, b'F', b'a', b'k', b'e', b'A', b'P']);
        assert_eq!(
            &bytes[52..62],
            &[0x01, 0x08, 0x82, 0x84, 0x8B, 0x96, 0x0C, 0x12, 0x18, 0x24]
        );
        assert_eq!(&bytes[62..], &[0x03, 0x01, 0x06]);
    }

    #[test]
    fn test_section_lengths_add_up() {
        let frame = encode(&beacon_spec("Guest_0042")).unwrap();
        assert_eq!(frame.preamble_len(), RADIOTAP_LEN);
        assert_eq!(frame.header_len(), 24);
        assert_eq!(frame.body_len(), 12);
        assert_eq!(frame.elements_len(), 2 + 10 + 10 + 3);
        assert_eq!(
            frame.len(),
            frame.preamble_len() + frame.header_len() + frame.body_len() + frame.elements_len()
        );
    }

    #[test]
    fn test_deauth_layout() {
        let spec = FrameSpec::Deauthentication(DeauthSpec {
            bssid: MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]),
            client: MacAddress([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]),
            direction: Direction::FromClient,
            reason: DeauthenticationReason::Class3FrameReceivedFromNonassociatedSTA,
        });
        let frame = encode(&spec).unwrap();
        let bytes = frame.as_bytes();

        assert_eq!(frame.len(), 8 + 24 + 2);
        assert_eq!(&bytes[8..10], &[0xC0, 0x00]);
        assert_eq!(&bytes[12..18], &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!(&bytes[18..24], &[0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
        assert_eq!(&bytes[24..30], &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!(&bytes[32..], &[0x07, 0x00]);
    }

    #[test]
    fn test_ssid_over_limit_is_rejected() {
        let ssid = "x".repeat(33);
        let err = encode(&beacon_spec(&ssid)).unwrap_err();
        assert!(matches!(err, Error::SsidTooLong { len: 33, max: 32 }));
        assert!(err.is_invalid_spec());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let spec = beacon_spec("Hotel_1234");
        assert_eq!(encode(&spec).unwrap(), encode(&spec).unwrap());
    }
}
