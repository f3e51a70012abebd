use libdot11::frame::components::MacAddress;
use libdot11::frame::{
    BeaconSpec, DeauthSpec, DeauthenticationReason, Direction, DEFAULT_BEACON_INTERVAL,
    DEFAULT_CAPABILITY_INFO,
};
use libdot11::{encode, parse_frame, parse_injected_frame, Addresses, Frame, FrameSpec};
use radiotap::Radiotap;

const BSSID: MacAddress = MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
const CLIENT: MacAddress = MacAddress([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);

fn beacon(ssid: &str, channel: u8) -> FrameSpec {
    FrameSpec::Beacon(BeaconSpec {
        ssid: ssid.to_string(),
        bssid: BSSID,
        channel,
        beacon_interval: DEFAULT_BEACON_INTERVAL,
        capability_info: DEFAULT_CAPABILITY_INFO,
    })
}

fn deauth(direction: Direction, client: MacAddress) -> FrameSpec {
    FrameSpec::Deauthentication(DeauthSpec {
        bssid: BSSID,
        client,
        direction,
        reason: DeauthenticationReason::from_code(7),
    })
}

#[test]
fn test_ssid_round_trip_for_every_length() {
    for len in 0..=32 {
        let ssid: String = "abcdefghijklmnopqrstuvwxyz0123456789"
            .chars()
            .take(len)
            .collect();
        let frame = encode(&beacon(&ssid, 11)).expect("SSID within limit");

        match parse_injected_frame(frame.as_bytes()).expect("Crafted frame should parse") {
            Frame::Beacon(beacon) => {
                assert_eq!(beacon.ssid(), Some(ssid.as_str()));
                assert_eq!(beacon.channel(), Some(11));
            }
            other => panic!("Expected a beacon, got {other:?}"),
        }
    }
}

#[test]
fn test_multibyte_ssid_counts_bytes() {
    // 8 characters, 16 bytes.
    let ssid = "ÄÖÜäöüßé";
    let frame = encode(&beacon(ssid, 1)).unwrap();
    let elements = &frame.as_bytes()[frame.len() - frame.elements_len()..];
    assert_eq!(elements[0], 0x00);
    assert_eq!(elements[1] as usize, ssid.len());
    assert_eq!(&elements[2..2 + ssid.len()], ssid.as_bytes());
}

#[test]
fn test_section_lengths_sum_to_total() {
    let specs = [
        beacon("", 1),
        beacon("FakeAP", 6),
        beacon(&"z".repeat(32), 14),
        deauth(Direction::FromAp, CLIENT),
        deauth(Direction::FromClient, MacAddress::broadcast()),
    ];

    for spec in specs.iter() {
        let frame = encode(spec).unwrap();
        let bytes = frame.as_bytes();
        let declared = u16::from_le_bytes([bytes[2], bytes[3]]) as usize;
        assert_eq!(declared, frame.preamble_len());
        assert_eq!(
            frame.len(),
            frame.preamble_len() + frame.header_len() + frame.body_len() + frame.elements_len()
        );
    }
}

#[test]
fn test_preamble_is_valid_radiotap() {
    let frame = encode(&beacon("FakeAP", 6)).unwrap();
    let radiotap = Radiotap::from_bytes(frame.as_bytes()).expect("Valid radiotap header");
    assert_eq!(radiotap.header.version, 0);
    assert_eq!(radiotap.header.length, frame.preamble_len());
    assert_eq!(&frame.as_bytes()[radiotap.header.length..], frame.mpdu());
}

#[test]
fn test_deauth_pair_addresses() {
    let from_ap = encode(&deauth(Direction::FromAp, CLIENT)).unwrap();
    let from_client = encode(&deauth(Direction::FromClient, CLIENT)).unwrap();

    let from_ap = parse_frame(from_ap.mpdu()).unwrap();
    assert!(matches!(from_ap, Frame::Deauthentication(_)));
    assert_eq!(from_ap.dest(), &CLIENT);
    assert_eq!(from_ap.src(), Some(&BSSID));
    assert_eq!(from_ap.bssid(), Some(&BSSID));

    let from_client = parse_frame(from_client.mpdu()).unwrap();
    assert_eq!(from_client.dest(), &BSSID);
    assert_eq!(from_client.src(), Some(&CLIENT));
    assert_eq!(from_client.bssid(), Some(&BSSID));

    if let Frame::Deauthentication(frame) = from_client {
        assert_eq!(frame.reason_code.code(), 7);
    }
}

#[test]
fn test_beacon_decodes_fixed_fields() {
    let frame = encode(&beacon("Airport_0815", 3)).unwrap();
    let Frame::Beacon(beacon) = parse_injected_frame(frame.as_bytes()).unwrap() else {
        panic!("Expected a beacon");
    };

    assert_eq!(beacon.timestamp, 0);
    assert_eq!(beacon.beacon_interval, 100);
    assert_eq!(beacon.capability_info, 0x1111);
    assert_eq!(beacon.dest(), &MacAddress::broadcast());
    assert_eq!(beacon.elements.supported_rates.len(), 8);
    assert!(beacon.elements.other.is_empty());
}

#[test]
fn test_truncated_frame_is_an_error() {
    let frame = encode(&beacon("FakeAP", 6)).unwrap();
    assert!(parse_injected_frame(&frame.as_bytes()[..20]).is_err());
}

#[test]
fn test_unhandled_subtype() {
    // Probe request frame control.
    let mut mpdu = encode(&deauth(Direction::FromAp, CLIENT)).unwrap().mpdu().to_vec();
    mpdu[0] = 0x40;
    assert!(matches!(
        parse_frame(&mpdu),
        Err(libdot11::error::Error::UnhandledFrameSubtype(_, _))
    ));
}
