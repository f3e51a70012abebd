use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

use libdot11::frame::components::{MacAddress, MAX_SSID_LEN};

use crate::config::{BssidSource, SsidSource};

/// Names that look like public hotspots.
pub const SSID_PREFIXES: [&str; 14] = [
    "FreeWiFi",
    "Guest",
    "Public",
    "Airport",
    "Hotel",
    "Starbucks",
    "CoffeeShop",
    "Library",
    "Conference",
    "Visitor",
    "Welcome",
    "Internet",
    "WiFi",
    "Network",
];

/// Vendor prefixes random BSSIDs are drawn from.
pub const VENDOR_OUIS: [([u8; 3], &str); 6] = [
    ([0x00, 0x11, 0x22], "Generic"),
    ([0x00, 0x1A, 0x2B], "Cisco"),
    ([0x00, 0x1B, 0x63], "Cisco"),
    ([0xF0, 0x9F, 0xC2], "Ubiquiti"),
    ([0x04, 0x18, 0xD6], "TP-Link"),
    ([0x50, 0xC7, 0xBF], "TP-Link"),
];

/// `_` plus four digits.
const SUFFIX_LEN: usize = 5;

/// Vendor label for a BSSID built from one of [VENDOR_OUIS].
pub fn vendor_for(mac: &MacAddress) -> Option<&'static str> {
    VENDOR_OUIS
        .iter()
        .find(|(oui, _)| *oui == mac.oui())
        .map(|(_, vendor)| *vendor)
}

/// Clip to at most `max` bytes without splitting a character.
fn clip(input: &str, max: usize) -> &str {
    if input.len() <= max {
        return input;
    }
    let mut end = max;
    while !input.is_char_boundary(end) {
        end -= 1;
    }
    &input[..end]
}

/// Produces SSIDs and BSSIDs for each send cycle.
///
/// Calls are independent of each other. Generic over the RNG so tests can seed it.
pub struct IdentityGenerator<R: Rng = ThreadRng> {
    rng: R,
}

impl IdentityGenerator<ThreadRng> {
    pub fn new() -> Self {
        IdentityGenerator { rng: thread_rng() }
    }
}

impl Default for IdentityGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> IdentityGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        IdentityGenerator { rng }
    }

    pub fn next_ssid(&mut self, source: &SsidSource) -> String {
        match source {
            SsidSource::Fixed(ssid) => ssid.clone(),
            SsidSource::Random { prefix } => {
                let prefix = match prefix {
                    Some(prefix) => clip(prefix, MAX_SSID_LEN - SUFFIX_LEN),
                    None => SSID_PREFIXES.choose(&mut self.rng).copied().unwrap_or("WiFi"),
                };
                format!("{}_{:04}", prefix, self.rng.gen_range(0..=9999))
            }
        }
    }

    pub fn next_bssid(&mut self, source: &BssidSource) -> MacAddress {
        match source {
            BssidSource::Fixed(mac) => *mac,
            BssidSource::Random => {
                let oui = VENDOR_OUIS
                    .choose(&mut self.rng)
                    .map(|(oui, _)| *oui)
                    .unwrap_or([0x00, 0x11, 0x22]);
                MacAddress::random_with_oui(oui, &mut self.rng)
            }
        }
    }
}
