use std::fmt;
use std::time::Duration;

use derive_setters::Setters;
use libdot11::frame::components::{MacAddress, MAX_SSID_LEN};
use libdot11::frame::{DeauthenticationReason, DEFAULT_BEACON_INTERVAL, DEFAULT_CAPABILITY_INFO};

use crate::error::{AttackError, ConfigErrors};
use crate::governor;

pub const DEFAULT_BEACON_RATE: f64 = 100.0;
pub const DEFAULT_DEAUTH_RATE: f64 = 10.0;
pub const DEFAULT_CHANNEL: u8 = 6;
pub const DEFAULT_STATS_INTERVAL: Duration = Duration::from_secs(5);

/// Where beacon SSIDs come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SsidSource {
    Fixed(String),
    /// A curated prefix (or the given one) followed by `_NNNN`.
    Random { prefix: Option<String> },
}

impl fmt::Display for SsidSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SsidSource::Fixed(ssid) => write!(f, "{}", ssid),
            SsidSource::Random { prefix: None } => write!(f, "Random"),
            SsidSource::Random {
                prefix: Some(prefix),
            } => write!(f, "Random ({}_NNNN)", prefix),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BssidSource {
    Fixed(MacAddress),
    /// Known vendor OUI followed by three random bytes.
    Random,
}

impl fmt::Display for BssidSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BssidSource::Fixed(mac) => write!(f, "{}", mac),
            BssidSource::Random => write!(f, "Random"),
        }
    }
}

/// Who gets deauthenticated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeauthTarget {
    Client(MacAddress),
    /// Every station associated with the BSSID.
    Broadcast,
}

impl DeauthTarget {
    pub fn address(&self) -> MacAddress {
        match self {
            DeauthTarget::Client(mac) => *mac,
            DeauthTarget::Broadcast => MacAddress::broadcast(),
        }
    }
}

impl fmt::Display for DeauthTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeauthTarget::Client(mac) => write!(f, "{}", mac),
            DeauthTarget::Broadcast => write!(f, "BROADCAST (all clients)"),
        }
    }
}

/// Count bounds loop cycles, duration bounds wall clock time. Whichever
/// triggers first ends the session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StopConditions {
    pub max_count: Option<u64>,
    pub max_duration: Option<Duration>,
}

impl StopConditions {
    pub fn is_bounded(&self) -> bool {
        self.max_count.is_some() || self.max_duration.is_some()
    }
}

impl fmt::Display for StopConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.max_count, self.max_duration) {
            (Some(count), None) => write!(f, "Count-based ({} cycles)", count),
            (None, Some(duration)) => {
                write!(f, "Duration-based ({} seconds)", duration.as_secs_f64())
            }
            (Some(count), Some(duration)) => write!(
                f,
                "Hybrid ({} cycles OR {} seconds)",
                count,
                duration.as_secs_f64()
            ),
            (None, None) => write!(f, "Unbounded (until interrupted)"),
        }
    }
}

fn check_stop_conditions(stop: &StopConditions, errors: &mut ConfigErrors) {
    if stop.max_count == Some(0) {
        errors.push("Invalid count: 0 (must be at least 1)");
    }
    if stop.max_duration == Some(Duration::ZERO) {
        errors.push("Invalid duration: 0 (must be greater than 0)");
    }
}

fn check_channel(channel: u8, errors: &mut ConfigErrors) {
    if !(1..=14).contains(&channel) {
        errors.push(format!("Invalid channel: {} (must be 1-14)", channel));
    }
}

#[derive(Clone, Debug, PartialEq, Setters)]
pub struct BeaconConfig {
    #[setters(into)]
    pub interface: String,
    pub ssid: SsidSource,
    pub bssid: BssidSource,
    pub channel: u8,
    /// Time units of 1024 µs.
    pub beacon_interval: u16,
    pub capability_info: u16,
    #[setters(strip_option)]
    pub count: Option<u64>,
    #[setters(strip_option)]
    pub duration: Option<Duration>,
    /// Frames per second, 0 disables pacing.
    pub rate: f64,
    pub show_stats: bool,
    pub stats_interval: Duration,
}

impl BeaconConfig {
    pub fn new(interface: impl Into<String>, ssid: SsidSource) -> Self {
        BeaconConfig {
            interface: interface.into(),
            ssid,
            bssid: BssidSource::Random,
            channel: DEFAULT_CHANNEL,
            beacon_interval: DEFAULT_BEACON_INTERVAL,
            capability_info: DEFAULT_CAPABILITY_INFO,
            count: None,
            duration: None,
            rate: DEFAULT_BEACON_RATE,
            show_stats: true,
            stats_interval: DEFAULT_STATS_INTERVAL,
        }
    }

    pub fn stop_conditions(&self) -> StopConditions {
        StopConditions {
            max_count: self.count,
            max_duration: self.duration,
        }
    }

    /// Check every field and report all problems together.
    pub fn validate(&self) -> Result<(), AttackError> {
        let mut errors = ConfigErrors::new();

        if self.interface.trim().is_empty() {
            errors.push("Interface cannot be empty");
        }

        if let SsidSource::Fixed(ssid) = &self.ssid {
            if ssid.len() > MAX_SSID_LEN {
                errors.push(format!(
                    "SSID is {} bytes long (must be at most {})",
                    ssid.len(),
                    MAX_SSID_LEN
                ));
            }
        }

        check_channel(self.channel, &mut errors);

        if self.beacon_interval == 0 {
            errors.push("Invalid beacon interval: 0");
        }

        check_stop_conditions(&self.stop_conditions(), &mut errors);

        if let Err(problem) = governor::check_rate(self.rate) {
            errors.push(problem);
        }

        if self.show_stats && self.stats_interval.is_zero() {
            errors.push("Statistics interval must be greater than 0");
        }

        errors.into_result()
    }
}

#[derive(Clone, Debug, PartialEq, Setters)]
pub struct DeauthConfig {
    #[setters(into)]
    pub interface: String,
    pub bssid: MacAddress,
    pub target: DeauthTarget,
    pub reason: DeauthenticationReason,
    #[setters(strip_option)]
    pub count: Option<u64>,
    #[setters(strip_option)]
    pub duration: Option<Duration>,
    /// Cycles per second, every cycle sends two frames.
    pub rate: f64,
    /// Shown in the banner only. The interface has to be tuned beforehand.
    #[setters(strip_option)]
    pub channel: Option<u8>,
    pub quiet: bool,
}

impl DeauthConfig {
    pub fn new(interface: impl Into<String>, bssid: MacAddress, target: DeauthTarget) -> Self {
        DeauthConfig {
            interface: interface.into(),
            bssid,
            target,
            reason: DeauthenticationReason::default(),
            count: None,
            duration: None,
            rate: DEFAULT_DEAUTH_RATE,
            channel: None,
            quiet: false,
        }
    }

    pub fn stop_conditions(&self) -> StopConditions {
        StopConditions {
            max_count: self.count,
            max_duration: self.duration,
        }
    }

    pub fn validate(&self) -> Result<(), AttackError> {
        let mut errors = ConfigErrors::new();

        if self.interface.trim().is_empty() {
            errors.push("Interface cannot be empty");
        }

        if self.bssid.is_mcast() || self.bssid.is_zero() {
            errors.push(format!("Invalid BSSID: {} (must be unicast)", self.bssid));
        }

        if let DeauthTarget::Client(client) = self.target {
            if client == self.bssid {
                errors.push("Target client cannot be the BSSID itself");
            }
        }

        if self.reason.code() == 0 {
            errors.push("Reason code 0 is reserved");
        }

        let stop = self.stop_conditions();
        if !stop.is_bounded() {
            errors.push("Must specify either --count or --duration");
        }
        check_stop_conditions(&stop, &mut errors);

        if let Err(problem) = governor::check_rate(self.rate) {
            errors.push(problem);
        }

        if let Some(channel) = self.channel {
            check_channel(channel, &mut errors);
        }

        errors.into_result()
    }
}
