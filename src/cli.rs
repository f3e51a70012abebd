use std::fmt::Write;
use std::time::Duration;

use clap::{ArgGroup, Args, Parser, Subcommand};
use libdot11::frame::components::MacAddress;
use libdot11::frame::DeauthenticationReason;

use crate::config::{BeaconConfig, BssidSource, DeauthConfig, DeauthTarget, SsidSource};
use crate::generator::vendor_for;

#[derive(Parser)]
#[command(name = "frame_storm")]
#[command(author = "Ryan Butler (Ragnt)")]
#[command(about = "Beacon flood and deauthentication frame injector.", long_about = None)]
#[command(version)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Flood the channel with fake access point beacons.
    Beacon(BeaconArgs),
    /// Disconnect clients from an access point.
    Deauth(DeauthArgs),
}

#[derive(Args)]
#[command(group(ArgGroup::new("ssid_mode").required(true).args(["ssid", "random_ssids"])))]
pub struct BeaconArgs {
    #[arg(short, long)]
    /// Monitor mode interface to inject on.
    pub interface: String,

    #[arg(long)]
    /// Announce this SSID.
    pub ssid: Option<String>,

    #[arg(long)]
    /// Announce random hotspot-like SSIDs.
    pub random_ssids: bool,

    #[arg(long, requires = "random_ssids")]
    /// Prefix for random SSIDs instead of the built-in list.
    pub ssid_prefix: Option<String>,

    #[arg(long, conflicts_with = "random_bssid")]
    /// Fixed BSSID (AA:BB:CC:DD:EE:FF). Random when omitted.
    pub bssid: Option<MacAddress>,

    #[arg(long)]
    /// Random vendor BSSID for every beacon (default).
    pub random_bssid: bool,

    #[arg(short, long, default_value_t = 6)]
    /// Channel announced in the DS parameter set.
    pub channel: u8,

    #[arg(long, default_value_t = 100)]
    /// Beacon interval in time units.
    pub beacon_interval: u16,

    #[arg(long, default_value = "0x1111", value_parser = parse_hex_u16)]
    /// Capability information field.
    pub capability: u16,

    #[arg(short = 'n', long)]
    /// Stop after this many beacons.
    pub count: Option<u64>,

    #[arg(short, long)]
    /// Stop after this many seconds.
    pub duration: Option<u64>,

    #[arg(short, long, default_value_t = 100.0)]
    /// Beacons per second, 0 for no limit.
    pub rate: f64,

    #[arg(long)]
    /// Don't print live statistics.
    pub no_stats: bool,

    #[arg(long, default_value_t = 5)]
    /// Seconds between live statistics updates.
    pub stats_interval: u64,

    #[arg(long)]
    /// Hex dump the first frame before sending.
    pub dump: bool,
}

#[derive(Args)]
#[command(group(ArgGroup::new("target_mode").required(true).args(["target", "broadcast"])))]
pub struct DeauthArgs {
    #[arg(short, long)]
    /// Monitor mode interface to inject on.
    pub interface: String,

    #[arg(short, long)]
    /// Access point BSSID.
    pub bssid: MacAddress,

    #[arg(short, long)]
    /// Client to disconnect.
    pub target: Option<MacAddress>,

    #[arg(long)]
    /// Disconnect every client of the access point.
    pub broadcast: bool,

    #[arg(long, default_value_t = 7)]
    /// IEEE 802.11 reason code.
    pub reason: u16,

    #[arg(short = 'n', long)]
    /// Stop after this many deauth pairs.
    pub count: Option<u64>,

    #[arg(short, long)]
    /// Stop after this many seconds.
    pub duration: Option<u64>,

    #[arg(short, long, default_value_t = 10.0)]
    /// Deauth pairs per second, 0 for no limit.
    pub rate: f64,

    #[arg(long)]
    /// Channel the interface is tuned to, for display only.
    pub channel: Option<u8>,

    #[arg(short, long)]
    /// Don't print live statistics.
    pub quiet: bool,

    #[arg(long)]
    /// Hex dump the first frame before sending.
    pub dump: bool,
}

/// Accepts `0x1111`, `1111` is read as hex as well.
pub fn parse_hex_u16(input: &str) -> Result<u16, String> {
    let digits = input
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid hex value '{}': {}", input, e))
}

impl BeaconArgs {
    pub fn to_config(&self) -> BeaconConfig {
        let ssid = match &self.ssid {
            Some(ssid) if !self.random_ssids => SsidSource::Fixed(ssid.clone()),
            _ => SsidSource::Random {
                prefix: self.ssid_prefix.clone(),
            },
        };
        let bssid = match self.bssid {
            Some(bssid) => BssidSource::Fixed(bssid),
            None => BssidSource::Random,
        };

        BeaconConfig {
            interface: self.interface.clone(),
            ssid,
            bssid,
            channel: self.channel,
            beacon_interval: self.beacon_interval,
            capability_info: self.capability,
            count: self.count,
            duration: self.duration.map(Duration::from_secs),
            rate: self.rate,
            show_stats: !self.no_stats,
            stats_interval: Duration::from_secs(self.stats_interval),
        }
    }
}

impl DeauthArgs {
    pub fn to_config(&self) -> DeauthConfig {
        let target = match self.target {
            Some(client) if !self.broadcast => DeauthTarget::Client(client),
            _ => DeauthTarget::Broadcast,
        };

        DeauthConfig {
            interface: self.interface.clone(),
            bssid: self.bssid,
            target,
            reason: DeauthenticationReason::from_code(self.reason),
            count: self.count,
            duration: self.duration.map(Duration::from_secs),
            rate: self.rate,
            channel: self.channel,
            quiet: self.quiet,
        }
    }
}

fn rate_label(rate: f64, unit: &str) -> String {
    if rate == 0.0 {
        "Unlimited".to_string()
    } else {
        format!("{} {}/sec", rate, unit)
    }
}

pub fn beacon_banner(config: &BeaconConfig) -> String {
    let rule = "=".repeat(70);
    let mut out = String::new();

    let bssid = match config.bssid {
        BssidSource::Fixed(mac) => match vendor_for(&mac) {
            Some(vendor) => format!("{} ({})", mac, vendor),
            None => mac.to_string(),
        },
        BssidSource::Random => config.bssid.to_string(),
    };

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "  WiFi Beacon Flood Attack");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Interface:       {}", config.interface);
    let _ = writeln!(out, "SSID Mode:       {}", config.ssid);
    let _ = writeln!(out, "BSSID Mode:      {}", bssid);
    let _ = writeln!(out, "Channel:         {}", config.channel);
    let _ = writeln!(out, "Capability:      0x{:04X}", config.capability_info);
    let _ = writeln!(out, "Rate:            {}", rate_label(config.rate, "beacons"));
    let _ = writeln!(out, "Attack Mode:     {}", config.stop_conditions());
    let _ = write!(out, "{}", rule);

    out
}

pub fn deauth_banner(config: &DeauthConfig) -> String {
    let rule = "=".repeat(70);
    let mut out = String::new();

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "  WiFi Deauthentication Attack - Configuration");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Interface:       {}", config.interface);
    let _ = writeln!(out, "Target BSSID:    {}", config.bssid);
    let _ = writeln!(out, "Target Client:   {}", config.target);
    let _ = writeln!(out, "Reason Code:     {}", config.reason);
    let _ = writeln!(out, "Attack Mode:     {}", config.stop_conditions());
    let _ = writeln!(out, "Rate:            {}", rate_label(config.rate, "pairs"));
    match config.channel {
        Some(channel) => {
            let _ = writeln!(out, "Channel:         {}", channel);
        }
        None => {
            let _ = writeln!(out, "Channel:         Current");
        }
    }
    let _ = write!(out, "{}", rule);

    out
}

/// Offset, then sixteen space separated bytes per line.
pub fn hexdump(bytes: &[u8]) -> String {
    bytes
        .chunks(16)
        .enumerate()
        .map(|(line, chunk)| {
            let octets: Vec<String> = chunk.iter().map(|byte| hex::encode([*byte])).collect();
            format!("{:04x}  {}", line * 16, octets.join(" "))
        })
        .collect::<Vec<String>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Arguments::command().debug_assert();
    }

    #[test]
    fn test_beacon_args_to_config() {
        let args = Arguments::try_parse_from([
            "frame_storm",
            "beacon",
            "-i",
            "wlan0mon",
            "--ssid",
            "FakeAP",
            "--bssid",
            "AA:BB:CC:DD:EE:FF",
            "-c",
            "11",
            "-n",
            "10",
            "--capability",
            "0x0431",
        ])
        .unwrap();

        let Command::Beacon(args) = args.command else {
            panic!("Expected beacon subcommand");
        };
        let config = args.to_config();
        assert_eq!(config.ssid, SsidSource::Fixed("FakeAP".into()));
        assert_eq!(
            config.bssid,
            BssidSource::Fixed(MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]))
        );
        assert_eq!(config.channel, 11);
        assert_eq!(config.count, Some(10));
        assert_eq!(config.capability_info, 0x0431);
        assert_eq!(config.rate, 100.0);
        assert!(config.show_stats);
    }

    #[test]
    fn test_beacon_needs_ssid_mode() {
        assert!(Arguments::try_parse_from(["frame_storm", "beacon", "-i", "wlan0"]).is_err());
        assert!(Arguments::try_parse_from([
            "frame_storm",
            "beacon",
            "-i",
            "wlan0",
            "--ssid-prefix",
            "Corp"
        ])
        .is_err());

        let args = Arguments::try_parse_from([
            "frame_storm",
            "beacon",
            "-i",
            "wlan0",
            "--random-ssids",
            "--ssid-prefix",
            "Corp",
        ])
        .unwrap();
        let Command::Beacon(args) = args.command else {
            panic!("Expected beacon subcommand");
        };
        assert_eq!(
            args.to_config().ssid,
            SsidSource::Random {
                prefix: Some("Corp".into())
            }
        );
        assert_eq!(args.to_config().bssid, BssidSource::Random);
    }

    #[test]
    fn test_deauth_args_to_config() {
        let args = Arguments::try_parse_from([
            "frame_storm",
            "deauth",
            "-i",
            "wlan0mon",
            "-b",
            "AA:BB:CC:DD:EE:FF",
            "--broadcast",
            "-d",
            "30",
        ])
        .unwrap();

        let Command::Deauth(args) = args.command else {
            panic!("Expected deauth subcommand");
        };
        let config = args.to_config();
        assert_eq!(config.target, DeauthTarget::Broadcast);
        assert_eq!(config.reason.code(), 7);
        assert_eq!(config.duration, Some(Duration::from_secs(30)));
        assert_eq!(config.rate, 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deauth_rejects_bad_mac() {
        assert!(Arguments::try_parse_from([
            "frame_storm",
            "deauth",
            "-i",
            "wlan0",
            "-b",
            "AA:BB:CC",
            "--broadcast",
        ])
        .is_err());
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex_u16("0x1111"), Ok(0x1111));
        assert_eq!(parse_hex_u16("0421"), Ok(0x0421));
        assert!(parse_hex_u16("0x1ffff").is_err());
        assert!(parse_hex_u16("zz").is_err());
    }

    #[test]
    fn test_banners() {
        let config = DeauthConfig::new(
            "wlan0",
            MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]),
            DeauthTarget::Broadcast,
        )
        .count(100);
        let banner = deauth_banner(&config);
        assert!(banner.contains("Target Client:   BROADCAST (all clients)"));
        assert!(banner.contains("Reason Code:     7 - Class 3 frame received from nonassociated STA"));
        assert!(banner.contains("Attack Mode:     Count-based (100 cycles)"));

        let config = BeaconConfig::new("wlan0", SsidSource::Fixed("FakeAP".into()))
            .bssid(BssidSource::Fixed("00:1A:2B:00:00:01".parse().unwrap()))
            .rate(0.0);
        let banner = beacon_banner(&config);
        assert!(banner.contains("BSSID Mode:      00:1A:2B:00:00:01 (Cisco)"));
        assert!(banner.contains("Rate:            Unlimited"));
        assert!(banner.contains("Attack Mode:     Unbounded (until interrupted)"));
    }

    #[test]
    fn test_hexdump() {
        let bytes: Vec<u8> = (0u8..18).collect();
        assert_eq!(
            hexdump(&bytes),
            "0000  00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f\n0010  10 11"
        );
    }
}
