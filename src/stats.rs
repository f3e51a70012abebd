use std::collections::HashSet;
use std::fmt::{self, Write};
use std::time::{Duration, Instant};

use libdot11::frame::components::MacAddress;

/// Distinct SSIDs and BSSIDs tracked per session. Past this the counts saturate.
pub const MAX_TRACKED_IDENTITIES: usize = 100_000;

/// Counters of one session. Only the transmission loop writes to them.
#[derive(Clone, Debug)]
pub struct Statistics {
    frames_sent: u64,
    frames_failed: u64,
    started: Instant,
    last_report: Instant,
    ssids: HashSet<String>,
    bssids: HashSet<MacAddress>,
}

/// Point-in-time copy of [Statistics] used for reporting.
#[derive(Clone, Debug, PartialEq)]
pub struct StatsSnapshot {
    pub frames_sent: u64,
    pub frames_failed: u64,
    pub elapsed: Duration,
    pub rate: f64,
    pub unique_ssids: usize,
    pub unique_bssids: usize,
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

impl Statistics {
    pub fn new() -> Self {
        let now = Instant::now();
        Statistics {
            frames_sent: 0,
            frames_failed: 0,
            started: now,
            last_report: now,
            ssids: HashSet::new(),
            bssids: HashSet::new(),
        }
    }

    /// Restart the clock, counters are kept.
    pub fn start(&mut self) {
        let now = Instant::now();
        self.started = now;
        self.last_report = now;
    }

    pub fn record_success(&mut self) {
        self.frames_sent += 1;
    }

    pub fn record_failure(&mut self) {
        self.frames_failed += 1;
    }

    /// Remember which SSID and BSSID a beacon announced.
    pub fn record_identity(&mut self, ssid: &str, bssid: MacAddress) {
        if self.ssids.len() < MAX_TRACKED_IDENTITIES && !self.ssids.contains(ssid) {
            self.ssids.insert(ssid.to_string());
        }
        if self.bssids.len() < MAX_TRACKED_IDENTITIES {
            self.bssids.insert(bssid);
        }
    }

    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    pub fn frames_failed(&self) -> u64 {
        self.frames_failed
    }

    /// Successful plus failed sends, equal to the number of injector calls.
    pub fn attempts(&self) -> u64 {
        self.frames_sent + self.frames_failed
    }

    pub fn unique_ssids(&self) -> usize {
        self.ssids.len()
    }

    pub fn unique_bssids(&self) -> usize {
        self.bssids.len()
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Frames sent per second since the start, 0 before any time has passed.
    pub fn current_rate(&self) -> f64 {
        rate(self.frames_sent, self.elapsed())
    }

    /// Share of successful sends in percent, `None` before the first attempt.
    pub fn success_rate(&self) -> Option<f64> {
        success_rate(self.frames_sent, self.frames_failed)
    }

    pub fn due_for_report(&self, interval: Duration) -> bool {
        self.last_report.elapsed() >= interval
    }

    pub fn mark_reported(&mut self) {
        self.last_report = Instant::now();
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let elapsed = self.elapsed();
        StatsSnapshot {
            frames_sent: self.frames_sent,
            frames_failed: self.frames_failed,
            elapsed,
            rate: rate(self.frames_sent, elapsed),
            unique_ssids: self.ssids.len(),
            unique_bssids: self.bssids.len(),
        }
    }
}

fn rate(frames: u64, elapsed: Duration) -> f64 {
    let seconds = elapsed.as_secs_f64();
    if seconds <= 0.0 {
        0.0
    } else {
        frames as f64 / seconds
    }
}

fn success_rate(sent: u64, failed: u64) -> Option<f64> {
    let attempts = sent + failed;
    if attempts == 0 {
        None
    } else {
        Some(sent as f64 / attempts as f64 * 100.0)
    }
}

impl StatsSnapshot {
    pub fn success_rate(&self) -> Option<f64> {
        success_rate(self.frames_sent, self.frames_failed)
    }
}

/// `1234567` -> `1,234,567`
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

/// Distinct count, marked once it hit [MAX_TRACKED_IDENTITIES].
pub fn distinct(count: usize) -> String {
    if count >= MAX_TRACKED_IDENTITIES {
        format!("{}+", thousands(count as u64))
    } else {
        count.to_string()
    }
}

/// Which kind of session a report describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReportKind {
    Beacon,
    Deauth,
}

impl ReportKind {
    fn unit(&self) -> &'static str {
        match self {
            ReportKind::Beacon => "beacons",
            ReportKind::Deauth => "packets",
        }
    }
}

/// The single status line redrawn while a session runs.
pub fn render_live(snapshot: &StatsSnapshot, kind: ReportKind) -> String {
    match kind {
        ReportKind::Beacon => format!(
            "[*] Beacons: {} | Rate: {:.1}/s | Errors: {} | SSIDs: {} | BSSIDs: {} | Time: {:.1}s",
            thousands(snapshot.frames_sent),
            snapshot.rate,
            snapshot.frames_failed,
            distinct(snapshot.unique_ssids),
            distinct(snapshot.unique_bssids),
            snapshot.elapsed.as_secs_f64(),
        ),
        ReportKind::Deauth => format!(
            "[*] Sent: {} packets | Rate: {:.1} pps | Errors: {} | Elapsed: {:.1}s",
            thousands(snapshot.frames_sent),
            snapshot.rate,
            snapshot.frames_failed,
            snapshot.elapsed.as_secs_f64(),
        ),
    }
}

/// Closing statistics block.
pub fn render_final(snapshot: &StatsSnapshot, kind: ReportKind, reason: impl fmt::Display) -> String {
    let rule = "=".repeat(70);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "  Attack Complete - Final Statistics");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "Total Sent:            {} {}",
        thousands(snapshot.frames_sent),
        kind.unit()
    );
    if kind == ReportKind::Beacon {
        let _ = writeln!(out, "Unique SSIDs:          {}", distinct(snapshot.unique_ssids));
        let _ = writeln!(out, "Unique BSSIDs:         {}", distinct(snapshot.unique_bssids));
    }
    let _ = writeln!(out, "Errors:                {}", snapshot.frames_failed);
    let _ = writeln!(
        out,
        "Duration:              {:.2} seconds",
        snapshot.elapsed.as_secs_f64()
    );
    let _ = writeln!(
        out,
        "Average Rate:          {:.1} {}/sec",
        snapshot.rate,
        kind.unit()
    );
    if snapshot.frames_failed > 0 {
        if let Some(success) = snapshot.success_rate() {
            let _ = writeln!(out, "Success Rate:          {:.2}%", success);
        }
    }
    let _ = writeln!(out, "Stopped:               {}", reason);
    let _ = write!(out, "{}", rule);

    out
}
