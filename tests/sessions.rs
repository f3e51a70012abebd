use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use frame_storm::injector::{Behavior, RecordingInjector};
use frame_storm::session::ReportPolicy;
use frame_storm::status::MessageLog;
use frame_storm::{
    AttackError, AttackSession, BeaconConfig, BssidSource, DeauthConfig, DeauthTarget,
    SessionState, SsidSource, StopReason,
};
use libdot11::frame::components::MacAddress;
use libdot11::{parse_injected_frame, Addresses, Frame};
use rand::rngs::StdRng;
use rand::SeedableRng;

const AP: MacAddress = MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
const CLIENT: MacAddress = MacAddress([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);

fn running() -> Arc<AtomicBool> {
    Arc::new(AtomicBool::new(true))
}

fn log() -> MessageLog {
    MessageLog::new(false, None)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[test]
fn test_fake_ap_beacons() {
    let config = BeaconConfig::new("wlan0mon", SsidSource::Fixed("FakeAP".into()))
        .bssid(BssidSource::Fixed(AP))
        .channel(6)
        .count(10)
        .rate(0.0);
    let injector = RecordingInjector::new(Behavior::Succeed);
    let handle = injector.handle();

    let mut session = AttackSession::beacon(&config, running(), log())
        .unwrap()
        .with_report_policy(ReportPolicy::Off);
    let report = session.run(|_| Ok(injector)).unwrap();

    assert_eq!(report.reason, StopReason::CountReached);
    assert_eq!(report.snapshot.frames_sent, 10);
    assert_eq!(report.snapshot.unique_ssids, 1);
    assert_eq!(report.snapshot.unique_bssids, 1);
    assert!(report.success());
    assert_eq!(report.exit_code(), 0);

    let frames = handle.frames();
    assert_eq!(frames.len(), 10);
    for frame in frames.iter() {
        assert!(contains(frame, &[0x00, 0x06, b'F', b'a', b'k', b'e', b'A', b'P']));
        assert!(frame.ends_with(&[0x03, 0x01, 0x06]));

        let radiotap = radiotap::Radiotap::from_bytes(frame).unwrap();
        assert_eq!(radiotap.header.length, 8);

        let Frame::Beacon(beacon) = parse_injected_frame(frame).unwrap() else {
            panic!("Expected a beacon");
        };
        assert_eq!(beacon.ssid(), Some("FakeAP"));
        assert_eq!(beacon.bssid(), Some(&AP));
    }
    assert!(handle.is_released());
}

#[test]
fn test_random_beacons_are_decodable() {
    let config = BeaconConfig::new("wlan0mon", SsidSource::Random { prefix: None })
        .count(50)
        .rate(0.0)
        .show_stats(false);
    let injector = RecordingInjector::new(Behavior::Succeed);
    let handle = injector.handle();

    let mut session = AttackSession::beacon(&config, running(), log())
        .unwrap()
        .with_rng(StdRng::seed_from_u64(42));
    let report = session.run(|_| Ok(injector)).unwrap();

    assert_eq!(report.snapshot.frames_sent, 50);
    assert!(report.snapshot.unique_bssids > 1);
    for frame in handle.frames() {
        let Frame::Beacon(beacon) = parse_injected_frame(&frame).unwrap() else {
            panic!("Expected a beacon");
        };
        let ssid = beacon.ssid().unwrap();
        assert!(ssid.len() <= 32);
        assert!(ssid.contains('_'));
        assert_eq!(beacon.src(), beacon.bssid());
    }
}

#[test]
fn test_deauth_broadcast_pairs() {
    let config = DeauthConfig::new("wlan0mon", AP, DeauthTarget::Broadcast)
        .count(5)
        .rate(0.0)
        .quiet(true);
    let injector = RecordingInjector::new(Behavior::Succeed);
    let handle = injector.handle();

    let mut session = AttackSession::deauth(&config, running(), log()).unwrap();
    let report = session.run(|_| Ok(injector)).unwrap();

    assert_eq!(handle.calls(), 10);
    assert_eq!(report.snapshot.frames_sent, 10);
    assert_eq!(report.cycles, 5);
    assert_eq!(report.reason, StopReason::CountReached);
}

#[test]
fn test_deauth_client_directions() {
    let config = DeauthConfig::new("wlan0mon", AP, DeauthTarget::Client(CLIENT))
        .count(1)
        .quiet(true);
    let injector = RecordingInjector::new(Behavior::Succeed);
    let handle = injector.handle();

    let mut session = AttackSession::deauth(&config, running(), log()).unwrap();
    session.run(|_| Ok(injector)).unwrap();

    let frames = handle.frames();
    assert_eq!(frames.len(), 2);

    let from_ap = parse_injected_frame(&frames[0]).unwrap();
    assert_eq!(from_ap.dest(), &CLIENT);
    assert_eq!(from_ap.src(), Some(&AP));

    let from_client = parse_injected_frame(&frames[1]).unwrap();
    assert_eq!(from_client.dest(), &AP);
    assert_eq!(from_client.src(), Some(&CLIENT));
    assert_eq!(from_client.bssid(), Some(&AP));
}

#[test]
fn test_always_failing_injector_terminates() {
    let config = BeaconConfig::new("wlan0mon", SsidSource::Fixed("FakeAP".into()))
        .count(8)
        .rate(0.0)
        .show_stats(false);
    let injector = RecordingInjector::new(Behavior::Fail);
    let handle = injector.handle();

    let mut session = AttackSession::beacon(&config, running(), log()).unwrap();
    let report = session.run(|_| Ok(injector)).unwrap();

    assert_eq!(report.reason, StopReason::CountReached);
    assert_eq!(report.snapshot.frames_sent, 0);
    assert_eq!(report.snapshot.frames_failed, 8);
    assert_eq!(handle.calls(), 8);
    assert!(!report.success());
    assert_eq!(report.exit_code(), 1);
    assert_eq!(session.state(), SessionState::Terminated);
}

#[test]
fn test_sent_plus_failed_equals_calls() {
    let config = DeauthConfig::new("wlan0mon", AP, DeauthTarget::Client(CLIENT))
        .count(25)
        .rate(0.0)
        .quiet(true);
    let injector = RecordingInjector::new(Behavior::FailEvery(3));
    let handle = injector.handle();

    let mut session = AttackSession::deauth(&config, running(), log()).unwrap();
    let report = session.run(|_| Ok(injector)).unwrap();

    assert_eq!(handle.calls(), 50);
    assert_eq!(
        report.snapshot.frames_sent + report.snapshot.frames_failed,
        handle.calls() as u64
    );
    assert_eq!(report.snapshot.frames_failed, 16);
}

#[test]
fn test_deauth_without_stop_condition_never_opens_injector() {
    let config = DeauthConfig::new("wlan0mon", AP, DeauthTarget::Broadcast);
    let result = AttackSession::deauth(&config, running(), log());

    match result {
        Err(AttackError::Configuration(errors)) => {
            assert!(errors.problems()[0].contains("--count or --duration"))
        }
        Err(other) => panic!("Unexpected error: {other}"),
        Ok(_) => panic!("Session should not be constructed"),
    }
}

#[test]
fn test_cancellation_stops_unbounded_flood() {
    let config = BeaconConfig::new("wlan0mon", SsidSource::Random { prefix: None })
        .rate(200.0)
        .show_stats(false);
    let flag = running();
    let injector = RecordingInjector::new(Behavior::Succeed);
    let handle = injector.handle();

    let canceller = {
        let flag = flag.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(150));
            flag.store(false, Ordering::SeqCst);
        })
    };

    let started = Instant::now();
    let mut session = AttackSession::beacon(&config, flag, log()).unwrap();
    let report = session.run(|_| Ok(injector)).unwrap();
    canceller.join().unwrap();

    assert_eq!(report.reason, StopReason::UserCancelled);
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(report.snapshot.frames_sent >= 1);
    assert_eq!(report.snapshot.frames_sent, handle.calls() as u64);
    assert!(handle.is_released());
}

#[test]
fn test_slow_rate_is_cancelled_mid_delay() {
    // One frame every five seconds, cancelled well before the second.
    let config = DeauthConfig::new("wlan0mon", AP, DeauthTarget::Broadcast)
        .count(3)
        .rate(0.2)
        .quiet(true);
    let flag = running();

    let canceller = {
        let flag = flag.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(200));
            flag.store(false, Ordering::SeqCst);
        })
    };

    let started = Instant::now();
    let mut session = AttackSession::deauth(&config, flag, log()).unwrap();
    let report = session
        .run(|_| Ok(RecordingInjector::new(Behavior::Succeed)))
        .unwrap();
    canceller.join().unwrap();

    assert_eq!(report.reason, StopReason::UserCancelled);
    assert_eq!(report.cycles, 1);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_count_reached_without_trailing_delay() {
    // Two seconds between cycles. The stop check must run before the delay.
    let config = DeauthConfig::new("wlan0mon", AP, DeauthTarget::Broadcast)
        .count(1)
        .rate(0.5)
        .quiet(true);

    let started = Instant::now();
    let mut session = AttackSession::deauth(&config, running(), log()).unwrap();
    let report = session
        .run(|_| Ok(RecordingInjector::new(Behavior::Succeed)))
        .unwrap();

    assert_eq!(report.reason, StopReason::CountReached);
    assert_eq!(report.cycles, 1);
    assert!(started.elapsed() < Duration::from_millis(500));
}
