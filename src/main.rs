extern crate libc;
extern crate nix;

use anyhow::{Context, Result};
use clap::Parser;
use libc::{EXIT_FAILURE, EXIT_SUCCESS};

use frame_storm::cli::{beacon_banner, deauth_banner, hexdump, Arguments, Command};
use frame_storm::rawsocks::RawSocketInjector;
use frame_storm::session::AttackSession;
use frame_storm::stats::render_final;
use frame_storm::status::MessageLog;

use std::process::exit;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn main() -> Result<()> {
    let args = Arguments::parse();

    let running = Arc::new(AtomicBool::new(true));
    let log = MessageLog::new(true, None);

    let (session, dump) = match &args.command {
        Command::Beacon(beacon) => {
            let config = beacon.to_config();
            let session = AttackSession::beacon(&config, running.clone(), log)
                .map(|session| (session, beacon_banner(&config)));
            (session, beacon.dump)
        }
        Command::Deauth(deauth) => {
            let config = deauth.to_config();
            let session = AttackSession::deauth(&config, running.clone(), log)
                .map(|session| (session, deauth_banner(&config)));
            (session, deauth.dump)
        }
    };

    let (mut session, banner) = match session {
        Ok(prepared) => prepared,
        Err(e) => {
            eprintln!("[!] {}", e);
            exit(EXIT_FAILURE);
        }
    };

    println!("{}", banner);
    println!();

    if dump {
        let frame = session.preview_frame()?;
        println!("First frame ({} bytes):", frame.len());
        println!("{}", hexdump(frame.as_bytes()));
        println!();
    }

    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("Failed to install signal handler")?;

    let report = match session.run(RawSocketInjector::open) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("[!] {}", e);
            exit(EXIT_FAILURE);
        }
    };

    println!();
    println!(
        "{}",
        render_final(&report.snapshot, session.kind(), report.reason)
    );

    if report.success() {
        exit(EXIT_SUCCESS);
    }
    session
        .log_mut()
        .error("No frames were sent. Is the interface up and in monitor mode?");
    exit(report.exit_code());
}
