// src/engine.rs
use crate::history::{self, SessionRecord, SessionStore};
use crate::session::{
    render_band_png, render_frame_png, FrameSink, PlotStyle, RandomJitter, SessionDriver,
    SessionPhase, TickTimer, DEFAULT_SAMPLE_COUNT, FAST_TICK, SLOW_TICK,
};
use crate::types::{SessionCategory, SessionCommand, SessionMessage};
use anyhow::Context;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Forwards each fresh frame to the GUI thread.
struct ChannelSink {
    tx: Sender<SessionMessage>,
}
impl FrameSink for ChannelSink {
    fn present(&mut self, frame: &[f64]) {
        self.tx.send(SessionMessage::Frame(frame.to_vec())).ok();
    }
}

pub fn spawn_thread(tx: Sender<SessionMessage>, rx_cmd: Receiver<SessionCommand>) {
    thread::spawn(move || {
        tx.send(SessionMessage::Log("⚙️ Session engine ready.".to_owned()))
            .ok();

        let store = SessionStore::open(SessionStore::default_path());
        let sink = ChannelSink { tx: tx.clone() };
        let mut driver = match SessionDriver::new(DEFAULT_SAMPLE_COUNT, sink) {
            Ok(driver) => driver,
            Err(err) => {
                log::error!("session driver init failed: {err}");
                return;
            }
        };
        let mut fast = TickTimer::new(FAST_TICK);
        let mut slow = TickTimer::new(SLOW_TICK);
        let mut jitter = RandomJitter(rand::thread_rng());
        let mut category = SessionCategory::Focus;
        // Time base for the synthesizer; sub-second precision keeps the
        // waveform flowing between fast ticks.
        let epoch = Instant::now();

        loop {
            // 1. Drain pending GUI commands (bounded per iteration).
            for _ in 0..10 {
                if let Ok(cmd) = rx_cmd.try_recv() {
                    match cmd {
                        SessionCommand::Start => {
                            if driver.phase() == SessionPhase::Idle {
                                match driver.start(epoch.elapsed().as_secs_f64()) {
                                    Ok(()) => {
                                        let now = Instant::now();
                                        fast.arm(now);
                                        slow.arm(now);
                                        tx.send(SessionMessage::Phase(SessionPhase::Running)).ok();
                                        tx.send(SessionMessage::Elapsed(0)).ok();
                                        tx.send(SessionMessage::Log("▶ Session started.".to_owned()))
                                            .ok();
                                    }
                                    Err(err) => log::error!("start failed: {err}"),
                                }
                            }
                        }
                        SessionCommand::PauseResume => match driver.phase() {
                            SessionPhase::Running => {
                                // Cancel both cadences before the transition so no
                                // tick lands on a paused session.
                                fast.cancel();
                                slow.cancel();
                                driver.pause();
                                tx.send(SessionMessage::Phase(SessionPhase::Paused)).ok();
                                tx.send(SessionMessage::Log("⏸ Session paused.".to_owned()))
                                    .ok();
                            }
                            SessionPhase::Paused => {
                                driver.resume();
                                let now = Instant::now();
                                fast.arm(now);
                                slow.arm(now);
                                tx.send(SessionMessage::Phase(SessionPhase::Running)).ok();
                                tx.send(SessionMessage::Log("▶ Session resumed.".to_owned()))
                                    .ok();
                            }
                            SessionPhase::Idle | SessionPhase::Ended => {}
                        },
                        SessionCommand::Restart => {
                            fast.cancel();
                            slow.cancel();
                            match driver.restart(epoch.elapsed().as_secs_f64()) {
                                Ok(()) => {
                                    let now = Instant::now();
                                    fast.arm(now);
                                    slow.arm(now);
                                    tx.send(SessionMessage::Phase(SessionPhase::Running)).ok();
                                    tx.send(SessionMessage::Elapsed(0)).ok();
                                    tx.send(SessionMessage::Log("🔄 Session restarted.".to_owned()))
                                        .ok();
                                }
                                Err(err) => log::error!("restart failed: {err}"),
                            }
                        }
                        SessionCommand::End => {
                            if matches!(
                                driver.phase(),
                                SessionPhase::Running | SessionPhase::Paused
                            ) {
                                fast.cancel();
                                slow.cancel();
                                match driver.end(&mut jitter) {
                                    Ok(score) => {
                                        tx.send(SessionMessage::Phase(SessionPhase::Ended)).ok();
                                        tx.send(SessionMessage::Score(score)).ok();
                                        let record = SessionRecord::new(
                                            score,
                                            category.label(),
                                            driver.elapsed_seconds(),
                                            history::unix_now(),
                                        );
                                        match store.append(&record) {
                                            Ok(()) => {
                                                tx.send(SessionMessage::Log(
                                                    "💾 Session saved.".to_owned(),
                                                ))
                                                .ok();
                                            }
                                            Err(err) => {
                                                log::warn!("could not persist session: {err}");
                                                tx.send(SessionMessage::Log(
                                                    "⚠ Could not save session.".to_owned(),
                                                ))
                                                .ok();
                                            }
                                        }
                                    }
                                    Err(err) => log::error!("end failed: {err}"),
                                }
                            }
                        }
                        SessionCommand::SetCategory(new_category) => category = new_category,
                        SessionCommand::LoadHistory => match store.load_recent(50) {
                            Ok(records) => {
                                tx.send(SessionMessage::History(records)).ok();
                            }
                            Err(err) => {
                                log::warn!("could not load history: {err}");
                                tx.send(SessionMessage::Log(
                                    "⚠ Could not load session history.".to_owned(),
                                ))
                                .ok();
                            }
                        },
                        SessionCommand::ExportSnapshot => {
                            let time = epoch.elapsed().as_secs_f64();
                            match export_snapshot(driver.latest_frame(), time) {
                                Ok(paths) => {
                                    for path in paths {
                                        tx.send(SessionMessage::Log(format!(
                                            "💾 Snapshot saved: {}",
                                            path.display()
                                        )))
                                        .ok();
                                    }
                                }
                                Err(err) => {
                                    log::warn!("snapshot export failed: {err:#}");
                                    tx.send(SessionMessage::Log(
                                        "⚠ Snapshot export failed.".to_owned(),
                                    ))
                                    .ok();
                                }
                            }
                        }
                    }
                } else {
                    break;
                }
            }

            // 2. Deliver due ticks on the two cadences.
            if driver.phase() == SessionPhase::Running {
                let now = Instant::now();
                for _ in 0..fast.poll(now) {
                    if let Err(err) = driver.tick_fast(epoch.elapsed().as_secs_f64()) {
                        log::error!("frame refresh failed: {err}");
                    }
                }
                for _ in 0..slow.poll(now) {
                    driver.tick_slow();
                    tx.send(SessionMessage::Elapsed(driver.elapsed_seconds()))
                        .ok();
                }
                thread::sleep(Duration::from_millis(5));
            } else {
                thread::sleep(Duration::from_millis(50));
            }
        }
    });
}

/// Write the live frame and the three-band overlay as PNG files.
fn export_snapshot(frame: &[f64], time_secs: f64) -> anyhow::Result<Vec<PathBuf>> {
    let style = PlotStyle::default();
    let stamp = history::unix_now();

    let frame_png = render_frame_png(frame, &style).context("render session frame")?;
    let frame_path = PathBuf::from(format!("cognisync_session_{stamp}.png"));
    std::fs::write(&frame_path, frame_png)
        .with_context(|| format!("write {}", frame_path.display()))?;

    let band_png =
        render_band_png(frame.len(), time_secs, &style).context("render band overlay")?;
    let band_path = PathBuf::from(format!("cognisync_bands_{stamp}.png"));
    std::fs::write(&band_path, band_png)
        .with_context(|| format!("write {}", band_path.display()))?;

    Ok(vec![frame_path, band_path])
}
