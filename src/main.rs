//! Butterfly Knife headless runner
//!
//! Plays one session with a simple scripted pilot, logs what happens and
//! prints the final snapshot as JSON.
//!
//! Usage: `butterfly-knife [SETTINGS.json] [--realtime]`

use std::time::Duration;

use butterfly_knife::Settings;
use butterfly_knife::audio::CuePicker;
use butterfly_knife::consts::{ROUND_SECONDS, TICK_RATE, TICK_SECS};
use butterfly_knife::platform::{Clock, FixedStepClock, MonotonicClock};
use butterfly_knife::sim::{GameOutcome, GameState, SimError, Snapshot, TickInput, tick};

/// Ticks to keep simulating after the outcome is decided
const EPILOGUE_TICKS: u64 = 120;
/// Pilot keeps the butterfly around this height
const CRUISE_HEIGHT: f32 = 300.0;

/// Hover at cruise height and chase the spider horizontally
fn pilot(state: &GameState) -> TickInput {
    let butterfly = &state.butterfly.body;
    let dx = state.spider.pos.x - butterfly.pos.x;
    let horizontal = if dx.abs() < 20.0 { 0 } else { dx.signum() as i8 };
    let flap = butterfly.pos.y < CRUISE_HEIGHT && butterfly.vel.y < 0.0;
    TickInput::new(flap, horizontal)
}

fn run(settings: &Settings, clock: &mut dyn Clock, realtime: bool) -> Result<GameState, SimError> {
    let mut state = GameState::new(clock.now_secs())?;
    let mut cues = CuePicker::new(settings);
    let max_ticks = u64::from(TICK_RATE) * (ROUND_SECONDS as u64 + 5);
    let mut decided_at = None;

    while state.time_ticks < max_ticks {
        let input = pilot(&state);
        tick(&mut state, &input, clock.now_secs());

        for cue in cues.cues_for(&state.events) {
            log::debug!("cue {} pitch {:.2}", cue.path(), cue.pitch);
        }
        if settings.debug {
            log::debug!("knife tip speed: {:.2}", state.knife.tip_speed);
        }
        if state.events.outcome_changed {
            decided_at = Some(state.time_ticks);
        }
        if decided_at.is_some_and(|t| state.time_ticks >= t + EPILOGUE_TICKS) {
            break;
        }
        if realtime {
            std::thread::sleep(Duration::from_secs_f64(TICK_SECS));
        }
    }
    Ok(state)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Butterfly Knife (headless) starting...");

    let mut realtime = false;
    let mut settings_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--realtime" => realtime = true,
            _ => settings_path = Some(arg),
        }
    }
    let settings = settings_path
        .map(Settings::load_or_default)
        .unwrap_or_default();

    let mut clock: Box<dyn Clock> = if realtime {
        Box::new(MonotonicClock::new())
    } else {
        Box::new(FixedStepClock::new())
    };

    let state = match run(&settings, clock.as_mut(), realtime) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Session setup failed: {err}");
            std::process::exit(1);
        }
    };

    let snapshot = Snapshot::capture(&state, settings.debug);
    let banner = snapshot.banner().unwrap_or("Still playing");
    log::info!(
        "{} ({} left, {} ticks)",
        banner,
        snapshot.timer_text(),
        state.time_ticks
    );
    if state.outcome == GameOutcome::Playing {
        log::warn!("Session ended without an outcome");
    }
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to serialize snapshot: {err}"),
    }
}
