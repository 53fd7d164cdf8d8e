//! Per-frame simulation advance
//!
//! One `step` is one 60 Hz frame. The physics constants are per-frame
//! values tuned for that rate, so the frame is the unit of simulation time
//! and wall clocks stay outside (see `driver`).

use super::spawn;
use super::state::{ConfettiState, Phase};
use crate::consts::*;

/// Fire the time-zero spawns and leave `Idle`
///
/// The main burst belongs to the mount itself, not to the first frame:
/// after `start`, the opening explosion is already live at frame 0.
pub fn start(state: &mut ConfettiState) {
    if state.phase != Phase::Idle {
        return;
    }
    state.phase = Phase::Bursting;
    fire_due_spawns(state);
    update_phase(state);
}

/// Advance the celebration by exactly one frame
pub fn step(state: &mut ConfettiState) {
    match state.phase {
        Phase::Idle => start(state),
        Phase::Done => return,
        _ => {}
    }

    state.frame += 1;
    let elapsed = state.elapsed_ms();

    fire_due_spawns(state);

    // Integrate every particle, even fully faded ones; fading hides a
    // particle but never stops its motion
    for p in &mut state.particles {
        p.record_trail();
        p.pos += p.vel;
        p.vel.y += GRAVITY;
        p.vel.x *= DRAG;
        p.rotation += p.rotation_speed;
        p.shimmer += p.shimmer_speed;

        if elapsed > p.fade_start_ms() {
            p.opacity = (p.opacity - FADE_STEP).max(0.0);
        }
    }

    update_phase(state);
}

/// Fire every schedule entry that has come due, in order
fn fire_due_spawns(state: &mut ConfettiState) {
    let elapsed = state.elapsed_ms();
    while state.next_event < state.schedule.len()
        && state.schedule[state.next_event].at_ms <= elapsed
    {
        let kind = state.schedule[state.next_event].kind.clone();
        spawn::apply(state, &kind);
        state.next_event += 1;
    }
}

fn update_phase(state: &mut ConfettiState) {
    if state.elapsed_ms() >= CELEBRATION_MS {
        state.phase = Phase::Done;
        // The run is over; nothing will be drawn again
        state.particles = Vec::new();
    } else if state.pending_spawns() > 0 {
        state.phase = Phase::Bursting;
    } else {
        state.phase = Phase::Settling;
    }
}
