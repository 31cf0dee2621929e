use super::commands::apply_container_angle;
use super::reclaim::reclaim;
use super::{CupCore, PerfTimer};

pub(super) fn tick(core: &mut CupCore, now_ms: f64) {
    if now_ms.is_finite() && now_ms > core.clock_ms {
        core.clock_ms = now_ms;
    }
    let now = core.clock_ms;

    // Spring-back runs on its own period, independent of frame rate
    if core.tilt.advance(now) {
        apply_container_angle(core);
    }

    let t0 = PerfTimer::start();
    core.bodies.update();
    let update_ms = t0.elapsed_ms();

    // Post-update: sweep strays, then forget fuses of bombs that left
    reclaim(core);
    core.fuses.prune(&core.bodies);
    core.fuses.poll(now, &mut core.bodies, core.detonation_hook.as_mut());

    core.frame += 1;
    let (count, gravity, frame) = (core.object_count(), core.bodies.gravity(), core.frame);
    core.telemetry.record(now, update_ms, count, gravity, frame);
}
