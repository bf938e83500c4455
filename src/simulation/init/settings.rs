use tracing::debug;

use crate::domain::SurfaceTransform;

use super::perf_stats::PerfStats;
use super::WaterSurfaceCore;

pub(super) fn enable_perf_metrics(core: &mut WaterSurfaceCore, enabled: bool) {
    core.perf_enabled = enabled;
    if !enabled {
        core.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(core: &WaterSurfaceCore) -> PerfStats {
    core.perf_stats.clone()
}

pub(super) fn set_surface(core: &mut WaterSurfaceCore, surface: SurfaceTransform) {
    if core.surface.is_none() {
        debug!(x = surface.position.x, width = surface.width(), "surface bound");
    }
    core.surface = Some(surface);
}

pub(super) fn clear_surface(core: &mut WaterSurfaceCore) {
    core.surface = None;
}

pub(super) fn set_anchor_target(core: &mut WaterSurfaceCore, target: Option<f32>) {
    // A non-finite target would poison every later window position
    core.anchor_target = target.filter(|x| x.is_finite());
}

/// World X the window follows this tick
pub(super) fn anchor_for(core: &WaterSurfaceCore, surface: &SurfaceTransform) -> f32 {
    core.anchor_target.unwrap_or(surface.position.x)
}
