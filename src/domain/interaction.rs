//! Interaction contracts between the core and the host's physics world
//!
//! The core never owns actors. Per tick it asks an `IntrusionQuery` what
//! crosses the surface line and a `VelocityProvider` how fast each hit moves.

use serde::Serialize;

use crate::core::{Aabb, Vec2};

/// Bit mask of collision layers an intrusion query may report
pub type LayerMask = u32;

/// Opaque identity of an actor in the host world
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorHandle(pub u64);

/// Where an actor's velocity comes from; resolved once per hit
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VelocitySource {
    /// Rigid-body-like actor with its own simulated velocity
    PhysicsActor(Vec2),
    /// Non-physical actor that declares a velocity for the water to feel
    InteractionProvider(Vec2),
}

impl VelocitySource {
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        match *self {
            VelocitySource::PhysicsActor(v) | VelocitySource::InteractionProvider(v) => v,
        }
    }
}

/// One hit of a directional probe along the surface line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntrusionHit {
    /// First contact point along the probe direction (world space)
    pub point: Vec2,
    pub actor: ActorHandle,
    /// World-space bounds of the actor's collider
    pub extent: Aabb,
}

/// External collision system: line probe restricted to a layer filter.
///
/// Implementations push at most `max_hits` hits into `out`, ordered by
/// distance from `line_start`. `out` is cleared by the caller.
pub trait IntrusionQuery {
    fn query_intrusions(
        &self,
        line_start: Vec2,
        line_end: Vec2,
        layers: LayerMask,
        max_hits: usize,
        out: &mut Vec<IntrusionHit>,
    );
}

/// External velocity lookup; `None` means the hit can't disturb the water
pub trait VelocityProvider {
    fn velocity_at(&self, actor: ActorHandle) -> Option<VelocitySource>;
}

/// Collaborator for hosts that never interact with the surface
#[derive(Clone, Copy, Debug, Default)]
pub struct NoIntrusions;

impl IntrusionQuery for NoIntrusions {
    fn query_intrusions(&self, _: Vec2, _: Vec2, _: LayerMask, _: usize, _: &mut Vec<IntrusionHit>) {}
}

impl VelocityProvider for NoIntrusions {
    fn velocity_at(&self, _: ActorHandle) -> Option<VelocitySource> {
        None
    }
}

/// A horizontal span of the surface disturbed by one actor this tick.
///
/// Positions are in the surface's local frame (0 = surface centre).
/// Layout is `repr(C)` so the item array can be handed to a GPU buffer as-is.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionItem {
    pub start_position: f32,
    pub end_position: f32,
    pub horizontal_velocity: f32,
    pub vertical_velocity: f32,
    /// How far the actor reaches above the surface line (>= 0)
    pub upper_extent: f32,
    /// How far the actor reaches below the surface line (>= 0)
    pub lower_extent: f32,
}

impl InteractionItem {
    #[inline]
    pub fn center(&self) -> f32 {
        (self.start_position + self.end_position) * 0.5
    }

    #[inline]
    pub fn width(&self) -> f32 {
        (self.end_position - self.start_position).abs()
    }
}

/// Placement of the water strip in the world.
///
/// `position` is the strip centre, `size` its world width/height; the
/// interactive surface line is the top edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceTransform {
    pub position: Vec2,
    pub size: Vec2,
}

impl SurfaceTransform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width.abs(), height.abs()),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.position.x - self.size.x * 0.5
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.position.x + self.size.x * 0.5
    }

    /// World Y of the surface line
    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y + self.size.y * 0.5
    }

    /// World X -> surface-local X
    #[inline]
    pub fn to_local_x(&self, world_x: f32) -> f32 {
        world_x - self.position.x
    }
}
