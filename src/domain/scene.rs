use noise::{NoiseFn, Perlin};

use crate::core::{Aabb, Vec2};

use super::interaction::{
    ActorHandle, IntrusionHit, IntrusionQuery, LayerMask, VelocityProvider, VelocitySource,
};

const NOISE_SEED: u32 = 0x5EA5_1DE;

/// Noise-driven vertical bobbing for interaction providers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseMotion {
    pub frequency: f32,
    pub amplitude: f32,
}

impl NoiseMotion {
    /// Vertical velocity in [-amplitude, amplitude] at `phase`
    fn sample(&self, perlin: &Perlin, phase: f32) -> f32 {
        let unit = (perlin.get([f64::from(phase), 0.0]) * 0.5 + 0.5).clamp(0.0, 1.0) as f32;
        (unit * 2.0 - 1.0) * self.amplitude
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActorKind {
    /// Velocity is whatever the host last reported
    PhysicsActor,
    /// Declared velocity, optionally replaced by noise over scene time
    InteractionProvider(Option<NoiseMotion>),
}

#[derive(Clone, Copy, Debug)]
pub struct SceneActor {
    pub handle: ActorHandle,
    pub kind: ActorKind,
    pub bounds: Aabb,
    pub velocity: Vec2,
    pub layers: LayerMask,
}

/// Minimal collision world: a flat list of axis-aligned actors.
///
/// Backs the JS facade (the host mirrors its bodies into it each frame) and
/// the tests. Implements both collaborator traits.
pub struct IntrusionScene {
    actors: Vec<SceneActor>,
    next_id: u64,
    time: f32,
    perlin: Perlin,
}

impl Default for IntrusionScene {
    fn default() -> Self {
        Self::new()
    }
}

impl IntrusionScene {
    pub fn new() -> Self {
        Self {
            actors: Vec::new(),
            next_id: 1,
            time: 0.0,
            perlin: Perlin::new(NOISE_SEED),
        }
    }

    /// Add an actor; returns its handle
    pub fn add_actor(&mut self, kind: ActorKind, bounds: Aabb, velocity: Vec2, layers: LayerMask) -> ActorHandle {
        let handle = ActorHandle(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.actors.push(SceneActor {
            handle,
            kind,
            bounds,
            velocity,
            layers,
        });
        handle
    }

    /// Move an actor and report its new velocity. Returns false for unknown handles.
    pub fn update_actor(&mut self, handle: ActorHandle, bounds: Aabb, velocity: Vec2) -> bool {
        match self.actors.iter_mut().find(|a| a.handle == handle) {
            Some(actor) => {
                actor.bounds = bounds;
                actor.velocity = velocity;
                true
            }
            None => false,
        }
    }

    pub fn remove_actor(&mut self, handle: ActorHandle) -> bool {
        if let Some(idx) = self.actors.iter().position(|a| a.handle == handle) {
            self.actors.swap_remove(idx);
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.actors.clear();
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Scene clock used by noise-driven providers
    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    fn actor(&self, handle: ActorHandle) -> Option<&SceneActor> {
        self.actors.iter().find(|a| a.handle == handle)
    }
}

impl IntrusionQuery for IntrusionScene {
    fn query_intrusions(
        &self,
        line_start: Vec2,
        line_end: Vec2,
        layers: LayerMask,
        max_hits: usize,
        out: &mut Vec<IntrusionHit>,
    ) {
        let mut hits: Vec<(f32, IntrusionHit)> = self
            .actors
            .iter()
            .filter(|a| a.layers & layers != 0)
            .filter_map(|a| {
                let t = a.bounds.segment_entry(line_start, line_end)?;
                Some((
                    t,
                    IntrusionHit {
                        point: line_start.lerp(line_end, t),
                        actor: a.handle,
                        extent: a.bounds,
                    },
                ))
            })
            .collect();

        // Nearest first; handle breaks ties so results don't depend on insertion order
        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.actor.cmp(&b.1.actor)));
        out.extend(hits.into_iter().take(max_hits).map(|(_, hit)| hit));
    }
}

impl VelocityProvider for IntrusionScene {
    fn velocity_at(&self, actor: ActorHandle) -> Option<VelocitySource> {
        let a = self.actor(actor)?;
        Some(match a.kind {
            ActorKind::PhysicsActor => VelocitySource::PhysicsActor(a.velocity),
            ActorKind::InteractionProvider(None) => VelocitySource::InteractionProvider(a.velocity),
            ActorKind::InteractionProvider(Some(motion)) => {
                let phase = motion.frequency * self.time + a.handle.0 as f32 * 0.13;
                VelocitySource::InteractionProvider(Vec2::new(0.0, motion.sample(&self.perlin, phase)))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> (Vec2, Vec2) {
        (Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0))
    }

    #[test]
    fn hits_are_ordered_along_the_probe() {
        let mut scene = IntrusionScene::new();
        let far = scene.add_actor(ActorKind::PhysicsActor, Aabb::from_center(5.0, 0.0, 1.0, 1.0), Vec2::zero(), 1);
        let near = scene.add_actor(ActorKind::PhysicsActor, Aabb::from_center(-5.0, 0.0, 1.0, 1.0), Vec2::zero(), 1);

        let (a, b) = line();
        let mut out = Vec::new();
        scene.query_intrusions(a, b, 1, 8, &mut out);
        assert_eq!(out.iter().map(|h| h.actor).collect::<Vec<_>>(), vec![near, far]);
        assert!((out[0].point.x - -5.5).abs() < 1e-5);

        out.clear();
        scene.query_intrusions(b, a, 1, 8, &mut out);
        assert_eq!(out.iter().map(|h| h.actor).collect::<Vec<_>>(), vec![far, near]);
        assert!((out[0].point.x - 5.5).abs() < 1e-5);
    }

    #[test]
    fn layer_filter_and_hit_cap_apply() {
        let mut scene = IntrusionScene::new();
        for i in 0..4 {
            scene.add_actor(ActorKind::PhysicsActor, Aabb::from_center(i as f32, 0.0, 0.5, 0.5), Vec2::zero(), 1);
        }
        scene.add_actor(ActorKind::PhysicsActor, Aabb::from_center(-2.0, 0.0, 0.5, 0.5), Vec2::zero(), 2);

        let (a, b) = line();
        let mut out = Vec::new();
        scene.query_intrusions(a, b, 1, 3, &mut out);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|h| h.extent.center().x >= 0.0));
    }

    #[test]
    fn velocity_source_follows_actor_kind() {
        let mut scene = IntrusionScene::new();
        let body = scene.add_actor(ActorKind::PhysicsActor, Aabb::default(), Vec2::new(1.0, -2.0), 1);
        let provider = scene.add_actor(ActorKind::InteractionProvider(None), Aabb::default(), Vec2::new(0.0, 3.0), 1);

        assert_eq!(scene.velocity_at(body), Some(VelocitySource::PhysicsActor(Vec2::new(1.0, -2.0))));
        assert_eq!(
            scene.velocity_at(provider),
            Some(VelocitySource::InteractionProvider(Vec2::new(0.0, 3.0)))
        );
        assert_eq!(scene.velocity_at(ActorHandle(999)), None);
    }

    #[test]
    fn noise_provider_bobs_within_amplitude() {
        let mut scene = IntrusionScene::new();
        let motion = NoiseMotion { frequency: 1.7, amplitude: 2.0 };
        let bob = scene.add_actor(ActorKind::InteractionProvider(Some(motion)), Aabb::default(), Vec2::zero(), 1);

        for step in 0..100 {
            scene.set_time(step as f32 * 0.05);
            let v = scene.velocity_at(bob).expect("provider resolves").velocity();
            assert_eq!(v.x, 0.0);
            assert!(v.y.abs() <= 2.0);
            assert_eq!(scene.velocity_at(bob), Some(VelocitySource::InteractionProvider(v)));
        }
    }

    #[test]
    fn noise_provider_actually_moves() {
        let mut scene = IntrusionScene::new();
        let motion = NoiseMotion { frequency: 1.3, amplitude: 1.0 };
        let bob = scene.add_actor(ActorKind::InteractionProvider(Some(motion)), Aabb::default(), Vec2::zero(), 1);

        let speeds: Vec<f32> = (0..50)
            .map(|step| {
                scene.set_time(step as f32 * 0.11);
                scene.velocity_at(bob).expect("provider resolves").velocity().y
            })
            .collect();
        assert!(speeds.iter().any(|v| v.abs() > 1e-3));
    }

    #[test]
    fn update_and_remove_by_handle() {
        let mut scene = IntrusionScene::new();
        let h = scene.add_actor(ActorKind::PhysicsActor, Aabb::default(), Vec2::zero(), 1);
        assert!(scene.update_actor(h, Aabb::from_center(1.0, 1.0, 1.0, 1.0), Vec2::new(0.5, 0.0)));
        assert!(scene.remove_actor(h));
        assert!(!scene.remove_actor(h));
        assert_eq!(scene.actor_count(), 0);
    }
}
