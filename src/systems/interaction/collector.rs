use std::collections::HashMap;

use tracing::trace;

use crate::core::Vec2;
use crate::domain::{
    ActorHandle, InteractionItem, IntrusionHit, IntrusionQuery, LayerMask, SurfaceTransform, VelocityProvider,
};

/// Which way a probe walks along the surface line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ProbeDirection {
    LeftToRight,
    RightToLeft,
}

/// Horizontal range of the surface line that may collect interactions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuerySpan {
    pub left: f32,
    pub right: f32,
    /// World Y of the surface line
    pub height: f32,
}

impl QuerySpan {
    /// Intersection of the surface extent and the simulated window.
    /// `None` when they don't overlap (`left >= right`).
    pub fn intersect(surface: &SurfaceTransform, window_center: f32, window_width: f32) -> Option<Self> {
        let half = window_width * 0.5;
        let left = surface.left().max(window_center - half);
        let right = surface.right().min(window_center + half);
        // Written as !(a < b) so NaN bounds also count as degenerate
        if !(left < right) {
            return None;
        }
        Some(Self {
            left,
            right,
            height: surface.top(),
        })
    }
}

/// Per-tick outcome of a collection pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollectStats {
    pub kept: usize,
    /// Distinct actors found beyond `max_items`
    pub dropped: usize,
}

/// Turns raw probe hits into at most `max_items` interaction items.
///
/// Scratch storage is kept between ticks; nothing is allocated once the
/// collector has seen its largest tick.
pub struct InteractionCollector {
    enabled: bool,
    layers: LayerMask,
    max_items: usize,
    hits: Vec<IntrusionHit>,
    order: Vec<ActorHandle>,
    pending: HashMap<ActorHandle, InteractionItem>,
    items: Vec<InteractionItem>,
    stats: CollectStats,
}

impl InteractionCollector {
    pub fn new(enabled: bool, layers: LayerMask, max_items: usize) -> Self {
        Self {
            enabled,
            layers,
            max_items,
            hits: Vec::with_capacity(max_items * 2),
            order: Vec::with_capacity(max_items),
            pending: HashMap::with_capacity(max_items),
            items: Vec::with_capacity(max_items),
            stats: CollectStats::default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Items from the last `collect`
    pub fn items(&self) -> &[InteractionItem] {
        &self.items
    }

    pub fn stats(&self) -> CollectStats {
        self.stats
    }

    /// Probe the surface line in both directions and rebuild the item list.
    ///
    /// Positions in the result are surface-local. An actor keeps the slot it
    /// got from the first probe that saw it; the reverse probe only refines
    /// its end position.
    pub fn collect(
        &mut self,
        surface: &SurfaceTransform,
        window_center: f32,
        window_width: f32,
        query: &dyn IntrusionQuery,
        velocities: &dyn VelocityProvider,
    ) -> &[InteractionItem] {
        self.order.clear();
        self.pending.clear();
        self.items.clear();
        self.stats = CollectStats::default();

        if !self.enabled || self.max_items == 0 {
            return &self.items;
        }
        let Some(span) = QuerySpan::intersect(surface, window_center, window_width) else {
            return &self.items;
        };

        let left = Vec2::new(span.left, span.height);
        let right = Vec2::new(span.right, span.height);
        self.probe(surface, left, right, ProbeDirection::LeftToRight, query, velocities);
        self.probe(surface, right, left, ProbeDirection::RightToLeft, query, velocities);

        let found = self.order.len();
        for handle in self.order.iter().take(self.max_items) {
            if let Some(item) = self.pending.get(handle) {
                self.items.push(*item);
            }
        }
        self.stats = CollectStats {
            kept: self.items.len(),
            dropped: found.saturating_sub(self.max_items),
        };

        trace!(
            kept = self.stats.kept,
            dropped = self.stats.dropped,
            "interaction items collected"
        );
        &self.items
    }

    fn probe(
        &mut self,
        surface: &SurfaceTransform,
        from: Vec2,
        to: Vec2,
        direction: ProbeDirection,
        query: &dyn IntrusionQuery,
        velocities: &dyn VelocityProvider,
    ) {
        self.hits.clear();
        query.query_intrusions(from, to, self.layers, self.max_items * 2, &mut self.hits);

        let half_width = surface.width() * 0.5;
        let top = surface.top();
        let clamp_local = |world_x: f32| surface.to_local_x(world_x).clamp(-half_width, half_width);

        for hit in &self.hits {
            let Some(source) = velocities.velocity_at(hit.actor) else {
                continue;
            };
            let local = clamp_local(hit.point.x);

            if let Some(item) = self.pending.get_mut(&hit.actor) {
                if direction == ProbeDirection::RightToLeft {
                    item.end_position = local;
                }
                continue;
            }

            // Missing bound falls back to the actor's own edge on that side
            let (start_position, end_position) = match direction {
                ProbeDirection::LeftToRight => (local, clamp_local(hit.extent.max.x)),
                ProbeDirection::RightToLeft => (clamp_local(hit.extent.min.x), local),
            };
            let velocity = source.velocity();

            self.order.push(hit.actor);
            self.pending.insert(
                hit.actor,
                InteractionItem {
                    start_position,
                    end_position,
                    horizontal_velocity: velocity.x,
                    vertical_velocity: velocity.y,
                    upper_extent: (hit.extent.max.y - top).max(0.0),
                    lower_extent: (top - hit.extent.min.y).max(0.0),
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Aabb;
    use crate::domain::{ActorKind, IntrusionScene, NoIntrusions};

    /// 20 units wide, surface line at y = 0
    fn surface() -> SurfaceTransform {
        SurfaceTransform::new(0.0, -1.0, 20.0, 2.0)
    }

    fn body(scene: &mut IntrusionScene, cx: f32, w: f32, vy: f32) -> ActorHandle {
        scene.add_actor(
            ActorKind::PhysicsActor,
            Aabb::from_center(cx, 0.0, w, 1.0),
            Vec2::new(0.0, vy),
            1,
        )
    }

    #[test]
    fn both_probes_bound_one_item_per_actor() {
        let mut scene = IntrusionScene::new();
        body(&mut scene, 2.0, 1.0, -3.0);

        let mut collector = InteractionCollector::new(true, 1, 8);
        let items = collector.collect(&surface(), 0.0, 64.0, &scene, &scene);

        assert_eq!(items.len(), 1);
        assert!((items[0].start_position - 1.5).abs() < 1e-5);
        assert!((items[0].end_position - 2.5).abs() < 1e-5);
        assert_eq!(items[0].vertical_velocity, -3.0);
        assert!((items[0].upper_extent - 0.5).abs() < 1e-6);
        assert!((items[0].lower_extent - 0.5).abs() < 1e-6);
    }

    #[test]
    fn actor_straddling_the_edge_keeps_a_clamped_bound() {
        let mut scene = IntrusionScene::new();
        // Sticks out past the right edge (x = 10)
        body(&mut scene, 10.0, 2.0, 1.0);

        let mut collector = InteractionCollector::new(true, 1, 8);
        let items = collector.collect(&surface(), 0.0, 64.0, &scene, &scene);

        assert_eq!(items.len(), 1);
        assert!((items[0].start_position - 9.0).abs() < 1e-5);
        assert!((items[0].end_position - 10.0).abs() < 1e-5);
    }

    /// Scene that only answers probes running in one direction
    struct OneWay<'a> {
        scene: &'a IntrusionScene,
        left_to_right: bool,
    }

    impl IntrusionQuery for OneWay<'_> {
        fn query_intrusions(
            &self,
            line_start: Vec2,
            line_end: Vec2,
            layers: LayerMask,
            max_hits: usize,
            out: &mut Vec<IntrusionHit>,
        ) {
            if (line_start.x < line_end.x) == self.left_to_right {
                self.scene.query_intrusions(line_start, line_end, layers, max_hits, out);
            }
        }
    }

    #[test]
    fn left_hit_only_defaults_end_to_clamped_max_edge() {
        let mut scene = IntrusionScene::new();
        // Extent 9..11, right surface edge at 10
        body(&mut scene, 10.0, 2.0, 1.0);
        let query = OneWay { scene: &scene, left_to_right: true };

        let mut collector = InteractionCollector::new(true, 1, 8);
        let items = collector.collect(&surface(), 0.0, 64.0, &query, &scene);

        assert_eq!(items.len(), 1);
        assert!((items[0].start_position - 9.0).abs() < 1e-5);
        assert_eq!(items[0].end_position, 10.0);
    }

    #[test]
    fn right_hit_only_defaults_start_to_clamped_min_edge() {
        let mut scene = IntrusionScene::new();
        // Extent -11..-9, left surface edge at -10
        body(&mut scene, -10.0, 2.0, 1.0);
        let query = OneWay { scene: &scene, left_to_right: false };

        let mut collector = InteractionCollector::new(true, 1, 8);
        let items = collector.collect(&surface(), 0.0, 64.0, &query, &scene);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].start_position, -10.0);
        assert!((items[0].end_position - -9.0).abs() < 1e-5);
    }

    #[test]
    fn hits_outside_the_simulated_window_are_ignored() {
        let mut scene = IntrusionScene::new();
        body(&mut scene, -8.0, 1.0, 1.0);
        body(&mut scene, 3.0, 1.0, 1.0);

        let mut collector = InteractionCollector::new(true, 1, 8);
        // Window covers x in [0, 6]
        let items = collector.collect(&surface(), 3.0, 6.0, &scene, &scene);
        assert_eq!(items.len(), 1);
        assert!(items[0].center() > 0.0);
    }

    #[test]
    fn disjoint_window_or_disabled_collects_nothing() {
        let mut scene = IntrusionScene::new();
        body(&mut scene, 0.0, 1.0, 1.0);

        let mut collector = InteractionCollector::new(true, 1, 8);
        assert!(collector.collect(&surface(), 100.0, 10.0, &scene, &scene).is_empty());

        let mut disabled = InteractionCollector::new(false, 1, 8);
        assert!(disabled.collect(&surface(), 0.0, 64.0, &scene, &scene).is_empty());
    }

    #[test]
    fn overflow_is_capped_and_counted() {
        let mut scene = IntrusionScene::new();
        for i in 0..6 {
            body(&mut scene, -7.5 + i as f32 * 3.0, 0.5, 1.0);
        }

        let mut collector = InteractionCollector::new(true, 1, 4);
        let kept = collector.collect(&surface(), 0.0, 64.0, &scene, &scene).len();
        assert_eq!(kept, 4);
        assert_eq!(collector.stats(), CollectStats { kept: 4, dropped: 2 });
    }

    #[test]
    fn unresolvable_velocity_skips_the_hit() {
        let mut scene = IntrusionScene::new();
        body(&mut scene, 0.0, 1.0, 1.0);

        let mut collector = InteractionCollector::new(true, 1, 8);
        assert!(collector.collect(&surface(), 0.0, 64.0, &scene, &NoIntrusions).is_empty());
    }

    #[test]
    fn layer_mask_filters_actors() {
        let mut scene = IntrusionScene::new();
        scene.add_actor(ActorKind::PhysicsActor, Aabb::from_center(0.0, 0.0, 1.0, 1.0), Vec2::zero(), 4);

        let mut collector = InteractionCollector::new(true, 1, 8);
        assert!(collector.collect(&surface(), 0.0, 64.0, &scene, &scene).is_empty());

        let mut collector = InteractionCollector::new(true, 4 | 1, 8);
        assert_eq!(collector.collect(&surface(), 0.0, 64.0, &scene, &scene).len(), 1);
    }
}
