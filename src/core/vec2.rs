/// 2D Vector for surface-space calculations
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Linear interpolation, `t = 0` is `self`, `t = 1` is `other`
    pub fn lerp(&self, other: Vec2, t: f32) -> Self {
        *self + (other - *self) * t
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

/// Axis-aligned bounds of an actor's collider in world space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of size `w` x `h` centred on (`cx`, `cy`)
    pub fn from_center(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        let hw = w.abs() * 0.5;
        let hh = h.abs() * 0.5;
        Self {
            min: Vec2::new(cx - hw, cy - hh),
            max: Vec2::new(cx + hw, cy + hh),
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Slab test of the segment `from -> to` against the box.
    ///
    /// Returns the entry parameter `t` in `[0, 1]` (0 when `from` starts inside).
    pub fn segment_entry(&self, from: Vec2, to: Vec2) -> Option<f32> {
        let d = to - from;
        let mut t_min = 0.0f32;
        let mut t_max = 1.0f32;

        for (origin, dir, lo, hi) in [
            (from.x, d.x, self.min.x, self.max.x),
            (from.y, d.y, self.min.y, self.max.y),
        ] {
            if dir.abs() < f32::EPSILON {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir;
            let mut t0 = (lo - origin) * inv;
            let mut t1 = (hi - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_entry_from_both_sides() {
        let b = Aabb::from_center(0.0, 0.0, 2.0, 2.0);
        let left = Vec2::new(-5.0, 0.5);
        let right = Vec2::new(5.0, 0.5);

        let t = b.segment_entry(left, right).expect("hit from left");
        assert!((left.lerp(right, t).x - -1.0).abs() < 1e-5);

        let t = b.segment_entry(right, left).expect("hit from right");
        assert!((right.lerp(left, t).x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn segment_entry_misses_above() {
        let b = Aabb::from_center(0.0, 0.0, 2.0, 2.0);
        assert!(b.segment_entry(Vec2::new(-5.0, 3.0), Vec2::new(5.0, 3.0)).is_none());
    }

    #[test]
    fn segment_starting_inside_enters_at_zero() {
        let b = Aabb::from_center(0.0, 0.0, 2.0, 2.0);
        assert_eq!(b.segment_entry(Vec2::zero(), Vec2::new(5.0, 0.0)), Some(0.0));
    }
}
