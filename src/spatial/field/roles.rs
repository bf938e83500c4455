use super::WaveField;

/// Fields in the rotation: two history steps plus the write target
pub const BUFFER_COUNT: usize = 3;

/// Temporal role of a field within one step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferRole {
    /// Two steps ago
    PrePre,
    /// Previous step (the latest finished field between steps)
    Pre,
    /// Being written this step
    Dest,
}

/// Arena of three same-length fields plus a rotating role index
#[derive(Debug)]
pub struct WaveBufferSet {
    fields: [WaveField; BUFFER_COUNT],
    current: usize,
}

impl WaveBufferSet {
    pub(crate) fn new(length: usize, anchor: f32) -> Self {
        Self {
            fields: [
                WaveField::new(length, anchor),
                WaveField::new(length, anchor),
                WaveField::new(length, anchor),
            ],
            current: 0,
        }
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.fields[0].len()
    }

    /// Slot currently playing `role`
    #[inline]
    pub fn role_index(&self, role: BufferRole) -> usize {
        let offset = match role {
            BufferRole::PrePre => 0,
            BufferRole::Pre => 1,
            BufferRole::Dest => 2,
        };
        (self.current + offset) % BUFFER_COUNT
    }

    #[inline]
    pub fn field(&self, role: BufferRole) -> &WaveField {
        &self.fields[self.role_index(role)]
    }

    #[inline]
    pub fn field_mut(&mut self, role: BufferRole) -> &mut WaveField {
        let idx = self.role_index(role);
        &mut self.fields[idx]
    }

    /// Most recently completed field (Pre between steps)
    #[inline]
    pub fn latest(&self) -> &WaveField {
        self.field(BufferRole::Pre)
    }

    /// Disjoint borrows for one step: (PrePre, Pre, Dest)
    pub fn stencil_mut(&mut self) -> (&WaveField, &WaveField, &mut WaveField) {
        let [f0, f1, f2] = &mut self.fields;
        match self.current {
            0 => (&*f0, &*f1, f2),
            1 => (&*f1, &*f2, f0),
            _ => (&*f2, &*f0, f1),
        }
    }

    /// Advance the role table by one: Dest becomes Pre, Pre becomes PrePre,
    /// the oldest field is recycled as the next Dest. No cell data moves.
    #[inline]
    pub fn rotate(&mut self) {
        self.current = (self.current + 1) % BUFFER_COUNT;
    }

    pub fn fields(&self) -> &[WaveField; BUFFER_COUNT] {
        &self.fields
    }

    pub(crate) fn release(&mut self) {
        for f in self.fields.iter_mut() {
            f.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_cycles_roles_without_copying() {
        let mut set = WaveBufferSet::new(8, 0.0);
        set.field_mut(BufferRole::Dest).fill(3.0);
        let dest_slot = set.role_index(BufferRole::Dest);

        set.rotate();
        assert_eq!(set.role_index(BufferRole::Pre), dest_slot);
        assert_eq!(set.latest().samples()[0], 3.0);

        set.rotate();
        assert_eq!(set.role_index(BufferRole::PrePre), dest_slot);

        set.rotate();
        assert_eq!(set.role_index(BufferRole::Dest), dest_slot);
    }

    #[test]
    fn roles_are_always_distinct() {
        let mut set = WaveBufferSet::new(4, 0.0);
        for _ in 0..7 {
            let a = set.role_index(BufferRole::PrePre);
            let b = set.role_index(BufferRole::Pre);
            let c = set.role_index(BufferRole::Dest);
            assert!(a != b && b != c && a != c);
            set.rotate();
        }
    }

    #[test]
    fn stencil_mut_matches_role_table() {
        let mut set = WaveBufferSet::new(2, 0.0);
        for step in 0..3 {
            set.field_mut(BufferRole::PrePre).fill(1.0);
            set.field_mut(BufferRole::Pre).fill(2.0);
            set.field_mut(BufferRole::Dest).fill(3.0);
            let (pp, p, d) = set.stencil_mut();
            assert_eq!((pp.samples()[0], p.samples()[0], d.samples()[0]), (1.0, 2.0, 3.0), "step {}", step);
            set.rotate();
        }
    }

    #[test]
    fn lengths_match_after_any_rotation() {
        let mut set = WaveBufferSet::new(33, 0.0);
        for _ in 0..10 {
            set.rotate();
            assert!(set.fields().iter().all(|f| f.len() == set.length()));
        }
    }
}
