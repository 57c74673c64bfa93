use crate::nav::wrap_index;

/// What happens to the child cursor on a descend transition. Ascending
/// never has a policy: the parent cursor is always preserved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetPolicy {
    ResetToFirst,
    Preserve,
}

/// Absolute jump target (Home/End). Jumps never wrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Jump {
    First,
    Last,
}

/// Multi-level menu cursor state, parameterized by an overlay-specific
/// level enumeration. Exactly one level is current at a time; each
/// registered level keeps its own cursor so a round trip down and back up
/// returns to the same place.
#[derive(Clone, Debug)]
pub struct NavState<L: Copy + Eq> {
    current: L,
    cursors: Vec<(L, usize)>,
}

impl<L: Copy + Eq> NavState<L> {
    /// `levels` ordered outermost first; the first entry becomes current.
    pub fn new(levels: &[L]) -> Self {
        assert!(!levels.is_empty(), "NavState requires at least one level");
        Self {
            current: levels[0],
            cursors: levels.iter().map(|&level| (level, 0)).collect(),
        }
    }

    pub fn level(&self) -> L {
        self.current
    }

    pub fn index(&self, level: L) -> usize {
        *self.slot(level)
    }

    pub fn current_index(&self) -> usize {
        self.index(self.current)
    }

    pub fn set_index(&mut self, level: L, index: usize) {
        *self.slot_mut(level) = index;
    }

    /// Descend into `child`. The caller has already verified the child
    /// collection is non-empty.
    pub fn enter(&mut self, child: L, reset: ResetPolicy) {
        if reset == ResetPolicy::ResetToFirst {
            self.set_index(child, 0);
        }
        self.current = child;
    }

    /// Ascend to `parent`, preserving its cursor.
    pub fn leave(&mut self, parent: L) {
        self.current = parent;
    }

    /// Sibling move within the current level, wrapping. Caller guards
    /// `count > 0`.
    pub fn move_in(&mut self, direction: isize, count: usize) -> usize {
        let next = wrap_index(self.current_index(), direction, count);
        self.set_index(self.current, next);
        next
    }

    pub fn jump(&mut self, target: Jump, count: usize) -> usize {
        let index = match target {
            Jump::First => 0,
            Jump::Last => count.saturating_sub(1),
        };
        self.set_index(self.current, index);
        index
    }

    /// Pull a cursor back into `[0, count)` after a data refresh shrank
    /// the collection underneath it.
    pub fn clamp(&mut self, level: L, count: usize) {
        let slot = self.slot_mut(level);
        if count == 0 {
            *slot = 0;
        } else if *slot >= count {
            *slot = count - 1;
        }
    }

    fn slot(&self, level: L) -> &usize {
        self.cursors
            .iter()
            .find(|(l, _)| *l == level)
            .map(|(_, index)| index)
            .expect("level not registered with NavState")
    }

    fn slot_mut(&mut self, level: L) -> &mut usize {
        self.cursors
            .iter_mut()
            .find(|(l, _)| *l == level)
            .map(|(_, index)| index)
            .expect("level not registered with NavState")
    }
}
