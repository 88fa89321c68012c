//! Bounded cursor over the step list.

/// Position within `[0, total_steps - 1]`
///
/// Every movement clamps; none can fail. An empty trace pins the
/// cursor at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepNavigator {
    index: usize,
    total_steps: usize,
}

impl StepNavigator {
    /// New navigator positioned on the first step
    pub fn new(total_steps: usize) -> Self {
        Self {
            index: 0,
            total_steps,
        }
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    fn last_index(&self) -> usize {
        self.total_steps.saturating_sub(1)
    }

    pub fn first(&mut self) -> usize {
        self.index = 0;
        self.index
    }

    pub fn last(&mut self) -> usize {
        self.index = self.last_index();
        self.index
    }

    pub fn prev(&mut self) -> usize {
        self.index = self.index.saturating_sub(1);
        self.index
    }

    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1).min(self.last_index());
        self.index
    }

    /// Jump to `n`, clamped into range (negative and oversized inputs included)
    pub fn go_to(&mut self, n: i64) -> usize {
        let last = i64::try_from(self.last_index()).unwrap_or(i64::MAX);
        // clamp into [0, last] so the cast back is lossless
        self.index = n.clamp(0, last) as usize;
        self.index
    }

    /// Step before the current one, derived on demand
    pub fn previous_index(&self) -> Option<usize> {
        self.index.checked_sub(1)
    }

    /// Step after the current one, derived on demand
    pub fn next_index(&self) -> Option<usize> {
        let next = self.index + 1;
        (next < self.total_steps).then_some(next)
    }

    pub fn is_at_start(&self) -> bool {
        self.index == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.index == self.last_index()
    }
}
