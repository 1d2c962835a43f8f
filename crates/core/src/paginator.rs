//! Visible window computation and cursor stepping.

use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Tracks the first visible row between frames so the window only slides
/// when the active row would otherwise leave it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paginator {
    start: usize,
}

impl Paginator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 0-based half-open range of rows to display for a 1-based `active`.
    pub fn window(&mut self, active: usize, total: usize, page_size: usize) -> Range<usize> {
        let page_size = page_size.max(1);
        if !is_paginated(total, page_size) {
            self.start = 0;
            return 0..total;
        }

        let current = active.clamp(1, total) - 1;
        if current < self.start {
            self.start = current;
        } else if current >= self.start + page_size {
            self.start = current + 1 - page_size;
        }
        self.start = self.start.min(total - page_size);

        self.start..self.start + page_size
    }

    pub fn reset(&mut self) {
        self.start = 0;
    }
}

pub fn is_paginated(total: usize, page_size: usize) -> bool {
    total > page_size
}

/// Position above `active`, wrapping to the bottom when `cycle` is set.
pub fn step_up(active: usize, total: usize, cycle: bool) -> usize {
    match (active, total) {
        (_, 0) => active,
        (1, _) if cycle => total,
        (1, _) => 1,
        _ => active - 1,
    }
}

/// Position below `active`, wrapping to the top when `cycle` is set.
pub fn step_down(active: usize, total: usize, cycle: bool) -> usize {
    if total == 0 {
        return active;
    }
    if active >= total {
        return if cycle { 1 } else { total };
    }
    active + 1
}
