//! Config change tracking
//!
//! Setters on the controller return a `ConfigChange` describing what the
//! change invalidates, and the controller accumulates the same flags until
//! the next tick consumes them. Nothing subscribes to anything.

use std::ops::{BitOr, BitOrAssign};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigChange {
    /// Grid geometry changed; positions must be recomputed and re-pushed
    pub layout: bool,
    /// Visible slots need their content re-pushed
    pub content: bool,
    /// Pool capacity or strategy changed
    pub pool: bool,
    /// Countdown/stack display options changed
    pub display: bool,
}

impl ConfigChange {
    pub const NONE: Self = Self {
        layout: false,
        content: false,
        pool: false,
        display: false,
    };

    pub const ALL: Self = Self {
        layout: true,
        content: true,
        pool: true,
        display: true,
    };

    pub fn layout() -> Self {
        Self {
            layout: true,
            ..Self::NONE
        }
    }

    pub fn content() -> Self {
        Self {
            content: true,
            ..Self::NONE
        }
    }

    pub fn pool() -> Self {
        Self {
            pool: true,
            ..Self::NONE
        }
    }

    pub fn display() -> Self {
        Self {
            display: true,
            ..Self::NONE
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    /// Return the accumulated flags and clear them
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl BitOr for ConfigChange {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            layout: self.layout || rhs.layout,
            content: self.content || rhs.content,
            pool: self.pool || rhs.pool,
            display: self.display || rhs.display,
        }
    }
}

impl BitOrAssign for ConfigChange {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}
