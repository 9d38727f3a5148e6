//! Lightbox state machine.
//!
//! ```text
//!            open(i)                 next / prev (wrapping)
//! Closed ──────────────▶ Open(i) ◀──────────────┐
//!    ▲                     │  └─────────────────┘
//!    └─────── close ───────┘
//! ```
//!
//! The index always points into the *current* view. Transitions are pure:
//! each takes the view length and returns the next state.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lightbox {
    #[default]
    Closed,
    Open(usize),
}

impl Lightbox {
    /// Open on `index`, or stay closed if it is outside a view of `len`.
    pub fn opened_at(index: usize, len: usize) -> Self {
        if index < len {
            Self::Open(index)
        } else {
            Self::Closed
        }
    }

    pub fn next(self, len: usize) -> Self {
        match self {
            Self::Open(i) if len > 0 => Self::Open((i + 1) % len),
            _ => Self::Closed,
        }
    }

    pub fn prev(self, len: usize) -> Self {
        match self {
            Self::Open(i) if len > 0 => Self::Open((i + len - 1) % len),
            _ => Self::Closed,
        }
    }

    pub fn index(self) -> Option<usize> {
        match self {
            Self::Open(i) => Some(i),
            Self::Closed => None,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open(_))
    }
}
