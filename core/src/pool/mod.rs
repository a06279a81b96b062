//! Slot pooling
//!
//! Visual slots are allocated once, up to the overlay's `max_items`, and
//! reused forever after: bound to a record while in use, hidden (never
//! destroyed) while idle.
//!
//! ```text
//!   sorted records ──► reconcile ──► [Slot 0][Slot 1][Slot 2] ... [Slot n]
//!                          │              │
//!                          ▼              ▼
//!                    ReconcileReport   SlotHandle ──► RenderSink
//! ```

mod reconcile;
mod slot;


pub use reconcile::{ReconcileReport, SlotPool};
pub use slot::{Slot, SlotChange, SlotHandle};
