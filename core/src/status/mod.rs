//! Status records and where they come from
//!
//! - **Records**: immutable per-tick snapshots of one buff or debuff
//! - **Sources**: the game-state reader contract plus fixed and preview sources

mod preview;
mod record;
mod source;

pub use preview::{DEFAULT_PREVIEW_STEP_SECS, PREVIEW_PLAYER_ID, PreviewSource};
pub use record::{PERMANENT_REMAINING, StatusCategory, StatusKey, StatusRecord};
pub use source::{SourceError, StaticSource, StatusSource};
