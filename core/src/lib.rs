pub mod context;
pub mod controller;
pub mod filter;
pub mod layout;
pub mod pool;
pub mod render;
pub mod sort;
pub mod status;

// Re-exports for convenience
pub use auragrid_types::*;
pub use context::{AppConfigExt, ConfigError, parse_config};
pub use controller::{ConfigChange, DataMode, OverlayController, TickReport};
pub use filter::filter_statuses;
pub use layout::{GridLayout, Point, Size};
pub use pool::{ReconcileReport, SlotChange, SlotHandle, SlotPool};
pub use render::{DisplayOptions, RenderSink};
pub use sort::sort_statuses;
pub use status::{
    PreviewSource, SourceError, StaticSource, StatusCategory, StatusKey, StatusRecord,
    StatusSource,
};
