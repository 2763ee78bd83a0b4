//! Export orchestration.
//!
//! Turns the selected shape into a cropped PNG mosaic:
//!
//! ```text
//! shape → bounds → zoom → tile grid → budget gate → fetch (bounded, cancellable)
//!       → assemble → crop → encode → deliver
//! ```
//!
//! [`ExportOrchestrator`] runs one job at a time and tracks it through the
//! [`ExportState`] lifecycle. Progress goes to a [`ProgressSink`]; the
//! finished PNG is handed back to the caller, which passes it to
//! [`FileDelivery`] or wraps it in an [`HttpImageResponse`].

mod context;
mod delivery;
mod error;
mod estimate;
mod job;
mod orchestrator;
mod progress;
mod state;

pub use context::{DrawingMode, MapView, OrchestratorContext, ShapeChangedCallback, StaticMapView};
pub use delivery::{FileDelivery, HttpImageResponse, EXPORT_CACHE_CONTROL, PNG_CONTENT_TYPE};
pub use error::ExportError;
pub use estimate::{estimate, ExportEstimate, ZoomStrategy};
pub use job::{ExportJob, InvalidTransition};
pub use orchestrator::{ExportOrchestrator, ExportOutcome};
pub use progress::{ChannelProgress, NoProgress, ProgressEvent, ProgressSink};
pub use state::ExportState;
