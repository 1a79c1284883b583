pub mod client;
pub mod directory;
pub mod error;
pub mod orchestrator;
pub mod payload;
pub mod prober;
mod rate_limit;
pub mod resolve;

pub use client::{Endpoints, ShiftSourceClient};
pub use directory::{load_locations, parse_directory, resolve_directory, RAW_CAPTURE_FILE};
pub use error::{DirectoryError, ScraperError};
pub use orchestrator::{fetch_location_payloads, FetchOutcome, Pacing};
pub use payload::{FieldValue, RawShiftPayload, Section};
pub use prober::{probe_locations, ProbeLimits, ProbeOutcome};
pub use resolve::{resolve_api_shift, resolve_page_shifts, to_24_hour};
