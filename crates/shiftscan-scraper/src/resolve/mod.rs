//! Field resolution: turning upstream shapes into [`ShiftCandidate`]s.
//!
//! [`ShiftCandidate`]: shiftscan_core::ShiftCandidate

mod api;
mod clock;
mod html;

pub use api::resolve_api_shift;
pub use clock::to_24_hour;
pub use html::resolve_page_shifts;
