//! Application use cases

pub mod listing;
pub mod submit;

pub use listing::{PageSelection, PageView, paginate};
pub use submit::{SubmitConfig, SubmitError, SubmitPipeline};
