//! Data models for the brief composer
//!
//! Brief and product records, the upload draft, and the server response
//! bodies for both submission flows.

mod brief;
mod response;
mod upload;

pub use brief::*;
pub use response::*;
pub use upload::*;
