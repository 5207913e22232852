//! Typed entities for each console collection

mod client;
mod feedback;
mod member;
mod milestone;
mod opportunity;
mod project;
mod stakeholder;
mod status;
mod update;

pub use client::*;
pub use feedback::*;
pub use member::*;
pub use milestone::*;
pub use opportunity::*;
pub use project::*;
pub use stakeholder::*;
pub use status::*;
pub use update::*;
