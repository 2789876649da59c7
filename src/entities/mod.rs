//! Entity records - plain value holders with identity and descriptive fields

pub mod contact;
pub mod money;
pub mod project;

pub use contact::{Contact, ContactRole};
pub use money::{Money, ParseMoneyError};
pub use project::{Project, ProjectDetail};
