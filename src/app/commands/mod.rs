//! Command execution: target selection and the two run modes.

pub mod delete_branch;
pub mod directory;
pub mod enable;
