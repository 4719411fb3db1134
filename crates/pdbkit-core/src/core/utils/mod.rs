//! Small helpers shared by the record and transform modules.

pub mod natural;
pub mod paths;
