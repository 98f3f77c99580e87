pub mod diagnostics;
pub mod overview;
pub mod setpoints;
