pub mod add;
pub mod chart;
pub mod import;
