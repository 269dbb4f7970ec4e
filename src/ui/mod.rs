//! Console presentation - views render results to strings, main prints them

pub mod text;
pub mod views;
