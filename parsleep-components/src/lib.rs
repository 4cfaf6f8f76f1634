pub mod components;
pub mod python;
