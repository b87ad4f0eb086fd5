pub mod broadcast;
pub mod object;
pub mod type_conversion;
