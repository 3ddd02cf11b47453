pub mod access;
pub mod entities;
pub mod errors;
pub mod ports;
pub mod rules;
pub mod value_objects;
