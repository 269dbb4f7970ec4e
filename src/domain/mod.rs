//! Domain layer - entities, value objects, and the projection engine

pub mod entities;
pub mod services;
pub mod value_objects;
