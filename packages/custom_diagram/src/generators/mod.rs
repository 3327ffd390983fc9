//! The diagram generators we ship.

pub mod fluid_containers;
pub mod ore_dictionary;
