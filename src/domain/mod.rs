// Domain layer - Core types shared across the trimmer

pub mod errors;
pub mod model;
