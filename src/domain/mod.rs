// Domain layer: request/result models, field vocabulary and ports (interfaces).

pub mod mappings;
pub mod model;
pub mod ports;
