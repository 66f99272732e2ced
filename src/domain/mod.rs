// Domain layer: song models and the ports the shell and client are written against.

pub mod model;
pub mod ports;
