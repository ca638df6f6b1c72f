// Domain layer: album records and the ports the loader talks through.

pub mod model;
pub mod ports;
