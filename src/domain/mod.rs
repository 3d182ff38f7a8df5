// Domain layer: transient request/result models and the calculator port.

pub mod model;
pub mod ports;
