// Adapters layer: transports in front of the formula library.

pub mod http;
