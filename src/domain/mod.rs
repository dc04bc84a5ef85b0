// Domain layer: money, records and the store port. No I/O here.

pub mod model;
pub mod money;
pub mod ports;
