// Domain layer: core models and ports (interfaces) implemented by the adapters in config/.

pub mod model;
pub mod ports;
