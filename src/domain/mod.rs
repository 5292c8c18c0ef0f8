// Domain layer: data model and ports. No network or file system code here.

pub mod model;
pub mod ports;
