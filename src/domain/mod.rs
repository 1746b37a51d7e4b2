// Domain layer: the record model and the ports the ETL layer talks through.

pub mod model;
pub mod ports;
