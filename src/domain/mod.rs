// Domain layer: cart model and the ports its collaborators implement.

pub mod model;
pub mod ports;
