pub mod event_bus;
pub mod extract;
pub mod ports;
pub mod controller;
