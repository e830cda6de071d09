//! Broadcast bus for lookup events

mod core;
mod impls;
mod publishing;
mod subscription;

pub use core::LookupEventBus;
