pub mod client;
pub mod service;

pub use client::SchedulingClient;
pub use service::SchedulingService;
