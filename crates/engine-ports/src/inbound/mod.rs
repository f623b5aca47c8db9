//! Inbound ports: what adapters pass into the application layer

mod caller;

pub use caller::Caller;
