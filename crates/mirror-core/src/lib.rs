pub mod session;
pub mod runtime;
pub mod ports;
pub mod event_bus;

#[cfg(test)]
mod tests;
