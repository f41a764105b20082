pub mod client;
pub mod trip;
