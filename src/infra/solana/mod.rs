pub mod client;
pub mod codec;
pub mod idl;

pub use client::{initialize, read_platform_state, ChainGateway, ProgramClient};
