pub mod config;
pub mod solana;
pub mod wallet;
