pub mod marketplace;

pub use marketplace::MarketplaceService;
