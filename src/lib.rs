pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::marketplace::MarketplaceService;
pub use domain::dashboard::{AdminFlow, DoctorFlow, PatientFlow, Phase};
pub use domain::records::{
    DoctorRecord, DoctorRow, NewDoctorRow, NewQuestionRow, QuestionRecord, QuestionRow,
};
pub use infra::solana;
pub use infra::solana::client::{ChainGateway, ProgramClient};
pub use infra::wallet::{FileWallet, WalletBridge};
pub use storage::directory::DirectoryStore;
pub use storage::postgres::PostgresDirectory;
