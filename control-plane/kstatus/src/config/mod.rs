mod types;

pub use types::StatusConfig;
