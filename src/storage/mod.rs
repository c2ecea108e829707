pub mod compactor;
pub mod file;
pub mod trait_def;

pub use compactor::Compactor;
pub use file::FileStore;
pub use trait_def::{StoreError, StoreResult, UrlStore};
