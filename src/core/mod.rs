pub mod export;
pub mod generator;
pub mod input;
pub mod normalizer;
pub mod state;

pub use crate::domain::model::{Domain, GeneratedBatch};
pub use crate::domain::ports::{BatchStore, Clipboard, ConfigProvider, Storage};
pub use crate::utils::error::Result;
