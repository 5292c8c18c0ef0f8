pub mod emitter;
pub mod etl;
pub mod registry;
pub mod scanner;
pub mod variant_table;

pub use crate::domain::model::{GameRecord, VariantReport, VariantTable};
pub use crate::domain::ports::{ConfigProvider, ListingSource, Storage};
pub use crate::utils::error::Result;
