pub mod binding;
pub mod document;
pub mod format;
pub mod render;

pub use binding::{Banner, BannerTone, Field, Region, Table, TableRow, View};
pub use document::Document;
