#![allow(non_snake_case)]

mod engine;
mod error;
mod exporter;
mod model;
mod nbs_importer;
mod reader;
mod util;

#[cfg(test)]
mod test_support;

pub use engine::book::*;
pub use engine::note_grid::*;
pub use engine::*;
pub use error::*;
pub use exporter::*;
pub use model::config::*;
pub use model::instruments::*;
pub use model::mapper::*;
pub use model::song::*;
pub use nbs_importer::*;
pub use reader::*;
pub use util::*;
