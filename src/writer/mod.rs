//! Output side: the `.rmd` encoder and the C header export.
pub mod bin;
pub mod c;

pub use bin::{save, to_bytes};
