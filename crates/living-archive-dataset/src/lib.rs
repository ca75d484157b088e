//! Living Archive dataset handling.
//!
//! The archive is a JSON array of entity records. This crate loads it
//! (from a string, a file, or the copy bundled into the binary), validates
//! it, brings records up to the current record layout, and writes it back.
//!
//! # Example
//!
//! ```
//! let entities = living_archive_dataset::bundled().expect("bundled dataset is valid");
//! assert!(entities.iter().any(|entity| entity.name() == "Anansi"));
//! ```

pub mod error;
pub mod normalize;

mod loader;

pub use error::{DatasetError, Issue};
pub use loader::{bundled, load_file, load_str, save_file, to_json};
pub use normalize::{STYLE_VARIANTS, normalize, normalize_all};
