//! Manifest model and resolution engine.
//!
//! | Module       | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `record`     | One chunk: classification + URL derivation     |
//! | `collection` | Ordered record collection + filter vocabulary  |
//! | `reader`     | File reading, parsing, canonical ordering      |

mod collection;
mod reader;
mod record;

pub use collection::{Filter, ManifestRecords};
pub use reader::ManifestReader;
pub use record::ManifestRecord;
