//! Render-side policy and tag planning.
//!
//! | Module     | Purpose                                    |
//! |------------|--------------------------------------------|
//! | `decision` | Dev-server vs. built-assets choice         |
//! | `tags`     | (url, kind, attributes) declarations       |

mod decision;
mod tags;

pub use decision::{decide, is_dev};
pub use tags::{AssetKind, AssetTag, MarkupEmitter, TagPlanner, render_with};
