//! Custom extractors.

mod json_body;
mod path_id;

pub use json_body::{JsonBody, ValidatedJson};
pub use path_id::{parse_id, PathId};
