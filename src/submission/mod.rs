pub mod fields;
pub mod forms;
pub mod parser;

pub use fields::{FieldKind, FieldRule};
pub use forms::FormKind;
