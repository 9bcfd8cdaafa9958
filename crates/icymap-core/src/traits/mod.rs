mod field_value;
mod record;


pub use field_value::FieldValue;
pub use record::{Record, RecordReader};
