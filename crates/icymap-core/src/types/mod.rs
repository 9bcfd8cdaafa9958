mod native;
mod timestamp;

pub use native::NativeValue;
pub use timestamp::Timestamp;
