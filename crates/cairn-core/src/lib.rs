pub mod attrs;
pub mod equality;
pub mod error;
pub mod order;
pub mod pretty;
pub mod value;

pub use attrs::Attributes;
pub use equality::Equality;
pub use error::{CairnError, Result};
pub use order::ex_order;
pub use pretty::{format_value, FormatFn, Printer};
pub use value::Value;
