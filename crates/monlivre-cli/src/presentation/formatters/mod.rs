pub mod date;
pub mod style;

pub use date::{due_label, format_date, plural};
pub use style::{Tone, paint};
