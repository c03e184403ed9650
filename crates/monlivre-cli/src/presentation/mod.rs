//! # Presentation Layer
//!
//! MVVM-style console output for the CLI.
//!
//! ```text
//! [ Handler ] --> [ Presenter ] --> [ ViewModel ] --> [ Renderer ] ==(JSON)==> [ serde_json ] --> stdout
//!  (Controller)    (Converter)        (Data)           (Driver)   ==(Text)==> [ View ] --> stdout
//!                                                                              (Layout)
//! ```
//!
//! ## Rules
//!
//! 1. **ViewModels hold raw data.** Dates stay `NaiveDate`, counts stay
//!    integers. JSON output is an API.
//! 2. **`ViewMode` is density, not shape.** Minimal prints ids only, Compact
//!    one line per item, Standard a table with context, Verbose every field.
//! 3. **`--format json` ignores `ViewMode`** and always dumps the full model.
//! 4. **Notifications travel with the result.** Every action's messages are
//!    part of `CommandResultViewModel`, in both output formats.
//!
//! ## Where does code go?
//!
//! | If you need to... | Go to... |
//! |-------------------|----------|
//! | Add a field to the JSON output | `view_models/` |
//! | Compute a counter or pick a badge | `presenters/` |
//! | Change a color or a column | `views/` |
//! | Format a date or a due-date label | `formatters/` |

pub mod formatters;
pub mod presenters;
pub mod renderers;
pub mod view_models;
pub mod views;

pub use renderers::{ConsoleRenderer, Renderer};
pub use view_models::{
    CommandResultViewModel, CreateView, Guidance, StatusBadge, ViewMode,
};
