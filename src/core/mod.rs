//! Core types for contrast VIF estimation.

mod design;
mod na_action;
mod options;
mod result;

pub use design::{DesignError, DesignMatrix};
pub use na_action::{NaAction, NaError, NaHandler, NaInfo};
pub use options::{OptionsError, VifOptions, VifOptionsBuilder};
pub use result::{ContrastVif, ContrastVifs};
