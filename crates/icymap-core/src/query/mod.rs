//! Backend-neutral query values.
//!
//! Pure data: filters, updates and select options are built here and handed
//! to an execution layer. The in-memory `matches` / `apply` helpers exist for
//! backends without native support and for tests; they never touch storage.

mod filter;
mod normalize;
mod select;
mod update;

#[cfg(test)]
mod tests;

pub use filter::{BackendFilter, FieldFilter, Filter, FilterOp, FilterOperand};
pub use select::{SelectOption, SelectWindow, SortDirection};
pub use update::{Update, UpdateOp};
