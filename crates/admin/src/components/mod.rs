//! Reusable UI building blocks shared by the route handlers.

pub mod data_table;
pub mod select;
pub mod toast;

pub use data_table::{TableBody, TableColumn};
pub use select::{BranchOption, WeekdayOption, branch_options, weekday_options};
pub use toast::{Toast, ToastKind};
