//! Markdown rendering for the terminal front end.
//!
//! Domain models implement `Display` directly (see [`models`]); wrapper types
//! cover views that need more context than a single record, such as the
//! drawer of all lists or the outcome of an operation.
//!
//! - [`collections`]: [`Drawer`], every list with done/total counts
//! - [`results`]: [`CreateResult`], [`UpdateResult`], [`DeleteResult`]
//! - [`status`]: [`OperationStatus`]
//! - [`datetime`]: [`LocalDateTime`]
//!
//! ```rust
//! use orgaowl_core::{display::DeleteResult, Tasklist};
//!
//! let list = Tasklist::new("Groceries");
//! println!("{}", DeleteResult::new(list));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::Drawer;
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
