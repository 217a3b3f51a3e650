pub mod dataset;
pub mod view;
pub mod window;

#[cfg(test)]
mod test;

pub use dataset::{Dataset, RowId};
pub use view::{SortDirection, SortSpec, TableEngine, ViewSnapshot};
pub use window::{Window, WindowState};
