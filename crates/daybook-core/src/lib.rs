//! Task model, derived views, and the
//! persisted task board behind the
//! Daybook front end.

pub mod board;
pub mod calendar;
pub mod config;
pub mod datetime;
pub mod storage;
pub mod store;
pub mod task;
pub mod views;

pub use board::{
  BoardView,
  EditState,
  Intent,
  Page,
  TaskBoard,
  TaskForm
};
pub use config::BoardConfig;
#[cfg(feature = "file-storage")]
pub use storage::FileStorage;
pub use storage::{
  MemoryStorage,
  SlotStorage
};
pub use store::TaskStore;
pub use task::{
  Category,
  Priority,
  Task,
  TaskId
};
pub use views::Folder;
