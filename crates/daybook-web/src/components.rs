mod calendar_panel;
mod folder_panel;
mod page_tabs;
mod task_composer;
mod task_list_panel;
mod task_row;

pub use calendar_panel::CalendarPanel;
pub use folder_panel::FolderPanel;
pub use page_tabs::PageTabs;
pub use task_composer::TaskComposer;
pub use task_list_panel::TaskListPanel;
pub use task_row::TaskRow;
