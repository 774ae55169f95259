use daybook_core::views::FolderSummary;
use daybook_core::{
  Folder,
  Intent
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FolderPanelProps {
  pub folders:   Vec<FolderSummary>,
  pub active:    Folder,
  pub on_intent: Callback<Intent>
}

#[function_component(FolderPanel)]
pub fn folder_panel(
  props: &FolderPanelProps
) -> Html {
  html! {
      <div class="panel folders">
          <div class="header">{ "Folders" }</div>
          {
              for props.folders.iter().copied().map(|summary| {
                  let on_intent = props.on_intent.clone();
                  let folder = summary.folder;
                  let class = if folder == props.active { "folder active" } else { "folder" };
                  html! {
                      <button
                          type="button"
                          class={class}
                          onclick={move |_| on_intent.emit(Intent::SelectFolder(folder))}
                      >
                          <span class="folder-name">{ folder.label() }</span>
                          <span class="badge">
                              { format!("{}/{}", summary.completed, summary.total) }
                          </span>
                      </button>
                  }
              })
          }
      </div>
  }
}
