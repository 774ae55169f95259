use anyhow::anyhow;
use daybook_core::SlotStorage;

/// `window.localStorage`, looked up on
/// every access.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

fn local_storage()
-> anyhow::Result<web_sys::Storage> {
  web_sys::window()
    .ok_or_else(|| {
      anyhow!("no browser window")
    })?
    .local_storage()
    .map_err(|err| {
      anyhow!(
        "local storage unavailable: {err:?}"
      )
    })?
    .ok_or_else(|| {
      anyhow!("local storage disabled")
    })
}

impl SlotStorage for LocalStorage {
  fn read_slot(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    local_storage()?
      .get_item(key)
      .map_err(|err| {
        anyhow!(
          "failed reading {key}: {err:?}"
        )
      })
  }

  fn write_slot(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    local_storage()?
      .set_item(key, value)
      .map_err(|err| {
        anyhow!(
          "failed writing {key}: {err:?}"
        )
      })
  }
}
