use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[cfg(feature = "file-storage")]
pub use self::file::FileStorage;

/// A durable key-value store holding
/// whole string payloads per key.
pub trait SlotStorage {
  fn read_slot(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>>;

  fn write_slot(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()>;
}

/// In-process slots. Clones share the
/// same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
  slots: Rc<RefCell<BTreeMap<String, String>>>
}

impl MemoryStorage {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn with_slot(
    key: &str,
    value: &str
  ) -> Self {
    let storage = Self::default();
    storage
      .slots
      .borrow_mut()
      .insert(
        key.to_string(),
        value.to_string()
      );
    storage
  }
}

impl SlotStorage for MemoryStorage {
  fn read_slot(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    Ok(self.slots.borrow().get(key).cloned())
  }

  fn write_slot(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    self.slots.borrow_mut().insert(
      key.to_string(),
      value.to_string()
    );
    Ok(())
  }
}

#[cfg(feature = "file-storage")]
mod file {
  use std::fs;
  use std::io::Write;
  use std::path::{
    Path,
    PathBuf
  };

  use anyhow::{
    Context,
    anyhow
  };
  use tempfile::NamedTempFile;
  use tracing::{
    debug,
    info
  };

  use super::SlotStorage;

  /// One JSON file per slot inside a data
  /// directory; writes replace the file
  /// atomically.
  #[derive(Debug, Clone)]
  pub struct FileStorage {
    pub data_dir: PathBuf
  }

  impl FileStorage {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(
      data_dir: &Path
    ) -> anyhow::Result<Self> {
      let data_dir = data_dir.to_path_buf();
      fs::create_dir_all(&data_dir)
        .with_context(|| {
          format!(
            "failed to create {}",
            data_dir.display()
          )
        })?;

      info!(
        data_dir = %data_dir.display(),
        "opened file storage"
      );
      Ok(Self { data_dir })
    }

    #[must_use]
    pub fn slot_path(
      &self,
      key: &str
    ) -> PathBuf {
      let file_stem: String = key
        .chars()
        .map(|ch| {
          if ch.is_ascii_alphanumeric()
            || matches!(ch, '.' | '-' | '_')
          {
            ch
          } else {
            '_'
          }
        })
        .collect();
      self
        .data_dir
        .join(format!("{file_stem}.json"))
    }
  }

  impl SlotStorage for FileStorage {
    fn read_slot(
      &self,
      key: &str
    ) -> anyhow::Result<Option<String>> {
      let path = self.slot_path(key);
      if !path.exists() {
        debug!(
          file = %path.display(),
          "slot file absent"
        );
        return Ok(None);
      }

      fs::read_to_string(&path)
        .map(Some)
        .with_context(|| {
          format!(
            "failed reading {}",
            path.display()
          )
        })
    }

    fn write_slot(
      &self,
      key: &str,
      value: &str
    ) -> anyhow::Result<()> {
      let path = self.slot_path(key);
      debug!(
        file = %path.display(),
        bytes = value.len(),
        "writing slot atomically"
      );

      let mut temp =
        NamedTempFile::new_in(&self.data_dir)?;
      temp.write_all(value.as_bytes())?;
      temp.flush()?;
      temp.persist(&path).map_err(|err| {
        anyhow!(
          "failed to persist {}: {}",
          path.display(),
          err
        )
      })?;
      Ok(())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn memory_clones_share_slots() {
    let storage = MemoryStorage::new();
    let handle = storage.clone();

    storage
      .write_slot("k", "[]")
      .expect("write");

    assert_eq!(
      handle
        .read_slot("k")
        .expect("read")
        .as_deref(),
      Some("[]")
    );
    assert_eq!(
      handle
        .read_slot("missing")
        .expect("read"),
      None
    );
  }

  #[cfg(feature = "file-storage")]
  #[test]
  fn file_slots_overwrite_in_full() {
    let dir = tempfile::tempdir()
      .expect("temp dir");
    let storage =
      FileStorage::open(dir.path())
        .expect("open storage");

    assert_eq!(
      storage
        .read_slot("daybook.tasks")
        .expect("read empty"),
      None
    );

    storage
      .write_slot(
        "daybook.tasks",
        "[1,2,3]"
      )
      .expect("first write");
    storage
      .write_slot("daybook.tasks", "[]")
      .expect("second write");

    assert_eq!(
      storage
        .read_slot("daybook.tasks")
        .expect("read")
        .as_deref(),
      Some("[]")
    );
  }

  #[cfg(feature = "file-storage")]
  #[test]
  fn slot_keys_map_to_safe_file_names() {
    let dir = tempfile::tempdir()
      .expect("temp dir");
    let storage =
      FileStorage::open(dir.path())
        .expect("open storage");

    let path =
      storage.slot_path("../tasks/list");
    assert_eq!(
      path.parent(),
      Some(dir.path())
    );
    assert!(path.ends_with(".._tasks_list.json"));
  }
}
