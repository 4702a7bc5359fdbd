//! Durable key-value storage for persisted application state.
//!
//! State slices (reader position and bookmarks, tracking records, settings) are serialized to
//! JSON and written under a fixed name, wrapped in an envelope carrying a schema version:
//!
//! ```json
//! { "state": { "currentPosition": 262, "bookmarks": [] }, "version": 0 }
//! ```
//!
//! Two stores are provided: [`SqliteStore`] for on-disk persistence and [`MemoryStore`] for
//! tests and throwaway sessions. Both are `Send + Sync` so a background writer such as the
//! [`PositionDebouncer`](crate::position::PositionDebouncer) can share them.
//!
//! # Examples
//!
//! ```no_run
//! use noor::{
//!   mushaf::MushafState,
//!   store::{PersistedState, SqliteStore},
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::open(SqliteStore::default_path())?;
//! let mut mushaf = MushafState::load(&store)?;
//! mushaf.update_position(262);
//! mushaf.save(&store)?;
//! # Ok(())
//! # }
//! ```

use rusqlite::{params, Connection, OptionalExtension};

use super::*;

/// Schema version written into every envelope.
pub const STATE_VERSION: u32 = 0;

/// String-keyed string storage.
pub trait KeyValueStore: Send + Sync {
  /// Reads the value stored under `key`.
  fn get(&self, key: &str) -> Result<Option<String>>;

  /// Stores `value` under `key`, replacing any previous value.
  fn set(&self, key: &str, value: &str) -> Result<()>;

  /// Deletes `key`. Deleting a missing key is not an error.
  fn remove(&self, key: &str) -> Result<()>;
}

/// Versioned wrapper around a persisted state slice.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
  /// The state itself
  state:   T,
  /// Schema version
  version: u32,
}

/// Reads and decodes the state stored under `name`.
pub fn load_state<T, S>(store: &S, name: &str) -> Result<Option<T>>
where
  T: DeserializeOwned,
  S: KeyValueStore + ?Sized, {
  let Some(raw) = store.get(name)? else {
    return Ok(None);
  };
  let envelope: Envelope<T> = serde_json::from_str(&raw)?;
  if envelope.version != STATE_VERSION {
    warn!("{name} was written with version {}, reading as {STATE_VERSION}", envelope.version);
  }
  Ok(Some(envelope.state))
}

/// Encodes and writes `state` under `name`.
pub fn save_state<T, S>(store: &S, name: &str, state: &T) -> Result<()>
where
  T: Serialize,
  S: KeyValueStore + ?Sized, {
  let raw = serde_json::to_string(&Envelope { state, version: STATE_VERSION })?;
  trace!("Writing {} bytes to {name}", raw.len());
  store.set(name, &raw)
}

/// A state slice persisted under a fixed name.
pub trait PersistedState: Serialize + DeserializeOwned + Default {
  /// Storage key of this slice.
  const NAME: &'static str;

  /// Loads the slice, falling back to defaults when it was never saved.
  fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self> {
    Ok(load_state(store, Self::NAME)?.unwrap_or_default())
  }

  /// Writes the slice.
  fn save<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<()> {
    save_state(store, Self::NAME, self)
  }

  /// Deletes the slice so the next load yields defaults.
  fn clear<S: KeyValueStore + ?Sized>(store: &S) -> Result<()> { store.remove(Self::NAME) }
}

/// SQLite backed store.
pub struct SqliteStore {
  /// Shared connection; `rusqlite::Connection` is not `Sync` on its own
  conn: Mutex<Connection>,
}

impl SqliteStore {
  /// Opens an existing store or creates a new one at `path`, creating parent directories.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      if !parent.as_os_str().is_empty() {
        std::fs::create_dir_all(parent)?;
      }
    }
    debug!("Opening store at {}", path.display());
    Self::init(Connection::open(path)?)
  }

  /// Opens a store that lives only as long as the returned value.
  pub fn open_in_memory() -> Result<Self> { Self::init(Connection::open_in_memory()?) }

  /// Applies the schema.
  fn init(conn: Connection) -> Result<Self> {
    conn
      .execute_batch(include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/migrations/init.sql")))?;
    Ok(Self { conn: Mutex::new(conn) })
  }

  /// Returns the default path for the store file.
  ///
  /// - On Unix: `~/.local/share/noor/noor.db`
  /// - On macOS: `~/Library/Application Support/noor/noor.db`
  /// - On Windows: `%APPDATA%\noor\noor.db`
  /// - Fallback: `./noor/noor.db`
  pub fn default_path() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("noor").join("noor.db")
  }

  /// Locks the connection.
  fn conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
    self.conn.lock().map_err(|_| NoorError::Poisoned)
  }
}

impl KeyValueStore for SqliteStore {
  fn get(&self, key: &str) -> Result<Option<String>> {
    let conn = self.conn()?;
    let mut stmt = conn.prepare_cached("SELECT value FROM kv WHERE key = ?1")?;
    Ok(stmt.query_row(params![key], |row| row.get(0)).optional()?)
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    let conn = self.conn()?;
    let mut stmt = conn.prepare_cached(
      "INSERT INTO kv (key, value) VALUES (?1, ?2)
       ON CONFLICT(key) DO UPDATE SET
         value = excluded.value,
         updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
    )?;
    stmt.execute(params![key, value])?;
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<()> {
    let conn = self.conn()?;
    conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
    Ok(())
  }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
  /// Stored values
  values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
  /// Creates an empty store.
  pub fn new() -> Self { Self::default() }

  /// Locks the map.
  fn values(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
    self.values.lock().map_err(|_| NoorError::Poisoned)
  }
}

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Result<Option<String>> { Ok(self.values()?.get(key).cloned()) }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    self.values()?.insert(key.to_owned(), value.to_owned());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<()> {
    self.values()?.remove(key);
    Ok(())
  }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
  fn get(&self, key: &str) -> Result<Option<String>> { (**self).get(key) }

  fn set(&self, key: &str, value: &str) -> Result<()> { (**self).set(key, value) }

  fn remove(&self, key: &str) -> Result<()> { (**self).remove(key) }
}
