use crate::{Error, Result};
use rocksdb::{IteratorMode, Options, ReadOptions, DB};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// RocksDB-backed store for module state. Keys are UTF-8 paths such as
/// `/linkedpackets/params`; values are opaque bytes, usually JSON.
pub struct Datastore {
    db: DB,
    path: PathBuf,
    read_only: bool,
    // owns the directory behind a temporary store
    _temp_dir: Option<TempDir>,
}

impl std::fmt::Debug for Datastore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Datastore")
            .field("path", &self.path)
            .field("read_only", &self.read_only)
            .finish()
    }
}

impl Datastore {
    /// Opens the store at `path`, creating the directory if needed.
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)?;
        let db = DB::open_default(path)?;
        Ok(Self {
            db,
            path: path.to_path_buf(),
            read_only: false,
            _temp_dir: None,
        })
    }

    /// Opens an existing store without taking its write lock, so a reader can
    /// sit next to a running writer.
    pub fn open_read_only(path: &Path) -> Result<Self> {
        let db = DB::open_for_read_only(&Options::default(), path, false)?;
        Ok(Self {
            db,
            path: path.to_path_buf(),
            read_only: true,
            _temp_dir: None,
        })
    }

    /// A throwaway store living in a temporary directory that is removed on drop.
    pub fn open_temporary() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_compression_type(rocksdb::DBCompressionType::None);
        let db = DB::open(&opts, temp_dir.path())?;
        Ok(Self {
            db,
            path: temp_dir.path().to_path_buf(),
            read_only: false,
            _temp_dir: Some(temp_dir),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn check_writable(&self) -> Result<()> {
        if self.read_only {
            return Err(Error::ReadOnly(self.path.clone()));
        }
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.db.get(key)?)
    }

    pub async fn get_string(&self, key: &str) -> Result<Option<String>> {
        self.get(key)
            .await?
            .map(String::from_utf8)
            .transpose()
            .map_err(Error::from)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.db.get_pinned(key)?.is_some())
    }

    pub async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.check_writable()?;
        self.db.put(key, value)?;
        Ok(())
    }

    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.put(key, &serde_json::to_vec(value)?).await
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        self.check_writable()?;
        self.db.delete(key)?;
        Ok(())
    }

    /// Entries strictly below `prefix`, i.e. keys starting with `prefix/`,
    /// in key order.
    pub fn scan(&self, prefix: &str) -> impl Iterator<Item = Result<(String, Vec<u8>)>> + '_ {
        let mut readopts = ReadOptions::default();
        readopts.set_iterate_lower_bound(format!("{}/", prefix).into_bytes());
        // '0' sorts right after '/'
        readopts.set_iterate_upper_bound(format!("{}0", prefix).into_bytes());
        self.db
            .iterator_opt(IteratorMode::Start, readopts)
            .map(|entry| -> Result<(String, Vec<u8>)> {
                let (key, value) = entry.map_err(|e| Error::Database(e.to_string()))?;
                Ok((String::from_utf8(key.into_vec())?, value.into_vec()))
            })
    }

    pub async fn keys_under(&self, prefix: &str) -> Result<Vec<String>> {
        self.scan(prefix).map(|entry| entry.map(|(key, _)| key)).collect()
    }
}
