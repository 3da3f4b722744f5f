use std::{
    io,
    path::{Path, PathBuf},
};

use tokio::fs;
use tracing::debug;

use crate::{Error, Result};

/// Empties `dir` (creating it if needed) and writes `contents` to
/// `dir/file_name`.
pub async fn write_calendar(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    empty_dir(dir).await.map_err(|source| Error::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(file_name);
    fs::write(&path, contents)
        .await
        .map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}

async fn empty_dir(dir: &Path) -> io::Result<()> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return fs::create_dir_all(dir).await;
        }
        Err(err) => return Err(err),
    };

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        debug!(path = %path.display(), "Removing stale output");

        if entry.file_type().await?.is_dir() {
            fs::remove_dir_all(&path).await?;
        } else {
            fs::remove_file(&path).await?;
        }
    }

    Ok(())
}
