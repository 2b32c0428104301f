use crate::error::Result;
use crate::forest::forest::IsolationForest;
use log::debug;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub fn write_bin<T>(path: impl AsRef<Path>, data: &T) -> Result<()>
where
    T: serde::Serialize + ?Sized,
{
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut f = BufWriter::new(File::create(path)?);
    rmp_serde::encode::write(&mut f, data)?;
    f.flush()?;
    Ok(())
}

pub fn read_bin<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let mut f = BufReader::new(File::open(path)?);
    Ok(rmp_serde::from_read(&mut f)?)
}

/// Writes a fitted forest as MessagePack.
pub fn save_forest(path: impl AsRef<Path>, forest: &IsolationForest) -> Result<()> {
    debug!(
        "Saving forest with {} trees to {}",
        forest.n_trees(),
        path.as_ref().display()
    );
    forest.save(path)
}

/// Reads a forest written by [`save_forest`] and checks its structure.
pub fn load_forest(path: impl AsRef<Path>) -> Result<IsolationForest> {
    let forest = IsolationForest::load(&path)?;
    debug!(
        "Loaded forest with {} trees from {}",
        forest.n_trees(),
        path.as_ref().display()
    );
    Ok(forest)
}
