use log::info;
use std::fs;
use std::path::Path;

/// Creates the directory that will hold the SQLite file, if it is missing.
pub fn ensure_data_dir(database_path: &str) -> std::io::Result<()> {
    let data_dir = match Path::new(database_path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => return Ok(()),
    };
    if !data_dir.exists() {
        info!("Creating data directory {}...", data_dir.display());
        fs::create_dir_all(data_dir)?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn scratch_db_path() -> String {
    std::env::temp_dir()
        .join(format!("movie-library-{}.db", uuid::Uuid::new_v4().simple()))
        .to_string_lossy()
        .into_owned()
}
