use std::fs::{self, File};
use std::path::{Path, PathBuf};

use simplelog::{Config, LevelFilter, WriteLogger};

use crate::config::APP_DIR_NAME;
use crate::error::{Error, Result};

const LOG_FILE_NAME: &str = "countdown-snake.log";

/// Returns the platform-correct log file path.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

/// Routes the `log` macros to a file. The terminal belongs to the renderer.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<()> {
    let file = create_log_file(path)?;
    WriteLogger::init(level, Config::default(), file)?;
    Ok(())
}

fn create_log_file(path: &Path) -> Result<File> {
    let open = || -> std::io::Result<File> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        File::create(path)
    };

    open().map_err(|source| Error::LogFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{create_log_file, default_log_path};

    #[test]
    fn default_log_path_ends_with_app_file() {
        let path = default_log_path();
        assert!(path.ends_with("countdown-snake/countdown-snake.log"));
    }

    #[test]
    fn log_file_parent_directories_are_created() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("countdown-snake-log-{nanos}"));
        let path = dir.join("nested").join("game.log");

        create_log_file(&path).expect("log file should be creatable");
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
