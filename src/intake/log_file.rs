//! Open a log file for aggregation under a size limit.

use crate::utils::error::IntakeError;
use log::{debug, info};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Open a log file after checking its name, type and size
///
/// **Public** - main entry point for intake
///
/// # Arguments
/// * `path` - Log file to open
/// * `max_bytes` - Largest accepted file size
///
/// # Errors
/// * `IntakeError::EmptyFilename` - path does not name a file
/// * `IntakeError::MissingFile` - file does not exist or is not a regular file
/// * `IntakeError::TooLarge` - file exceeds `max_bytes`
/// * `IntakeError::Io` - metadata or open failed
pub fn open_log(path: impl AsRef<Path>, max_bytes: u64) -> Result<BufReader<File>, IntakeError> {
    let path = path.as_ref();

    if source_name(path).is_empty() {
        return Err(IntakeError::EmptyFilename);
    }

    if !path.is_file() {
        return Err(IntakeError::MissingFile(path.display().to_string()));
    }

    let size = std::fs::metadata(path)?.len();
    debug!("Log file {} is {} bytes (limit {})", path.display(), size, max_bytes);

    if size > max_bytes {
        return Err(IntakeError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let file = File::open(path)?;
    info!("Accepted log file: {}", path.display());

    Ok(BufReader::new(file))
}

/// File name component of `path`, or an empty string if there is none
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
