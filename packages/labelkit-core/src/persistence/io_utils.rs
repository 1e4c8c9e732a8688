//! I/O utilities for store writes.

use std::io::ErrorKind;

use crate::error::LabelError;

/// Classifies I/O errors into specific LabelError variants.
pub fn classify_io_error(error: std::io::Error, context: &str) -> LabelError {
    match error.kind() {
        ErrorKind::StorageFull | ErrorKind::OutOfMemory => {
            LabelError::DiskFull(format!("{}: {}", context, error))
        }
        ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted => {
            LabelError::TransientIoError(format!("{}: {}", context, error))
        }
        _ => LabelError::IoError(format!("{}: {}", context, error)),
    }
}

/// Retries an operation that may fail with transient I/O errors.
pub fn retry_io_operation<F, T>(
    operation: F,
    max_retries: u32,
    retry_delay_ms: u64,
    context: &str,
) -> Result<T, LabelError>
where
    F: Fn() -> Result<T, LabelError>,
{
    let mut attempt = 0;
    loop {
        match operation() {
            Ok(result) => return Ok(result),
            Err(LabelError::TransientIoError(msg)) if attempt < max_retries => {
                attempt += 1;
                tracing::warn!(
                    "Transient I/O error in {} (attempt {}/{}): {}",
                    context,
                    attempt,
                    max_retries,
                    msg
                );
                if retry_delay_ms > 0 {
                    std::thread::sleep(std::time::Duration::from_millis(retry_delay_ms));
                }
            }
            Err(err) => return Err(err),
        }
    }
}
