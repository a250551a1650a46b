use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::pipeline::crop_image_use_case::ProcessError;

/// Where the output for `input` goes: the input's relative path mirrored
/// under `out_dir`.
///
/// Roots, drive prefixes, `.` and `..` are dropped so outputs never escape
/// `out_dir`.
pub fn output_path_for(out_dir: &Path, input: &Path) -> PathBuf {
    let mut output = out_dir.to_path_buf();
    for component in input.components() {
        if let Component::Normal(part) = component {
            output.push(part);
        }
    }
    output
}

/// Refuses to replace an existing `output` unless `force` is set.
pub fn check_output(output: &Path, force: bool) -> Result<(), ProcessError> {
    match std::fs::metadata(output) {
        Ok(_) if !force => Err(ProcessError::OutputExists(output.to_path_buf())),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ProcessError::io(output, e)),
    }
}

/// Decides whether `input` may be processed into `output`.
///
/// An existing output is only replaced when `force` is set. Inputs that are
/// directories or cannot be inspected are refused.
pub fn check(input: &Path, output: &Path, force: bool) -> Result<(), ProcessError> {
    check_output(output, force)?;

    let metadata = std::fs::metadata(input).map_err(|e| ProcessError::io(input, e))?;
    if metadata.is_dir() {
        return Err(ProcessError::InputIsDirectory(input.to_path_buf()));
    }

    Ok(())
}
