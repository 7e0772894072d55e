//! Verbatim byte-range extraction from buffer files.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::accessor::ResolvedSlice;
use crate::error::UnpackError;

/// Copy the resolved byte range from `source` into a new file at `output`.
///
/// The bytes are copied exactly as stored, no re-encoding. Returns the number
/// of bytes written. A failure can leave a partial file behind; the caller
/// aborts the run rather than cleaning up.
pub fn extract_slice(
    source: &Path,
    slice: &ResolvedSlice<'_>,
    output: &Path,
) -> Result<u64, UnpackError> {
    let mut data = vec![0u8; slice.byte_length as usize];
    {
        let mut file = File::open(source).map_err(|err| UnpackError::Io {
            path: source.to_path_buf(),
            source: err,
        })?;
        file.seek(SeekFrom::Start(slice.byte_offset))
            .map_err(|err| UnpackError::Io {
                path: source.to_path_buf(),
                source: err,
            })?;
        file.read_exact(&mut data).map_err(|err| {
            if err.kind() == io::ErrorKind::UnexpectedEof {
                UnpackError::TruncatedSource {
                    path: source.to_path_buf(),
                    offset: slice.byte_offset,
                    needed: slice.byte_length,
                }
            } else {
                UnpackError::Io {
                    path: source.to_path_buf(),
                    source: err,
                }
            }
        })?;
        // Source handle closes here; no file stays open across operations.
    }

    write_output(output, &data)
}

/// Create or overwrite `output` with `data`. Returns the number of bytes written.
pub fn write_output(output: &Path, data: &[u8]) -> Result<u64, UnpackError> {
    let mut file = File::create(output).map_err(|err| UnpackError::Io {
        path: output.to_path_buf(),
        source: err,
    })?;
    file.write_all(data)
        .and_then(|()| file.flush())
        .map_err(|err| {
            if err.kind() == io::ErrorKind::WriteZero {
                UnpackError::ShortWrite {
                    path: output.to_path_buf(),
                    expected: data.len() as u64,
                }
            } else {
                UnpackError::Io {
                    path: output.to_path_buf(),
                    source: err,
                }
            }
        })?;
    Ok(data.len() as u64)
}
