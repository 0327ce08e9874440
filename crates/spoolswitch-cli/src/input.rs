// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Reading the job file.

use std::path::Path;

use spoolswitch_core::error::Result;

/// Read a UTF-8 job file, dropping a leading byte-order mark so a
/// `::PRINTER::` directive on the first line is still recognised.
pub fn read_job(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use spoolswitch_core::error::PrintSwitchError;

    #[test]
    fn strips_byte_order_mark() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.txt");
        std::fs::write(&path, "\u{feff}::PRINTER::Office\nshift table").unwrap();

        assert_eq!(read_job(&path).unwrap(), "::PRINTER::Office\nshift table");
    }

    #[test]
    fn rejects_non_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.txt");
        std::fs::write(&path, [0x82, 0xa0, 0xff]).unwrap();

        match read_job(&path) {
            Err(PrintSwitchError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::InvalidData),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        match read_job(&dir.path().join("nope.txt")) {
            Err(PrintSwitchError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
