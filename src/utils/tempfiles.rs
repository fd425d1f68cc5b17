use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::utils::config::{PackagePaths, StdinConsts};

/// Temporary file holding a spooled stream. Removed when dropped, on every exit path.
pub struct SpoolFile {
    file: NamedTempFile,
    len: u64,
}

impl SpoolFile {
    /// Copy `reader` to a fresh temp file in fixed-size chunks until end of stream.
    pub fn spool<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(PackagePaths::get().spool_prefix())
            .tempfile()
            .context("create spool file for stdin")?;
        let mut buffer = vec![0u8; StdinConsts::SPOOL_CHUNK_SIZE];
        let mut len = 0_u64;
        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e).context("read stdin"),
            };
            file.write_all(&buffer[..n])
                .with_context(|| format!("write spool file {}", file.path().display()))?;
            len += n as u64;
        }
        file.flush().context("flush spool file")?;
        Ok(Self { file, len })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Bytes spooled.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
