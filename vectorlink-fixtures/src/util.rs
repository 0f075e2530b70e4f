use std::{
    fs::File,
    io::{self, stdout, BufWriter, StdoutLock},
};

use either::Either;
use tracing::info;

pub fn file_or_stdout_writer(
    path: Option<&String>,
) -> Result<Either<BufWriter<File>, BufWriter<StdoutLock<'static>>>, io::Error> {
    Ok(match path {
        Some(path) => Either::Left(BufWriter::new(File::create(path)?)),
        None => Either::Right(BufWriter::new(stdout().lock())),
    })
}

pub(crate) fn report_progress(kind: &str, written: usize, total: usize, interval: usize) {
    if interval != 0 && written % interval == 0 {
        info!(kind, written, total, "rows written");
    }
}

/// Writer that accepts a fixed number of `write` calls and then fails
/// every call with `BrokenPipe`, counting calls made after the first failure.
#[cfg(test)]
pub(crate) struct BrokenPipeWriter {
    writes_left: usize,
    pub written: Vec<u8>,
    pub writes_after_failure: usize,
    failed: bool,
}

#[cfg(test)]
impl BrokenPipeWriter {
    pub fn new(writes_left: usize) -> Self {
        Self {
            writes_left,
            written: Vec::new(),
            writes_after_failure: 0,
            failed: false,
        }
    }
}

#[cfg(test)]
impl io::Write for BrokenPipeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.failed {
            self.writes_after_failure += 1;
        }
        if self.writes_left == 0 {
            self.failed = true;
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"));
        }
        self.writes_left -= 1;
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.failed {
            self.writes_after_failure += 1;
        }
        Ok(())
    }
}
