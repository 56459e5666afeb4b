//! Line reading and display adapters over `std::io`
//!
//! `read_line_from` is a bounded read that keeps the line terminator, like
//! `fgets`. `scan_line_from` is unbounded, drops the terminator, and
//! accumulates through a scratch string that grows by a fixed increment.
//! Neither touches the destination when nothing could be read.

use std::io::{self, BufRead, Read, Write};

use crate::buffer::{DEFAULT_CAPACITY, DynString, GrowthPolicy};
use crate::error::GrowError;

/// Bytes added to the scan scratch buffer each time it fills up
pub const SCAN_INCREMENT: usize = 50;

fn grow_failed(err: GrowError) -> io::Error {
    io::Error::new(io::ErrorKind::OutOfMemory, err)
}

impl DynString {
    /// Read at most `max` bytes, stopping after the first `\n`
    ///
    /// The terminator is kept. Returns the number of bytes now held, which
    /// is zero at end of input. On error or end of input the content is left
    /// as it was.
    pub fn read_line_from<R: BufRead>(&mut self, reader: &mut R, max: usize) -> io::Result<usize> {
        if max == 0 {
            return Ok(0);
        }

        let limit = u64::try_from(max).unwrap_or(u64::MAX);
        let mut line = Vec::new();
        reader.by_ref().take(limit).read_until(b'\n', &mut line)?;
        if line.is_empty() {
            return Ok(0);
        }

        self.overwrite(&line).map_err(grow_failed)?;
        Ok(line.len())
    }

    /// Read one whole line, without its `\n`, using [`SCAN_INCREMENT`]
    pub fn scan_line_from<R: BufRead>(&mut self, reader: &mut R) -> io::Result<usize> {
        self.scan_line_with(reader, SCAN_INCREMENT)
    }

    /// Read one whole line, growing the scratch buffer `increment` bytes at a time
    ///
    /// Returns the number of bytes consumed from `reader`, counting the
    /// terminator, so zero means end of input. The line is committed with
    /// [`DynString::assign_text`], so an empty line leaves `self` unchanged.
    pub fn scan_line_with<R: BufRead>(&mut self, reader: &mut R, increment: usize) -> io::Result<usize> {
        let increment = increment.max(1);
        let mut scratch = DynString::with_policy(DEFAULT_CAPACITY, GrowthPolicy::new(0))
            .ok_or_else(|| io::Error::new(io::ErrorKind::OutOfMemory, "scan buffer allocation failed"))?;
        let mut consumed = 0;

        loop {
            let available = match reader.fill_buf() {
                Ok(available) => available,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if available.is_empty() {
                break;
            }

            let newline = available.iter().position(|&b| b == b'\n');
            let chunk = &available[..newline.unwrap_or(available.len())];
            scratch.push_in_increments(chunk, increment).map_err(grow_failed)?;

            let used = chunk.len() + usize::from(newline.is_some());
            reader.consume(used);
            consumed += used;
            if newline.is_some() {
                break;
            }
        }

        self.assign(&scratch).map_err(grow_failed)?;
        Ok(consumed)
    }

    fn push_in_increments(&mut self, bytes: &[u8], increment: usize) -> Result<(), GrowError> {
        let required = self
            .len()
            .checked_add(bytes.len())
            .and_then(|len| len.checked_add(1))
            .ok_or(GrowError::CapacityOverflow)?;

        let mut target = self.capacity();
        while target < required {
            target = target
                .checked_add(increment)
                .ok_or(GrowError::CapacityOverflow)?;
        }
        self.grow_to(target)?;
        self.push_bytes(bytes)
    }

    /// Write the content, then `\n` if `newline` is set. An empty string writes nothing.
    pub fn write_to<W: Write>(&self, writer: &mut W, newline: bool) -> io::Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        writer.write_all(self.as_bytes())?;
        if newline {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Bounded line read. No-op when either the destination or the reader is absent.
pub fn read_line<R: BufRead>(
    dest: Option<&mut DynString>,
    reader: Option<&mut R>,
    max: usize,
) -> io::Result<usize> {
    match (dest, reader) {
        (Some(dest), Some(reader)) => dest.read_line_from(reader, max),
        _ => Ok(0),
    }
}

/// Scan one line into a fresh string. `None` at end of input.
pub fn scan_line<R: BufRead>(reader: &mut R) -> io::Result<Option<DynString>> {
    let mut line = DynString::new();
    let consumed = line.scan_line_from(reader)?;
    Ok((consumed > 0).then_some(line))
}

/// Write a string to standard output. No-op on absence.
pub fn print(s: Option<&DynString>, newline: bool) -> io::Result<()> {
    match s {
        Some(s) => {
            let mut stdout = io::stdout().lock();
            s.write_to(&mut stdout, newline)?;
            stdout.flush()
        }
        None => Ok(()),
    }
}

/// [`print`] followed by a newline
pub fn puts(s: Option<&DynString>) -> io::Result<()> {
    print(s, true)
}
