//! Core utilities and shared types
//!
//! - `error`: request-level failures of a comparison
//! - `options`: comparison tunables and the diff mode
//!
//! Also home to the pager adapter used when printing long reports.

pub mod error;
pub mod options;

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// Wrapper that implements `Write` for the minus pager
///
/// The minus pager doesn't implement `std::io::Write` directly, so this wrapper
/// adapts it for the report writer, which only knows about `Write`.
///
/// ## Usage
///
/// ```ignore
/// let pager = Pager::new();
/// let mut writer = PagerWriter::new(pager.clone());
/// Reporter::new(&mut writer, OutputFormat::Text, StatusFilter::all()).write_results(&results)?;
/// page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
