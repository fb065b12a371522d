//! A byte-stream adapter that colorizes complete lines on their way to a
//! console.
//!
//! Structured handlers write whole lines, but nothing guarantees a `write`
//! call ends on a newline. [`ColorizingWriter`] keeps an owned buffer and
//! only ever colorizes complete lines; the trailing fragment waits for the
//! next write.

use std::io::{self, Write};

use crate::pipeline::SharedPipeline;

/// Colorizes complete lines into `W`.
///
/// Input is buffered until a newline arrives, without any size limit; a
/// stream that never sends one grows the buffer indefinitely.
#[derive(Debug)]
pub struct ColorizingWriter<W> {
    dst: W,
    pipeline: SharedPipeline,
    /// Raw input not yet terminated by a newline.
    buf: Vec<u8>,
    /// Colorized output `dst` has not accepted yet.
    out: Vec<u8>,
    /// Downstream failure hit after input was already accepted.
    pending_err: Option<io::Error>,
}

impl<W: Write> ColorizingWriter<W> {
    pub fn new(dst: W, pipeline: SharedPipeline) -> Self {
        Self {
            dst,
            pipeline,
            buf: Vec::with_capacity(256),
            out: Vec::with_capacity(256),
            pending_err: None,
        }
    }

    /// Bytes received but not yet terminated by a newline.
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    pub fn get_ref(&self) -> &W {
        &self.dst
    }

    pub fn into_inner(self) -> W {
        self.dst
    }

    /// Push colorized output downstream, rendering buffered lines one at a
    /// time. Bytes `dst` refused stay queued for the next attempt.
    fn emit(&mut self) -> io::Result<()> {
        loop {
            while !self.out.is_empty() {
                match self.dst.write(&self.out) {
                    Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
                    Ok(n) => {
                        self.out.drain(..n);
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                    Err(e) => return Err(e),
                }
            }
            let Some(nl) = self.buf.iter().position(|&b| b == b'\n') else {
                return Ok(());
            };
            let line: Vec<u8> = self.buf.drain(..=nl).collect();
            let text = String::from_utf8_lossy(&line[..nl]);
            self.out
                .extend_from_slice(self.pipeline.colorize(&text).as_bytes());
            self.out.push(b'\n');
        }
    }
}

impl<W: Write> Write for ColorizingWriter<W> {
    /// Buffer `data` and emit any completed lines.
    ///
    /// Once accepted, `data` is always reported as written. A downstream
    /// failure is held back and returned by the next `write` or `flush`,
    /// which then consumes nothing.
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if let Some(e) = self.pending_err.take() {
            return Err(e);
        }
        self.buf.extend_from_slice(data);
        if let Err(e) = self.emit() {
            self.pending_err = Some(e);
        }
        Ok(data.len())
    }

    /// Emit queued lines and flush the console. A partial line stays
    /// buffered.
    fn flush(&mut self) -> io::Result<()> {
        if let Some(e) = self.pending_err.take() {
            return Err(e);
        }
        self.emit()?;
        self.dst.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LogRecord;
    use crate::pipeline::Pipeline;

    fn upper_pipeline() -> SharedPipeline {
        SharedPipeline::new(
            Pipeline::builder()
                .renderer(|rec: &LogRecord| rec.raw.to_uppercase())
                .build(),
        )
    }

    #[test]
    fn test_complete_lines_are_colorized() {
        let mut w = ColorizingWriter::new(Vec::new(), upper_pipeline());
        assert_eq!(w.write(b"a=1\nb=2\n").unwrap(), 8);
        assert_eq!(w.get_ref().as_slice(), b"A=1\nB=2\n");
        assert!(w.pending().is_empty());
    }

    #[test]
    fn test_partial_writes_are_reassembled() {
        let mut w = ColorizingWriter::new(Vec::new(), upper_pipeline());
        w.write_all(b"msg=hel").unwrap();
        assert!(w.get_ref().is_empty());
        assert_eq!(w.pending(), b"msg=hel");
        w.write_all(b"lo\nnext=").unwrap();
        assert_eq!(w.get_ref().as_slice(), b"MSG=HELLO\n");
        assert_eq!(w.pending(), b"next=");
        w.write_all(b"1\n").unwrap();
        assert_eq!(w.into_inner(), b"MSG=HELLO\nNEXT=1\n");
    }

    #[test]
    fn test_empty_lines_pass_through() {
        let mut w = ColorizingWriter::new(Vec::new(), upper_pipeline());
        w.write_all(b"\n\n").unwrap();
        assert_eq!(w.into_inner(), b"\n\n");
    }

    #[test]
    fn test_split_multibyte_char() {
        let mut w = ColorizingWriter::new(Vec::new(), upper_pipeline());
        let line = "city=são\n".as_bytes();
        let (head, tail) = line.split_at(7); // inside 'ã'
        w.write_all(head).unwrap();
        w.write_all(tail).unwrap();
        assert_eq!(String::from_utf8(w.into_inner()).unwrap(), "CITY=SÃO\n");
    }

    #[test]
    fn test_picks_up_pipeline_swaps() {
        let shared = upper_pipeline();
        let mut w = ColorizingWriter::new(Vec::new(), shared.clone());
        w.write_all(b"x\n").unwrap();
        shared.replace(
            Pipeline::builder()
                .renderer(|_: &LogRecord| "swapped".to_string())
                .build(),
        );
        w.write_all(b"y\n").unwrap();
        assert_eq!(w.into_inner(), b"X\nswapped\n");
    }

    /// Fails the first `failures` writes, then records.
    #[derive(Debug)]
    struct Flaky {
        failures: usize,
        written: Vec<u8>,
    }

    impl Write for Flaky {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(io::Error::other("console gone"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_downstream_error_is_reported_once_without_losing_lines() {
        let flaky = Flaky {
            failures: 1,
            written: Vec::new(),
        };
        let mut w = ColorizingWriter::new(flaky, upper_pipeline());
        assert_eq!(w.write(b"a\nb\n").unwrap(), 4);
        assert!(w.get_ref().written.is_empty());

        let err = w.write(b"c\n").unwrap_err();
        assert_eq!(err.to_string(), "console gone");
        assert_eq!(w.pending(), b"b\n");

        assert_eq!(w.write(b"c\n").unwrap(), 2);
        assert_eq!(w.get_ref().written, b"A\nB\nC\n");
    }

    #[test]
    fn test_retrying_buffered_writer_keeps_order() {
        let flaky = Flaky {
            failures: 1,
            written: Vec::new(),
        };
        let mut w = io::BufWriter::new(ColorizingWriter::new(flaky, upper_pipeline()));
        w.write_all(b"a\nb\n").unwrap();

        let err = w.flush().unwrap_err();
        assert_eq!(err.to_string(), "console gone");
        w.flush().unwrap();

        let inner = w.into_inner().unwrap();
        assert_eq!(inner.get_ref().written, b"A\nB\n");
    }

    #[test]
    fn test_short_writes_are_completed() {
        struct Trickle(Vec<u8>);

        impl Write for Trickle {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                let n = buf.len().min(3);
                self.0.extend_from_slice(&buf[..n]);
                Ok(n)
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut w = ColorizingWriter::new(Trickle(Vec::new()), upper_pipeline());
        w.write_all(b"hello=world\nx\n").unwrap();
        assert_eq!(w.into_inner().0, b"HELLO=WORLD\nX\n");
    }
}
