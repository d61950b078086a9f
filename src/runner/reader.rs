//! Background threads that drain the child's pipes.

use std::io::{self, BufRead, BufReader, Read};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use super::error::{RunError, Stream};

/// Turns a byte stream into a finite sequence of lines on a channel.
///
/// Each item is one line including its trailing `\n` (the last line may lack
/// one). Bytes that are not valid UTF-8 are replaced with U+FFFD. The channel
/// disconnects at end of stream or after a read error has been sent.
pub(crate) fn spawn_line_reader<R: Read + Send + 'static>(reader: R) -> Receiver<io::Result<String>> {
    let (tx, rx) = crossbeam_channel::unbounded();
    thread::spawn(move || {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    if tx.send(Ok(String::from_utf8_lossy(&buf).into_owned())).is_err() {
                        break;
                    }
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    let _ = tx.send(Err(err));
                    break;
                }
            }
        }
    });
    rx
}

/// Drains stderr in the background so a chatty child cannot fill the pipe
/// and stall while stdout is still being read.
///
/// The buffer is private until [`StderrCapture::finish`] (or a timeout
/// snapshot), which keeps stderr out of the line-by-line stream.
pub(crate) struct StderrCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
    handle: JoinHandle<io::Result<()>>,
    // Disconnects when the reader thread exits.
    done: Receiver<()>,
}

impl StderrCapture {
    pub(crate) fn spawn<R: Read + Send + 'static>(mut reader: R) -> Self {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let shared = Arc::clone(&buffer);
        let (done_tx, done) = crossbeam_channel::bounded::<()>(0);
        let handle = thread::spawn(move || {
            let _done = done_tx;
            let mut chunk = [0u8; 4096];
            loop {
                match reader.read(&mut chunk) {
                    Ok(0) => return Ok(()),
                    Ok(n) => shared
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .extend_from_slice(&chunk[..n]),
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                    Err(err) => return Err(err),
                }
            }
        });
        Self { buffer, handle, done }
    }

    /// Waits for end of stream and returns the full text.
    pub(crate) fn finish(self) -> Result<String, RunError> {
        let Self { buffer, handle, .. } = self;
        match handle.join() {
            Ok(Ok(())) => Ok(decode(&buffer)),
            Ok(Err(source)) => Err(RunError::StreamRead { stream: Stream::Stderr, source }),
            Err(_) => Err(RunError::Unexpected("stderr reader thread panicked".into())),
        }
    }

    /// Blocks until end of stream or `deadline`, whichever comes first.
    /// Returns `false` if the deadline passed while the stream was still open.
    pub(crate) fn wait_until(&self, deadline: Instant) -> bool {
        !matches!(self.done.recv_deadline(deadline), Err(RecvTimeoutError::Timeout))
    }

    /// Whatever has been read so far, without waiting.
    pub(crate) fn snapshot(&self) -> String {
        decode(&self.buffer)
    }
}

fn decode(buffer: &Mutex<Vec<u8>>) -> String {
    let bytes = buffer.lock().unwrap_or_else(PoisonError::into_inner);
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_lines_and_keeps_unterminated_tail() {
        let rx = spawn_line_reader(io::Cursor::new(b"one\ntwo\nthree".to_vec()));
        let lines: Vec<String> = rx.iter().map(Result::unwrap).collect();
        assert_eq!(lines, vec!["one\n", "two\n", "three"]);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let rx = spawn_line_reader(io::Cursor::new(vec![b'a', 0xff, b'b', b'\n']));
        let lines: Vec<String> = rx.iter().map(Result::unwrap).collect();
        assert_eq!(lines, vec!["a\u{fffd}b\n"]);
    }

    #[test]
    fn empty_stream_disconnects_immediately() {
        let rx = spawn_line_reader(io::Cursor::new(Vec::new()));
        assert!(rx.recv().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn wait_until_gives_up_on_open_stream() {
        let (reader, _writer) = std::os::unix::net::UnixStream::pair().unwrap();
        let capture = StderrCapture::spawn(reader);
        let deadline = Instant::now() + std::time::Duration::from_millis(50);
        assert!(!capture.wait_until(deadline));
    }

    #[test]
    fn wait_until_returns_at_end_of_stream() {
        let capture = StderrCapture::spawn(io::Cursor::new(b"x".to_vec()));
        let deadline = Instant::now() + std::time::Duration::from_secs(5);
        assert!(capture.wait_until(deadline));
        assert_eq!(capture.snapshot(), "x");
    }

    #[test]
    fn stderr_capture_collects_everything() {
        let capture = StderrCapture::spawn(io::Cursor::new(b"warn: x\nwarn: y\n".to_vec()));
        assert_eq!(capture.finish().unwrap(), "warn: x\nwarn: y\n");
    }
}
