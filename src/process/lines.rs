use futures_util::Stream;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Converts a raw byte reader into a stream of text lines.
///
/// Lines are split on `\n` with any trailing `\r` removed. Bytes that are
/// not valid UTF-8 are replaced rather than failing the stream, since
/// tool output on Windows is often in the console code page.
pub fn line_stream<R>(reader: R) -> impl Stream<Item = std::io::Result<String>> + Send
where
    R: AsyncRead + Unpin + Send + 'static,
{
    async_stream::stream! {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    if buf.last() == Some(&b'\n') {
                        buf.pop();
                    }
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                    yield Ok(String::from_utf8_lossy(&buf).into_owned());
                }
                Err(e) => {
                    yield Err(e);
                    break;
                }
            }
        }
    }
}
