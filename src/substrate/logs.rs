/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

//! Demultiplexer for the engine's combined stdout/stderr log framing.
//!
//! Non-TTY containers emit logs as a sequence of frames, each prefixed by an
//! 8-byte header: one stream id byte (0 stdin, 1 stdout, 2 stderr), three
//! zero bytes, and a big-endian u32 payload length. TTY containers skip the
//! framing entirely and must be copied verbatim instead of run through this
//! decoder.

use super::{Result, SubstrateError};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

const FRAME_HEADER_LEN: usize = 8;

const STDIN_STREAM_ID: u8 = 0;
const STDOUT_STREAM_ID: u8 = 1;
const STDERR_STREAM_ID: u8 = 2;

/// Decodes a multiplexed log stream into `output`, interleaving the stdout
/// and stderr payloads in their arrival order.
///
/// Returns the number of payload bytes written. A stream ending exactly on a
/// frame boundary is a clean EOF; anything else (a truncated header, a
/// truncated payload, an unknown stream id) is reported as
/// [`SubstrateError::CorruptLogStream`].
pub async fn demultiplex_into<R, W>(
    mut multiplexed: R,
    output: &mut W,
) -> Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut header = [0u8; FRAME_HEADER_LEN];
    let mut total_written = 0u64;

    loop {
        let header_bytes = read_full(&mut multiplexed, &mut header).await?;
        if header_bytes == 0 {
            break;
        }
        if header_bytes < FRAME_HEADER_LEN {
            return Err(SubstrateError::CorruptLogStream {
                reason: format!(
                    "truncated frame header ({header_bytes} of {FRAME_HEADER_LEN} bytes)"
                ),
            });
        }

        match header[0] {
            STDIN_STREAM_ID | STDOUT_STREAM_ID | STDERR_STREAM_ID => {}
            other => {
                return Err(SubstrateError::CorruptLogStream {
                    reason: format!("unknown stream id {other}"),
                });
            }
        }

        let frame_len = u32::from_be_bytes([
            header[4], header[5], header[6], header[7],
        ]) as u64;

        let mut frame = (&mut multiplexed).take(frame_len);
        let copied = tokio::io::copy(&mut frame, output).await?;
        if copied < frame_len {
            return Err(SubstrateError::CorruptLogStream {
                reason: format!(
                    "truncated frame payload ({copied} of {frame_len} bytes)"
                ),
            });
        }
        total_written += copied;
    }

    output.flush().await?;
    Ok(total_written)
}

/// Reads until `buf` is full or the stream ends; returns the bytes read.
async fn read_full<R>(src: &mut R, buf: &mut [u8]) -> std::io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut filled = 0;
    while filled < buf.len() {
        let n = src.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substrate::testing::multiplexed;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_interleaved_frames_preserve_order() {
        let stream = multiplexed(&[
            (STDOUT_STREAM_ID, b"hi\n"),
            (STDERR_STREAM_ID, b"err\n"),
            (STDOUT_STREAM_ID, b"bye\n"),
        ]);

        let mut decoded = Vec::new();
        let written = demultiplex_into(Cursor::new(stream), &mut decoded)
            .await
            .expect("well-formed stream must decode");

        assert_eq!(decoded, b"hi\nerr\nbye\n");
        assert_eq!(written, 11);
    }

    #[tokio::test]
    async fn test_empty_stream_is_clean_eof() {
        let mut decoded = Vec::new();
        let written =
            demultiplex_into(Cursor::new(Vec::new()), &mut decoded)
                .await
                .expect("empty stream is a valid stream");

        assert!(decoded.is_empty());
        assert_eq!(written, 0);
    }

    #[tokio::test]
    async fn test_truncated_header_is_corrupt() {
        let err = demultiplex_into(Cursor::new(vec![1u8, 0, 0]), &mut Vec::new())
            .await
            .expect_err("partial header must not decode");

        assert!(matches!(err, SubstrateError::CorruptLogStream { .. }));
    }

    #[tokio::test]
    async fn test_truncated_payload_is_corrupt() {
        let mut stream = multiplexed(&[(STDOUT_STREAM_ID, b"hello")]);
        let _ = stream.pop();

        let err = demultiplex_into(Cursor::new(stream), &mut Vec::new())
            .await
            .expect_err("short payload must not decode");

        assert!(matches!(err, SubstrateError::CorruptLogStream { .. }));
    }

    #[tokio::test]
    async fn test_unknown_stream_id_is_corrupt() {
        let stream = multiplexed(&[(7, b"x")]);

        let err = demultiplex_into(Cursor::new(stream), &mut Vec::new())
            .await
            .expect_err("unknown stream id must not decode");

        assert!(matches!(err, SubstrateError::CorruptLogStream { .. }));
    }
}
