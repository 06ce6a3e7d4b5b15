//! Scratch files for in-flight uploads.
//!
//! A [`ScratchFile`] owns a path on local disk and deletes it when dropped,
//! whichever way the pipeline exits.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::{Builder, TempPath};
use tokio::io::{AsyncRead, AsyncWriteExt};
use tubely_core::constants::SCRATCH_FILE_PREFIX;

#[derive(Debug)]
pub struct ScratchFile {
    path: TempPath,
}

impl ScratchFile {
    /// Copy `reader` to a uniquely named file in `dir`.
    ///
    /// Returns the guard and the number of bytes written. On error the
    /// partially written file is already gone.
    pub async fn stage<R>(dir: &Path, suffix: &str, reader: &mut R) -> io::Result<(Self, u64)>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let named = Builder::new()
            .prefix(SCRATCH_FILE_PREFIX)
            .suffix(suffix)
            .tempfile_in(dir)?;
        let (file, path) = named.into_parts();
        let scratch = ScratchFile { path };

        let mut file = tokio::fs::File::from_std(file);
        let written = tokio::io::copy(reader, &mut file).await?;
        file.flush().await?;

        Ok((scratch, written))
    }

    /// Claim `{input}{suffix}` before anything writes to it, so a tool that
    /// fails halfway does not leave output behind.
    ///
    /// Fails only when a relative `input` cannot be made absolute.
    pub fn derived_from(input: &Path, suffix: &str) -> io::Result<Self> {
        let mut raw = input.as_os_str().to_owned();
        raw.push(suffix);
        Ok(ScratchFile {
            path: TempPath::try_from_path(PathBuf::from(raw))?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read_to_end(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&*self.path).await
    }
}

impl AsRef<Path> for ScratchFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio::io::ReadBuf;

    struct FailingReader;

    impl AsyncRead for FailingReader {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            Poll::Ready(Err(io::Error::new(io::ErrorKind::ConnectionReset, "client went away")))
        }
    }

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_staged_file_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let mut body: &[u8] = b"hello scratch";

        let (scratch, written) = ScratchFile::stage(dir.path(), ".mp4", &mut body).await.unwrap();
        assert_eq!(written, 13);
        assert!(scratch.path().exists());
        let name = scratch.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(SCRATCH_FILE_PREFIX));
        assert!(name.ends_with(".mp4"));
        assert_eq!(scratch.read_to_end().await.unwrap(), b"hello scratch");

        drop(scratch);
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_failed_copy_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let mut reader = FailingReader;

        let err = ScratchFile::stage(dir.path(), ".mp4", &mut reader)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_derived_file_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let mut body: &[u8] = b"x";
        let (input, _) = ScratchFile::stage(dir.path(), ".mp4", &mut body).await.unwrap();

        let output = ScratchFile::derived_from(input.path(), ".processing").unwrap();
        assert!(output.path().to_string_lossy().ends_with(".mp4.processing"));
        std::fs::write(output.path(), b"rewritten").unwrap();
        assert_eq!(entries(dir.path()), 2);

        drop(output);
        drop(input);
        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn test_derived_file_that_was_never_written_drops_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let output =
            ScratchFile::derived_from(&dir.path().join("nothing.mp4"), ".processing").unwrap();
        drop(output);
        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn test_derived_path_is_absolute() {
        let output = ScratchFile::derived_from(Path::new("clip.mp4"), ".processing").unwrap();
        assert!(output.path().is_absolute());
        assert!(output.path().ends_with("clip.mp4.processing"));
    }
}
