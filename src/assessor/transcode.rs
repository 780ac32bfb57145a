use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::assessor::traits::AudioTranscoder;

/// Shells out to ffmpeg for waveform normalization: mono, 16 kHz, signed
/// 16-bit PCM.
pub struct FfmpegTranscoder {
    program: String,
}

impl FfmpegTranscoder {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args(input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            OsString::from("-y"),
            OsString::from("-i"),
            input.as_os_str().to_os_string(),
            OsString::from("-ar"),
            OsString::from("16000"),
            OsString::from("-ac"),
            OsString::from("1"),
            OsString::from("-acodec"),
            OsString::from("pcm_s16le"),
            output.as_os_str().to_os_string(),
        ]
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<()> {
        debug!(
            target: "audio_transcoder",
            input = %input.display(),
            output = %output.display(),
            "converting recording to pcm wav"
        );

        let status = Command::new(&self.program)
            .args(Self::args(input, output))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .with_context(|| format!("failed to spawn {}", self.program))?;

        if !status.success() {
            bail!("{} exited with {status}", self.program);
        }

        Ok(())
    }
}
