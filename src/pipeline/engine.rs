//! Run the conversion engine as a child process.
//!
//! The call waits for the child to exit; there is no timeout and no
//! cancellation. stdin is null, stdout and stderr are captured. A non-zero
//! exit becomes [`Md2DocxError::EngineFailed`] carrying stderr unmodified.

use crate::error::Md2DocxError;
use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

/// `CREATE_NO_WINDOW`: keep a console from flashing up for the child.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Captured output of an engine run that exited zero.
#[derive(Debug, Clone, Default)]
pub struct EngineRun {
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

/// Spawn `engine` with `args` and wait for it.
pub async fn run_engine<I, S>(engine: &Path, args: I) -> Result<EngineRun, Md2DocxError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(engine);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    #[cfg(windows)]
    cmd.creation_flags(CREATE_NO_WINDOW);

    debug!("Running {:?}", cmd.as_std());

    let start = Instant::now();
    let output = cmd.output().await.map_err(|source| Md2DocxError::EngineSpawn {
        engine: engine.to_path_buf(),
        source,
    })?;
    let duration_ms = start.elapsed().as_millis() as u64;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        debug!("Engine exited with {} after {}ms", output.status, duration_ms);
        return Err(Md2DocxError::EngineFailed {
            status: output.status.to_string(),
            stderr,
        });
    }

    debug!("Engine finished in {}ms", duration_ms);
    Ok(EngineRun {
        stdout,
        stderr,
        duration_ms,
    })
}
