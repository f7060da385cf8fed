use super::AdbError;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

async fn execute_adb(
    args: &[&str],
    timeout_duration: Option<Duration>,
) -> Result<Output, AdbError> {
    let timeout_duration = timeout_duration.unwrap_or(DEFAULT_TIMEOUT);

    let command = Command::new("adb").args(args).output();

    timeout(timeout_duration, command)
        .await
        .map_err(|_| AdbError::Timeout {
            command: format!("adb {}", args.join(" ")),
        })?
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AdbError::AdbNotFound
            } else {
                AdbError::ExecutionFailed {
                    command: format!("adb {}", args.join(" ")),
                    source: e,
                }
            }
        })
}

/// Runs `adb` with the given arguments and returns stdout as text.
pub async fn run_adb(args: &[&str], timeout_duration: Option<Duration>) -> Result<String, AdbError> {
    let output = execute_adb(args, timeout_duration).await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(AdbError::DeviceError(if stderr.is_empty() {
            format!("adb {} exited with {}", args.join(" "), output.status)
        } else {
            stderr
        }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Raw-bytes variant used to pull binary payloads (e.g. a recorded mp4)
/// through `adb exec-out`.
pub async fn run_adb_bytes(
    args: &[&str],
    timeout_duration: Option<Duration>,
) -> Result<Vec<u8>, AdbError> {
    let output = execute_adb(args, timeout_duration).await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(AdbError::DeviceError(stderr));
    }

    Ok(output.stdout)
}
