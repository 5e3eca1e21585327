use std::process::{Child, Command, Stdio};

use tracing::info;

use crate::error::Error;

/// A started command. The child handle is kept so the exited process can be reaped.
pub struct Launched {
    pub pid: u32,
    pub child: Child,
}

/// Start `command` with the terminal's streams, without waiting for it.
/// With `shell` the tokens are joined and handed to the system shell.
pub fn launch(command: &[String], shell: bool) -> Result<Launched, Error> {
    let (program, args) = command.split_first().ok_or(Error::EmptyCommand)?;

    let mut cmd = if shell {
        shell_command(&command.join(" "))
    } else {
        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd
    };

    let child = cmd
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| Error::Launch {
            command: command.join(" "),
            source,
        })?;

    let pid = child.id();
    info!(pid, shell, "launched {}", command.join(" "));
    Ok(Launched { pid, child })
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(line);
    cmd
}

#[cfg(not(windows))]
fn shell_command(line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(line);
    cmd
}
