//! 错误

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// `/proc/stat` 读取失败
    #[error("failed to read /proc/stat: {0}")]
    Cpu(#[source] io::Error),

    #[error("malformed cpu line in /proc/stat: `{0}`")]
    CpuLine(String),

    /// `/proc/meminfo` 读取失败
    #[error("failed to read memory statistics: {0}")]
    Memory(#[source] procfs::ProcError),

    #[error("failed to stat filesystem at `{}`: {source}", .path.display())]
    Disk {
        path: PathBuf,
        #[source]
        source: nix::errno::Errno,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
