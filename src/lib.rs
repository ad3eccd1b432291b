//! 在终端中显示 cpu、内存、磁盘使用率

pub mod app;
pub mod config;
pub mod error;
pub mod monitor;
pub mod prepare;
pub mod render;
pub mod stat;

pub use crate::app::App;
pub use crate::error::Error;
pub use crate::monitor::{CpuCounters, DiskStats, MemoryStats, ProcfsStats, SystemStats};
pub use crate::prepare::Selection;
pub use crate::render::{Band, UsageBar};
pub use crate::stat::{CpuSampler, ResourceKind, Sample};
