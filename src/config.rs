//! 固定的监控参数, 不从文件或命令行读取

use std::time::Duration;

/// CPU 使用率阈值(%)
pub const CPU_THRESHOLD: f64 = 75.0;

/// 内存使用率阈值(%)
pub const MEM_THRESHOLD: f64 = 75.0;

/// 磁盘使用率阈值(%)
pub const DISK_THRESHOLD: f64 = 75.0;

/// 误差范围, 使用率上下各浮动的百分点
pub const ERROR_MARGIN: f64 = 5.0;

/// 采样间隔
pub const MONITOR_INTERVAL: Duration = Duration::from_secs(1);

/// 进度条长度
pub const BAR_WIDTH: usize = 50;

/// 统计磁盘使用率的挂载点
pub const DISK_ROOT: &str = "/";

/// 分隔线长度
pub const SEPARATOR_WIDTH: usize = 76;
