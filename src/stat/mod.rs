//! 计算 cpu、内存、磁盘使用率

use std::fmt;
use std::path::Path;
use tracing::debug;
use crate::config::{CPU_THRESHOLD, DISK_ROOT, DISK_THRESHOLD, MEM_THRESHOLD};
use crate::error::Error;
use crate::monitor::{CpuCounters, DiskStats, MemoryStats, SystemStats};


/// 资源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Cpu,
    Memory,
    Disk,
}

/// 一次采样结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub kind: ResourceKind,
    pub usage: f64, // 使用率
    pub threshold: f64, // 阈值
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Cpu, ResourceKind::Memory, ResourceKind::Disk];

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Cpu => "CPU",
            ResourceKind::Memory => "Memory",
            ResourceKind::Disk => "Disk",
        }
    }

    pub fn threshold(&self) -> f64 {
        match self {
            ResourceKind::Cpu => CPU_THRESHOLD,
            ResourceKind::Memory => MEM_THRESHOLD,
            ResourceKind::Disk => DISK_THRESHOLD,
        }
    }

    /// 菜单中的编号
    pub fn from_choice(choice: char) -> Option<Self> {
        match choice {
            '1' => Some(ResourceKind::Cpu),
            '2' => Some(ResourceKind::Memory),
            '3' => Some(ResourceKind::Disk),
            _ => None,
        }
    }

    /// 附加说明
    pub fn note(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Cpu => &[
                "When CPU usage is high, the operating system adjusts process scheduling priorities and resource allocation to keep the system responsive.",
                "Schedulers combine algorithms such as round robin, priority scheduling and multilevel queues to share CPU time efficiently.",
            ],
            ResourceKind::Memory => &[
                "When memory usage is high, virtual memory and paging can be used to make better use of physical memory.",
            ],
            ResourceKind::Disk => &[
                "When disk usage is high, cleaning up or defragmenting the file system helps keep it performing well.",
            ],
        }
    }

    /// 读取失败时输出的提示
    pub fn read_failure(&self) -> &'static str {
        match self {
            ResourceKind::Cpu => "Failed to get CPU time information.",
            ResourceKind::Memory => "Failed to get memory statistics.",
            ResourceKind::Disk => "Failed to get disk information.",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Sample {
    pub fn new(kind: ResourceKind, usage: f64) -> Self {
        Self {
            kind,
            usage,
            threshold: kind.threshold(),
        }
    }
}

/// MARK: 计算 CPU 使用率
/**!
计数器来自 [`SystemStats::cpu_counters`], 都是从系统启动开始累计的时间:
    * idle: 空闲时间(含 IO 等待)
    * busy: 用户态、内核态、中断等运行时间

计算方式：
    1. 间隔一段时间, 获取两次计数器
    2. 计算两次的 CPU 空闲时间：idle_2 - idle_1
    3. 计算两次的 CPU 使用时间：busy_2 - busy_1
    4. CPU 总时间 = 空闲时间 + 使用时间
    5. CPU 使用率 = 100% * 使用时间 / 总时间

总时间为 0(两次读取间隔小于时钟精度)或计数器回退(重置)时, 没有可用的结果
 */
impl CpuCounters {
    pub fn usage(prev: CpuCounters, current: CpuCounters) -> Option<f64> {
        let idle_delta = current.idle.checked_sub(prev.idle)?;
        let busy_delta = current.busy.checked_sub(prev.busy)?;
        let total_delta = idle_delta.checked_add(busy_delta)?;

        if total_delta == 0 {
            return None;
        }

        Some(100.0 * busy_delta as f64 / total_delta as f64)
    }
}

/// CPU 采样器, 保存上一次的计数器
#[derive(Debug, Clone, Default)]
pub struct CpuSampler {
    last: Option<CpuCounters>,
}

impl CpuSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从已有的计数器开始
    pub fn with_baseline(last: CpuCounters) -> Self {
        Self { last: Some(last) }
    }

    pub fn last(&self) -> Option<CpuCounters> {
        self.last
    }

    /// 读取一次计数器作为基准
    pub fn prime(&mut self, stats: &mut impl SystemStats) -> Result<(), Error> {
        self.last = Some(stats.cpu_counters()?);
        Ok(())
    }

    /// 与上一次的计数器比较
    ///
    /// 没有基准或者总时间没有变化时返回 `Ok(None)`, 读取失败时保留原来的基准
    pub fn sample(&mut self, stats: &mut impl SystemStats) -> Result<Option<Sample>, Error> {
        let current = stats.cpu_counters()?;
        let prev = self.last.replace(current);
        debug!(?prev, ?current, "read cpu counters");

        let usage = prev.and_then(|prev| CpuCounters::usage(prev, current));
        Ok(usage.map(|usage| Sample::new(ResourceKind::Cpu, usage)))
    }
}

/// 100% * 已使用 / 总量
fn used_percent(total: u64, remaining: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }

    let used = total.saturating_sub(remaining);
    return Some(100.0 * used as f64 / total as f64);
}

impl MemoryStats {
    pub fn usage(&self) -> Option<f64> {
        used_percent(self.total, self.available)
    }
}

impl DiskStats {
    pub fn usage(&self) -> Option<f64> {
        used_percent(self.total, self.free)
    }
}

/// 获取内存使用率
pub fn sample_memory(stats: &mut impl SystemStats) -> Result<Option<Sample>, Error> {
    let mem = stats.memory_stats()?;
    debug!(total = mem.total, available = mem.available, "read memory");
    Ok(mem.usage().map(|usage| Sample::new(ResourceKind::Memory, usage)))
}

/// 获取磁盘使用率, 只统计 [`DISK_ROOT`]
pub fn sample_disk(stats: &mut impl SystemStats) -> Result<Option<Sample>, Error> {
    let disk = stats.disk_stats(Path::new(DISK_ROOT))?;
    Ok(disk.usage().map(|usage| Sample::new(ResourceKind::Disk, usage)))
}
