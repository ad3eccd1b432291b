//! 读取操作系统计数器: `/proc/stat`、`/proc/meminfo`(procfs) 和 statvfs(nix)
//!
//! 采样逻辑只依赖 [`SystemStats`], 测试时可以替换为脚本化的实现

use std::fs;
use std::path::Path;
use std::str::FromStr;
use nix::sys::statvfs::statvfs;
use procfs::{Current, Meminfo};
use tracing::debug;
use crate::error::Error;

/// CPU 累计时间(ticks), 从系统启动开始计算
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuCounters {
    pub idle: u64,
    pub busy: u64,
}

/// 物理内存(字节)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub total: u64,
    pub available: u64,
}

/// 文件系统容量(字节)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskStats {
    pub total: u64,
    pub free: u64,
}

/// 系统统计信息的来源
pub trait SystemStats {
    fn cpu_counters(&mut self) -> Result<CpuCounters, Error>;

    fn memory_stats(&mut self) -> Result<MemoryStats, Error>;

    /// `root` 所在的文件系统
    fn disk_stats(&mut self, root: &Path) -> Result<DiskStats, Error>;
}

/**!
`/proc/stat` 中 `cpu` 汇总行, 每列字段含义为：
    * user、nice、system、idle: 必须存在
    * iowait、irq、softirq、steal: 旧内核可能没有, 按 0 计算
    * guest、guest_nice: 已经计入 user、nice, 不再重复累加

```text
idle = idle + iowait
busy = user + nice + system + irq + softirq + steal
```
 */
impl FromStr for CpuCounters {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let malformed = || Error::CpuLine(line.to_owned());

        let mut fields = line.split_whitespace();
        if fields.next() != Some("cpu") {
            return Err(malformed());
        }

        let ticks = fields
            .map(str::parse::<u64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| malformed())?;
        let [user, nice, system, idle, rest @ ..] = ticks.as_slice() else {
            return Err(malformed());
        };
        let tick = |i: usize| rest.get(i).copied().unwrap_or(0);
        let (iowait, irq, softirq, steal) = (tick(0), tick(1), tick(2), tick(3));

        return Ok(CpuCounters {
            idle: idle + iowait,
            busy: user + nice + system + irq + softirq + steal,
        });
    }
}

impl CpuCounters {
    /// 从 `/proc/stat` 全文中找到 `cpu ` 开头的行
    pub fn from_proc_stat(contents: &str) -> Result<Self, Error> {
        let cpu_line = contents
            .lines()
            .find(|line| line.starts_with("cpu "))
            .ok_or_else(|| Error::CpuLine(String::new()))?;
        return cpu_line.parse();
    }
}

impl MemoryStats {
    /// 旧内核没有 `MemAvailable`, 退回到 `MemFree`
    pub fn from_meminfo(mem_total: u64, mem_free: u64, mem_available: Option<u64>) -> Self {
        MemoryStats {
            total: mem_total,
            available: mem_available.unwrap_or(mem_free),
        }
    }
}

impl From<&Meminfo> for MemoryStats {
    fn from(mem_info: &Meminfo) -> Self {
        MemoryStats::from_meminfo(mem_info.mem_total, mem_info.mem_free, mem_info.mem_available)
    }
}

impl DiskStats {
    /// statvfs 以 fragment 为单位, free 包括只有 root 可用的保留块
    pub fn from_blocks(blocks: u64, blocks_free: u64, fragment_size: u64) -> Self {
        DiskStats {
            total: blocks.saturating_mul(fragment_size),
            free: blocks_free.saturating_mul(fragment_size),
        }
    }
}

/// linux 实现
pub struct ProcfsStats;

impl ProcfsStats {
    const STAT: &'static str = "/proc/stat";

    /// 启动时检查 `/proc/stat` 是否可读, 不可读直接失败
    pub fn new() -> Result<Self, Error> {
        let mut stats = ProcfsStats;
        stats.cpu_counters()?;
        Ok(stats)
    }
}

impl SystemStats for ProcfsStats {
    fn cpu_counters(&mut self) -> Result<CpuCounters, Error> {
        let contents = fs::read_to_string(Self::STAT).map_err(Error::Cpu)?;
        CpuCounters::from_proc_stat(&contents)
    }

    fn memory_stats(&mut self) -> Result<MemoryStats, Error> {
        let mem_info = Meminfo::current().map_err(Error::Memory)?;
        Ok(MemoryStats::from(&mem_info))
    }

    fn disk_stats(&mut self, root: &Path) -> Result<DiskStats, Error> {
        let stat = statvfs(root).map_err(|source| Error::Disk {
            path: root.to_path_buf(),
            source,
        })?;

        debug!(
            blocks = stat.blocks(),
            blocks_free = stat.blocks_free(),
            fragment_size = stat.fragment_size(),
            "read disk"
        );

        Ok(DiskStats::from_blocks(
            stat.blocks() as u64,
            stat.blocks_free() as u64,
            stat.fragment_size() as u64,
        ))
    }
}
