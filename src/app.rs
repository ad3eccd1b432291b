//! 轮询: 对选中的资源采样并输出

use std::io::{self, Write};
use tracing::{debug, warn};
use crate::error::Error;
use crate::monitor::SystemStats;
use crate::prepare::Selection;
use crate::render::{separator, UsageBar};
use crate::stat::{sample_disk, sample_memory, CpuSampler, ResourceKind, Sample};

pub struct App<S> {
    selection: Selection,
    stats: S,
    cpu: CpuSampler,
}

impl<S: SystemStats> App<S> {
    /// `cpu` 可以是已经读取过基准的采样器
    pub fn new(selection: Selection, stats: S, cpu: CpuSampler) -> Self {
        Self { selection, stats, cpu }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn stats(&self) -> &S {
        &self.stats
    }

    /// 一次轮询
    ///
    /// 单个资源读取失败时输出提示并继续, 只有输出失败才返回错误
    pub fn tick(&mut self, writer: &mut impl Write) -> io::Result<()> {
        let Self { selection, stats, cpu } = self;

        for kind in selection.kinds() {
            let sample = match kind {
                ResourceKind::Cpu => cpu.sample(stats),
                ResourceKind::Memory => sample_memory(stats),
                ResourceKind::Disk => sample_disk(stats),
            };
            Self::show(writer, kind, sample)?;
        }

        writeln!(writer)?;
        writeln!(writer, "{}", separator())?;
        Ok(())
    }

    fn show(
        writer: &mut impl Write,
        kind: ResourceKind,
        sample: Result<Option<Sample>, Error>,
    ) -> io::Result<()> {
        match sample {
            Ok(Some(sample)) => {
                debug!(%kind, usage = sample.usage, "sampled");
                UsageBar::from(sample).draw(writer)
            }
            Ok(None) => {
                debug!(%kind, "no sample yet");
                writeln!(writer, "{kind} usage: collecting...")
            }
            Err(err) => {
                warn!(%kind, %err, "failed to sample");
                writeln!(writer, "{}", kind.read_failure())
            }
        }
    }
}
