//! 使用率进度条

use std::io::{self, Write};
use std::iter::repeat;
use crossterm::QueueableCommand;
use crossterm::style::{Color, PrintStyledContent, Stylize};
use crate::config::{BAR_WIDTH, ERROR_MARGIN, SEPARATOR_WIDTH};
use crate::stat::{ResourceKind, Sample};

/// 使用率相对阈值的区间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// 误差范围整体低于阈值
    Safe,
    /// 误差范围包含阈值
    Warning,
    /// 误差范围整体高于阈值
    Critical,
}

/// 误差范围(向下取整)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorRange {
    pub low: i64,
    pub high: i64,
}

impl ErrorRange {
    /// usage ± [`ERROR_MARGIN`]
    pub fn around(usage: f64) -> Self {
        Self {
            low: (usage - ERROR_MARGIN).floor() as i64,
            high: (usage + ERROR_MARGIN).floor() as i64,
        }
    }
}

impl Band {
    pub fn classify(usage: f64, threshold: f64) -> Self {
        let ErrorRange { low, high } = ErrorRange::around(usage);

        if (high as f64) < threshold {
            Band::Safe
        } else if (low as f64) <= threshold {
            Band::Warning
        } else {
            Band::Critical
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Band::Safe => Color::Green,
            Band::Warning => Color::Yellow,
            Band::Critical => Color::Red,
        }
    }
}

/// 已填充的格数, 限制在 `[0, BAR_WIDTH]`
pub fn filled_segments(usage: f64) -> usize {
    let filled = (usage / 100.0 * BAR_WIDTH as f64).floor();
    // NaN 转换为 0
    filled.clamp(0.0, BAR_WIDTH as f64) as usize
}

/// 分隔线
pub fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

pub struct UsageBar {
    pub kind: ResourceKind,
    pub usage: f64,
    pub threshold: f64,
}

impl From<Sample> for UsageBar {
    fn from(Sample { kind, usage, threshold }: Sample) -> Self {
        Self { kind, usage, threshold }
    }
}

impl UsageBar {
    pub fn band(&self) -> Band {
        Band::classify(self.usage, self.threshold)
    }

    /// 输出标题、进度条和附加说明
    pub fn draw(&self, writer: &mut impl Write) -> io::Result<()> {
        const ACTIVE: char = '#';
        const IDLE: char = ' ';

        let Self { kind, usage, threshold: _ } = self;
        let color = self.band().color();
        let ErrorRange { low, high } = ErrorRange::around(*usage);

        writeln!(writer, "{}", separator())?;

        let headline = format!("{kind} usage: {usage:.2}% (error range: {low}% - {high}%)");
        writer.queue(PrintStyledContent(headline.with(color)))?;
        writeln!(writer)?;

        let filled = filled_segments(*usage);
        let meter = repeat(ACTIVE)
            .take(filled)
            .chain(repeat(IDLE))
            .take(BAR_WIDTH);
        let meter = format!(" [{}] {usage:.2}%", meter.collect::<String>());
        writer.queue(PrintStyledContent(meter.with(color)))?;
        writeln!(writer)?;

        writeln!(writer)?;
        writeln!(writer, "[info]")?;
        for line in kind.note() {
            writeln!(writer, "{line}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(kind: ResourceKind, usage: f64) -> String {
        let mut out = Vec::new();
        UsageBar::from(Sample::new(kind, usage)).draw(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    mod band_tests {
        use super::*;

        #[test]
        fn straddles_threshold_at_upper_edge() {
            assert_eq!(ErrorRange::around(70.0), ErrorRange { low: 65, high: 75 });
            assert_eq!(Band::classify(70.0, 75.0), Band::Warning);
        }

        #[test]
        fn above_threshold() {
            assert_eq!(ErrorRange::around(82.0), ErrorRange { low: 77, high: 87 });
            assert_eq!(Band::classify(82.0, 75.0), Band::Critical);
        }

        #[test]
        fn below_threshold() {
            assert_eq!(Band::classify(69.9, 75.0), Band::Safe);
            assert_eq!(Band::classify(0.0, 75.0), Band::Safe);
        }

        #[test]
        fn straddles_threshold_at_lower_edge() {
            assert_eq!(Band::classify(80.0, 75.0), Band::Warning);
            assert_eq!(Band::classify(80.99, 75.0), Band::Warning);
            assert_eq!(Band::classify(81.0, 75.0), Band::Critical);
        }

        #[test]
        fn floors_negative_bounds() {
            assert_eq!(ErrorRange::around(2.5), ErrorRange { low: -3, high: 7 });
        }

        /// 误差范围包含阈值时才是 Warning
        #[test]
        fn warning_iff_interval_contains_threshold() {
            for threshold in 0..=100 {
                for tenths in 0..=1000 {
                    let usage = tenths as f64 / 10.0;
                    let threshold = threshold as f64;
                    let ErrorRange { low, high } = ErrorRange::around(usage);
                    let contains = (low as f64) <= threshold && threshold <= (high as f64);

                    let band = Band::classify(usage, threshold);
                    assert_eq!(band == Band::Warning, contains, "usage {usage} threshold {threshold}");
                    if !contains {
                        let expected = if (high as f64) < threshold { Band::Safe } else { Band::Critical };
                        assert_eq!(band, expected);
                    }
                }
            }
        }
    }

    mod segment_tests {
        use super::*;

        #[test]
        fn proportional() {
            assert_eq!(filled_segments(0.0), 0);
            assert_eq!(filled_segments(50.0), 25);
            assert_eq!(filled_segments(70.0), 35);
            assert_eq!(filled_segments(99.9), 49);
            // 0.58 * 50 略小于 29
            assert_eq!(filled_segments(58.0), 28);
            assert_eq!(filled_segments(100.0), BAR_WIDTH);
        }

        #[test]
        fn clamped() {
            assert_eq!(filled_segments(-20.0), 0);
            assert_eq!(filled_segments(250.0), BAR_WIDTH);
            assert_eq!(filled_segments(f64::INFINITY), BAR_WIDTH);
            assert_eq!(filled_segments(f64::NEG_INFINITY), 0);
            assert_eq!(filled_segments(f64::NAN), 0);
        }
    }

    mod draw_tests {
        use super::*;

        #[test]
        fn headline_and_bar() {
            let out = draw(ResourceKind::Cpu, 70.0);
            assert!(out.starts_with(&separator()));
            assert!(out.contains("CPU usage: 70.00% (error range: 65% - 75%)"));

            let bar = format!(" [{}{}] 70.00%", "#".repeat(35), " ".repeat(15));
            assert!(out.contains(&bar), "{out}");
        }

        #[test]
        fn out_of_range_usage_keeps_bar_width() {
            let out = draw(ResourceKind::Disk, 140.0);
            let bar = format!(" [{}] 140.00%", "#".repeat(BAR_WIDTH));
            assert!(out.contains(&bar), "{out}");

            let out = draw(ResourceKind::Disk, -3.0);
            let bar = format!(" [{}] -3.00%", " ".repeat(BAR_WIDTH));
            assert!(out.contains(&bar), "{out}");
        }

        #[test]
        fn note_follows_bar() {
            for kind in ResourceKind::ALL {
                let out = draw(kind, 10.0);
                let info = out.find("[info]").unwrap();
                for line in kind.note() {
                    assert!(out[info..].contains(line));
                }
            }
        }
    }
}
