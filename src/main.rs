use std::io::{self, Write};
use std::thread;
use crossterm::{cursor, terminal, QueueableCommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use sysbar::config::MONITOR_INTERVAL;
use sysbar::prepare::{print_menu, read_choice, report_rejected};
use sysbar::{App, CpuSampler, Error, ProcfsStats, Selection};

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut stats = ProcfsStats::new()?;

    // 在等待输入前读取基准, 第一次轮询就有 CPU 使用率
    let mut cpu = CpuSampler::new();
    if let Err(err) = cpu.prime(&mut stats) {
        warn!(%err, "failed to read initial cpu counters");
    }

    let mut stdout = io::stdout();
    print_menu(&mut stdout)?;
    let input = read_choice(&mut io::stdin().lock())?;
    let (selection, rejected) = Selection::parse(&input);
    report_rejected(&mut stdout, &rejected)?;
    info!(?selection, "monitoring");

    let mut app = App::new(selection, stats, cpu);
    loop {
        let mut out = stdout.lock();
        out.queue(terminal::Clear(terminal::ClearType::All))?
            .queue(cursor::MoveTo(0, 0))?;
        app.tick(&mut out)?;
        out.flush()?;
        drop(out);

        thread::sleep(MONITOR_INTERVAL);
    }
}
