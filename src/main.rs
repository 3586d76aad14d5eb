use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use env_logger::Env;

use portstat::{PortAnalyzer, PortRange, Report, SystemPortSource};

/// List used and open local TCP/UDP ports
#[derive(Parser, Debug)]
#[command(name = "portstat", version, about)]
struct Cli {
    /// First port of the range to inspect
    #[arg(env = "PORTSTAT_START")]
    start: Option<u16>,

    /// Last port of the range to inspect
    #[arg(env = "PORTSTAT_END")]
    end: Option<u16>,

    /// Print a single report and exit
    #[arg(short, long, value_enum)]
    report: Option<ReportKind>,

    /// Do not wait for Enter between the open and used reports
    #[arg(long)]
    no_pause: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportKind {
    Open,
    Used,
    OpenTcp,
    UsedTcp,
    TcpListeners,
    UdpListeners,
}

impl ReportKind {
    fn build(self, analyzer: &PortAnalyzer<SystemPortSource>) -> portstat::Result<Report> {
        match self {
            Self::Open => analyzer.all_open_report(),
            Self::Used => analyzer.all_used_report(),
            Self::OpenTcp => analyzer.open_tcp_report(),
            Self::UsedTcp => analyzer.used_tcp_report(),
            Self::TcpListeners => analyzer.tcp_listeners_report(),
            Self::UdpListeners => analyzer.udp_listeners_report(),
        }
    }
}

fn print_report(report: &Report) -> portstat::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{report}")?;
    stdout.flush()?;
    Ok(())
}

fn wait_for_enter() -> portstat::Result<()> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

fn main() -> portstat::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let range = PortRange::from_bounds(cli.start, cli.end);
    log::debug!("inspecting ports {range}");

    let analyzer = PortAnalyzer::system(range);

    if let Some(kind) = cli.report {
        return print_report(&kind.build(&analyzer)?);
    }

    print_report(&ReportKind::Open.build(&analyzer)?)?;
    if !cli.no_pause {
        wait_for_enter()?;
    }
    print_report(&ReportKind::Used.build(&analyzer)?)
}
