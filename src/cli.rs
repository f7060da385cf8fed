use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "droid-tui")]
#[command(version)]
#[command(about = "A TUI for Android device inspection over adb", long_about = None)]
pub struct Cli {
    #[arg(short, long, help = "Attach to the device with this serial")]
    pub serial: Option<String>,

    #[arg(short, long, help = "Package to preselect as the memory polling target")]
    pub package: Option<String>,

    #[arg(
        short = 'i',
        long,
        help = "Memory polling interval (e.g. 500ms, 1s, 2s)",
        value_parser = parse_duration
    )]
    pub interval: Option<Duration>,

    #[arg(
        short = 'c',
        long,
        help = "Path to configuration file",
        env = "DROID_TUI_CONFIG"
    )]
    pub config: Option<PathBuf>,
}

fn parse_duration(s: &str) -> Result<Duration, humantime::DurationError> {
    humantime::parse_duration(s)
}
