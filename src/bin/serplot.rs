//! serplot - live plots of integer samples streamed over a serial port.
//!
//! Usage:
//!   serplot                          # default port, 115200 baud, start byte 'b'
//!   serplot -p /dev/ttyACM0 -b 9600  # custom port and baud rate
//!   serplot --start-byte none        # device streams without a handshake
//!   serplot --file samples.log       # tail a file instead of a port
//!   serplot --headless               # print timestamped values, no TUI
//!   serplot --list-ports             # show available serial ports

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use serplot::plot::{PlotConfig, PlotSet};
use serplot::source::{FileSource, SampleSource, SerialConfig, SerialSource, SourceError};
use serplot::stream::SampleStream;
use serplot::tui::App;

/// Real-time scrolling plots for a serial integer stream.
#[derive(Parser)]
#[command(name = "serplot", about = "Real-time plots of a serial integer stream", version)]
struct Args {
    /// Serial port name (default: COM10 on Windows, /dev/ttyUSB0 elsewhere).
    #[arg(short, long, value_name = "PORT")]
    port: Option<String>,

    /// Baud rate.
    #[arg(short, long, default_value_t = serplot::source::DEFAULT_BAUD_RATE)]
    baud: u32,

    /// Byte sent to start streaming: a character, a hex value like 0x62,
    /// or "none" to skip the handshake write.
    #[arg(long, default_value = "b", value_parser = parse_start_byte)]
    start_byte: StartByte,

    /// Read samples from a file that another process appends to.
    #[arg(short, long, value_name = "PATH", conflicts_with = "port")]
    file: Option<String>,

    /// Read the file from its beginning instead of only new lines.
    #[arg(long, requires = "file")]
    from_start: bool,

    /// List available serial ports and exit.
    #[arg(long)]
    list_ports: bool,

    /// Poll interval in milliseconds.
    #[arg(short, long, default_value = "20")]
    interval: u64,

    /// Give up if no value arrives within this many seconds (default: wait forever).
    #[arg(long, value_name = "SECS")]
    handshake_timeout: Option<f64>,

    /// Samples in the fixed window.
    #[arg(long, default_value = "300")]
    window: usize,

    /// Initial capacity of the growing buffer.
    #[arg(long, default_value = "100")]
    grow_capacity: usize,

    /// Samples visible in the growing-buffer panel.
    #[arg(long, default_value = "100")]
    grow_view: f64,

    /// Samples per chunk.
    #[arg(long, default_value = "100")]
    chunk_size: usize,

    /// Chunks kept before the oldest is dropped.
    #[arg(long, default_value = "10")]
    max_chunks: usize,

    /// Seconds visible in the chunked panel.
    #[arg(long, default_value = "10")]
    time_window: f64,

    /// Print "timestamp<TAB>value" lines instead of opening the TUI.
    #[arg(long)]
    headless: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,

    /// Write logs to this file (in TUI mode logs are dropped otherwise).
    #[arg(long, value_name = "PATH")]
    log_file: Option<String>,
}

/// Parsed `--start-byte` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StartByte(Option<u8>);

/// Parses a start byte: "none", a hex value ("0x62"), or a single ASCII character.
fn parse_start_byte(s: &str) -> Result<StartByte, String> {
    if s.eq_ignore_ascii_case("none") {
        return Ok(StartByte(None));
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u8::from_str_radix(hex, 16)
            .map(|b| StartByte(Some(b)))
            .map_err(|e| format!("invalid hex byte '{}': {}", s, e));
    }
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(StartByte(Some(*b))),
        _ => Err(format!(
            "start byte must be one ASCII character, 0xNN or none, got '{}'",
            s
        )),
    }
}

/// Initializes the tracing subscriber.
///
/// The TUI owns the terminal, so without `--log-file` logs only go to stderr
/// in headless mode.
fn init_logging(args: &Args) -> io::Result<()> {
    let level = if args.quiet {
        Level::ERROR
    } else {
        match args.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let (writer, ansi) = if let Some(path) = &args.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        (BoxMakeWriter::new(Mutex::new(file)), false)
    } else if args.headless {
        (BoxMakeWriter::new(io::stderr), true)
    } else {
        (BoxMakeWriter::new(io::sink), false)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer)
        .init();
    Ok(())
}

fn plot_config(args: &Args) -> PlotConfig {
    PlotConfig {
        window: args.window,
        grow_capacity: args.grow_capacity,
        grow_view: args.grow_view,
        chunk_size: args.chunk_size,
        max_chunks: args.max_chunks,
        time_window: args.time_window,
    }
}

fn open_source(args: &Args) -> Result<Box<dyn SampleSource>, SourceError> {
    if let Some(path) = &args.file {
        return Ok(Box::new(FileSource::open(path, args.from_start)?));
    }

    let defaults = SerialConfig::default();
    let config = SerialConfig {
        port: args.port.clone().unwrap_or(defaults.port),
        baud_rate: args.baud,
        start_byte: args.start_byte.0,
        ..defaults
    };
    Ok(Box::new(SerialSource::open(&config)?))
}

fn list_ports() {
    match SerialSource::available_ports() {
        Ok(ports) if ports.is_empty() => println!("No serial ports found"),
        Ok(ports) => {
            for port in ports {
                println!("{}", port);
            }
        }
        Err(e) => {
            eprintln!("Error listing serial ports: {}", e);
            std::process::exit(1);
        }
    }
}

/// Prints values until Ctrl-C, feeding the same buffers the TUI would draw.
fn run_headless(
    mut stream: SampleStream,
    mut plots: PlotSet,
    interval: Duration,
) -> io::Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    let started = Instant::now();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !reader_alive(writeln!(out, "{}\t{}", timestamp(), plots.last_value()))? {
        return Ok(());
    }

    'poll: while running.load(Ordering::SeqCst) {
        let values = stream.poll();
        let t = started.elapsed().as_secs_f64();
        for value in values {
            plots.update(value, t);
            if !reader_alive(writeln!(out, "{}\t{}", timestamp(), value))? {
                break 'poll;
            }
        }
        if !reader_alive(out.flush())? {
            break;
        }
        thread::sleep(interval);
    }

    let stats = stream.stats();
    info!(
        "Stopped after {:.1}s: {} values, {} lines, {} rejected, {} overflows, {} read errors",
        started.elapsed().as_secs_f64(),
        stats.values,
        stats.decode.lines,
        stats.decode.rejected,
        stats.decode.overflows,
        stats.read_errors
    );
    info!(
        "Buffers: growing {}/{}, {} chunks holding {} samples, window position {}",
        plots.grow().len(),
        plots.grow().capacity(),
        plots.chunked().chunk_count(),
        plots.chunked().sample_count(),
        plots.shift().ptr()
    );
    Ok(())
}

/// Maps a write result to whether output should continue.
///
/// A closed pipe (e.g. `serplot --headless | head`) ends the loop quietly;
/// other errors are returned.
fn reader_alive(result: io::Result<()>) -> io::Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            info!("Output closed, stopping");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

fn main() {
    let args = Args::parse();

    if args.list_ports {
        list_ports();
        return;
    }

    if let Err(e) = init_logging(&args) {
        eprintln!("Error opening log file: {}", e);
        std::process::exit(1);
    }

    let config = plot_config(&args);
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let interval = Duration::from_millis(args.interval.max(1));
    let handshake_timeout = match args.handshake_timeout {
        Some(secs) if secs.is_finite() && secs > 0.0 => Some(Duration::from_secs_f64(secs)),
        Some(secs) => {
            eprintln!("Error: handshake timeout must be positive, got {}", secs);
            std::process::exit(1);
        }
        None => None,
    };

    let source = match open_source(&args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let mut stream = SampleStream::new(source);

    if !args.headless {
        eprintln!("Waiting for the first value from {} ...", stream.describe());
    }
    let first_value = match stream.wait_first_value(handshake_timeout, interval) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = if args.headless {
        run_headless(stream, PlotSet::new(config, first_value), interval)
    } else {
        App::new(stream, config, first_value).run(interval)
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start_byte() {
        assert_eq!(parse_start_byte("b"), Ok(StartByte(Some(b'b'))));
        assert_eq!(parse_start_byte("none"), Ok(StartByte(None)));
        assert_eq!(parse_start_byte("NONE"), Ok(StartByte(None)));
        assert_eq!(parse_start_byte("0x62"), Ok(StartByte(Some(0x62))));
        assert_eq!(parse_start_byte("0X0a"), Ok(StartByte(Some(0x0a))));
        assert!(parse_start_byte("0x100").is_err());
        assert!(parse_start_byte("ab").is_err());
        assert!(parse_start_byte("").is_err());
    }

    /// Accepts writes but fails every flush with `kind`.
    struct FailingFlush(io::ErrorKind);

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(self.0, "flush failed"))
        }
    }

    #[test]
    fn test_broken_pipe_on_flush_stops_output() {
        let mut out = FailingFlush(io::ErrorKind::BrokenPipe);
        assert!(reader_alive(writeln!(out, "1\t42")).unwrap());
        assert!(!reader_alive(out.flush()).unwrap());
    }

    #[test]
    fn test_other_flush_errors_are_returned() {
        let mut out = FailingFlush(io::ErrorKind::PermissionDenied);
        let err = reader_alive(out.flush()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["serplot"]);
        assert_eq!(args.baud, 115_200);
        assert_eq!(args.start_byte, StartByte(Some(b'b')));
        assert_eq!(args.interval, 20);
        assert_eq!(plot_config(&args), PlotConfig::default());
        assert!(!args.headless);
    }

    #[test]
    fn test_from_start_requires_file() {
        assert!(Args::try_parse_from(["serplot", "--from-start"]).is_err());
        assert!(Args::try_parse_from(["serplot", "--file", "x.log", "--from-start"]).is_ok());
        assert!(Args::try_parse_from(["serplot", "--file", "x", "--port", "COM1"]).is_err());
    }
}
