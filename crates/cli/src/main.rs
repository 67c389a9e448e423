use std::net::{SocketAddr, ToSocketAddrs};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use framecast::media::jpeg::JpegFrameEncoder;
use framecast::protocol::{DEFAULT_MAX_PAYLOAD, DEFAULT_PORT};
use framecast::{Caster, CasterConfig, PacingPolicy, ProtocolVariant};

mod pattern;

use pattern::TestPatternSource;

#[derive(Parser)]
#[command(
    name = "framecast-sender",
    about = "Stream JPEG-compressed frames over UDP, one datagram per fragment"
)]
struct Args {
    /// Target host or IP address
    target: String,

    /// Target UDP port
    #[arg(long, short, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Compressed-frame bytes per fragment (header excluded)
    #[arg(long, default_value_t = DEFAULT_MAX_PAYLOAD)]
    max_payload: usize,

    /// JPEG quality, 1-100
    #[arg(long, short, default_value_t = 60)]
    quality: u8,

    /// Frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Frame width in pixels
    #[arg(long, default_value_t = 1640)]
    width: u32,

    /// Frame height in pixels
    #[arg(long, default_value_t = 1232)]
    height: u32,

    /// Disable the latency probe (3-byte headers instead of 11).
    /// The receiver must be configured the same way.
    #[arg(long)]
    no_probe: bool,

    /// Pause between consecutive fragment sends, in microseconds
    #[arg(long, default_value_t = 150)]
    pace_micros: u64,
}

fn resolve_target(host: &str, port: u16) -> std::io::Result<SocketAddr> {
    (host, port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| std::io::Error::other("no address for target"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let dest = match resolve_target(&args.target, args.port) {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("Failed to resolve {}:{}: {}", args.target, args.port, e);
            return ExitCode::FAILURE;
        }
    };

    let mut config = CasterConfig::new(dest);
    config.variant = if args.no_probe {
        ProtocolVariant::WithoutTimestamp
    } else {
        ProtocolVariant::WithTimestamp
    };
    config.max_payload = args.max_payload;
    config.pacing = if args.pace_micros == 0 {
        PacingPolicy::None
    } else {
        PacingPolicy::FixedDelay(Duration::from_micros(args.pace_micros))
    };

    let mut caster = match Caster::new(config) {
        Ok(caster) => caster,
        Err(e) => {
            eprintln!("Failed to start sender: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        %dest,
        probe = !args.no_probe,
        quality = args.quality,
        fps = args.fps,
        "streaming test pattern"
    );

    let mut source = TestPatternSource::new(args.width, args.height, args.fps);
    let encoder = JpegFrameEncoder::new(args.quality);

    // Runs until the process is terminated externally.
    if let Err(e) = caster.run(&mut source, &encoder) {
        eprintln!("Sender stopped: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
