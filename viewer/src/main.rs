use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::thread;

use clap::Parser;
use tracing::{info, span, warn, Level};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use emojed::overlay::{OverlayRenderer, TracingRenderer};
use emojed::{replay, ConfigStore, DisplayConfig, OverlayTracker};

#[derive(Parser)]
struct Options {
    #[arg(short, long, help = "Recorded session to replay, stdin if omitted")]
    pub input: Option<PathBuf>,

    #[arg(long, help = "Treat the session as rear-camera footage")]
    pub rear_camera: bool,

    #[arg(long, help = "Overlay size multiplier")]
    pub emoji_scale: Option<f32>,

    #[arg(short, long, help = "Only log, do not print placement commands")]
    pub quiet: bool,
}

fn init_tracing() {
    let filter_layer = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let subscriber = Registry::default().with(filter_layer);

    let fmt_layer = tracing_subscriber::fmt::layer();

    #[cfg(feature = "tracing")]
    let fmt_layer = tracing_subscriber::layer::Layer::with_filter(fmt_layer, tracing_subscriber::filter::filter_fn(|meta| {
        meta.fields().field("tracy.frame_mark").is_none()
    }));

    let subscriber = subscriber.with(fmt_layer);

    #[cfg(feature = "tracing")]
    let subscriber = subscriber.with(tracing_tracy::TracyLayer::default());

    subscriber.init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let opts = Options::parse();

    let config_store = build_config_store(&opts)?;

    let (line_tx, line_rx) = crossbeam_channel::bounded(64);
    let line_tx_clone = line_tx.clone();

    ctrlc::set_handler(move || {
        line_tx.send(None).ok();
    })?;

    let reader: Box<dyn BufRead + Send> = match &opts.input {
        Some(path) => {
            info!("Replaying session {}", path.display());
            Box::new(BufReader::new(File::open(path)?))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    thread::spawn(move || {
        for (number, line) in reader.lines().enumerate() {
            match line {
                Ok(text) => {
                    if line_tx_clone.send(Some((number + 1, text))).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    warn!("session input failed: {err}");
                    break;
                }
            }
        }
        line_tx_clone.send(None).ok();
    });

    let mut tracker = OverlayTracker::new();
    let mut renderer = TracingRenderer;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    while let Ok(Some((number, text))) = line_rx.recv() {
        let span = span!(Level::DEBUG, "frame");
        let _span = span.enter();

        if text.trim().is_empty() {
            continue;
        }

        let record = match replay::parse_record(number, &text) {
            Ok(record) => record,
            Err(err) => {
                warn!("{err}");
                continue;
            }
        };

        let config = config_store.get();
        for command in tracker.handle_event(&record.event, config, &record.transform) {
            renderer.apply(&command);
            if !opts.quiet {
                serde_json::to_writer(&mut out, &command)?;
                out.write_all(b"\n")?;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::event!(Level::DEBUG, message = "frame end", tracy.frame_mark = true);
    }

    info!(
        "Session complete, {} overlay(s) still active",
        tracker.active_overlays().count()
    );
    Ok(())
}

fn build_config_store(opts: &Options) -> anyhow::Result<ConfigStore> {
    let mut store = ConfigStore::new(DisplayConfig::default())?;
    let mut config = store.get();
    if opts.rear_camera {
        config.use_front_camera = false;
    }
    if let Some(emoji_scale) = opts.emoji_scale {
        config.emoji_scale = emoji_scale;
    }
    store.set(config)?;
    Ok(store)
}
