use std::collections::BTreeMap;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use jobs2d_core::driver::{
    AnimatedDriverDecorator, DriverComposite, LineDriverAdapter, LoggerDriver, RecordingLineDrawer,
};
use jobs2d_core::visitor::{VariantCounter, describe};
use jobs2d_core::{BoxError, Job2dDriver, Point, driver_dispatcher};

#[derive(Debug, Parser)]
#[command(name = "jobs2d", about = "Run visitors over a demo 2D driver tree")]
struct Cli {
    /// tracing filter (RUST_LOG が優先)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// animated decorator の補間ステップ数
    #[arg(long, global = true, default_value_t = 4)]
    steps: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// driver ツリーを表示
    Describe {
        #[arg(long)]
        json: bool,
    },
    /// variant ごとの driver 数を表示
    Count {
        #[arg(long)]
        json: bool,
    },
    /// dispatcher に登録済みの variant を表示
    Variants,
}

#[derive(Debug, Serialize)]
struct CountReport {
    total: usize,
    variants: BTreeMap<String, usize>,
}

fn init_logging(log_level: &str) -> Result<(), BoxError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

/// デモ用の driver ツリー: logger + animated(line) + line を composite で束ねる
fn demo_driver(steps: u32) -> DriverComposite {
    let animated = AnimatedDriverDecorator::new(
        Box::new(LineDriverAdapter::new(RecordingLineDrawer::default())),
        steps,
    );
    let mut root = DriverComposite::new()
        .with(LoggerDriver::new("console"))
        .with(animated)
        .with(LineDriverAdapter::new(RecordingLineDrawer::default()));

    // 正方形を 1 つ描く
    root.set_position(Point::new(-10, -10));
    for corner in [(10, -10), (10, 10), (-10, 10), (-10, -10)] {
        root.operate_to(Point::new(corner.0, corner.1));
    }
    tracing::debug!(drivers = root.len(), steps, "built demo driver tree");
    root
}

fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let root = demo_driver(cli.steps);
    let root: &dyn Job2dDriver = &root;

    match cli.command {
        Command::Describe { json } => {
            let node = describe(root)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&node)?);
            } else {
                print!("{node}");
            }
        }
        Command::Count { json } => {
            let mut counter = VariantCounter::new();
            root.accept(&mut counter)?;
            let report = CountReport {
                total: counter.total(),
                variants: counter.into_counts(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for (variant, count) in &report.variants {
                    println!("{variant:<24} {count}");
                }
                println!("{:<24} {}", "total", report.total);
            }
        }
        Command::Variants => {
            for variant in driver_dispatcher()?.registered_variants() {
                println!("{:<24} {}", variant.short_name(), variant.name());
            }
        }
    }

    Ok(())
}
