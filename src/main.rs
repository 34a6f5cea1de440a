//! Headless replay runner (default binary).
//!
//! Applies a list of named actions to a seeded session and prints the final
//! snapshot as JSON. Drawing and input devices belong to other front ends.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::{info, warn, LevelFilter};
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

use puyo_engine::core::{EngineConfig, GameSession, SimpleRng};
use puyo_engine::types::Action;

#[derive(Parser, Debug)]
#[command(name = "puyo-replay", about = "Replay actions against a seeded session")]
struct Cli {
    /// RNG seed for the piece queue
    #[arg(long, default_value_t = 1)]
    seed: u32,

    /// Rule overrides (TOML: clear_threshold, cell_score, color_count)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Stop at the first action that does not take effect
    #[arg(long)]
    strict: bool,

    /// Actions such as moveLeft, rotateRight, softDrop, hardDrop, lock, advance, reset
    actions: Vec<String>,
}

fn init_log(level: LevelFilter) -> Result<()> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {l} {t} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .context("building log config")?;
    log4rs::init_config(config).context("installing logger")?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    EngineConfig::from_toml_str(&content)
        .with_context(|| format!("parsing config from {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level: LevelFilter = cli
        .log_level
        .parse()
        .map_err(|_| anyhow!("invalid log level '{}'", cli.log_level))?;
    init_log(level)?;

    let config = load_config(cli.config.as_ref())?;
    let mut session = GameSession::new(config, SimpleRng::new(cli.seed));
    session.spawn_next();

    for (step, name) in cli.actions.iter().enumerate() {
        let Some(action) = Action::from_str(name) else {
            bail!("unknown action '{}' at step {}", name, step);
        };

        if !session.apply_action(action) {
            if cli.strict {
                bail!("action '{}' at step {} had no effect", name, step);
            }
            warn!("step {}: {} had no effect", step, action.as_str());
        }
    }

    info!(
        "finished: score {} max chain {} state {}",
        session.score(),
        session.max_chain(),
        session.state().as_str()
    );

    let json = serde_json::to_string_pretty(&session.snapshot()).context("encoding snapshot")?;
    println!("{json}");
    Ok(())
}
