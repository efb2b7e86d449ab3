use chess_rules::config::{GameConfig, PlayerConfig};
use chess_rules::console::ConsoleHandler;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "chess-rules", about = "Play chess against a material minimax engine")]
struct Args {
    /// human, random, greedy, minimax or minimax:<depth>
    #[arg(long, default_value = "human")]
    white: PlayerConfig,

    #[arg(long, default_value = "minimax:2")]
    black: PlayerConfig,

    /// Seed for engine tie-breaking
    #[arg(long)]
    seed: Option<u64>,

    /// Overrides RUST_LOG, e.g. `debug` or `trace`
    #[arg(long)]
    log_level: Option<log::LevelFilter>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env = env_logger::Env::default().default_filter_or("warn");
    let mut logger = env_logger::Builder::from_env(env);
    if let Some(level) = args.log_level {
        logger.filter_level(level);
    }
    logger.init();

    let config = GameConfig {
        white: args.white,
        black: args.black,
        seed: args.seed,
    };
    let mut console = ConsoleHandler::new(&config);
    console.run()
}
