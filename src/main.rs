use anyhow::Result;
use clap::Parser;
use friends_renamer::app;
use friends_renamer::cli::Args;
use friends_renamer::config::Config;
use friends_renamer::logging;
use friends_renamer::selector::TerminalPrompter;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize file logging to ~/friends-renamer.log
    logging::init(logging::open_target(&logging::default_log_path()));

    let config = Config::load(args.config.as_deref())?.apply_args(&args);

    let mut prompter = TerminalPrompter;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    app::run(&config, &args.presets(), &mut prompter, &mut out)?;

    Ok(())
}
