use anyhow::Context;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use vkeyboard::{Config, Platform};

mod replay;

#[derive(Parser, Debug)]
#[command(name = "vkeyboard")]
#[command(version, about = "Virtual keyboard input dispatcher")]
struct Cli {
    /// Replay a TOML script of key activations and print the resulting text
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Configuration file (defaults to ~/.config/vkeyboard/config.toml)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Force the input path (mobile or desktop)
    #[arg(long, short = 'p', value_name = "PLATFORM")]
    platform: Option<Platform>,

    /// Print every call made on the text field
    #[arg(long, action = ArgAction::SetTrue)]
    show_calls: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let Some(script_path) = cli.script else {
        println!("vkeyboard: Virtual keyboard input dispatcher");
        println!();
        println!("Usage:");
        println!("  vkeyboard --script FILE                 Replay a key script");
        println!("  vkeyboard --script FILE --show-calls    Also print each dispatched call");
        println!("  vkeyboard --help                        Show help");
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let script = replay::Script::load(&script_path)?;
    let recorded = replay::run(&script, &config, cli.platform)
        .with_context(|| format!("Replay of {} failed", script_path.display()))?;

    if cli.show_calls {
        for call in &recorded.calls {
            println!("call: {call:?}");
        }
    }
    println!("text: {:?}", recorded.field.text());
    println!("submitted: {}", recorded.field.is_submitted());

    Ok(())
}
