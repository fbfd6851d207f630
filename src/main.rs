use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use soul_commander::engine::{Output, OutputBlock};
use soul_commander::save::FileStore;
use soul_commander::{GameState, Settings, default_world, load_world_from_file};

#[derive(Parser)]
#[command(name = "soul_commander")]
#[command(about = "Soul Commander, a text-command fantasy RPG")]
struct Cli {
    /// World file to play instead of the built-in one
    #[arg(long)]
    world: Option<PathBuf>,

    /// Save file location
    #[arg(long)]
    save: Option<PathBuf>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Don't save automatically on quit
    #[arg(long)]
    no_autosave: bool,
}

fn flush_output(out: Output) {
    let mut printed_anything = false;

    for block in out.blocks {
        match block {
            OutputBlock::Title(t) => {
                if printed_anything {
                    println!();
                }
                println!("== {} ==", t);
            }
            OutputBlock::Text(line) => println!("{}", line),
            OutputBlock::Combat(line) => println!("⚔️  {}", line),
            OutputBlock::Loot(line) => println!("💰 {}", line),
            OutputBlock::Xp(line) => println!("⭐ {}", line),
            OutputBlock::Heal(line) => println!("💚 {}", line),
            OutputBlock::Warning(line) => println!("⚠️  {}", line),
            OutputBlock::Clear => {
                // ANSI: clear screen, cursor home
                print!("\x1b[2J\x1b[H");
            }
        }
        printed_anything = true;
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let world = match &cli.world {
        Some(path) => load_world_from_file(path).map(|w| {
            println!("Using world file: {}", path.display());
            w
        }),
        None => default_world(),
    };
    let world = match world {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Failed to load world: {e}");
            std::process::exit(1);
        }
    };

    let store = cli.save.map(FileStore::new).unwrap_or_default();
    let mut game = GameState::new(world)
        .with_store(store)
        .with_settings(Settings {
            auto_save: !cli.no_autosave,
        });
    if let Some(seed) = cli.seed {
        game = game.with_seed(seed);
    }

    flush_output(game.start(chrono::Local::now().date_naive()));

    let stdin = io::stdin();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        let bytes_read = stdin.read_line(&mut input)?;
        if bytes_read == 0 {
            // EOF behaves like quit so auto-save still runs
            let (out, _) = game.step("quit");
            flush_output(out);
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (out, quit) = game.step(input);
        flush_output(out);

        if quit {
            break;
        }
    }

    Ok(())
}
