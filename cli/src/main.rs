mod commands;
mod terminal;

use commands::{CommandLine, Commands, import, inspect};
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init();
    print::banner();

    match commands.command {
        Commands::Import(args) => {
            print::header("inventory import");
            import::import(args)
        }
        Commands::Inspect { file, rows } => {
            print::header("export structure");
            inspect::inspect(&file, rows)
        }
    }
}
