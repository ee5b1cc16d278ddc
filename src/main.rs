use clap::Parser;
use minish::{Shell, ShellOptions};

#[derive(Parser)]
#[command(name = "minish")]
#[command(about = "A minimal interactive command interpreter")]
#[command(version)]
struct Cli {
    /// Execute a single command line and exit
    #[arg(short = 'c')]
    command: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let mut shell = match Shell::new() {
        Ok(shell) => shell,
        Err(err) => {
            eprintln!("minish: {}", err);
            std::process::exit(1);
        }
    };

    match shell.run(ShellOptions { command: cli.command }) {
        Ok(status) => std::process::exit(status),
        Err(err) => {
            eprintln!("minish: {}", err);
            std::process::exit(1);
        }
    }
}
