use clap::Parser;

use slicestore::config::StoreConfig;
use slicestore::demo::{Cli, Demo};
use slicestore::logging::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => StoreConfig::load_from(path)?,
        None => StoreConfig::load()?,
    };

    let demo = Demo::start(config)?;
    print_lines(&demo);

    for step in &cli.steps {
        demo.run(step)?;
        print_lines(&demo);
    }

    if cli.print_state {
        println!("{}", demo.state_json()?);
    }
    Ok(())
}

fn print_lines(demo: &Demo) {
    for line in demo.screen().take() {
        println!("{line}");
    }
}
