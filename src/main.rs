use anyhow::Context;
use crudpad::{error, logging, AppOptions, TuiApplication};

fn main() -> anyhow::Result<()> {
    let options = AppOptions::parse(std::env::args().skip(1))
        .and_then(AppOptions::with_env_defaults)
        .context("invalid command line")?;

    if options.show_help {
        println!("{}", AppOptions::usage());
        return Ok(());
    }
    if options.show_version {
        println!("crudpad {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let logger = logging::init(&options).context("failed to initialize logging")?;
    if let Some(path) = logger.file_path() {
        log::debug!("debug log: {}", path.display());
    }
    error::setup_panic_handler();

    log::info!("base directory: {}", options.resolved_base_dir().display());
    let mut app = TuiApplication::new(&options);
    app.run().context("terminal session failed")?;
    Ok(())
}
