use env_logger::{Builder, Env};
use log::debug;
use std::io::Write;

/// Install the `LEVEL [file:line] message` logger. `RUST_LOG` overrides the
/// `info` default. If a logger is already installed it stays in place.
pub fn init_logging() {
    let installed = Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let file = record.file().unwrap_or("unknown");
            let line = record.line().unwrap_or(0);
            writeln!(
                buf,
                "{} [{}:{}] {}",
                record.level(),
                file,
                line,
                record.args()
            )
        })
        .try_init();
    if let Err(err) = installed {
        debug!("Keeping the existing logger: {}", err);
    }
}
