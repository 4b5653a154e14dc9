use anyhow::Result;
use tracing_subscriber::EnvFilter;

use py_caller::{Config, Host, HostEvent};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    let mut host = Host::new(config);

    // Same event order the dialog produces: open, click, close.
    host.handle(HostEvent::Ready)?;
    host.handle(HostEvent::Activate)?;
    host.handle(HostEvent::Terminate)?;

    Ok(())
}
