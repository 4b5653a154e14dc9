use anyhow::{Result, bail};
use tracing::{debug, warn};

use crate::config::Config;
use crate::interpreter::Interpreter;

/// The three events the window surface hands to the core: the dialog opened,
/// the button was clicked, the dialog is closing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Ready,
    Activate,
    Terminate,
}

/// Glue between the UI surface and the embedded interpreter. Owns the
/// interpreter handle between `Ready` and `Terminate` and fires the configured
/// call on every `Activate`.
pub struct Host {
    config: Config,
    interpreter: Option<Interpreter>,
}

impl Host {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            interpreter: None,
        }
    }

    /// Dispatch one UI event.
    ///
    /// A failed `Ready` is fatal (no interpreter means nothing else can work).
    /// A failed call on `Activate` is logged and swallowed so a broken script
    /// never takes the window down with it.
    pub fn handle(&mut self, event: HostEvent) -> Result<()> {
        match event {
            HostEvent::Ready => {
                if self.interpreter.is_some() {
                    bail!("host received Ready twice");
                }
                self.interpreter = Some(Interpreter::start(&self.config.script_dir)?);
                Ok(())
            }
            HostEvent::Activate => {
                let Some(interpreter) = self.interpreter.as_ref() else {
                    warn!("activation before the interpreter was started; ignoring");
                    return Ok(());
                };
                let request = self.config.request();
                match interpreter.invoke(&request) {
                    // The result is demo-only; nothing consumes it.
                    Ok(value) => debug!(value, "script call returned"),
                    Err(e) => {
                        let chain = anyhow::Error::from(e);
                        warn!(error = %format!("{chain:#}"), "script call failed");
                    }
                }
                Ok(())
            }
            HostEvent::Terminate => {
                if let Some(interpreter) = self.interpreter.take() {
                    interpreter.stop();
                }
                Ok(())
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.interpreter.is_some()
    }
}
