use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use pyo3::prelude::*;
use thiserror::Error;
use tracing::debug;

/// Tracks whether a live `Interpreter` handle exists anywhere in the process.
/// CPython is process-wide state, so there can be at most one.
static RUNNING: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("an interpreter handle is already live in this process")]
    AlreadyRunning,
    #[error("failed to configure the interpreter's module search path")]
    Configure(#[source] PyErr),
}

/// Owning handle for the embedded CPython runtime.
///
/// Created by [`Interpreter::start`] and released by [`Interpreter::stop`] (or
/// drop). All call-bridge operations borrow this handle, so they cannot outlive
/// it, and the handle is `!Send` so they stay on the thread that started the
/// interpreter.
pub struct Interpreter {
    script_dir: PathBuf,
    // Pins the handle to its creating thread.
    _not_send: PhantomData<*mut ()>,
}

impl Interpreter {
    /// Initialize the embedded interpreter and make scripts under `script_dir`
    /// importable by module name.
    ///
    /// CPython itself aborts the process if it cannot come up at all; every
    /// post-init configuration failure is reported as a [`LifecycleError`].
    pub fn start(script_dir: &Path) -> Result<Self, LifecycleError> {
        if RUNNING
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(LifecycleError::AlreadyRunning);
        }

        Python::initialize();

        let configured = Python::attach(|py| -> PyResult<()> {
            let sys = py.import("sys")?;

            // Scripts are meant to be edited while the host runs; skip .pyc
            // files so every reload recompiles from source.
            sys.setattr("dont_write_bytecode", true)?;

            sys.getattr("path")?
                .call_method1("append", (script_dir.to_string_lossy(),))?;
            Ok(())
        });

        if let Err(e) = configured {
            RUNNING.store(false, Ordering::SeqCst);
            return Err(LifecycleError::Configure(e));
        }

        debug!(dir = %script_dir.display(), "interpreter started");
        Ok(Self {
            script_dir: script_dir.to_path_buf(),
            _not_send: PhantomData,
        })
    }

    /// Directory whose scripts this interpreter resolves by module name.
    pub fn script_dir(&self) -> &Path {
        &self.script_dir
    }

    /// Tear the interpreter down.
    ///
    /// pyo3 does not support finalizing and re-initializing CPython, so the
    /// runtime itself is reclaimed at process exit; this releases the handle's
    /// owned state and allows a later `start` to succeed.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for Interpreter {
    fn drop(&mut self) {
        RUNNING.store(false, Ordering::SeqCst);
        debug!("interpreter stopped");
    }
}
