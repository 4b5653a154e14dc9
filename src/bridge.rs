use pyo3::prelude::*;
use pyo3::types::{PyBool, PyFloat, PyInt, PyTuple};
use thiserror::Error;
use tracing::debug;

use crate::interpreter::Interpreter;

/// One invocation of a script function: which module, which function, and the
/// integer arguments to pass. Built fresh for every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub module: String,
    pub function: String,
    pub args: Vec<i64>,
}

impl CallRequest {
    pub fn new(module: impl Into<String>, function: impl Into<String>, args: Vec<i64>) -> Self {
        Self {
            module: module.into(),
            function: function.into(),
            args,
        }
    }
}

#[derive(Debug, Error)]
pub enum CallError {
    #[error("could not load module '{module}'")]
    ModuleLoad {
        module: String,
        #[source]
        source: PyErr,
    },
    #[error("module '{module}' has no function '{function}'")]
    FunctionMissing { module: String, function: String },
    #[error("'{module}.{function}' raised")]
    CallFailed {
        module: String,
        function: String,
        #[source]
        source: PyErr,
    },
    #[error("'{module}.{function}' returned non-numeric {type_name}")]
    NotNumeric {
        module: String,
        function: String,
        type_name: String,
    },
}

impl Interpreter {
    /// Import (or re-import) the requested module, look up the requested
    /// function, call it with the integer arguments, and convert the result to
    /// `f64`.
    ///
    /// The module is reloaded on every call so edits to the script on disk take
    /// effect without restarting the interpreter.
    pub fn invoke(&self, request: &CallRequest) -> Result<f64, CallError> {
        Python::attach(|py| {
            let module = py
                .import(request.module.as_str())
                .and_then(|m| py.import("importlib")?.call_method1("reload", (m,)))
                .map_err(|e| CallError::ModuleLoad {
                    module: request.module.clone(),
                    source: e,
                })?;

            let func = module.getattr(request.function.as_str()).map_err(|_| {
                CallError::FunctionMissing {
                    module: request.module.clone(),
                    function: request.function.clone(),
                }
            })?;

            let call_failed = |e: PyErr| CallError::CallFailed {
                module: request.module.clone(),
                function: request.function.clone(),
                source: e,
            };
            let args = PyTuple::new(py, &request.args).map_err(call_failed)?;
            let result = func.call1(args).map_err(call_failed)?;

            // Strict numeric check: bool is a subclass of int in Python, but a
            // script handing back True/False is almost certainly a bug.
            let numeric = !result.is_instance_of::<PyBool>()
                && (result.is_instance_of::<PyInt>() || result.is_instance_of::<PyFloat>());
            if !numeric {
                return Err(CallError::NotNumeric {
                    module: request.module.clone(),
                    function: request.function.clone(),
                    type_name: result
                        .get_type()
                        .name()
                        .map(|n| n.to_string())
                        .unwrap_or_else(|_| "<unknown>".to_string()),
                });
            }

            let value = result.extract::<f64>().map_err(call_failed)?;

            debug!(
                module = %request.module,
                function = %request.function,
                value,
                "call completed"
            );
            Ok(value)
        })
    }
}
