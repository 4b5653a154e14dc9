use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::bridge::CallRequest;

/// Host configuration: where scripts live and which function gets called on
/// activation. Defaults match the original tool; each field can be overridden
/// through the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub script_dir: PathBuf,
    pub module: String,
    pub function: String,
    pub args: Vec<i64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            script_dir: PathBuf::from("Dlls/"),
            module: "ExternalPythonTool".to_string(),
            function: "add_func".to_string(),
            args: vec![1, 2],
        }
    }
}

impl Config {
    /// Read overrides from `PY_CALLER_SCRIPT_DIR`, `PY_CALLER_MODULE`,
    /// `PY_CALLER_FUNCTION`, and `PY_CALLER_ARGS` (colon-separated integers).
    /// A malformed `PY_CALLER_ARGS` keeps the default arguments.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("PY_CALLER_SCRIPT_DIR") {
            config.script_dir = PathBuf::from(dir);
        }
        if let Ok(module) = env::var("PY_CALLER_MODULE") {
            config.module = module;
        }
        if let Ok(function) = env::var("PY_CALLER_FUNCTION") {
            config.function = function;
        }
        if let Ok(args) = env::var("PY_CALLER_ARGS") {
            match parse_args(&args) {
                Some(parsed) => config.args = parsed,
                None => warn!(value = %args, "ignoring malformed PY_CALLER_ARGS"),
            }
        }

        config
    }

    /// The request sent on every activation.
    pub fn request(&self) -> CallRequest {
        CallRequest::new(self.module.clone(), self.function.clone(), self.args.clone())
    }
}

fn parse_args(value: &str) -> Option<Vec<i64>> {
    value
        .split(':')
        .map(|part| part.trim().parse::<i64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_original_tool() {
        let config = Config::default();
        assert_eq!(config.script_dir, PathBuf::from("Dlls/"));
        assert_eq!(config.module, "ExternalPythonTool");
        assert_eq!(config.function, "add_func");
        assert_eq!(config.args, vec![1, 2]);
    }

    #[test]
    fn args_parse_as_colon_separated_integers() {
        assert_eq!(parse_args("1:2"), Some(vec![1, 2]));
        assert_eq!(parse_args("7"), Some(vec![7]));
        assert_eq!(parse_args(" 3 : -4 "), Some(vec![3, -4]));
        assert_eq!(parse_args("1:two"), None);
        assert_eq!(parse_args(""), None);
    }

    #[test]
    fn request_reflects_config() {
        let config = Config::default();
        let req = config.request();
        assert_eq!(req.module, "ExternalPythonTool");
        assert_eq!(req.function, "add_func");
        assert_eq!(req.args, vec![1, 2]);
    }
}
