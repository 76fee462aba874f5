//! Argument vector construction for companion invocations.
//!
//! The builder only ever appends tokens for parameters that are present, so
//! an unset option can never leak into the argument vector as a blank token.

/// Flag asking the companion to emit a JSON document on stdout.
pub const JSON_FLAG: &str = "--json";

/// Builds the argument vector for one companion call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgsBuilder {
    args: Vec<String>,
}

impl ArgsBuilder {
    /// Start a vector with the subcommand (or probe flag) as first token.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            args: vec![command.into()],
        }
    }

    /// Append a positional argument.
    pub fn positional(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Append the machine-readable-output flag.
    pub fn json(mut self) -> Self {
        self.args.push(JSON_FLAG.to_string());
        self
    }

    /// Append `flag` when `enabled` is true.
    pub fn switch(mut self, flag: &str, enabled: bool) -> Self {
        if enabled {
            self.args.push(flag.to_string());
        }
        self
    }

    /// Append `flag value` when a non-empty value is supplied.
    pub fn option<S: AsRef<str>>(mut self, flag: &str, value: Option<S>) -> Self {
        if let Some(value) = value {
            let value = value.as_ref();
            if !value.is_empty() {
                self.args.push(flag.to_string());
                self.args.push(value.to_string());
            }
        }
        self
    }

    /// Finish and return the argument vector.
    pub fn build(self) -> Vec<String> {
        self.args
    }
}
