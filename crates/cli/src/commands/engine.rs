//! Raw pass-through to the companion executable.

use agent_bridge::{create_bridge, DecodedResult};
use agent_core::{AppConfig, AppResult};
use clap::Args;
use serde_json::Value;

use crate::output;

/// Run the companion engine with arbitrary arguments
#[derive(Args, Debug)]
pub struct EngineCommand {
    /// Arguments forwarded verbatim to the companion
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "ARGS"
    )]
    pub args: Vec<String>,
}

impl EngineCommand {
    pub async fn execute(&self, config: &AppConfig, json: bool) -> AppResult<()> {
        tracing::info!("Executing engine command");
        tracing::debug!("Engine arguments: {:?}", self.args);

        let bridge = create_bridge(config)?;
        let decoded = bridge.run(self.args.clone()).await?;

        match render(decoded, json) {
            Rendered::Json(value) => output::json(&value)?,
            Rendered::Text(text) => println!("{}", text),
            Rendered::Nothing => {}
        }

        Ok(())
    }
}

#[derive(Debug, PartialEq)]
enum Rendered {
    Json(Value),
    Text(String),
    Nothing,
}

/// Documents always print as JSON; plain output only when `--json` is off.
fn render(decoded: DecodedResult, json: bool) -> Rendered {
    if json || decoded.is_document() {
        return Rendered::Json(decoded.into_value());
    }

    match decoded {
        DecodedResult::Raw(text) => Rendered::Text(text),
        _ => Rendered::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_renders_as_json() {
        let decoded = DecodedResult::decode(r#"{"success":true,"version":"0.1.0"}"#);
        assert_eq!(
            render(decoded, false),
            Rendered::Json(json!({ "success": true, "version": "0.1.0" }))
        );
    }

    #[test]
    fn test_plain_output_depends_on_json_flag() {
        assert_eq!(
            render(DecodedResult::decode("agents-core 0.1.0\n"), false),
            Rendered::Text("agents-core 0.1.0".to_string())
        );
        assert_eq!(
            render(DecodedResult::decode("agents-core 0.1.0\n"), true),
            Rendered::Json(json!({ "success": true, "output": "agents-core 0.1.0" }))
        );
    }

    #[test]
    fn test_empty_output() {
        assert_eq!(render(DecodedResult::Empty, false), Rendered::Nothing);
        assert_eq!(
            render(DecodedResult::Empty, true),
            Rendered::Json(json!({ "success": true }))
        );
    }
}
