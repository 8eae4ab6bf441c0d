//! Call-time execution of a compiled script.

use std::sync::Arc;

use async_trait::async_trait;
use rhai::serde::{from_dynamic, to_dynamic};
use rhai::{AST, Dynamic, Engine, Scope};
use serde_json::Value;
use synapse_api::{AdapterError, ClientRequest, Executor, ExecutorResponse};

/// A compiled script bound to the name of the function to call.
///
/// Each `execute` evaluates the script into a scope allocated for that
/// call alone, then invokes the entry function with the request body.
/// Nothing but the compiled AST is shared between calls, so one
/// executor serves any number of concurrent callers.
pub struct ScriptExecutor {
    engine: Arc<Engine>,
    ast: AST,
    entry: String,
    artifact: String,
}

impl ScriptExecutor {
    pub(crate) fn new(engine: Arc<Engine>, ast: AST, entry: &str, artifact: &str) -> Self {
        Self {
            engine,
            ast,
            entry: entry.to_string(),
            artifact: artifact.to_string(),
        }
    }

    /// Name of the entry function this executor calls.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Shelf path of the compiled artifact.
    pub fn artifact(&self) -> &str {
        &self.artifact
    }
}

#[async_trait]
impl Executor for ScriptExecutor {
    async fn execute(&self, request: ClientRequest) -> Result<ExecutorResponse, AdapterError> {
        let input = decode_input(request.body);
        let arg: Dynamic = to_dynamic(&input).map_err(|e| {
            AdapterError::Execution(format!(
                "cannot pass input to \"{}\": {e}",
                self.entry
            ))
        })?;

        let mut scope = Scope::new();
        let result: Dynamic = self
            .engine
            .call_fn(&mut scope, &self.ast, &self.entry, (arg,))
            .map_err(|e| {
                AdapterError::Execution(format!(
                    "script {} failed in \"{}\": {e}",
                    self.artifact, self.entry
                ))
            })?;

        let body: Value = from_dynamic(&result).map_err(|e| {
            AdapterError::Execution(format!(
                "script {} returned a value that does not convert to JSON: {e}",
                self.artifact
            ))
        })?;
        Ok(ExecutorResponse::new(body))
    }
}

/// Some clients double-encode payloads. A string body that itself
/// parses as JSON is decoded first, so the entry function sees
/// structured input either way.
fn decode_input(body: Value) -> Value {
    match body {
        Value::String(text) => match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(_) => Value::String(text),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_encoded_strings_are_decoded() {
        assert_eq!(
            decode_input(json!("{\"name\":\"Ada\"}")),
            json!({"name": "Ada"})
        );
    }

    #[test]
    fn plain_strings_pass_through() {
        assert_eq!(decode_input(json!("hello world")), json!("hello world"));
    }

    #[test]
    fn numeric_strings_decode_to_numbers() {
        assert_eq!(decode_input(json!("42")), json!(42));
    }

    #[test]
    fn structured_bodies_are_untouched() {
        assert_eq!(decode_input(json!({"name": "Ada"})), json!({"name": "Ada"}));
    }
}
