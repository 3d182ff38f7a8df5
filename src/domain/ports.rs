use crate::utils::error::{CalcError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// One calculator: decodes its own input record and produces a result record.
///
/// Implementations are stateless apart from read-only settings, so a single
/// instance is shared by every request.
pub trait Calculation: Send + Sync {
    type Input: DeserializeOwned;
    type Output: Serialize;

    /// Route segment and CLI name, e.g. `gst`.
    fn name(&self) -> &'static str;

    fn calculate(&self, input: Self::Input) -> Result<Self::Output>;

    fn evaluate_json(&self, payload: Value) -> Result<Value> {
        if !payload.is_object() {
            return Err(CalcError::invalid_input(
                "Invalid request body: expected a JSON object",
            ));
        }
        let input: Self::Input = serde_json::from_value(payload)
            .map_err(|e| CalcError::invalid_input(format!("Invalid request body: {}", e)))?;
        let output = self.calculate(input)?;
        Ok(serde_json::to_value(output)?)
    }
}
