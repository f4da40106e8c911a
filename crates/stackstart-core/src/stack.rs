use serde::Deserialize;
use serde_json::Value;

/// Numeric stack identifier as used by the orchestration API.
pub type StackId = i64;

/// `Status` value the API reports for an active stack (2 is inactive).
pub const STATUS_ACTIVE: i64 = 1;

/// A stack as returned by `GET /stacks/{id}`.
///
/// Only the fields the starter acts on are decoded; everything else in the
/// response is ignored. Always fetched fresh, never cached between polls.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Stack {
    #[serde(default)]
    pub id: Option<StackId>,
    #[serde(default)]
    pub name: Option<String>,
    /// Raw status. Kept as a JSON value so unexpected shapes degrade to
    /// "not running" instead of failing the decode.
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub endpoint_id: Option<i64>,
}

impl Stack {
    /// Integral status code, if the status is a whole number.
    pub fn status_code(&self) -> Option<i64> {
        let Some(Value::Number(n)) = &self.status else {
            return None;
        };
        n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract().abs() < f64::EPSILON)
                .map(|f| f as i64)
        })
    }

    /// True iff the status is numeric and equals [`STATUS_ACTIVE`].
    pub fn is_running(&self) -> bool {
        self.status_code() == Some(STATUS_ACTIVE)
    }

    /// Name for log lines, falling back to the id.
    pub fn display_name(&self) -> String {
        match (&self.name, self.id) {
            (Some(name), _) => name.clone(),
            (None, Some(id)) => id.to_string(),
            (None, None) => "<unnamed>".to_string(),
        }
    }
}
