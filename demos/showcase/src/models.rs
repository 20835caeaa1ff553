use serde::Deserialize;
use serde_json::Value;

/// One entry of the authors collection. Any array element is accepted:
/// missing or mistyped fields read as empty. Other fields are ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Author {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: Option<String>,
}

impl Author {
    /// List key: the id as written, or the position when there is no usable
    /// id.
    pub fn key(&self, index: usize) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => format!("#{index}"),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}
