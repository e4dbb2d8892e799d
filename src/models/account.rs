use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

fn default_preferences() -> Value {
    json!({})
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default = "default_preferences")]
    pub preferences: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub preferences: Value,
    pub created_at: String,
}
