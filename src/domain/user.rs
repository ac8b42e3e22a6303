use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered player or administrator. Owned by the user CRUD layer;
/// the core reads it for identity and as the notification target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub secure_id: Uuid,
    pub name: String,
    pub cpf: String,
    pub email: String,
    /// Never leaves the process: excluded from every serialized envelope.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
