//! Outbound notification envelope
//!
//! The envelope handed to the dispatch boundary. The consumer on the other
//! side of the topic turns these into emails; the core only sees
//! accept/reject at publish time.

use serde::{Deserialize, Serialize};

use super::{BetSlip, User};

/// Kafka topic the email consumer reads from
pub const EMAILS_TOPIC: &str = "lottery-api-emails";

/// Subject line of an outbound notification. The wire strings are a
/// contract with the email consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "A new bet was created!")]
    NewBet,
    #[serde(rename = "Welcome to the Lottery API!")]
    NewUser,
    #[serde(rename = "Here's your reset password token.")]
    NewPassword,
    #[serde(rename = "Long time no see!")]
    RemindUserToBet,
}

impl Subject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::NewBet => "A new bet was created!",
            Subject::NewUser => "Welcome to the Lottery API!",
            Subject::NewPassword => "Here's your reset password token.",
            Subject::RemindUserToBet => "Long time no see!",
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One message on the emails topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub user: User,
    pub subject: Subject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bets: Option<Vec<BetSlip>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_users: Option<Vec<User>>,
}

impl NotificationEvent {
    /// Confirmation for a freshly committed bet batch. One event per
    /// placement, carrying the whole batch.
    pub fn new_bet(user: User, bets: Vec<BetSlip>) -> Self {
        Self {
            user,
            subject: Subject::NewBet,
            token: None,
            bets: Some(bets),
            admin_users: None,
        }
    }

    /// Welcome message for a new account, copying the admins
    pub fn welcome(user: User, admin_users: Vec<User>) -> Self {
        Self {
            user,
            subject: Subject::NewUser,
            token: None,
            bets: None,
            admin_users: Some(admin_users),
        }
    }

    /// Password-reset token delivery
    pub fn password_reset(user: User, token: impl Into<String>) -> Self {
        Self {
            user,
            subject: Subject::NewPassword,
            token: Some(token.into()),
            bets: None,
            admin_users: None,
        }
    }

    /// Reminder for a user with no bets inside the inactivity window
    pub fn remind_to_bet(user: User) -> Self {
        Self {
            user,
            subject: Subject::RemindUserToBet,
            token: None,
            bets: None,
            admin_users: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_user() -> User {
        User {
            id: 7,
            secure_id: Uuid::new_v4(),
            name: "Maria".to_string(),
            cpf: "123.456.789-00".to_string(),
            email: "maria@example.com".to_string(),
            password_hash: "argon2-hash".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_subject_wire_strings() {
        assert_eq!(
            serde_json::to_value(Subject::NewBet).unwrap(),
            serde_json::json!("A new bet was created!")
        );
        assert_eq!(
            serde_json::to_value(Subject::RemindUserToBet).unwrap(),
            serde_json::json!("Long time no see!")
        );
    }

    #[test]
    fn test_new_bet_envelope_shape() {
        let event = NotificationEvent::new_bet(
            sample_user(),
            vec![BetSlip::new("Lotofácil", "1,2,3,4,5")],
        );

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["subject"], "A new bet was created!");
        assert_eq!(json["bets"][0]["game"], "Lotofácil");
        // optional fields absent, password hash never serialized
        assert!(json.get("token").is_none());
        assert!(json["user"].get("password_hash").is_none());
    }

    #[test]
    fn test_reminder_has_no_payload_beyond_user() {
        let event = NotificationEvent::remind_to_bet(sample_user());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["subject"], "Long time no see!");
        assert!(json.get("bets").is_none());
        assert!(json.get("admin_users").is_none());
    }
}
