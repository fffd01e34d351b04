//! User record as delivered by the directory endpoint.
//!
//! Only `id` and `name` mean anything to the core. Every other field of the
//! payload is kept verbatim in [`UserRecord::extra`] so nothing is lost, but
//! filtering and selection never look at it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stable identifier of a user within one directory payload.
pub type UserId = i64;

/// A single entry of the user directory.
///
/// Records are immutable once fetched. Two records are the same user when
/// their `id` matches; see [`UserRecord::same_user`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    /// Creates a record with no pass-through fields.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Returns `true` if both records identify the same user.
    #[must_use]
    pub const fn same_user(&self, other: &Self) -> bool {
        self.id == other.id
    }

    /// Reads a pass-through string field, if present.
    #[must_use]
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }

    /// Optional e-mail address carried by the payload.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.extra_str("email")
    }
}

#[cfg(test)]
mod tests {
    use super::UserRecord;

    #[test]
    fn unknown_fields_are_kept_in_extra() {
        let json = r#"{"id":7,"name":"Kurtis Weissnat","email":"Telly.Hoeger@billy.biz","address":{"city":"Howemouth"}}"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(user.name, "Kurtis Weissnat");
        assert_eq!(user.email(), Some("Telly.Hoeger@billy.biz"));
        assert!(user.extra.contains_key("address"));
        assert!(!user.extra.contains_key("id"));
    }

    #[test]
    fn missing_name_is_rejected() {
        let json = r#"{"id":7,"username":"Elwyn.Skiles"}"#;
        assert!(serde_json::from_str::<UserRecord>(json).is_err());
    }

    #[test]
    fn same_user_compares_ids_only() {
        let a = UserRecord::new(1, "Ann");
        let renamed = UserRecord::new(1, "Annie");
        assert!(a.same_user(&renamed));
        assert!(!a.same_user(&UserRecord::new(2, "Ann")));
    }
}
