use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Member {
    pub id: String,
    /// Registered account behind this member, if any.
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub display_name: String,
}

impl Member {
    /// Identifies the same person across groups: account id, else email,
    /// else the member itself scoped to its group.
    pub fn person_key(&self, group_id: &str) -> String {
        self.user_id
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| format!("{}-{}", group_id, self.id))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub members: Vec<Member>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Group {
    pub fn is_owner(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }

    /// The owner and any member linked to the account can access the group.
    pub fn can_access(&self, user_id: &str) -> bool {
        self.is_owner(user_id) || self.member_for_user(user_id).is_some()
    }

    pub fn member(&self, member_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == member_id)
    }

    pub fn member_for_user(&self, user_id: &str) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| m.user_id.as_deref() == Some(user_id))
    }

    pub fn has_member(&self, member_id: &str) -> bool {
        self.member(member_id).is_some()
    }
}
