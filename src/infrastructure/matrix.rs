//! # Matrix Service Adapter
//!
//! Implements the `ChatProvider` and `RosterProvider` traits for the Matrix protocol using the
//! `matrix_sdk`. It also turns room message events into `IncomingMessage`s, deriving the
//! author's held roles from the configured role table: explicit user lists, and membership of
//! a role's room.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use matrix_sdk::room::Room;
use matrix_sdk::ruma::{RoomId, UserId};
use matrix_sdk::ruma::events::room::message::{
    MessageType, OriginalSyncRoomMessageEvent, RoomMessageEventContent,
};
use matrix_sdk::{Client, RoomMemberships};
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::config::RoleBinding;
use crate::domain::traits::{ChatProvider, RosterProvider};
use crate::domain::types::{IncomingMessage, Member, RoleId};

#[derive(Clone)]
pub struct MatrixService {
    client: Client,
    roles: Arc<Vec<RoleBinding>>,
}

/// Joined members of a role room.
struct RoleRoster {
    role: RoleId,
    users: HashSet<String>,
}

impl MatrixService {
    pub fn new(client: Client, roles: Vec<RoleBinding>) -> Self {
        Self {
            client,
            roles: Arc::new(roles),
        }
    }

    fn room(&self, channel: &str) -> Result<Room, String> {
        let room_id = <&RoomId>::try_from(channel).map_err(|e| e.to_string())?;
        self.client
            .get_room(room_id)
            .ok_or_else(|| format!("Not joined to room {channel}"))
    }

    async fn joined_user_ids(room: &Room) -> Result<HashSet<String>, String> {
        let members = room
            .members(RoomMemberships::JOIN)
            .await
            .map_err(|e| e.to_string())?;
        Ok(members.iter().map(|m| m.user_id().to_string()).collect())
    }

    async fn role_rosters(&self) -> Vec<RoleRoster> {
        let mut rosters = Vec::new();
        for binding in self.roles.iter() {
            let Some(channel) = &binding.room else {
                continue;
            };
            let users = match self.room(channel) {
                Ok(room) => Self::joined_user_ids(&room).await,
                Err(e) => Err(e),
            };
            match users {
                Ok(users) => rosters.push(RoleRoster {
                    role: RoleId::new(binding.id.clone()),
                    users,
                }),
                Err(e) => {
                    tracing::warn!("Role room for '{}' unavailable: {}", binding.id, e);
                }
            }
        }
        rosters
    }

    fn held_roles(&self, user_id: &str, rosters: &[RoleRoster]) -> HashSet<RoleId> {
        let mut held = listed_roles(&self.roles, user_id);
        for roster in rosters {
            if roster.users.contains(user_id) {
                held.insert(roster.role.clone());
            }
        }
        held
    }

    /// Builds the message view for a text event. Non-text events yield `None`.
    ///
    /// The author carries no roles yet; see `resolve_author`.
    pub fn incoming_message(
        room: &Room,
        event: &OriginalSyncRoomMessageEvent,
    ) -> Option<IncomingMessage> {
        let MessageType::Text(text) = &event.content.msgtype else {
            return None;
        };

        let millis: u64 = event.origin_server_ts.get().into();
        let timestamp =
            DateTime::<Utc>::from_timestamp_millis(millis as i64).unwrap_or_else(Utc::now);

        Some(IncomingMessage {
            author: Member::new(event.sender.as_str()),
            text: text.body.clone(),
            channel: room.room_id().to_string(),
            timestamp,
            from_self: event.sender == room.own_user_id(),
        })
    }

    /// Fills in the author's display name and held roles.
    pub async fn resolve_author(&self, room: &Room, author: &mut Member) {
        if let Ok(user_id) = <&UserId>::try_from(author.user_id.as_str())
            && let Ok(Some(member)) = room.get_member(user_id).await
            && let Some(name) = member.display_name()
        {
            author.display_name = Some(name.to_string());
        }
        let rosters = self.role_rosters().await;
        author.roles = self.held_roles(&author.user_id, &rosters);
    }
}

/// Roles whose `users` list names the user.
pub fn listed_roles(bindings: &[RoleBinding], user_id: &str) -> HashSet<RoleId> {
    bindings
        .iter()
        .filter(|b| b.users.iter().any(|u| u == user_id))
        .map(|b| RoleId::new(b.id.clone()))
        .collect()
}

#[async_trait]
impl ChatProvider for MatrixService {
    async fn send_message(&self, channel: &str, content: &str) -> Result<String, String> {
        tracing::info!("Bot sending message to {}: {}", channel, content);
        let room = self.room(channel)?;
        room.send(RoomMessageEventContent::text_markdown(content))
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }
}

#[async_trait]
impl RosterProvider for MatrixService {
    async fn joined_members(&self, channel: &str) -> Result<Vec<Member>, String> {
        let room = self.room(channel)?;
        let members = room
            .members(RoomMemberships::JOIN)
            .await
            .map_err(|e| e.to_string())?;
        let rosters = self.role_rosters().await;

        Ok(members
            .iter()
            .map(|m| {
                let user_id = m.user_id().as_str();
                let mut member = Member::new(user_id);
                if let Some(name) = m.display_name() {
                    member = member.with_display_name(name);
                }
                member.roles = self.held_roles(user_id, &rosters);
                member
            })
            .collect())
    }
}
