use ::redis::{Client, Commands};

use crate::bot::{constants::redis::USER_STATE_KEY, state::UserState};

use super::connect::{connect, open_client, StoreError};

pub trait StateStore: Send + Sync {
    fn get_or_create_user_state(&self, user_id: &str) -> Result<UserState, StoreError>;
    fn save_user_state(&self, user_id: &str, state: &UserState) -> Result<(), StoreError>;
}

/* Durable per-user conversation state, one JSON string per user id. */
#[derive(Clone)]
pub struct UserStateStore {
    client: Client,
}

impl UserStateStore {
    pub fn new(url: &str) -> Result<UserStateStore, StoreError> {
        Ok(UserStateStore {
            client: open_client(url)?,
        })
    }
}

impl StateStore for UserStateStore {
    // Retrieves the state of a user, storing an empty one on first contact.
    fn get_or_create_user_state(&self, user_id: &str) -> Result<UserState, StoreError> {
        let mut con = connect(&self.client)?;
        let key = user_state_key(user_id);

        let stored: Option<String> = con.get(&key)?;
        match stored {
            Some(json) => Ok(restore_user_state(user_id, &json)),
            None => {
                let state = UserState::default();
                con.set::<_, _, ()>(&key, encode_user_state(&state)?)?;
                Ok(state)
            }
        }
    }

    fn save_user_state(&self, user_id: &str, state: &UserState) -> Result<(), StoreError> {
        let mut con = connect(&self.client)?;
        con.set::<_, _, ()>(user_state_key(user_id), encode_user_state(state)?)?;
        Ok(())
    }
}

fn user_state_key(user_id: &str) -> String {
    format!("{USER_STATE_KEY}:{user_id}")
}

fn encode_user_state(state: &UserState) -> Result<String, StoreError> {
    Ok(serde_json::to_string(state)?)
}

fn decode_user_state(json: &str) -> Result<UserState, StoreError> {
    Ok(serde_json::from_str(json)?)
}

// A record that no longer decodes starts the user over instead of blocking every message.
fn restore_user_state(user_id: &str, json: &str) -> UserState {
    match decode_user_state(json) {
        Ok(state) => state,
        Err(err) => {
            log::warn!("Discarding unreadable state of user {}: {}", user_id, err);
            UserState::default()
        }
    }
}
