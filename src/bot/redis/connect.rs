use ::redis::{Client, Connection, RedisError};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    RedisError(#[from] RedisError),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

// Opens the Redis client. Does not connect until the first request.
pub fn open_client(url: &str) -> Result<Client, StoreError> {
    Ok(Client::open(url)?)
}

pub fn connect(client: &Client) -> Result<Connection, StoreError> {
    Ok(client.get_connection()?)
}
