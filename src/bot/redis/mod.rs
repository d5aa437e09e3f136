pub use self::connect::StoreError;
pub use self::user_state::{StateStore, UserStateStore};

mod connect;
mod user_state;
