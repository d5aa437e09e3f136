// User
pub const USER_STATE_KEY: &str = "user_state";
