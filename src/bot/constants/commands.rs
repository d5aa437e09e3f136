// Both spellings reset the conversation
pub const COMMAND_START: &str = "/start";
pub const COMMAND_RESET: &str = "/reset";
