// Error messages
pub const UNKNOWN_ERROR_MESSAGE: &str =
    "Oops! Something went wrong! I can't do that right now. Please send your answer again later.";
pub const FILE_SAVE_ERROR_MESSAGE: &str = "Error saving file to Google Drive.";
pub const LEDGER_SAVE_ERROR_MESSAGE: &str =
    "Error saving data to spreadsheet. Send the attachment again to retry.";

// Flow messages
pub const RESET_MESSAGE: &str = "Clarifying parameters. Choose the direction of funds movement:";
pub const FILE_SAVED_MESSAGE: &str = "File saved to Google Drive. Saving data to spreadsheet...";
pub const DATA_SAVED_MESSAGE: &str = "Data saved. Awaiting new commands.";

// Answers
pub const FLOW_INCOME: &str = "Income";
pub const FLOW_OUTCOME: &str = "Outcome";
pub const DATE_TODAY: &str = "Today";

// File names
pub const SCREENSHOT_PREFIX: &str = "Screenshot";
pub const DOCUMENT_PREFIX: &str = "Document";
