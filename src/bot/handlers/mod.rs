pub use self::transaction::handle_message;

mod transaction;
