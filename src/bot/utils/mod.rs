use teloxide::RequestError;

use crate::bot::{redis::StoreError, services::ServiceError};

/* Types */
pub type HandlerResult = Result<(), BotError>;

#[derive(thiserror::Error, Debug)]
pub enum BotError {
    #[error("Store error: {0}")]
    StoreError(StoreError),
    #[error("Service error: {0}")]
    ServiceError(ServiceError),
    #[error("Request error: {0}")]
    RequestError(RequestError),
}

impl From<RequestError> for BotError {
    fn from(request_error: RequestError) -> BotError {
        BotError::RequestError(request_error)
    }
}

impl From<StoreError> for BotError {
    fn from(store_error: StoreError) -> BotError {
        BotError::StoreError(store_error)
    }
}

impl From<ServiceError> for BotError {
    fn from(service_error: ServiceError) -> BotError {
        BotError::ServiceError(service_error)
    }
}

pub mod amounts;
pub mod bot_actions;
pub mod format;
pub mod time;
