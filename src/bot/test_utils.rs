/* In-memory collaborators shared by the driver and handler tests. */

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use super::{
    redis::{StateStore, StoreError},
    services::{Attachment, CompletedTransaction, FileVault, Ledger, OptionSource, ServiceError},
    state::UserState,
    steps::OptionRange,
};

fn unavailable() -> ServiceError {
    ServiceError::ApiError(503, "unavailable".to_string())
}

#[derive(Default)]
pub struct FakeOptions {
    pub fail: bool,
}

#[async_trait]
impl OptionSource for FakeOptions {
    async fn options(&self, range: OptionRange) -> Result<Vec<String>, ServiceError> {
        if self.fail {
            return Err(unavailable());
        }
        let options: &[&str] = match range {
            OptionRange::Type => &["Salary", "Groceries"],
            OptionRange::Income => &["Salary", "Dividends"],
            OptionRange::Outcome => &["Groceries", "Rent"],
            OptionRange::Currency => &["EUR", "USD"],
            OptionRange::Wallet => &["Cash", "Card"],
            OptionRange::Date => &["Today"],
        };
        Ok(options.iter().map(|option| option.to_string()).collect())
    }

    async fn lookup(&self, key: &str) -> Result<String, ServiceError> {
        if self.fail {
            return Err(unavailable());
        }
        let class = match key {
            "Salary" | "Dividends" => "Income",
            "Groceries" | "Rent" => "Outcome",
            _ => "",
        };
        Ok(class.to_string())
    }
}

#[derive(Default)]
pub struct FakeVault {
    pub fail: bool,
    pub stored: Mutex<Vec<String>>,
}

#[async_trait]
impl FileVault for FakeVault {
    async fn store(&self, _attachment: &Attachment, file_name: &str) -> Result<(), ServiceError> {
        if self.fail {
            return Err(ServiceError::ApiError(403, "forbidden".to_string()));
        }
        self.stored.lock().unwrap().push(file_name.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeLedger {
    pub fail: bool,
    pub rows: Mutex<Vec<CompletedTransaction>>,
}

#[async_trait]
impl Ledger for FakeLedger {
    async fn append(&self, transaction: &CompletedTransaction) -> Result<(), ServiceError> {
        if self.fail {
            return Err(unavailable());
        }
        self.rows.lock().unwrap().push(transaction.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub states: Mutex<HashMap<String, UserState>>,
    pub saves: Mutex<usize>,
}

impl StateStore for MemoryStore {
    fn get_or_create_user_state(&self, user_id: &str) -> Result<UserState, StoreError> {
        let mut states = self.states.lock().unwrap();
        Ok(states.entry(user_id.to_string()).or_default().clone())
    }

    fn save_user_state(&self, user_id: &str, state: &UserState) -> Result<(), StoreError> {
        *self.saves.lock().unwrap() += 1;
        self.states
            .lock()
            .unwrap()
            .insert(user_id.to_string(), state.clone());
        Ok(())
    }
}
