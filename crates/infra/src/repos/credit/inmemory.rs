use super::ICreditRepo;
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};
use studio_booking_domain::{CreditAccount, ID};

pub struct InMemoryCreditRepo {
    accounts: Mutex<HashMap<ID, CreditAccount>>,
}

impl InMemoryCreditRepo {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl ICreditRepo for InMemoryCreditRepo {
    async fn find(&self, user_id: &ID) -> anyhow::Result<CreditAccount> {
        let accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(accounts
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| CreditAccount::new(user_id)))
    }

    async fn grant(&self, user_id: &ID, amount: i64) -> anyhow::Result<CreditAccount> {
        let mut accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        let account = accounts
            .entry(user_id.clone())
            .or_insert_with(|| CreditAccount::new(user_id));
        if !account.grant(amount) {
            anyhow::bail!("Can not grant {} credits", amount);
        }
        Ok(account.clone())
    }

    async fn consume(&self, user_id: &ID, amount: i64) -> anyhow::Result<bool> {
        let mut accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(accounts
            .get_mut(user_id)
            .map(|account| account.consume(amount))
            .unwrap_or(false))
    }
}
