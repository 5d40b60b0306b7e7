use serde::{Deserialize, Serialize};
use studio_booking_domain::{CreditAccount, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreditAccountDTO {
    pub user_id: ID,
    pub balance: i64,
}

impl CreditAccountDTO {
    pub fn new(account: CreditAccount) -> Self {
        Self {
            user_id: account.user_id,
            balance: account.balance,
        }
    }
}
