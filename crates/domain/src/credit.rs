use crate::shared::entity::ID;

/// Pre-purchased credits of a user, one credit pays for one spot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditAccount {
    pub user_id: ID,
    pub balance: i64,
}

impl CreditAccount {
    pub fn new(user_id: &ID) -> Self {
        Self {
            user_id: user_id.clone(),
            balance: 0,
        }
    }

    pub fn grant(&mut self, amount: i64) -> bool {
        if amount <= 0 {
            return false;
        }
        self.balance = self.balance.saturating_add(amount);
        true
    }

    /// Takes `amount` credits if the balance covers them
    pub fn consume(&mut self, amount: i64) -> bool {
        if amount <= 0 || self.balance < amount {
            return false;
        }
        self.balance -= amount;
        true
    }
}
