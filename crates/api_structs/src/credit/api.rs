use crate::dtos::CreditAccountDTO;
use serde::{Deserialize, Serialize};
use studio_booking_domain::{CreditAccount, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditsResponse {
    pub credits: CreditAccountDTO,
}

impl CreditsResponse {
    pub fn new(account: CreditAccount) -> Self {
        Self {
            credits: CreditAccountDTO::new(account),
        }
    }
}

pub mod grant_credits {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub amount: i64,
    }

    pub type APIResponse = CreditsResponse;
}

pub mod get_credits {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    pub type APIResponse = CreditsResponse;
}
