pub mod auth;
pub mod notify;
#[cfg(test)]
pub mod test_helpers;
pub mod usecase;
