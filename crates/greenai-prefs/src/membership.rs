//! Premium membership lookup.
//!
//! There is no billing backend yet, so the rule is a stand-in: even-length
//! usernames count as members. The async shape and artificial latency keep
//! the command surface stable for when a real endpoint replaces this.
// TODO: call the billing API here once the membership endpoint ships.

use tokio::time::Duration;

const LOOKUP_DELAY_MS: u64 = 500;

/// The stand-in membership rule.
pub fn is_premium(username: &str) -> bool {
    username.chars().count() % 2 == 0
}

/// Look up whether a user has a premium membership.
pub async fn check_membership(username: &str) -> bool {
    tokio::time::sleep(Duration::from_millis(LOOKUP_DELAY_MS)).await;
    is_premium(username)
}
