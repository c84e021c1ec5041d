// AccessGuard - static allow-list check

/// Authorizes requests by chat identity against a fixed allow-list.
///
/// Unauthorized chats get no reply at all: the bot must not acknowledge
/// its existence to anyone outside the list.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    allowed: Vec<i64>,
}

impl AccessGuard {
    pub fn new(allowed: Vec<i64>) -> Self {
        Self { allowed }
    }

    pub fn is_authorized(&self, chat_id: i64) -> bool {
        self.allowed.contains(&chat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_is_authorized() {
        let guard = AccessGuard::new(vec![140770223, 745585668]);
        assert!(guard.is_authorized(140770223));
        assert!(guard.is_authorized(745585668));
    }

    #[test]
    fn unknown_chat_is_rejected() {
        let guard = AccessGuard::new(vec![140770223]);
        assert!(!guard.is_authorized(999));
        assert!(!guard.is_authorized(-140770223));
    }

    #[test]
    fn empty_allow_list_rejects_everyone() {
        let guard = AccessGuard::new(Vec::new());
        assert!(!guard.is_authorized(0));
        assert!(!guard.is_authorized(1));
    }
}
