use tokio::sync::watch;

use crate::models::AuthSnapshot;

/// Publishes what the authentication service reports to anyone watching
#[derive(Debug)]
pub struct AuthSession {
    tx: watch::Sender<AuthSnapshot>,
}

impl AuthSession {
    pub fn new(initial: AuthSnapshot) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> AuthSnapshot {
        self.tx.borrow().clone()
    }

    pub fn publish(&self, snapshot: AuthSnapshot) {
        log::debug!(
            "Auth session now {:?} (loading: {})",
            snapshot.user_id,
            snapshot.loading
        );
        self.tx.send_replace(snapshot);
    }

    pub fn sign_in(&self, user_id: impl Into<String>) {
        self.publish(AuthSnapshot::signed_in(user_id));
    }

    pub fn sign_out(&self) {
        self.publish(AuthSnapshot::signed_out());
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        AuthSession::new(AuthSnapshot::loading())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn watchers_see_the_latest_snapshot() {
        let session = AuthSession::default();
        let mut rx = session.subscribe();
        assert!(rx.borrow().loading);

        session.sign_in("u-1");
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().user_id.as_deref(), Some("u-1"));
        assert_eq!(session.current().redirect_target(), None);

        session.sign_out();
        assert_eq!(session.current().redirect_target(), Some("/auth"));
    }
}
