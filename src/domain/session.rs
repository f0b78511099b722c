use {
    crate::{
        domain::{intent::ValidationError, tron},
        infra::wallet::{self, Wallet},
    },
    std::sync::Mutex,
};

/// The account the wallet is connected with, if any.
#[derive(Debug, Default)]
pub struct Session {
    account: Mutex<Option<tron::Address>>,
}

impl Session {
    pub fn account(&self) -> Option<tron::Address> {
        *self.account.lock().unwrap()
    }

    /// Checks whether the wallet is already connected. Failing to get an
    /// account is the normal answer when there is no session, so errors are
    /// not reported.
    pub async fn probe(&self, wallet: &dyn Wallet) -> Option<tron::Address> {
        match wallet.account().await {
            Ok(account) => {
                self.set(Some(account));
                Some(account)
            }
            Err(err) => {
                tracing::debug!(?err, "no existing wallet session");
                None
            }
        }
    }

    pub async fn connect(&self, wallet: &dyn Wallet) -> Result<tron::Address, wallet::Error> {
        let account = wallet.account().await?;
        self.set(Some(account));
        Ok(account)
    }

    /// Disconnects the wallet. The session is cleared even if the wallet
    /// fails to acknowledge.
    pub async fn disconnect(&self, wallet: &dyn Wallet) -> Result<(), wallet::Error> {
        let result = wallet.disconnect().await;
        self.set(None);
        result
    }

    /// Follows the wallet's `accountsChanged` event: the first account
    /// becomes the session's account, an empty list ends the session.
    pub fn accounts_changed(
        &self,
        accounts: &[String],
    ) -> Result<Option<tron::Address>, ValidationError> {
        let account = accounts
            .first()
            .map(|account| {
                account
                    .parse()
                    .map_err(|source| ValidationError::InvalidAddress {
                        field: "account",
                        source,
                    })
            })
            .transpose()?;
        self.set(account);
        Ok(account)
    }

    fn set(&self, account: Option<tron::Address>) {
        let mut current = self.account.lock().unwrap();
        if *current != account {
            tracing::debug!(from = ?*current, to = ?account, "wallet account changed");
        }
        *current = account;
    }
}
