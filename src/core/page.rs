use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use super::wallet_session::{ConnectionError, WalletSession, WalletSessionHandler};
use crate::models::{ConnectionState, Identity};

pub const DESCRIPTION: &str = "Get ready for cute battles !";
pub const CONNECT_LABEL: &str = "Connect your wallet";
pub const CONNECTED_MESSAGE: &str = "Wallet connected";

/// Everything the welcome page displays
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub title: String,
    pub description: String,
    pub action: PageAction,
    /// Reason of the last failed connection attempt
    pub error: Option<String>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum PageAction {
    ConnectWallet { label: String },
    Connected { message: String },
}

/// Rendering layer which draws the page
pub trait PageRenderer: Send + Sync {
    fn render(&self, view: &PageView);
}

/// Welcome page state, kept in sync with the wallet session
pub struct HomePage {
    renderer: Arc<dyn PageRenderer>,
    state: RwLock<PageState>,
}

impl HomePage {
    pub fn new(renderer: Arc<dyn PageRenderer>) -> Self {
        Self {
            renderer,
            state: Default::default(),
        }
    }

    pub fn view(&self) -> PageView {
        self.state.read().view()
    }

    /// Draws the initial page and immediately tries to connect the wallet
    pub async fn mount(&self, session: &WalletSession) {
        self.renderer.render(&self.view());
        self.connect(session).await;
    }

    pub async fn on_click_connect(&self, session: &WalletSession) {
        self.connect(session).await;
    }

    async fn connect(&self, session: &WalletSession) {
        if let Err(e) = session.connect().await {
            log::error!("{e}");
        }
    }

    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut PageState),
    {
        let view = {
            let mut state = self.state.write();
            f(&mut state);
            state.view()
        };
        self.renderer.render(&view);
    }
}

impl WalletSessionHandler for HomePage {
    fn on_state_changed(&self, state: ConnectionState) {
        self.update(|page| {
            page.connection_state = state;
            if state.is_connected() {
                page.error = None;
            }
        });
    }

    fn on_identity_resolved(&self, identity: &Identity) {
        self.update(|page| page.identity = Some(identity.clone()));
    }

    fn on_connection_failed(&self, error: &ConnectionError) {
        self.update(|page| page.error = Some(error.to_string()));
    }
}

#[derive(Default)]
struct PageState {
    connection_state: ConnectionState,
    identity: Option<Identity>,
    error: Option<String>,
}

impl PageState {
    fn view(&self) -> PageView {
        let identity = self
            .identity
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();

        let action = match self.connection_state {
            ConnectionState::Disconnected => PageAction::ConnectWallet {
                label: CONNECT_LABEL.to_owned(),
            },
            ConnectionState::Connected => PageAction::Connected {
                message: CONNECTED_MESSAGE.to_owned(),
            },
        };

        PageView {
            title: format!("Welcome {identity}!"),
            description: DESCRIPTION.to_owned(),
            action,
            error: self.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::core::wallet_session::tests::{make_session, MockConnector, MockReader, ALICE};

    #[derive(Default)]
    struct RecordingRenderer {
        views: Mutex<Vec<PageView>>,
    }

    impl PageRenderer for RecordingRenderer {
        fn render(&self, view: &PageView) {
            self.views.lock().push(view.clone());
        }
    }

    fn setup(reader: MockReader) -> (Arc<HomePage>, Arc<RecordingRenderer>, WalletSession) {
        let renderer = Arc::new(RecordingRenderer::default());
        let page = Arc::new(HomePage::new(renderer.clone()));
        let session = make_session(
            Arc::new(MockConnector::default()),
            Arc::new(reader),
            page.clone(),
        );
        (page, renderer, session)
    }

    #[tokio::test]
    async fn welcomes_by_name() {
        let (page, renderer, session) = setup(MockReader::new(5, Some("alice.eth")));
        page.mount(&session).await;

        let first = renderer.views.lock().first().cloned().unwrap();
        assert_eq!(first.title, "Welcome !");
        assert_eq!(
            first.action,
            PageAction::ConnectWallet {
                label: CONNECT_LABEL.to_owned()
            }
        );

        let view = page.view();
        assert_eq!(view.title, "Welcome alice.eth!");
        assert_eq!(view.description, DESCRIPTION);
        assert_eq!(
            view.action,
            PageAction::Connected {
                message: CONNECTED_MESSAGE.to_owned()
            }
        );
        assert_eq!(view.error, None);
        assert_eq!(renderer.views.lock().last(), Some(&view));
    }

    #[tokio::test]
    async fn welcomes_by_address() {
        let (page, _, session) = setup(MockReader::new(5, None));
        page.mount(&session).await;

        assert_eq!(page.view().title, format!("Welcome {ALICE}!"));
    }

    #[tokio::test]
    async fn shows_wrong_network() {
        let (page, _, session) = setup(MockReader::new(1, Some("alice.eth")));
        page.mount(&session).await;

        let view = page.view();
        assert_eq!(view.title, "Welcome !");
        assert_eq!(
            view.action,
            PageAction::ConnectWallet {
                label: CONNECT_LABEL.to_owned()
            }
        );
        assert_eq!(view.error.as_deref(), Some("Change the network to Goerli"));
        assert_eq!(session.state(), ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn button_retries_connection() {
        let (page, renderer, session) = setup(MockReader::new(5, Some("alice.eth")));
        page.on_click_connect(&session).await;
        page.on_click_connect(&session).await;

        assert_eq!(page.view().title, "Welcome alice.eth!");
        // Identity and state notifications of the single successful attempt
        assert_eq!(renderer.views.lock().len(), 2);
    }

    #[test]
    fn view_serializes_for_the_host() {
        let view = PageState::default().view();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["action"]["type"], "connectWallet");
        assert_eq!(json["action"]["label"], CONNECT_LABEL);
        assert!(json["error"].is_null());
    }
}
