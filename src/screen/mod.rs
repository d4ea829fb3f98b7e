//! Fingerprint screen presenter / 指纹界面呈现
//!
//! Holds the fingerprint icon and the instruction label, renders both through
//! a [`ScreenPort`] and relays session events to the label.

pub mod messages;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Context;
use fp_app::{AuthenticationSession, FingerprintAuthenticator, StartError};
use fp_core::{ports::ScreenPort, AuthEvent, AuthOutcome, GateOutcome};
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

#[derive(Debug, Default)]
struct View {
    label: String,
    icon_enabled: bool,
}

/// Rendered state plus the port it is drawn on.
#[derive(Clone)]
struct Renderer {
    port: Arc<dyn ScreenPort>,
    view: Arc<Mutex<View>>,
}

impl Renderer {
    fn view(&self) -> MutexGuard<'_, View> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_label(&self, text: &str) {
        self.view().label = text.to_string();
        self.port.set_instruction(text);
    }

    fn set_icon_enabled(&self, enabled: bool) {
        self.view().icon_enabled = enabled;
        self.port.set_icon_enabled(enabled);
    }

    fn render_event(&self, event: &AuthEvent) {
        match event {
            AuthEvent::Help(help) => self.set_label(&messages::help(&help.message)),
            AuthEvent::Finished(AuthOutcome::Succeeded(_)) => self.set_label(messages::SUCCEEDED),
            AuthEvent::Finished(AuthOutcome::Failed) => self.set_label(messages::FAILED),
            AuthEvent::Finished(AuthOutcome::Error { message, .. }) => {
                self.set_label(&messages::error(message))
            }
        }
    }
}

async fn relay(mut session: AuthenticationSession, renderer: Renderer) {
    while let Some(event) = session.next_event().await {
        renderer.render_event(&event);
    }
    debug!("relay finished");
}

pub struct FingerprintScreen {
    authenticator: Arc<FingerprintAuthenticator>,
    renderer: Renderer,
    relay: Option<JoinHandle<()>>,
}

impl FingerprintScreen {
    pub fn new(authenticator: Arc<FingerprintAuthenticator>, port: Arc<dyn ScreenPort>) -> Self {
        Self {
            authenticator,
            renderer: Renderer {
                port,
                view: Arc::new(Mutex::new(View::default())),
            },
            relay: None,
        }
    }

    /// Prepare the authenticator and show the gate result.
    ///
    /// The icon stays enabled only when the outcome is `Ready`.
    pub async fn on_create(&mut self) -> anyhow::Result<GateOutcome> {
        let authenticator = self.authenticator.clone();
        let outcome = tokio::task::spawn_blocking(move || authenticator.prepare())
            .instrument(info_span!("screen.on_create"))
            .await
            .context("Failed to prepare fingerprint authenticator")?;

        self.renderer.set_icon_enabled(outcome.is_ready());
        self.renderer.set_label(messages::for_gate(outcome));
        info!(%outcome, "fingerprint screen created");
        Ok(outcome)
    }

    /// Start a session and relay its events to the label.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn on_icon_tap(&mut self) -> Result<(), StartError> {
        let session = self.authenticator.start_authentication()?;
        self.stop_relay();

        let span = info_span!("screen.relay", session = session.id());
        self.renderer.set_label(messages::TOUCH_SENSOR);
        self.relay = Some(tokio::spawn(
            relay(session, self.renderer.clone()).instrument(span),
        ));
        Ok(())
    }

    /// Cancel the pending session at the user's request.
    ///
    /// The relay keeps running, so an outcome that already fired is still
    /// shown.
    pub fn cancel(&self) {
        self.authenticator.cancel();
    }

    /// Cancel the session and stop relaying.
    pub fn on_destroy(&mut self) {
        self.authenticator.cancel();
        self.stop_relay();
        debug!("fingerprint screen destroyed");
    }

    pub fn label(&self) -> String {
        self.renderer.view().label.clone()
    }

    pub fn icon_enabled(&self) -> bool {
        self.renderer.view().icon_enabled
    }

    pub fn has_active_session(&self) -> bool {
        self.authenticator.has_active_session()
    }

    /// Wait for the current relay to drain. Returns immediately if none.
    pub async fn settle(&mut self) {
        if let Some(relay) = self.relay.take() {
            if let Err(err) = relay.await {
                if !err.is_cancelled() {
                    warn!(error = %err, "relay task failed");
                }
            }
        }
    }

    fn stop_relay(&mut self) {
        if let Some(relay) = self.relay.take() {
            relay.abort();
        }
    }
}

impl Drop for FingerprintScreen {
    fn drop(&mut self) {
        self.on_destroy();
    }
}
