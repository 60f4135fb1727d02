// Manages background network operations for the TUI.
use crate::client::BibleClient;
use crate::tui::action::{Action, AppEvent};
use tokio::sync::mpsc::{Receiver, Sender};

/// Owns the HTTP client and serves fetch requests until `Quit` or until the
/// UI drops its sender. Each fetch runs in its own task, so a slow request
/// never blocks a newer one.
pub async fn run_network_actor(
    client: BibleClient,
    mut action_rx: Receiver<Action>,
    event_tx: Sender<AppEvent>,
) {
    log::debug!("Network actor started ({})", client.provider().kind);

    while let Some(action) = action_rx.recv().await {
        match action {
            Action::Quit => break,

            Action::Fetch {
                generation,
                request,
                primary,
                secondary,
            } => {
                let client = client.clone();
                let event_tx = event_tx.clone();
                tokio::spawn(async move {
                    let event = match client
                        .fetch_passage(&request, &primary, secondary.as_deref())
                        .await
                    {
                        Ok(passage) => AppEvent::PassageLoaded {
                            generation,
                            passage,
                        },
                        Err(e) => {
                            log::warn!("Fetch #{} failed: {:#}", generation, e);
                            AppEvent::FetchFailed {
                                generation,
                                message: format!("{:#}", e),
                            }
                        }
                    };
                    let _ = event_tx.send(event).await;
                });
            }
        }
    }

    log::debug!("Network actor stopped");
}
