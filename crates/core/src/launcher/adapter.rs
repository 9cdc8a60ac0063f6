use crossbeam_channel::{Receiver, Sender, bounded, select};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::core_log::CoreLog;
use crate::launcher::session::{ControllerSession, LauncherRequest, LifecycleEvent, ProfileLocator};

/// Drives a [`ControllerSession`] on a worker thread: lifecycle events in, launcher
/// requests out.
pub struct SessionAdapter;

/// Running adapter. Dropping it stops the worker; `stop()` also hands back the session.
pub struct SessionHandle {
    join: Option<JoinHandle<ControllerSession>>,
    stop_tx: Sender<()>,
}

impl SessionHandle {
    /// Stop the worker and return the session state it ended with.
    pub fn stop(mut self) -> Option<ControllerSession> {
        let _ = self.stop_tx.send(());
        self.join.take().and_then(|j| j.join().ok())
    }
}

impl SessionAdapter {
    pub fn spawn(
        mut session: ControllerSession,
        events: Receiver<LifecycleEvent>,
        requests: Sender<LauncherRequest>,
        locator: Arc<dyn ProfileLocator>,
        logger: Arc<dyn CoreLog>,
    ) -> SessionHandle {
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let join = std::thread::spawn(move || {
            logger.info("SessionAdapter started");

            'outer: loop {
                select! {
                    recv(events) -> msg => match msg {
                        Ok(ev) => {
                            logger.debug(&format!("[session] {ev:?}"));
                            for req in session.handle(&ev, locator.as_ref()) {
                                if requests.send(req).is_err() {
                                    logger.warn("[session] request receiver dropped");
                                    break 'outer;
                                }
                            }
                        }
                        // All event senders gone.
                        Err(_) => break,
                    },

                    recv(stop_rx) -> _ => break,
                }
            }

            logger.info("SessionAdapter stopped");
            session
        });

        SessionHandle {
            join: Some(join),
            stop_tx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_log::NoopLog;
    use crate::launcher::session::LaunchSpec;
    use crossbeam_channel::{RecvTimeoutError, unbounded};
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    #[test]
    fn events_flow_through_to_requests() {
        let (ev_tx, ev_rx) = unbounded();
        let (req_tx, req_rx) = unbounded();
        let locator: Arc<dyn ProfileLocator> =
            Arc::new(|p: &Path| p.ends_with("g1.gamecontroller.amgp"));

        let handle = SessionAdapter::spawn(
            ControllerSession::new("/cfg"),
            ev_rx,
            req_tx,
            locator,
            Arc::new(NoopLog),
        );

        ev_tx
            .send(LifecycleEvent::GameLaunched {
                game_id: "g1".into(),
            })
            .unwrap();
        let req = req_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(
            req,
            LauncherRequest::Launch(LaunchSpec {
                profile: PathBuf::from("/cfg").join("g1.gamecontroller.amgp"),
                hidden: true,
                settle: Duration::ZERO,
            })
        );

        ev_tx
            .send(LifecycleEvent::ServiceRemoved {
                service_id: "game.g1".into(),
            })
            .unwrap();
        assert_eq!(
            req_rx.recv_timeout(Duration::from_secs(2)).unwrap(),
            LauncherRequest::Kill
        );

        let session = handle.stop().unwrap();
        assert!(!session.is_running());
        assert_eq!(session.last_game_id(), Some("g1"));
    }

    #[test]
    fn closing_the_event_channel_ends_the_worker() {
        let (ev_tx, ev_rx) = unbounded::<LifecycleEvent>();
        let (req_tx, _req_rx) = unbounded();
        let handle = SessionAdapter::spawn(
            ControllerSession::new("/cfg"),
            ev_rx,
            req_tx,
            Arc::new(|_: &Path| false),
            Arc::new(NoopLog),
        );

        drop(ev_tx);
        assert!(handle.stop().is_some());
    }

    #[test]
    fn dropping_the_handle_ends_the_worker() {
        let (ev_tx, ev_rx) = unbounded::<LifecycleEvent>();
        let (req_tx, req_rx) = unbounded();
        let handle = SessionAdapter::spawn(
            ControllerSession::new("/cfg"),
            ev_rx,
            req_tx,
            Arc::new(|_: &Path| true),
            Arc::new(NoopLog),
        );

        drop(handle);
        // Events are still open, so only the worker exiting disconnects requests.
        assert_eq!(
            req_rx.recv_timeout(Duration::from_secs(2)),
            Err(RecvTimeoutError::Disconnected)
        );
        drop(ev_tx);
    }
}
