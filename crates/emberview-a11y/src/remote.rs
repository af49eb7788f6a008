//! Channel transport between the bridge and the engine thread.
//!
//! The bridge side holds a [`RemoteEngine`]; the engine thread drains the
//! matching [`EngineEndpoint`]. Node queries are the one blocking exchange
//! (the platform wants an answer inside the query call); everything else is
//! fire-and-forget in FIFO order.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use crate::bundle::Bundle;
use crate::engine::{ContentEngine, EngineCommand};
use crate::logging::targets;

/// One request forwarded to the engine thread.
pub enum EngineRequest {
    /// Fetch a node descriptor; the answer goes back through `reply`.
    NodeInfo {
        id: i32,
        reply: Sender<Option<Bundle>>,
    },
    SetText { id: i32, text: String },
    Command(EngineCommand),
    ToggleNativeAccessibility(bool),
}

/// The engine-thread service an [`EngineEndpoint`] drains requests into.
pub trait EngineService: Send {
    fn node_info(&mut self, id: i32) -> Option<Bundle>;
    fn set_text(&mut self, id: i32, text: &str);
    fn command(&mut self, command: EngineCommand);
    fn toggle_native_accessibility(&mut self, enabled: bool);
}

/// Create a connected bridge-side handle and engine-side endpoint.
pub fn engine_channel() -> (RemoteEngine, EngineEndpoint) {
    let (tx, rx) = unbounded();
    (RemoteEngine { tx }, EngineEndpoint { rx })
}

/// Bridge-side handle that forwards [`ContentEngine`] calls to the engine
/// thread. Cheap to clone.
#[derive(Clone)]
pub struct RemoteEngine {
    tx: Sender<EngineRequest>,
}

impl RemoteEngine {
    fn send(&self, request: EngineRequest) {
        if self.tx.send(request).is_err() {
            tracing::warn!(target: targets::REMOTE, "engine endpoint closed, request dropped");
        }
    }
}

impl ContentEngine for RemoteEngine {
    fn get_node_info(&self, node_id: i32) -> Option<Bundle> {
        let (reply, answer) = bounded(1);
        if self
            .tx
            .send(EngineRequest::NodeInfo { id: node_id, reply })
            .is_err()
        {
            tracing::warn!(target: targets::REMOTE, "engine endpoint closed, node query dropped");
            return None;
        }
        answer.recv().ok().flatten()
    }

    fn set_text(&self, node_id: i32, text: &str) {
        self.send(EngineRequest::SetText {
            id: node_id,
            text: text.to_string(),
        });
    }

    fn dispatch(&self, command: EngineCommand) {
        self.send(EngineRequest::Command(command));
    }

    fn toggle_native_accessibility(&self, enabled: bool) {
        self.send(EngineRequest::ToggleNativeAccessibility(enabled));
    }
}

/// Engine-side endpoint; drains requests into an [`EngineService`].
pub struct EngineEndpoint {
    rx: Receiver<EngineRequest>,
}

impl EngineEndpoint {
    /// Serve requests until every [`RemoteEngine`] handle is dropped.
    pub fn run<S: EngineService>(self, service: &mut S) {
        for request in self.rx {
            match request {
                EngineRequest::NodeInfo { id, reply } => {
                    // A dropped reply means the querying side gave up; the
                    // answer is simply discarded.
                    let _ = reply.send(service.node_info(id));
                }
                EngineRequest::SetText { id, text } => service.set_text(id, &text),
                EngineRequest::Command(command) => service.command(command),
                EngineRequest::ToggleNativeAccessibility(enabled) => {
                    service.toggle_native_accessibility(enabled)
                }
            }
        }
        tracing::debug!(target: targets::REMOTE, "engine endpoint finished");
    }

    /// Serve requests on a dedicated engine thread.
    pub fn spawn<S: EngineService + 'static>(self, mut service: S) -> std::thread::JoinHandle<()> {
        std::thread::Builder::new()
            .name("emberview-engine".into())
            .spawn(move || self.run(&mut service))
            .unwrap_or_else(|e| panic!("failed to spawn engine thread: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoService {
        commands: Vec<EngineCommand>,
    }

    impl EngineService for EchoService {
        fn node_info(&mut self, id: i32) -> Option<Bundle> {
            (id >= 0).then(|| {
                let mut bundle = Bundle::new();
                bundle.put_i32("id", id);
                bundle
            })
        }

        fn set_text(&mut self, _id: i32, _text: &str) {}

        fn command(&mut self, command: EngineCommand) {
            self.commands.push(command);
        }

        fn toggle_native_accessibility(&mut self, _enabled: bool) {}
    }

    #[test]
    fn test_node_query_round_trip() {
        let (engine, endpoint) = engine_channel();
        let worker = std::thread::spawn(move || {
            let mut service = EchoService { commands: Vec::new() };
            endpoint.run(&mut service);
        });

        let info = engine.get_node_info(7).unwrap();
        assert_eq!(info.get_i32_or("id", 0), 7);
        assert_eq!(engine.get_node_info(-2), None);

        drop(engine);
        worker.join().unwrap();
    }

    #[test]
    fn test_commands_arrive_in_order() {
        let (engine, endpoint) = engine_channel();
        engine.dispatch(EngineCommand::ScrollForward);
        engine.dispatch(EngineCommand::Select);
        engine.dispatch(EngineCommand::LongPress);
        drop(engine);

        let mut service = EchoService { commands: Vec::new() };
        endpoint.run(&mut service);
        assert_eq!(
            service.commands,
            vec![
                EngineCommand::ScrollForward,
                EngineCommand::Select,
                EngineCommand::LongPress,
            ]
        );
    }

    #[test]
    fn test_closed_endpoint_degrades_quietly() {
        let (engine, endpoint) = engine_channel();
        drop(endpoint);
        assert_eq!(engine.get_node_info(1), None);
        engine.dispatch(EngineCommand::Select); // must not panic
    }
}
