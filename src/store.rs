//! Interface to the external settings/data store.
//!
//! The chart never owns or mutates the dataset. It reads a [`ChartProps`]
//! snapshot every render and asks for changes by sending [`StoreCommand`]s
//! through a [`DispatchSink`]. Whoever owns the store drains the receiver,
//! applies the commands, and hands back fresh props on the next render.
//!
//! [`ChartProps`]: crate::data::ChartProps

use std::sync::mpsc::{Receiver, SendError, Sender};

/// Identifier of the host page's loading indicator.
pub const LOADER_ID: &str = "__loader";

/// Mutation requests sent to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCommand {
    /// Replace point `index` with `xy`.
    Drag {
        index: usize,
        xy: [f64; 2],
        /// Ask the store to render the result without animation.
        immediate: bool,
    },
}

impl StoreCommand {
    /// Action name as the store dispatches on it.
    pub fn name(&self) -> &'static str {
        match self {
            StoreCommand::Drag { .. } => "drag",
        }
    }
}

/// Clonable sending half of the dispatch channel.
#[derive(Clone, Debug)]
pub struct DispatchSink {
    tx: Sender<StoreCommand>,
}

impl DispatchSink {
    pub fn dispatch(&self, cmd: StoreCommand) -> Result<(), SendError<StoreCommand>> {
        self.tx.send(cmd)
    }

    /// Request point `index` be moved to `xy`, rendered immediately.
    pub fn drag(&self, index: usize, xy: [f64; 2]) -> Result<(), SendError<StoreCommand>> {
        self.dispatch(StoreCommand::Drag {
            index,
            xy,
            immediate: true,
        })
    }
}

/// Create a dispatch channel: the sink goes to the chart, the receiver to the store.
pub fn channel_dispatch() -> (DispatchSink, Receiver<StoreCommand>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (DispatchSink { tx }, rx)
}

/// Something on the host side that shows progress until the chart is up.
pub trait LoadingIndicator {
    /// Hide the indicator registered under `id`.
    fn hide(&mut self, id: &str);
}

impl<F: FnMut(&str)> LoadingIndicator for F {
    fn hide(&mut self, id: &str) {
        self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_is_sent_as_immediate() {
        let (sink, rx) = channel_dispatch();
        sink.drag(3, [1.5, 2.5]).unwrap();
        let cmd = rx.try_recv().unwrap();
        assert_eq!(cmd.name(), "drag");
        assert_eq!(
            cmd,
            StoreCommand::Drag {
                index: 3,
                xy: [1.5, 2.5],
                immediate: true
            }
        );
    }

    #[test]
    fn dispatch_fails_once_store_is_gone() {
        let (sink, rx) = channel_dispatch();
        drop(rx);
        assert!(sink.drag(0, [0.0, 0.0]).is_err());
    }

    #[test]
    fn closures_act_as_loading_indicators() {
        let mut hidden = Vec::new();
        {
            let mut loader = |id: &str| hidden.push(id.to_string());
            loader.hide(LOADER_ID);
        }
        assert_eq!(hidden, vec![LOADER_ID.to_string()]);
    }
}
