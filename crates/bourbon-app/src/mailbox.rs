//! Serialized mailbox actors.
//!
//! [`spawn`] moves a [`Machine`] into a task that drains an unbounded inbox in
//! arrival order, one input at a time. Observable state is published through a
//! `watch` channel as a [`Snapshot`] whose revision increases by one for every
//! applied mutation. Readers may miss intermediate revisions but never see an
//! older snapshot after a newer one.
//!
//! Non-render actions are forwarded, in order, to the effect receiver returned
//! by [`spawn`], after the snapshot for the same input has been published.
//!
//! [`MachineHandle::flush`] queues a barrier behind every input sent so far
//! and resolves once the machine has reached it.

use tokio::sync::{mpsc, oneshot, watch};

use crate::{Machine, RuntimeError, Scope};

/// Published machine state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<S> {
    /// Number of mutations applied so far.
    pub revision: u64,
    /// State after the last mutation.
    pub state: S,
}

/// Receiver for a machine's non-render actions.
pub type Effects<M> = mpsc::UnboundedReceiver<<M as Machine>::Action>;

enum Envelope<I> {
    Input(I),
    Flush(oneshot::Sender<()>),
}

/// Sending side of a running machine.
pub struct MachineHandle<M: Machine> {
    inbox: mpsc::UnboundedSender<Envelope<M::Input>>,
    state: watch::Receiver<Snapshot<M::State>>,
}

impl<M: Machine> Clone for MachineHandle<M> {
    fn clone(&self) -> Self {
        Self { inbox: self.inbox.clone(), state: self.state.clone() }
    }
}

impl<M: Machine> std::fmt::Debug for MachineHandle<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MachineHandle")
            .field("machine", &M::NAME)
            .field("revision", &self.state.borrow().revision)
            .finish_non_exhaustive()
    }
}

impl<M: Machine> MachineHandle<M> {
    /// Queue an input. Never blocks.
    ///
    /// Returns `false` if the machine has been torn down; the input is
    /// dropped.
    pub fn send(&self, input: M::Input) -> bool {
        match self.inbox.send(Envelope::Input(input)) {
            Ok(()) => true,
            Err(mpsc::error::SendError(Envelope::Input(input))) => {
                tracing::debug!(machine = M::NAME, ?input, "input dropped, machine closed");
                false
            },
            Err(mpsc::error::SendError(Envelope::Flush(_))) => false,
        }
    }

    /// Wait until every input sent before this call has been applied and its
    /// effects forwarded.
    pub async fn flush(&self) -> Result<(), RuntimeError> {
        let closed = || RuntimeError::Closed { machine: M::NAME };
        let (done_tx, done_rx) = oneshot::channel();
        self.inbox.send(Envelope::Flush(done_tx)).map_err(|_| closed())?;
        done_rx.await.map_err(|_| closed())
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Snapshot<M::State> {
        self.state.borrow().clone()
    }

    /// Latest published state.
    pub fn state(&self) -> M::State {
        self.state.borrow().state.clone()
    }

    /// Receiver notified on every publication.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<M::State>> {
        self.state.clone()
    }

    /// Wait until the published state satisfies `predicate`. Checks the
    /// current state first.
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&M::State) -> bool,
    ) -> Result<Snapshot<M::State>, RuntimeError> {
        let mut state = self.state.clone();
        let snapshot = state
            .wait_for(|snapshot| predicate(&snapshot.state))
            .await
            .map_err(|_| RuntimeError::Closed { machine: M::NAME })?;
        Ok(snapshot.clone())
    }

    /// Wait until a snapshot newer than `revision` is published.
    pub async fn changed_since(&self, revision: u64) -> Result<Snapshot<M::State>, RuntimeError> {
        let mut state = self.state.clone();
        let snapshot = state
            .wait_for(|snapshot| snapshot.revision > revision)
            .await
            .map_err(|_| RuntimeError::Closed { machine: M::NAME })?;
        Ok(snapshot.clone())
    }

    /// Returns true once the machine task has stopped.
    pub fn is_closed(&self) -> bool {
        self.inbox.is_closed()
    }
}

/// Run `machine` as an actor owned by `scope`.
pub fn spawn<M: Machine>(machine: M, scope: &Scope) -> (MachineHandle<M>, Effects<M>) {
    let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(Snapshot { revision: 0, state: machine.state() });
    let (effects_tx, effects_rx) = mpsc::unbounded_channel();

    scope.spawn(run(machine, inbox_rx, state_tx, effects_tx));
    tracing::debug!(machine = M::NAME, "machine started");

    (MachineHandle { inbox: inbox_tx, state: state_rx }, effects_rx)
}

async fn run<M: Machine>(
    mut machine: M,
    mut inbox: mpsc::UnboundedReceiver<Envelope<M::Input>>,
    state: watch::Sender<Snapshot<M::State>>,
    effects: mpsc::UnboundedSender<M::Action>,
) {
    while let Some(envelope) = inbox.recv().await {
        let input = match envelope {
            Envelope::Input(input) => input,
            Envelope::Flush(done) => {
                let _ = done.send(());
                continue;
            },
        };
        tracing::trace!(machine = M::NAME, ?input, "input");
        let actions = machine.handle(input);

        let mut rendered = 0u64;
        let mut pending = Vec::new();
        for action in actions {
            if M::is_render(&action) {
                rendered += 1;
            } else {
                pending.push(action);
            }
        }

        if rendered > 0 {
            state.send_modify(|snapshot| {
                snapshot.revision += rendered;
                snapshot.state = machine.state();
            });
        }

        for action in pending {
            if let Err(mpsc::error::SendError(action)) = effects.send(action) {
                tracing::trace!(machine = M::NAME, ?action, "effect dropped, no consumer");
            }
        }
    }
    tracing::debug!(machine = M::NAME, "machine stopped");
}
