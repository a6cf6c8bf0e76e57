//! # Behavior Definitions and the Host Contract
//!
//! A `Behavior` names the three types a state spec is written against: the
//! consumer object that owns the FSM instance (`Host`), the messages it
//! receives, and the value its handlers return.
//!
//! The host keeps its own `Instance` and hands it to the engine on demand.
//! The engine holds no back-reference to any host.

use std::sync::Arc;

use hfsm_core::{Message, StatePath};

use crate::context::Context;
use crate::instance::Instance;

/// The associated types of one behavior definition.
///
/// Implemented on a marker type, one per distinct behavior:
///
/// ```ignore
/// struct UnitAi;
/// impl Behavior for UnitAi {
///     type Host = Unit;
///     type Message = UnitMessage;
///     type Output = bool;
/// }
/// ```
pub trait Behavior: 'static {
    /// The consumer object that owns an instance.
    type Host: FsmHost;
    /// Messages dispatched to handlers.
    type Message: Message;
    /// Value returned by handlers and passed back from `process_message`.
    type Output;
}

/// Consumer side of the engine contract.
pub trait FsmHost {
    /// The instance bound to this consumer.
    fn fsm(&self) -> &Instance;

    /// Mutable access to the instance bound to this consumer.
    fn fsm_mut(&mut self) -> &mut Instance;

    /// Called whenever the engine changes the current state, including the
    /// intermediate state left behind when a hook aborts a transition.
    fn fsm_state_name_changed(&mut self, _state: &StatePath) {}
}

/// Handler-table key of a behavior's messages.
pub type MessageKind<B> = <<B as Behavior>::Message as Message>::Kind;

/// A message handler.
pub type Handler<B> = Arc<
    dyn Fn(&mut Context<'_, B>, &<B as Behavior>::Message) -> <B as Behavior>::Output
        + Send
        + Sync,
>;

/// An enter or leave hook. Returning `true` aborts the running transition;
/// the hook is expected to have staged a replacement.
pub type Hook<B> = Arc<dyn Fn(&mut Context<'_, B>) -> bool + Send + Sync>;
