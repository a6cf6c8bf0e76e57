//! # hfsm-machine — Hierarchical Finite State Machine Runtime
//!
//! Drives stateful game objects (unit orders, AI behaviors, dialogs) from a
//! declarative tree of states. The crate has two halves:
//!
//! - **Spec compiler** (`compile.rs`): turns a nested `StateNode` tree into a
//!   `CompiledSpec`, a flat state table plus a decomposition table. Handler
//!   inheritance is resolved here, once per behavior definition.
//!
//! - **Transition/dispatch engine** (`engine.rs`, `context.rs`): binds a
//!   compiled spec to any number of hosts, each carrying a tiny `Instance`.
//!   Dispatches messages, runs enter/leave hooks across multi-level
//!   transitions, follows chained transitions staged by hooks, and lets a
//!   handler defer a message to its parent state.
//!
//! The FSM never interprets messages. It manages state identity, handler
//! resolution, and enter/leave sequencing, nothing else.
//!
//! ## Example
//!
//! ```
//! use hfsm_core::{Message, StatePath};
//! use hfsm_machine::{compile, Behavior, FsmHost, Instance, StateNode};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Order { Walk, Stop }
//!
//! impl Message for Order {
//!     type Kind = Order;
//!     fn kind(&self) -> Order { *self }
//! }
//!
//! #[derive(Default)]
//! struct Unit { fsm: Instance, moving: bool }
//!
//! impl FsmHost for Unit {
//!     fn fsm(&self) -> &Instance { &self.fsm }
//!     fn fsm_mut(&mut self) -> &mut Instance { &mut self.fsm }
//! }
//!
//! struct UnitAi;
//! impl Behavior for UnitAi {
//!     type Host = Unit;
//!     type Message = Order;
//!     type Output = bool;
//! }
//!
//! let spec = compile(
//!     &StateNode::<UnitAi>::new()
//!         .on(Order::Stop, |ctx, _| { ctx.set_next_state("IDLE"); true })
//!         .state("IDLE", StateNode::<UnitAi>::new()
//!             .on(Order::Walk, |ctx, _| { ctx.set_next_state("WALKING"); true }))
//!         .state("WALKING", StateNode::<UnitAi>::new()
//!             .on_enter(|ctx| { ctx.host_mut().moving = true; false })
//!             .on_leave(|ctx| { ctx.host_mut().moving = false; false })),
//! )
//! .unwrap();
//!
//! let mut unit = Unit::default();
//! spec.init(&mut unit, "IDLE").unwrap();
//! assert_eq!(spec.process_message(&mut unit, &Order::Walk), Some(true));
//! assert!(unit.moving);
//! assert_eq!(unit.fsm.current_state().as_str(), "WALKING");
//!
//! // Stop is inherited from the root.
//! spec.process_message(&mut unit, &Order::Stop);
//! assert!(!unit.moving);
//! assert_eq!(spec.current_state(&unit), &StatePath::from_dotted("IDLE"));
//! ```
//!
//! ## Concurrency
//!
//! A `CompiledSpec` is immutable and can be shared across threads behind an
//! `Arc`. Each host is driven through `&mut`, so a single instance cannot be
//! processed from two threads at once.

pub mod behavior;
pub mod compile;
pub mod compiled;
pub mod context;
pub mod engine;
pub mod instance;
pub mod registry;
pub mod spec;

#[cfg(test)]
pub(crate) mod test_support;

pub use behavior::{Behavior, FsmHost, Handler, Hook, MessageKind};
pub use compile::{compile, compile_with};
pub use compiled::{CompiledSpec, CompiledState};
pub use context::Context;
pub use instance::Instance;
pub use registry::BehaviorRegistry;
pub use spec::{StateNode, StateSpec};
