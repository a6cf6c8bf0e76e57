//! # Message Kinds
//!
//! The engine never inspects message payloads. It only needs a key to pick
//! a handler, which `Message::kind` supplies. Kinds are normally a fieldless
//! enum mirroring the message enum:
//!
//! ```
//! use hfsm_core::Message;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum OrderKind { Walk, Stop }
//!
//! enum Order { Walk { x: i32, z: i32 }, Stop }
//!
//! impl Message for Order {
//!     type Kind = OrderKind;
//!     fn kind(&self) -> OrderKind {
//!         match self {
//!             Order::Walk { .. } => OrderKind::Walk,
//!             Order::Stop => OrderKind::Stop,
//!         }
//!     }
//! }
//!
//! assert_eq!(Order::Walk { x: 1, z: 2 }.kind(), OrderKind::Walk);
//! ```

use std::fmt::Debug;
use std::hash::Hash;

/// A message that can be dispatched to a state's handlers.
pub trait Message {
    /// Handler-table key.
    type Kind: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// The kind of this message.
    fn kind(&self) -> Self::Kind;
}
