//! Command tree: descriptors, registered nodes and the registrar.
//!
//! - `descriptor`: [`CommandDescriptor`], the builder hosts register
//! - `node`: [`CommandNode`] and its [`ChildIndex`]
//! - `tree`: [`CommandTree`], arena storage plus registration

mod descriptor;
mod node;
mod tree;

pub use descriptor::{CommandDescriptor, Handler};
pub use node::{ChildIndex, CommandNode, NodeId};
pub use tree::{CommandTree, RegistrationReport};
