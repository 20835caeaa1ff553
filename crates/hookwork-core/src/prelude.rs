pub use crate::alert::alert;
pub use crate::effects::{Dispose, on_unmount};
pub use crate::effects_ext::{disposable_effect, launched_effect};
pub use crate::locals::{local, local_or_default, provide};
pub use crate::refs::{MutableRef, NodeRef, remember_node_ref, remember_ref};
pub use crate::resource::{Resource, ResourceState, SettlePolicy, remember_resource};
pub use crate::runtime::{
    ComposeGuard, Frame, Scheduler, component, remember, remember_state, remember_state_with_key,
    remember_with_key,
};
pub use crate::scope::{Lifetime, Scope, current_scope, scoped_effect};
pub use crate::semantics::{Role, Semantics};
pub use crate::signal::{Signal, signal};
pub use crate::task::spawn;
pub use crate::view::{Scene, SceneNode, View, ViewId, ViewKind};
