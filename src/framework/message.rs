//! # Generic Messages
//!
//! Request types exchanged between [`ResourceClient`](crate::framework::ResourceClient) and
//! [`ResourceActor`](crate::framework::ResourceActor).

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use tokio::sync::{oneshot, watch};

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Message sent to the actor to request an operation.
///
/// The variants are the CRUD lifecycle of a stored resource, a one-shot `List`, a
/// `Subscribe` that hands back a snapshot feed, and `Action` for resource-specific
/// operations that must run atomically inside the actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Subscribe {
        respond_to: Response<watch::Receiver<Vec<T>>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
