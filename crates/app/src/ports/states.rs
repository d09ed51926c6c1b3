//! State provider port — read-only queries against the host's world model.

use std::future::Future;

use nightwatch_domain::entity::EntityState;
use nightwatch_domain::error::NightwatchError;
use nightwatch_domain::id::EntityId;
use nightwatch_domain::mode::HouseMode;
use nightwatch_domain::sun::SunPosition;

/// Read-only view of what the host currently knows.
///
/// The engine never caches answers; mode and sun position in particular are
/// re-queried on every scheduling decision.
pub trait StateProvider {
    /// Current state of an entity, `None` when the host does not know it.
    fn current_state(
        &self,
        id: &EntityId,
    ) -> impl Future<Output = Result<Option<EntityState>, NightwatchError>> + Send;

    /// Member ids of a group entity, in declaration order.
    ///
    /// Non-group entities yield an empty list.
    fn group_members(
        &self,
        id: &EntityId,
    ) -> impl Future<Output = Result<Vec<EntityId>, NightwatchError>> + Send;

    /// The host-wide house mode.
    fn house_mode(&self) -> impl Future<Output = Result<HouseMode, NightwatchError>> + Send;

    /// Whether the sun is currently above or below the horizon.
    fn sun_position(&self) -> impl Future<Output = Result<SunPosition, NightwatchError>> + Send;
}

impl<T: StateProvider + Send + Sync> StateProvider for std::sync::Arc<T> {
    fn current_state(
        &self,
        id: &EntityId,
    ) -> impl Future<Output = Result<Option<EntityState>, NightwatchError>> + Send {
        (**self).current_state(id)
    }

    fn group_members(
        &self,
        id: &EntityId,
    ) -> impl Future<Output = Result<Vec<EntityId>, NightwatchError>> + Send {
        (**self).group_members(id)
    }

    fn house_mode(&self) -> impl Future<Output = Result<HouseMode, NightwatchError>> + Send {
        (**self).house_mode()
    }

    fn sun_position(&self) -> impl Future<Output = Result<SunPosition, NightwatchError>> + Send {
        (**self).sun_position()
    }
}
