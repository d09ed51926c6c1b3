//! Group flattener — expands a root group into the monitored watch list.

use std::collections::HashSet;

use nightwatch_domain::entity::{Category, CategoryFilter, MonitoredEntity};
use nightwatch_domain::error::{NightwatchError, UnknownEntityError};
use nightwatch_domain::id::EntityId;

use crate::ports::StateProvider;

/// Expand `root` into its non-group leaves, depth-first in declaration
/// order, keeping leaves the filter accepts.
///
/// Nested entities unknown to the host are logged and skipped; a group that
/// shows up twice (shared membership or a cycle) is expanded only once. A
/// non-group root flattens to itself.
///
/// # Errors
///
/// Returns [`NightwatchError::UnknownEntity`] when the root itself is
/// unknown, or any state-provider error as-is.
pub async fn flatten<S: StateProvider>(
    states: &S,
    root: &EntityId,
    filter: &CategoryFilter,
) -> Result<Vec<MonitoredEntity>, NightwatchError> {
    if states.current_state(root).await?.is_none() {
        return Err(UnknownEntityError {
            id: root.to_string(),
        }
        .into());
    }

    let mut leaves = Vec::new();
    let mut expanded: HashSet<EntityId> = HashSet::new();
    let mut stack: Vec<EntityId> = vec![root.clone()];

    while let Some(next) = stack.pop() {
        if next != *root && states.current_state(&next).await?.is_none() {
            tracing::warn!(entity = %next, "group member unknown to the host, skipping");
            continue;
        }
        let category = Category::of(&next);
        if category.is_group() {
            if !expanded.insert(next.clone()) {
                tracing::warn!(group = %next, "group already expanded, skipping repeat");
                continue;
            }
            let members = states.group_members(&next).await?;
            // reversed so the pop order matches declaration order
            for member in members.into_iter().rev() {
                stack.push(member);
            }
        } else if filter.accepts(&category) {
            leaves.push(MonitoredEntity::new(next));
        } else {
            tracing::debug!(entity = %next, category = %category, "leaf outside category filter");
        }
    }

    Ok(leaves)
}
