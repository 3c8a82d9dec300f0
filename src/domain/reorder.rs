//! Index translation and the cross-column reorder.
//!
//! Items live in a single flat list; a container's contents are the items
//! tagged with its id, in list order. Drag results only know positions among
//! siblings, so both ends of a move are translated to flat positions first.
//!
//! Out-of-range relative indices are clamped to "append to the end of the
//! flat list" rather than rejected, which keeps [`reorder`] total.

use std::{collections::HashSet, fmt, hash::Hash};
use tracing::{debug, warn};

/// An item that sits in a container and can be moved between containers
pub trait Placed {
    type Id: Eq + Hash + fmt::Display;
    type Container: PartialEq + Clone + fmt::Display;

    fn id(&self) -> &Self::Id;
    fn container(&self) -> &Self::Container;
    fn set_container(&mut self, container: Self::Container);
}

/// Translates a position among `container`'s items into a flat-list position.
///
/// Returns `list.len()` (append) when the container is empty or when
/// `relative_index` is at or past the container's last item. Otherwise the
/// target item is picked from the container's subsequence and located in the
/// flat list by identity.
///
/// # Examples
/// ```
/// use kanban_core::{absolute_index, Card, CardId, ColumnId};
///
/// let todo = ColumnId::from("todo");
/// let done = ColumnId::from("done");
/// let cards = vec![
///     Card::with_id(CardId::from("a"), "A", todo.clone()),
///     Card::with_id(CardId::from("b"), "B", done.clone()),
///     Card::with_id(CardId::from("c"), "C", todo.clone()),
/// ];
///
/// assert_eq!(absolute_index(&cards, 1, &todo), 2);
/// assert_eq!(absolute_index(&cards, 0, &done), 1);
/// assert_eq!(absolute_index(&cards, 2, &todo), 3);
/// ```
pub fn absolute_index<T: Placed>(list: &[T], relative_index: usize, container: &T::Container) -> usize {
    let mut siblings = list.iter().filter(|item| item.container() == container);

    match siblings.nth(relative_index) {
        Some(target) => list
            .iter()
            .position(|item| item.id() == target.id())
            .unwrap_or(list.len()),
        None => {
            let count = list.iter().filter(|item| item.container() == container).count();
            if relative_index > count {
                debug!(
                    %container,
                    relative_index,
                    count,
                    "relative index past end of column, appending"
                );
            }
            list.len()
        }
    }
}

/// Inverse of [`absolute_index`]: the container of the item at `absolute_index`
/// and its position among that container's items.
pub fn relative_position<T: Placed>(list: &[T], absolute_index: usize) -> Option<(&T::Container, usize)> {
    let item = list.get(absolute_index)?;
    let container = item.container();
    let relative = list[..absolute_index]
        .iter()
        .filter(|other| other.container() == container)
        .count();
    Some((container, relative))
}

/// Moves one item between (or within) containers and returns the new list.
///
/// The input is left untouched. The destination position is computed against
/// the list *after* the dragged item has been removed, so later positions have
/// already shifted down by one. Finally every item whose id is `dragged_id` is
/// re-tagged to `dest_container`.
///
/// If `source_index` names no item the list is returned unchanged.
///
/// Ids must be unique; this is checked in debug builds.
pub fn reorder<T: Placed + Clone>(
    list: &[T],
    source_index: usize,
    source_container: &T::Container,
    dest_index: usize,
    dest_container: &T::Container,
    dragged_id: &T::Id,
) -> Vec<T> {
    debug_assert!(ids_unique(list), "reorder requires unique ids");

    let mut result = list.to_vec();

    let start = absolute_index(&result, source_index, source_container);
    if start >= result.len() {
        warn!(
            container = %source_container,
            index = source_index,
            "drag source names no item, leaving order unchanged"
        );
        return result;
    }
    let removed = result.remove(start);

    let end = absolute_index(&result, dest_index, dest_container);
    result.insert(end, removed);

    for item in result.iter_mut().filter(|item| item.id() == dragged_id) {
        if item.container() != dest_container {
            item.set_container(dest_container.clone());
        }
    }

    debug!(%dragged_id, from = start, to = end, "reordered");
    result
}

fn ids_unique<T: Placed>(list: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(list.len());
    list.iter().all(|item| seen.insert(item.id()))
}
