//! Player-facing announcements for successful inventory transitions.

use threshold_core::ports::Notifier;
use threshold_core::text::capitalize_first;
use uuid::Uuid;

pub(crate) fn item_picked_up(notifier: &Notifier<'_>, actor_id: Uuid, item_id: Uuid) {
    notifier.tell(
        actor_id,
        &format!("You pick up {}.", notifier.name(item_id, actor_id)),
    );
    announce_to_room(notifier, actor_id, |viewer| {
        format!(
            "{} picks up {}.",
            notifier.name(actor_id, viewer),
            notifier.name(item_id, viewer)
        )
    });
}

pub(crate) fn item_dropped(notifier: &Notifier<'_>, actor_id: Uuid, item_id: Uuid) {
    notifier.tell(
        actor_id,
        &format!("You drop {}.", notifier.name(item_id, actor_id)),
    );
    announce_to_room(notifier, actor_id, |viewer| {
        format!(
            "{} drops {}.",
            notifier.name(actor_id, viewer),
            notifier.name(item_id, viewer)
        )
    });
}

pub(crate) fn item_worn(notifier: &Notifier<'_>, actor_id: Uuid, item_id: Uuid) {
    notifier.tell(
        actor_id,
        &format!("You wear {}.", notifier.name(item_id, actor_id)),
    );
}

pub(crate) fn item_removed(notifier: &Notifier<'_>, actor_id: Uuid, item_id: Uuid) {
    notifier.tell(
        actor_id,
        &format!("You remove {}.", notifier.name(item_id, actor_id)),
    );
}

fn announce_to_room<F>(notifier: &Notifier<'_>, actor_id: Uuid, render: F)
where
    F: Fn(Uuid) -> String,
{
    if let Some(location) = notifier.location_of(actor_id) {
        notifier.broadcast(location, &[actor_id], |viewer| {
            capitalize_first(&render(viewer))
        });
    }
}
