//! Player-facing announcements for doors swinging open or shut.

use threshold_core::ports::Notifier;
use threshold_core::text::capitalize_first;
use uuid::Uuid;

use crate::domain::aggregates::DoorAction;
use crate::domain::door::DoorLeaf;

/// Tells the actor, the rest of the actor's side, and everybody on the far
/// side. Nobody on the far side is excluded, since the actor is not there.
pub(crate) fn door_moved(
    notifier: &Notifier<'_>,
    action: DoorAction,
    actor_id: Uuid,
    near: &DoorLeaf,
    far: &DoorLeaf,
) {
    let (first_person, third_person) = match action {
        DoorAction::Open => ("open", "opens"),
        DoorAction::Close => ("close", "closes"),
    };

    notifier.tell(
        actor_id,
        &format!(
            "You {first_person} {}.",
            notifier.name(near.exit_id, actor_id)
        ),
    );
    notifier.broadcast(near.location_id, &[actor_id], |viewer| {
        capitalize_first(&format!(
            "{} {third_person} {}.",
            notifier.name(actor_id, viewer),
            notifier.name(near.exit_id, viewer)
        ))
    });
    notifier.broadcast(far.location_id, &[], |viewer| {
        capitalize_first(&format!(
            "{} {third_person}.",
            notifier.name(far.exit_id, viewer)
        ))
    });
}
