//! Player-facing announcements for posture changes.

use threshold_core::ports::Notifier;
use threshold_core::text::capitalize_first;
use uuid::Uuid;

use crate::domain::posture::Posture;

pub(crate) fn posture_changed(notifier: &Notifier<'_>, actor_id: Uuid, posture: Posture) {
    notifier.tell(actor_id, &format!("You {}.", posture.first_person()));
    if let Some(location) = notifier.location_of(actor_id) {
        notifier.broadcast(location, &[actor_id], |viewer| {
            capitalize_first(&format!(
                "{} {}.",
                notifier.name(actor_id, viewer),
                posture.third_person()
            ))
        });
    }
}
