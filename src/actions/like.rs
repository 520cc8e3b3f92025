use crate::actions::{ActionError, Dispatcher};
use crate::api::Endpoint;
use crate::cancel::CancelToken;
use crate::model::{EntityKind, EntityRef, Entry, Field, LikeState};
use crate::reconcile::{OptimisticToggle, Outcome};

impl Dispatcher {
    /// Flip the like on a post, project or video.
    ///
    /// `isLiked` and `likeCount` in the response replace the optimistic
    /// values.
    pub async fn toggle_like(
        &self,
        entity: &EntityRef,
        known: LikeState,
        cancel: &CancelToken,
    ) -> Result<Outcome, ActionError> {
        self.member("like")?;
        if entity.kind == EntityKind::User {
            return Err(ActionError::Unsupported {
                action: "like",
                kind: entity.kind,
            });
        }

        self.store().seed_missing(known.entries(&entity.id));

        let id = entity.id.clone();
        let confirmed_id = entity.id.clone();
        let toggle = OptimisticToggle::new(
            (entity.id.clone(), Field::Liked),
            Endpoint::ToggleLike(entity.clone()).request(),
        )
        .optimistic(move |state| {
            let current = LikeState::new(
                state.read(id.as_str(), Field::Liked).as_flag().unwrap_or(false),
                state.read(id.as_str(), Field::LikeCount).as_count().unwrap_or(0),
            );
            current.toggled().entries(&id)
        })
        .authoritative(move |response| {
            let mut entries = Vec::new();
            if let Some(liked) = response.data_flag("isLiked") {
                entries.push(Entry::new(confirmed_id.clone(), Field::Liked, liked));
            }
            if let Some(count) = response.data_count("likeCount") {
                entries.push(Entry::new(confirmed_id.clone(), Field::LikeCount, count));
            }
            entries
        });

        Ok(self.reconciler().run(toggle, cancel).await)
    }
}
