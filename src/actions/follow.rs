use crate::actions::policy::{self, FollowContext};
use crate::actions::{ActionError, Dispatcher};
use crate::api::{ApiResponse, Endpoint};
use crate::cancel::CancelToken;
use crate::model::{EntityId, Entry, Field, FieldValue, FollowState};
use crate::reconcile::{OptimisticToggle, Outcome};
use crate::store::StoreState;

impl Dispatcher {
    /// Follow or unfollow `target`.
    ///
    /// The flag and every counter the policy selects are written as one
    /// batch. Counters the store has never seen are left alone rather than
    /// guessed from zero.
    pub async fn toggle_follow(
        &self,
        target: &EntityId,
        known: FollowState,
        context: &FollowContext,
        cancel: &CancelToken,
    ) -> Result<Outcome, ActionError> {
        let viewer = self.member("follow")?;
        if *target == viewer.user_id {
            return Err(ActionError::SelfFollow);
        }

        self.store().seed_missing(known.entries(target));

        let role = context.role(&viewer.user_id);
        let relation = context.relation(&viewer.user_id, target);
        let counter_keys: Vec<(EntityId, Field)> = policy::counters(role, relation)
            .iter()
            .filter_map(|counter| counter.key(&viewer.user_id, target, context))
            .collect();

        tracing::debug!(
            user = %target,
            ?role,
            ?relation,
            counters = counter_keys.len(),
            "Follow policy resolved"
        );

        let id = target.clone();
        let toggle = OptimisticToggle::new(
            (target.clone(), Field::Followed),
            Endpoint::ToggleFollow(target.clone()).request(),
        )
        .optimistic(move |state| {
            let next = FollowState::new(
                state.read(id.as_str(), Field::Followed).as_flag().unwrap_or(false),
            )
            .toggled();
            let mut entries = next.entries(&id);
            entries.extend(adjust_counters(state, &counter_keys, next.is_followed));
            entries
        })
        .authoritative(follow_counts(target.clone(), viewer.user_id.clone()));

        Ok(self.reconciler().run(toggle, cancel).await)
    }

    /// Remove `follower` from the viewer's followers.
    pub async fn remove_follower(
        &self,
        follower: &EntityId,
        cancel: &CancelToken,
    ) -> Result<Outcome, ActionError> {
        let viewer = self.member("remove a follower")?;
        if *follower == viewer.user_id {
            return Err(ActionError::SelfFollow);
        }

        let counter_keys = vec![
            (viewer.user_id.clone(), Field::FollowersCount),
            (follower.clone(), Field::FollowingCount),
        ];
        let viewer_id = viewer.user_id.clone();

        // Keyed on the follower's edge towards the viewer, so removing two
        // different followers never supersedes one another.
        let toggle = OptimisticToggle::new(
            (follower.clone(), Field::FollowingCount),
            Endpoint::RemoveFollower(follower.clone()).request(),
        )
        .optimistic(move |state| adjust_counters(state, &counter_keys, false))
        .authoritative(move |response| {
            response
                .data_count("followersCount")
                .map(|count| vec![Entry::new(viewer_id.clone(), Field::FollowersCount, count)])
                .unwrap_or_default()
        });

        Ok(self.reconciler().run(toggle, cancel).await)
    }
}

/// Move each known counter by one, never below zero.
fn adjust_counters(state: &StoreState, keys: &[(EntityId, Field)], increment: bool) -> Vec<Entry> {
    keys.iter()
        .filter_map(|(id, field)| match state.get(id.as_str(), *field) {
            Some(FieldValue::Count(count)) => {
                let next = if increment {
                    count + 1
                } else {
                    count.saturating_sub(1)
                };
                Some(Entry::new(id.clone(), *field, next))
            }
            _ => None,
        })
        .collect()
}

/// `isFollowed` and `followersCount` belong to the target, `followingCount`
/// to the viewer.
fn follow_counts(
    target: EntityId,
    viewer: EntityId,
) -> impl Fn(&ApiResponse) -> Vec<Entry> + Send + Sync + 'static {
    move |response| {
        let mut entries = Vec::new();
        if let Some(followed) = response.data_flag("isFollowed") {
            entries.push(Entry::new(target.clone(), Field::Followed, followed));
        }
        if let Some(followers) = response.data_count("followersCount") {
            entries.push(Entry::new(target.clone(), Field::FollowersCount, followers));
        }
        if let Some(following) = response.data_count("followingCount") {
            entries.push(Entry::new(viewer.clone(), Field::FollowingCount, following));
        }
        entries
    }
}
