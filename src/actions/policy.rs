//! Which follow counters move when the viewer follows someone.
//!
//! Keyed by where the follow button was pressed ([`ViewerRole`]) and who the
//! target is relative to that screen ([`TargetRelation`]). Only counters on
//! the acting user's own edge move; a third party's follow never touches the
//! profile owner's followers.

use crate::model::{EntityId, Field};

/// Screen the follow button lives on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowContext {
    /// Feed, search, post detail.
    Feed,
    /// A profile header or its followers/following list.
    Profile { owner: EntityId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerRole {
    Feed,
    OwnProfile,
    OtherProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRelation {
    /// The target is the owner of the profile being viewed.
    ProfileOwner,
    /// The target is the logged-in user.
    Viewer,
    ThirdParty,
}

/// A counter the policy adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    ViewerFollowing,
    TargetFollowers,
    OwnerFollowers,
}

impl FollowContext {
    pub fn owner(&self) -> Option<&EntityId> {
        match self {
            FollowContext::Feed => None,
            FollowContext::Profile { owner } => Some(owner),
        }
    }

    pub fn role(&self, viewer: &EntityId) -> ViewerRole {
        match self.owner() {
            None => ViewerRole::Feed,
            Some(owner) if owner == viewer => ViewerRole::OwnProfile,
            Some(_) => ViewerRole::OtherProfile,
        }
    }

    pub fn relation(&self, viewer: &EntityId, target: &EntityId) -> TargetRelation {
        if target == viewer {
            TargetRelation::Viewer
        } else if self.owner() == Some(target) {
            TargetRelation::ProfileOwner
        } else {
            TargetRelation::ThirdParty
        }
    }
}

/// Counters moved by one follow toggle.
///
/// Rows with [`TargetRelation::Viewer`] describe the logged-in user showing
/// up in someone else's list. The dispatcher refuses self-follow before it
/// consults this table, so those rows never move anything through
/// [`Dispatcher::toggle_follow`](crate::actions::Dispatcher::toggle_follow).
pub fn counters(role: ViewerRole, relation: TargetRelation) -> &'static [Counter] {
    use Counter::*;

    match (role, relation) {
        (ViewerRole::Feed, TargetRelation::ThirdParty) => &[ViewerFollowing, TargetFollowers],
        (ViewerRole::OwnProfile, TargetRelation::ThirdParty) => &[ViewerFollowing],
        (ViewerRole::OtherProfile, TargetRelation::ProfileOwner) => {
            &[OwnerFollowers, ViewerFollowing]
        }
        // Not reachable from the dispatcher: self-follow is rejected first.
        (ViewerRole::OtherProfile, TargetRelation::Viewer) => &[OwnerFollowers],
        (ViewerRole::OtherProfile, TargetRelation::ThirdParty) => &[TargetFollowers],
        // Viewer following themself, or an owner that cannot exist on this screen.
        (ViewerRole::Feed | ViewerRole::OwnProfile, _) => &[],
    }
}

impl Counter {
    /// The store key this counter lives at.
    pub fn key(
        self,
        viewer: &EntityId,
        target: &EntityId,
        context: &FollowContext,
    ) -> Option<(EntityId, Field)> {
        match self {
            Counter::ViewerFollowing => Some((viewer.clone(), Field::FollowingCount)),
            Counter::TargetFollowers => Some((target.clone(), Field::FollowersCount)),
            Counter::OwnerFollowers => context
                .owner()
                .map(|owner| (owner.clone(), Field::FollowersCount)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> EntityId {
        EntityId::from(s)
    }

    #[test]
    fn test_role_resolution() {
        let me = id("me");
        assert_eq!(FollowContext::Feed.role(&me), ViewerRole::Feed);
        assert_eq!(
            FollowContext::Profile { owner: id("me") }.role(&me),
            ViewerRole::OwnProfile
        );
        assert_eq!(
            FollowContext::Profile { owner: id("alice") }.role(&me),
            ViewerRole::OtherProfile
        );
    }

    #[test]
    fn test_relation_resolution() {
        let me = id("me");
        let ctx = FollowContext::Profile { owner: id("alice") };
        assert_eq!(ctx.relation(&me, &id("alice")), TargetRelation::ProfileOwner);
        assert_eq!(ctx.relation(&me, &id("me")), TargetRelation::Viewer);
        assert_eq!(ctx.relation(&me, &id("bob")), TargetRelation::ThirdParty);
    }

    #[test]
    fn test_third_party_on_other_profile_leaves_owner_alone() {
        let moved = counters(ViewerRole::OtherProfile, TargetRelation::ThirdParty);
        assert_eq!(moved, &[Counter::TargetFollowers]);
        assert!(!moved.contains(&Counter::OwnerFollowers));
    }

    #[test]
    fn test_own_profile_list_moves_viewer_following() {
        assert_eq!(
            counters(ViewerRole::OwnProfile, TargetRelation::ThirdParty),
            &[Counter::ViewerFollowing]
        );
    }

    #[test]
    fn test_profile_header_moves_both_edges() {
        assert_eq!(
            counters(ViewerRole::OtherProfile, TargetRelation::ProfileOwner),
            &[Counter::OwnerFollowers, Counter::ViewerFollowing]
        );
    }

    #[test]
    fn test_viewer_in_other_list_moves_owner_followers() {
        assert_eq!(
            counters(ViewerRole::OtherProfile, TargetRelation::Viewer),
            &[Counter::OwnerFollowers]
        );
    }

    #[test]
    fn test_self_targets_move_nothing() {
        assert!(counters(ViewerRole::Feed, TargetRelation::Viewer).is_empty());
        assert!(counters(ViewerRole::OwnProfile, TargetRelation::Viewer).is_empty());
    }

    #[test]
    fn test_counter_keys() {
        let ctx = FollowContext::Profile { owner: id("alice") };
        let (me, bob) = (id("me"), id("bob"));
        assert_eq!(
            Counter::ViewerFollowing.key(&me, &bob, &ctx),
            Some((id("me"), Field::FollowingCount))
        );
        assert_eq!(
            Counter::OwnerFollowers.key(&me, &bob, &ctx),
            Some((id("alice"), Field::FollowersCount))
        );
        assert_eq!(Counter::OwnerFollowers.key(&me, &bob, &FollowContext::Feed), None);
    }
}
